pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Invoice, InvoiceDetails, LineItem, LogoAsset, LogoUpload};
pub use errors::InvoiceError;
pub use ports::{
  ArtifactStore, InvoiceHtmlRenderer, InvoiceJob, InvoiceNumberAllocator, PdfRenderer,
};
pub use services::{InvoiceService, InvoiceServiceDependencies};
pub use value_objects::{Currency, DEFAULT_LOGO_FILE, LogoFormat, money_format};
