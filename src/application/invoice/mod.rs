pub mod create_invoice;
pub mod get_invoice_pdf;

pub use create_invoice::{
  CreateInvoiceCommand, CreateInvoiceResponse, CreateInvoiceUseCase, InvoiceDetailsPayload,
  InvoicePayload, LineItemPayload,
};
pub use get_invoice_pdf::GetInvoicePdfUseCase;
