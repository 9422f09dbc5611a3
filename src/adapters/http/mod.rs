pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use dtos::{CreateInvoiceHttpResponse, ErrorResponse};
pub use errors::ApiError;
pub use handlers::invoices::{create_invoice_handler, get_invoice_pdf_handler};
pub use routes::configure_invoice_routes;
