use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{CreateInvoiceUseCase, GetInvoicePdfUseCase};

use super::handlers::invoices::{create_invoice_handler, get_invoice_pdf_handler};

/// Configure invoice routes
///
/// Mounts the invoice endpoints under the provided scope (e.g.
/// /api/v1/invoices).
///
/// # Routes
///
/// - POST `` - Create an invoice and generate its PDF
/// - GET `/pdf` - Download the most recently generated invoice PDF
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  get_invoice_pdf_use_case: Arc<GetInvoicePdfUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_invoice_use_case))
    .app_data(web::Data::new(get_invoice_pdf_use_case))
    .route("", web::post().to(create_invoice_handler))
    .route("/pdf", web::get().to(get_invoice_pdf_handler));
}
