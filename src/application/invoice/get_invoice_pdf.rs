use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService};

/// Resolves the most recently published invoice PDF for download.
pub struct GetInvoicePdfUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoicePdfUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<PathBuf, InvoiceError> {
    self.invoice_service.current_pdf().await
  }
}
