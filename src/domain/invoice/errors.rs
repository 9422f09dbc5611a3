use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Invalid or empty payload")]
  EmptyPayload,

  #[error("Unsupported logo format: {0}")]
  UnsupportedLogoFormat(String),

  #[error("Template rendering failed: {0}")]
  Render(String),

  #[error("PDF generation failed: {0}")]
  PdfGenerationFailed(String),

  #[error("Invoice PDF not found")]
  PdfNotFound,

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}
