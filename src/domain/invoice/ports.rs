use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::entities::{Invoice, LogoAsset};
use super::errors::InvoiceError;
use super::value_objects::LogoFormat;

/// Hands out strictly increasing invoice numbers backed by durable storage.
#[async_trait]
pub trait InvoiceNumberAllocator: Send + Sync {
  async fn next_number(&self) -> Result<u64, InvoiceError>;
}

/// Renders an invoice record into a complete HTML document.
pub trait InvoiceHtmlRenderer: Send + Sync {
  fn render(&self, invoice: &Invoice, logo: Option<&LogoAsset>) -> Result<String, InvoiceError>;
}

/// Converts a staged HTML file into a PDF file.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
  async fn html_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), InvoiceError>;
}

/// Paths for one in-flight invoice generation. The HTML and PDF live in a
/// private directory until the PDF is published.
#[derive(Debug, Clone)]
pub struct InvoiceJob {
  pub dir: PathBuf,
  pub html_path: PathBuf,
  pub pdf_path: PathBuf,
}

/// Filesystem workspace for invoice artifacts: the shared logo, staged
/// per-job HTML/PDF files and the published invoice PDF.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
  /// Persist an uploaded logo under its canonical name, replacing any
  /// previous logo of the same format. Returns the stored filename.
  async fn store_logo(&self, format: LogoFormat, bytes: &[u8]) -> Result<String, InvoiceError>;

  /// Load the named logo file. `Ok(None)` when the file does not exist.
  async fn read_logo(&self, file_name: &str) -> Result<Option<Vec<u8>>, InvoiceError>;

  /// Write rendered HTML into a fresh job directory.
  async fn stage_html(&self, html: &str) -> Result<InvoiceJob, InvoiceError>;

  /// Atomically publish a converted PDF as the current invoice document and
  /// clean up the job directory. Returns the published path.
  async fn publish_pdf(&self, job: &InvoiceJob) -> Result<PathBuf, InvoiceError>;

  /// Path of the most recently published invoice PDF, if any.
  async fn current_pdf(&self) -> Option<PathBuf>;
}
