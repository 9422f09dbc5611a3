use std::path::PathBuf;
use std::sync::Arc;

use super::entities::{Invoice, InvoiceDetails, LogoAsset, LogoUpload};
use super::errors::InvoiceError;
use super::ports::{ArtifactStore, InvoiceHtmlRenderer, InvoiceNumberAllocator, PdfRenderer};
use super::value_objects::{DEFAULT_LOGO_FILE, LogoFormat};

pub struct InvoiceServiceDependencies {
  pub allocator: Arc<dyn InvoiceNumberAllocator>,
  pub artifacts: Arc<dyn ArtifactStore>,
  pub html_renderer: Arc<dyn InvoiceHtmlRenderer>,
  pub pdf_renderer: Arc<dyn PdfRenderer>,
}

/// Orchestrates the invoice pipeline: allocate a number, ingest the logo,
/// render HTML, convert to PDF and publish the result.
pub struct InvoiceService {
  allocator: Arc<dyn InvoiceNumberAllocator>,
  artifacts: Arc<dyn ArtifactStore>,
  html_renderer: Arc<dyn InvoiceHtmlRenderer>,
  pdf_renderer: Arc<dyn PdfRenderer>,
}

impl InvoiceService {
  pub fn new(deps: InvoiceServiceDependencies) -> Self {
    Self {
      allocator: deps.allocator,
      artifacts: deps.artifacts,
      html_renderer: deps.html_renderer,
      pdf_renderer: deps.pdf_renderer,
    }
  }

  /// Run one invoice through the full pipeline and return its number.
  ///
  /// Single pass, no retries: any step failing is terminal for the request.
  /// A number allocated before a later failure is not reclaimed.
  pub async fn create_invoice(
    &self,
    mut invoice: Invoice,
    logo: Option<LogoUpload>,
  ) -> Result<u64, InvoiceError> {
    let number = self.allocator.next_number().await?;
    invoice.details.invoice_number = Some(number);

    match logo {
      Some(upload) => {
        let format = LogoFormat::from_file_name(&upload.file_name)
          .ok_or_else(|| InvoiceError::UnsupportedLogoFormat(upload.file_name.clone()))?;
        let file_name = self.artifacts.store_logo(format, &upload.bytes).await?;
        invoice.details.company_logo = Some(file_name);
      }
      None => invoice.details.company_logo = Some(DEFAULT_LOGO_FILE.to_string()),
    }

    let logo_asset = self.load_logo(&invoice.details).await;
    let html = self.html_renderer.render(&invoice, logo_asset.as_ref())?;

    let job = self.artifacts.stage_html(&html).await?;
    self
      .pdf_renderer
      .html_to_pdf(&job.html_path, &job.pdf_path)
      .await?;
    let published = self.artifacts.publish_pdf(&job).await?;

    tracing::info!(
      invoice_number = number,
      path = %published.display(),
      "Invoice PDF published"
    );
    Ok(number)
  }

  /// Path of the most recently published invoice PDF.
  pub async fn current_pdf(&self) -> Result<PathBuf, InvoiceError> {
    self
      .artifacts
      .current_pdf()
      .await
      .ok_or(InvoiceError::PdfNotFound)
  }

  async fn load_logo(&self, details: &InvoiceDetails) -> Option<LogoAsset> {
    let file_name = details.company_logo.as_deref()?;
    let format = LogoFormat::from_file_name(file_name)?;
    match self.artifacts.read_logo(file_name).await {
      Ok(Some(bytes)) => Some(LogoAsset { format, bytes }),
      Ok(None) => {
        tracing::warn!(logo = file_name, "Logo file not found, rendering without logo");
        None
      }
      Err(err) => {
        tracing::warn!(
          logo = file_name,
          error = %err,
          "Failed to read logo, rendering without logo"
        );
        None
      }
    }
  }
}
