use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

use crate::domain::invoice::{InvoiceError, PdfRenderer};

const FOOTER_TEXT: &str = "Thank you! Visit us again.";

/// Converts staged invoice HTML into a PDF by shelling out to wkhtmltopdf.
pub struct WkHtmlToPdfRenderer {
  wkhtmltopdf_path: String,
}

impl WkHtmlToPdfRenderer {
  pub fn new(wkhtmltopdf_path: Option<String>) -> Self {
    let wkhtmltopdf_path = wkhtmltopdf_path.unwrap_or_else(|| "wkhtmltopdf".to_string());
    Self { wkhtmltopdf_path }
  }

  async fn verify_installed(&self) -> Result<(), InvoiceError> {
    let output = Command::new(&self.wkhtmltopdf_path)
      .arg("--version")
      .output()
      .await
      .map_err(|e| {
        InvoiceError::PdfGenerationFailed(format!(
          "wkhtmltopdf not found: {}. Please install wkhtmltopdf.",
          e
        ))
      })?;

    if !output.status.success() {
      return Err(InvoiceError::PdfGenerationFailed(
        "wkhtmltopdf is not working correctly".to_string(),
      ));
    }

    Ok(())
  }
}

#[async_trait]
impl PdfRenderer for WkHtmlToPdfRenderer {
  async fn html_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), InvoiceError> {
    self.verify_installed().await?;

    tracing::info!(
      html = %html_path.display(),
      pdf = %pdf_path.display(),
      "Converting invoice HTML to PDF"
    );

    let output = Command::new(&self.wkhtmltopdf_path)
      .args([
        "--page-width",
        "200mm",
        "--page-height",
        "230mm",
        "--margin-top",
        "5mm",
        "--margin-bottom",
        "5mm",
        "--margin-left",
        "5mm",
        "--margin-right",
        "5mm",
        // Relative asset paths in the HTML resolve against its directory
        "--enable-local-file-access",
        "--footer-center",
        FOOTER_TEXT,
        "--footer-font-size",
        "8",
        "--quiet",
      ])
      .arg(html_path)
      .arg(pdf_path)
      .output()
      .await
      .map_err(|e| {
        InvoiceError::PdfGenerationFailed(format!("wkhtmltopdf execution failed: {}", e))
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(InvoiceError::PdfGenerationFailed(format!(
        "wkhtmltopdf failed: {}",
        stderr
      )));
    }

    if !pdf_path.exists() {
      return Err(InvoiceError::PdfGenerationFailed(
        "PDF file was not created".to_string(),
      ));
    }

    Ok(())
  }
}
