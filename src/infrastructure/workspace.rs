use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::domain::invoice::{ArtifactStore, InvoiceError, InvoiceJob, LogoFormat};

const INVOICE_HTML_FILE: &str = "invoice.html";
const INVOICE_PDF_FILE: &str = "invoice.pdf";

/// Filesystem-backed artifact workspace.
///
/// Layout:
/// - `<root>/company_logo.<ext>` — shared logo, overwritten on upload
/// - `<root>/jobs/<uuid>/` — staged HTML/PDF for one in-flight invoice
/// - `<root>/invoice.pdf` — the published invoice, served on retrieval
///
/// Publication is a same-filesystem rename, so a concurrently running
/// creation can never expose a half-written PDF; the last publisher wins.
pub struct FsArtifactStore {
  root: PathBuf,
}

impl FsArtifactStore {
  /// Create the workspace, ensuring the root directory exists.
  pub fn new(root: PathBuf) -> Result<Self, std::io::Error> {
    std::fs::create_dir_all(&root)?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn canonical_pdf(&self) -> PathBuf {
    self.root.join(INVOICE_PDF_FILE)
  }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
  async fn store_logo(&self, format: LogoFormat, bytes: &[u8]) -> Result<String, InvoiceError> {
    let file_name = format.file_name();
    tokio::fs::write(self.root.join(&file_name), bytes).await?;
    Ok(file_name)
  }

  async fn read_logo(&self, file_name: &str) -> Result<Option<Vec<u8>>, InvoiceError> {
    match tokio::fs::read(self.root.join(file_name)).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
      Err(err) => Err(err.into()),
    }
  }

  async fn stage_html(&self, html: &str) -> Result<InvoiceJob, InvoiceError> {
    let dir = self.root.join("jobs").join(Uuid::new_v4().to_string());
    tokio::fs::create_dir_all(&dir).await?;
    let html_path = dir.join(INVOICE_HTML_FILE);
    tokio::fs::write(&html_path, html).await?;
    Ok(InvoiceJob {
      pdf_path: dir.join(INVOICE_PDF_FILE),
      html_path,
      dir,
    })
  }

  async fn publish_pdf(&self, job: &InvoiceJob) -> Result<PathBuf, InvoiceError> {
    let target = self.canonical_pdf();
    tokio::fs::rename(&job.pdf_path, &target).await?;
    if let Err(err) = tokio::fs::remove_dir_all(&job.dir).await {
      tracing::warn!(
        dir = %job.dir.display(),
        error = %err,
        "Failed to clean up invoice job directory"
      );
    }
    Ok(target)
  }

  async fn current_pdf(&self) -> Option<PathBuf> {
    let path = self.canonical_pdf();
    match tokio::fs::try_exists(&path).await {
      Ok(true) => Some(path),
      _ => None,
    }
  }
}
