use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::domain::invoice::{InvoiceError, InvoiceNumberAllocator};

/// Invoice number allocator persisting the last allocated number in a plain
/// text file. Allocations are serialized behind a mutex within the process.
pub struct FileInvoiceNumberAllocator {
  path: PathBuf,
  lock: Mutex<()>,
}

impl FileInvoiceNumberAllocator {
  pub fn new(path: PathBuf) -> Self {
    Self {
      path,
      lock: Mutex::new(()),
    }
  }

  async fn read_current(&self) -> Result<u64, InvoiceError> {
    match tokio::fs::read_to_string(&self.path).await {
      Ok(contents) => Ok(contents.trim().parse::<u64>().unwrap_or_else(|_| {
        tracing::warn!(
          path = %self.path.display(),
          "Invoice counter file is unreadable, restarting from zero"
        );
        0
      })),
      Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
      Err(err) => Err(err.into()),
    }
  }
}

#[async_trait]
impl InvoiceNumberAllocator for FileInvoiceNumberAllocator {
  async fn next_number(&self) -> Result<u64, InvoiceError> {
    let _guard = self.lock.lock().await;

    let next = self.read_current().await? + 1;
    if let Some(parent) = self.path.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.path, next.to_string()).await?;
    Ok(next)
  }
}
