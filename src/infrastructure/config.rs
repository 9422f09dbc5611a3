use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub workspace: WorkspaceConfig,
  pub pdf: PdfConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Artifact workspace configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
  /// Directory holding the logo, staged jobs and the published invoice PDF
  pub dir: String,
  /// File persisting the last allocated invoice number
  pub counter_file: String,
}

/// PDF generation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
  /// Path to the wkhtmltopdf binary; defaults to `wkhtmltopdf` on $PATH
  #[serde(default)]
  pub wkhtmltopdf_path: Option<String>,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override
  /// earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with QUICKBILL_ prefix
  ///
  /// Environment variables use double underscores as section separators:
  /// - `QUICKBILL_SERVER__HOST=0.0.0.0`
  /// - `QUICKBILL_SERVER__PORT=8080`
  /// - `QUICKBILL_WORKSPACE__DIR=/var/lib/quickbill`
  /// - `QUICKBILL_PDF__WKHTMLTOPDF_PATH=/usr/local/bin/wkhtmltopdf`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("QUICKBILL")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
