use rust_decimal::Decimal;
use std::path::Path;

/// Filename used when no logo is uploaded. Whatever file already sits at
/// this name in the workspace is reused; a missing file renders no logo.
pub const DEFAULT_LOGO_FILE: &str = "company_logo.jpg";

/// Accepted logo image formats. The distinction between Jpg and Jpeg is kept
/// because the stored filename preserves the uploaded extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
  Jpg,
  Jpeg,
  Png,
}

impl LogoFormat {
  /// Derive the format from a file name, matching the extension
  /// case-insensitively. Returns `None` for anything outside
  /// jpg/jpeg/png.
  pub fn from_file_name(file_name: &str) -> Option<Self> {
    let extension = Path::new(file_name)
      .extension()
      .and_then(|ext| ext.to_str())?
      .to_lowercase();
    match extension.as_str() {
      "jpg" => Some(LogoFormat::Jpg),
      "jpeg" => Some(LogoFormat::Jpeg),
      "png" => Some(LogoFormat::Png),
      _ => None,
    }
  }

  pub fn extension(&self) -> &'static str {
    match self {
      LogoFormat::Jpg => ".jpg",
      LogoFormat::Jpeg => ".jpeg",
      LogoFormat::Png => ".png",
    }
  }

  pub fn mime_type(&self) -> &'static str {
    match self {
      LogoFormat::Jpg | LogoFormat::Jpeg => "image/jpeg",
      LogoFormat::Png => "image/png",
    }
  }

  /// Canonical filename the logo is stored under in the workspace.
  pub fn file_name(&self) -> String {
    format!("company_logo{}", self.extension())
  }
}

/// Currencies with a known display symbol. Anything else falls back to its
/// uppercased code in `money_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
  INR,
  USD,
  EUR,
  GBP,
}

impl Currency {
  /// Look up a currency by its code, case-insensitively. Returns `None`
  /// for codes without a known symbol.
  pub fn from_code(code: &str) -> Option<Self> {
    match code.trim().to_uppercase().as_str() {
      "INR" => Some(Currency::INR),
      "USD" => Some(Currency::USD),
      "EUR" => Some(Currency::EUR),
      "GBP" => Some(Currency::GBP),
      _ => None,
    }
  }

  pub fn symbol(&self) -> &'static str {
    match self {
      Currency::INR => "\u{20b9}",
      Currency::USD => "$",
      Currency::EUR => "\u{20ac}",
      Currency::GBP => "\u{a3}",
    }
  }
}

/// Format an amount for display: `₹51.00` for known currencies,
/// `XYZ 51.00` for unknown codes, plain `51.00` when no currency is given.
pub fn money_format(currency: Option<&str>, amount: Decimal) -> String {
  match currency.map(str::trim).filter(|c| !c.is_empty()) {
    Some(code) => match Currency::from_code(code) {
      Some(currency) => format!("{}{:.2}", currency.symbol(), amount),
      None => format!("{} {:.2}", code.to_uppercase(), amount),
    },
    None => format!("{:.2}", amount),
  }
}
