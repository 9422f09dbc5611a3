use rust_decimal::Decimal;

use super::value_objects::LogoFormat;

/// A single invoice as supplied by the caller.
///
/// The allocated invoice number and the resolved logo filename are injected
/// into `details` by the service before rendering.
#[derive(Debug, Clone, Default)]
pub struct Invoice {
  pub details: InvoiceDetails,
  pub line_items: Vec<LineItem>,
}

impl Invoice {
  /// Sum of all line item amounts.
  pub fn total(&self) -> Decimal {
    self
      .line_items
      .iter()
      .fold(Decimal::ZERO, |acc, item| acc + item.amount())
  }
}

/// Header-level invoice fields. Everything the caller supplies is optional;
/// absent fields render as empty values.
#[derive(Debug, Clone, Default)]
pub struct InvoiceDetails {
  pub currency: Option<String>,
  pub company_logo: Option<String>,
  pub company_name: Option<String>,
  pub company_address: Option<String>,
  pub company_phone: Option<String>,
  pub invoice_number: Option<u64>,
  pub invoice_date: Option<String>,
  pub billing_name: Option<String>,
  pub billing_phone: Option<String>,
  pub billing_address: Option<String>,
  pub shipping_name: Option<String>,
  pub shipping_address: Option<String>,
}

/// One purchasable entry. Quantity and price have already been coerced at
/// the edge; missing or non-numeric values arrive here as zero.
#[derive(Debug, Clone)]
pub struct LineItem {
  pub description: String,
  pub quantity: Decimal,
  pub price: Decimal,
}

impl LineItem {
  pub fn amount(&self) -> Decimal {
    self.quantity * self.price
  }
}

/// An uploaded logo image, not yet validated.
#[derive(Debug, Clone)]
pub struct LogoUpload {
  pub file_name: String,
  pub bytes: Vec<u8>,
}

/// A logo image loaded from the artifact workspace, ready for embedding.
#[derive(Debug, Clone)]
pub struct LogoAsset {
  pub format: LogoFormat,
  pub bytes: Vec<u8>,
}
