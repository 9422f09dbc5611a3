use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::invoice::{
  Invoice, InvoiceDetails, InvoiceError, InvoiceService, LineItem, LogoUpload,
};

/// Invoice payload as sent by the caller. Every field is optional; the
/// invoice number is always allocated server-side and any client-supplied
/// value is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoicePayload {
  pub details: InvoiceDetailsPayload,
  pub line_items: Vec<LineItemPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDetailsPayload {
  pub currency: Option<String>,
  pub company_logo: Option<String>,
  pub company_name: Option<String>,
  pub company_address: Option<String>,
  pub company_phone: Option<String>,
  pub invoice_date: Option<String>,
  pub billing_name: Option<String>,
  pub billing_phone: Option<String>,
  pub billing_address: Option<String>,
  pub shipping_name: Option<String>,
  pub shipping_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemPayload {
  pub description: Option<String>,
  #[serde(deserialize_with = "lenient_decimal")]
  pub quantity: Decimal,
  #[serde(deserialize_with = "lenient_decimal")]
  pub price: Decimal,
}

/// Accept numbers, numeric strings, or anything else; non-numeric and
/// missing values coerce to zero rather than failing the request.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
  D: Deserializer<'de>,
{
  let value = serde_json::Value::deserialize(deserializer)?;
  Ok(coerce_decimal(&value))
}

fn coerce_decimal(value: &serde_json::Value) -> Decimal {
  let text = match value {
    serde_json::Value::Number(number) => number.to_string(),
    serde_json::Value::String(text) => text.trim().to_string(),
    _ => return Decimal::ZERO,
  };
  Decimal::from_str(&text)
    .or_else(|_| Decimal::from_scientific(&text))
    .unwrap_or(Decimal::ZERO)
}

impl InvoicePayload {
  fn into_invoice(self) -> Invoice {
    let details = self.details;
    Invoice {
      details: InvoiceDetails {
        currency: details.currency,
        company_logo: details.company_logo,
        company_name: details.company_name,
        company_address: details.company_address,
        company_phone: details.company_phone,
        invoice_number: None,
        invoice_date: details.invoice_date,
        billing_name: details.billing_name,
        billing_phone: details.billing_phone,
        billing_address: details.billing_address,
        shipping_name: details.shipping_name,
        shipping_address: details.shipping_address,
      },
      line_items: self
        .line_items
        .into_iter()
        .map(|item| LineItem {
          description: item.description.unwrap_or_default(),
          quantity: item.quantity,
          price: item.price,
        })
        .collect(),
    }
  }
}

#[derive(Debug)]
pub struct CreateInvoiceCommand {
  pub payload: InvoicePayload,
  pub logo: Option<LogoUpload>,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
  pub invoice_number: u64,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<CreateInvoiceResponse, InvoiceError> {
    let invoice = command.payload.into_invoice();
    let invoice_number = self
      .invoice_service
      .create_invoice(invoice, command.logo)
      .await?;
    Ok(CreateInvoiceResponse { invoice_number })
  }
}
