use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;
use tera::Tera;

use crate::domain::invoice::{
  Invoice, InvoiceDetails, InvoiceError, InvoiceHtmlRenderer, LogoAsset, money_format,
};

const TEMPLATE_NAME: &str = "invoice.html";
const INVOICE_TEMPLATE: &str = include_str!("../../../templates/invoice.html.tera");

/// Tera-backed invoice renderer. The template is compiled into the binary
/// and rendered with autoescaping, so caller-supplied text cannot inject
/// markup into the document.
pub struct TeraInvoiceRenderer {
  tera: Tera,
}

impl TeraInvoiceRenderer {
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, INVOICE_TEMPLATE)?;
    tera.autoescape_on(vec![".html"]);
    Ok(Self { tera })
  }
}

impl InvoiceHtmlRenderer for TeraInvoiceRenderer {
  fn render(&self, invoice: &Invoice, logo: Option<&LogoAsset>) -> Result<String, InvoiceError> {
    let context = build_context(invoice, logo);
    self
      .tera
      .render(TEMPLATE_NAME, &context)
      .map_err(|err| InvoiceError::Render(err.to_string()))
  }
}

#[derive(Serialize)]
struct LineItemRow {
  description: String,
  quantity: String,
  price: String,
  amount: String,
}

fn build_context(invoice: &Invoice, logo: Option<&LogoAsset>) -> tera::Context {
  let details = &invoice.details;
  let currency = details.currency.as_deref();

  let mut context = tera::Context::new();
  context.insert("logo_data_uri", &logo.map(logo_data_uri));
  context.insert("company_name", details.company_name.as_deref().unwrap_or(""));
  context.insert(
    "company_address",
    details.company_address.as_deref().unwrap_or(""),
  );
  context.insert("company_phone", &details.company_phone);
  context.insert("invoice_number", &details.invoice_number);
  context.insert("invoice_date", &invoice_date(details));
  context.insert(
    "billing_name",
    details.billing_name.as_deref().unwrap_or("Customer"),
  );
  context.insert("billing_phone", &details.billing_phone);
  context.insert(
    "billing_address_lines",
    &address_lines(details.billing_address.as_deref()),
  );
  context.insert(
    "shipping_name",
    details.shipping_name.as_deref().unwrap_or(""),
  );
  context.insert(
    "shipping_address_lines",
    &address_lines(details.shipping_address.as_deref()),
  );

  let rows: Vec<LineItemRow> = invoice
    .line_items
    .iter()
    .map(|item| LineItemRow {
      description: item.description.clone(),
      quantity: item.quantity.normalize().to_string(),
      price: money_format(currency, item.price),
      amount: money_format(currency, item.amount()),
    })
    .collect();
  context.insert("line_items", &rows);

  let total = money_format(currency, invoice.total());
  context.insert("subtotal", &total);
  context.insert("total", &total);
  context
}

fn logo_data_uri(logo: &LogoAsset) -> String {
  format!(
    "data:{};base64,{}",
    logo.format.mime_type(),
    general_purpose::STANDARD.encode(&logo.bytes)
  )
}

/// Address lines are separated by `/` in the payload and rendered as
/// individual lines in the document.
fn address_lines(address: Option<&str>) -> Vec<String> {
  address
    .map(|address| address.split('/').map(str::to_string).collect())
    .unwrap_or_default()
}

fn invoice_date(details: &InvoiceDetails) -> String {
  details
    .invoice_date
    .clone()
    .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string())
}
