use serde::Serialize;

/// Response after successful invoice creation
#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceHttpResponse {
  /// Success message
  pub message: String,

  /// The allocated invoice number
  #[serde(rename = "invoiceNumber")]
  pub invoice_number: u64,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Human-readable error message
  pub message: String,
}
