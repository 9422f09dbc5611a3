use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::invoice::InvoiceError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Payload field absent or an empty JSON object (400 Bad Request)
  EmptyPayload,

  /// Uploaded logo has a disallowed extension (400 Bad Request)
  UnsupportedFileFormat,

  /// PDF conversion failed (500 Internal Server Error)
  PdfGeneration(String),

  /// No invoice PDF has been generated yet (404 Not Found)
  NotFound,

  /// Any other failure while creating an invoice (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::EmptyPayload => write!(f, "Invalid or empty payload"),
      ApiError::UnsupportedFileFormat => write!(f, "Unsupported file format"),
      ApiError::PdfGeneration(msg) => write!(f, "PDF generation error: {}", msg),
      ApiError::NotFound => write!(f, "Invoice not found"),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::EmptyPayload => StatusCode::BAD_REQUEST,
      ApiError::UnsupportedFileFormat => StatusCode::BAD_REQUEST,
      ApiError::PdfGeneration(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let message = match self {
      ApiError::EmptyPayload => "Invalid or empty payload",
      ApiError::UnsupportedFileFormat => "Unsupported file format",
      ApiError::PdfGeneration(msg) => {
        // Details are logged, never exposed to the caller
        tracing::error!("PDF generation error: {}", msg);
        "Error generating PDF"
      }
      ApiError::NotFound => "Invoice not found",
      ApiError::Internal(msg) => {
        tracing::error!("Error creating invoice: {}", msg);
        "Server error creating invoice"
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ErrorResponse {
        message: message.to_string(),
      })
  }
}

/// Convert InvoiceError to ApiError
impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::EmptyPayload => ApiError::EmptyPayload,
      InvoiceError::UnsupportedLogoFormat(_) => ApiError::UnsupportedFileFormat,
      InvoiceError::PdfGenerationFailed(msg) => ApiError::PdfGeneration(msg),
      InvoiceError::PdfNotFound => ApiError::NotFound,
      InvoiceError::Render(msg) => ApiError::Internal(format!("Template rendering failed: {}", msg)),
      InvoiceError::Io(err) => ApiError::Internal(err.to_string()),
    }
  }
}
