use actix_files::NamedFile;
use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::{dtos::CreateInvoiceHttpResponse, errors::ApiError};
use crate::application::invoice::{
  CreateInvoiceCommand, CreateInvoiceUseCase, GetInvoicePdfUseCase, InvoicePayload,
};
use crate::domain::invoice::LogoUpload;

/// Multipart form for invoice creation
#[derive(Debug, MultipartForm)]
pub struct CreateInvoiceForm {
  /// JSON-encoded invoice payload
  #[multipart(rename = "invoiceData")]
  pub invoice_data: Option<Text<String>>,

  /// Optional company logo image
  #[multipart(rename = "companyLogo", limit = "10MB")]
  pub company_logo: Option<TempFile>,
}

/// Handler for invoice creation
///
/// POST /api/v1/invoices
/// Body: multipart form with a JSON-encoded `invoiceData` field and an
/// optional `companyLogo` file part
/// Response: CreateInvoiceHttpResponse (JSON) with status 200
pub async fn create_invoice_handler(
  form: MultipartForm<CreateInvoiceForm>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let form = form.into_inner();

  let payload = parse_payload(form.invoice_data.map(|text| text.into_inner()))?;
  let logo = match form.company_logo {
    Some(upload) => Some(read_logo_upload(upload).await?),
    None => None,
  };

  let response = use_case
    .execute(CreateInvoiceCommand { payload, logo })
    .await?;

  Ok(HttpResponse::Ok().json(CreateInvoiceHttpResponse {
    message: "Invoice created successfully".to_string(),
    invoice_number: response.invoice_number,
  }))
}

/// Handler for invoice retrieval
///
/// GET /api/v1/invoices/pdf
/// Response: the most recently generated PDF, or 404 if none exists yet
pub async fn get_invoice_pdf_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<GetInvoicePdfUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let path = use_case.execute().await?;
  let file = NamedFile::open_async(&path)
    .await
    .map_err(|err| ApiError::Internal(format!("Failed to open invoice PDF: {}", err)))?;
  Ok(file.into_response(&req))
}

/// Parse the `invoiceData` field. An absent field or an empty JSON object is
/// a client error; anything present but malformed is a server error.
fn parse_payload(raw: Option<String>) -> Result<InvoicePayload, ApiError> {
  let raw = raw.unwrap_or_else(|| "{}".to_string());
  let value: serde_json::Value = serde_json::from_str(&raw)
    .map_err(|err| ApiError::Internal(format!("invoiceData is not valid JSON: {}", err)))?;

  if !value.as_object().is_some_and(|fields| !fields.is_empty()) {
    return Err(ApiError::EmptyPayload);
  }

  serde_json::from_value(value)
    .map_err(|err| ApiError::Internal(format!("invoiceData has unexpected shape: {}", err)))
}

async fn read_logo_upload(upload: TempFile) -> Result<LogoUpload, ApiError> {
  let file_name = upload.file_name.clone().unwrap_or_default();
  let bytes = tokio::fs::read(upload.file.path())
    .await
    .map_err(|err| ApiError::Internal(format!("Failed to read uploaded logo: {}", err)))?;
  Ok(LogoUpload { file_name, bytes })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::http::routes::configure_invoice_routes;
  use crate::domain::invoice::{
    ArtifactStore, InvoiceError, InvoiceHtmlRenderer, InvoiceNumberAllocator, InvoiceService,
    InvoiceServiceDependencies, PdfRenderer,
  };
  use crate::infrastructure::counter::FileInvoiceNumberAllocator;
  use crate::infrastructure::render::TeraInvoiceRenderer;
  use crate::infrastructure::workspace::FsArtifactStore;
  use actix_web::http::{StatusCode, header};
  use actix_web::{App, test};
  use async_trait::async_trait;
  use std::path::Path;
  use std::sync::Mutex;

  const BOUNDARY: &str = "----quickbill-test-boundary";

  /// Stands in for wkhtmltopdf: records the staged HTML and writes a stub
  /// PDF to the expected output path.
  #[derive(Default)]
  struct CapturingPdfRenderer {
    html: Mutex<Vec<String>>,
  }

  #[async_trait]
  impl PdfRenderer for CapturingPdfRenderer {
    async fn html_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), InvoiceError> {
      let html = tokio::fs::read_to_string(html_path).await?;
      self.html.lock().unwrap().push(html);
      tokio::fs::write(pdf_path, b"%PDF-1.4 stub").await?;
      Ok(())
    }
  }

  struct FailingPdfRenderer;

  #[async_trait]
  impl PdfRenderer for FailingPdfRenderer {
    async fn html_to_pdf(&self, _html_path: &Path, _pdf_path: &Path) -> Result<(), InvoiceError> {
      Err(InvoiceError::PdfGenerationFailed(
        "converter exploded".to_string(),
      ))
    }
  }

  fn use_cases(
    root: &Path,
    pdf_renderer: Arc<dyn PdfRenderer>,
  ) -> (Arc<CreateInvoiceUseCase>, Arc<GetInvoicePdfUseCase>) {
    let artifacts: Arc<dyn ArtifactStore> =
      Arc::new(FsArtifactStore::new(root.join("workspace")).unwrap());
    let allocator: Arc<dyn InvoiceNumberAllocator> =
      Arc::new(FileInvoiceNumberAllocator::new(root.join("counter")));
    let html_renderer: Arc<dyn InvoiceHtmlRenderer> = Arc::new(TeraInvoiceRenderer::new().unwrap());

    let service = Arc::new(InvoiceService::new(InvoiceServiceDependencies {
      allocator,
      artifacts,
      html_renderer,
      pdf_renderer,
    }));
    (
      Arc::new(CreateInvoiceUseCase::new(service.clone())),
      Arc::new(GetInvoicePdfUseCase::new(service)),
    )
  }

  macro_rules! test_app {
    ($create:expr, $get_pdf:expr) => {{
      let create = $create.clone();
      let get_pdf = $get_pdf.clone();
      test::init_service(App::new().service(actix_web::web::scope("/api/v1/invoices").configure(
        move |cfg| configure_invoice_routes(cfg, create.clone(), get_pdf.clone()),
      )))
      .await
    }};
  }

  fn create_request(
    invoice_data: Option<&str>,
    logo: Option<(&str, &str, &[u8])>,
  ) -> test::TestRequest {
    let mut body: Vec<u8> = Vec::new();
    match invoice_data {
      Some(json) => body.extend_from_slice(
        format!(
          "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"invoiceData\"\r\n\r\n{json}\r\n"
        )
        .as_bytes(),
      ),
      // Keep the body a valid multipart document even without invoiceData
      None => body.extend_from_slice(
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nx\r\n")
          .as_bytes(),
      ),
    }
    if let Some((file_name, content_type, bytes)) = logo {
      body.extend_from_slice(
        format!(
          "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"companyLogo\"; \
           filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
      );
      body.extend_from_slice(bytes);
      body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    test::TestRequest::post()
      .uri("/api/v1/invoices")
      .insert_header((
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
      ))
      .set_payload(body)
  }

  const SOAP_PAYLOAD: &str = r#"{
    "details": {"currency": "INR", "invoiceDate": "2024-01-01"},
    "lineItems": [{"description": "Soap", "quantity": 2, "price": "25.50"}]
  }"#;

  #[actix_web::test]
  async fn test_retrieval_before_any_creation_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let (create, get_pdf) = use_cases(dir.path(), Arc::new(CapturingPdfRenderer::default()));
    let app = test_app!(create, get_pdf);

    let response = test::call_service(
      &app,
      test::TestRequest::get().uri("/api/v1/invoices/pdf").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Invoice not found");
  }

  #[actix_web::test]
  async fn test_create_then_retrieve_invoice_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_renderer = Arc::new(CapturingPdfRenderer::default());
    let (create, get_pdf) = use_cases(dir.path(), pdf_renderer.clone());
    let app = test_app!(create, get_pdf);

    let response = test::call_service(&app, create_request(Some(SOAP_PAYLOAD), None).to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Invoice created successfully");
    assert_eq!(body["invoiceNumber"], 1);

    let response = test::call_service(
      &app,
      test::TestRequest::get().uri("/api/v1/invoices/pdf").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
      response.headers().get(header::CONTENT_TYPE).unwrap(),
      "application/pdf"
    );
    let body = test::read_body(response).await;
    assert_eq!(body, b"%PDF-1.4 stub".as_ref());
  }

  #[actix_web::test]
  async fn test_rendered_invoice_contains_computed_amounts() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_renderer = Arc::new(CapturingPdfRenderer::default());
    let (create, get_pdf) = use_cases(dir.path(), pdf_renderer.clone());
    let app = test_app!(create, get_pdf);

    let response = test::call_service(&app, create_request(Some(SOAP_PAYLOAD), None).to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let captured = pdf_renderer.html.lock().unwrap();
    let html = &captured[0];
    assert!(html.contains("<td>Soap</td>"));
    assert!(html.contains("<td>2</td>"));
    assert!(html.contains("<td>\u{20b9}25.50</td>"));
    assert!(html.contains("<td>\u{20b9}51.00</td>"));
    // No logo was uploaded and none exists in the workspace
    assert!(!html.contains("<img"));
  }

  #[actix_web::test]
  async fn test_successive_creations_return_increasing_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let (create, get_pdf) = use_cases(dir.path(), Arc::new(CapturingPdfRenderer::default()));
    let app = test_app!(create, get_pdf);

    let first = test::call_service(&app, create_request(Some(SOAP_PAYLOAD), None).to_request()).await;
    let second = test::call_service(&app, create_request(Some(SOAP_PAYLOAD), None).to_request()).await;

    let first: serde_json::Value = test::read_body_json(first).await;
    let second: serde_json::Value = test::read_body_json(second).await;
    assert_eq!(first["invoiceNumber"], 1);
    assert_eq!(second["invoiceNumber"], 2);
  }

  #[actix_web::test]
  async fn test_uploaded_logo_is_stored_and_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_renderer = Arc::new(CapturingPdfRenderer::default());
    let (create, get_pdf) = use_cases(dir.path(), pdf_renderer.clone());
    let app = test_app!(create, get_pdf);

    let logo_bytes: &[u8] = &[0x89, 0x50, 0x4e, 0x47];
    let request = create_request(Some(SOAP_PAYLOAD), Some(("brand.PNG", "image/png", logo_bytes)));
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = dir.path().join("workspace").join("company_logo.png");
    assert_eq!(std::fs::read(stored).unwrap(), logo_bytes);

    let captured = pdf_renderer.html.lock().unwrap();
    assert!(captured[0].contains("data:image/png;base64,"));
  }

  #[actix_web::test]
  async fn test_unsupported_logo_format_returns_400_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (create, get_pdf) = use_cases(dir.path(), Arc::new(CapturingPdfRenderer::default()));
    let app = test_app!(create, get_pdf);

    let request = create_request(Some(SOAP_PAYLOAD), Some(("brand.gif", "image/gif", b"GIF89a")));
    let response = test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Unsupported file format");

    let workspace = dir.path().join("workspace");
    let logos: Vec<_> = std::fs::read_dir(&workspace)
      .unwrap()
      .filter_map(Result::ok)
      .filter(|entry| entry.file_name().to_string_lossy().starts_with("company_logo"))
      .collect();
    assert!(logos.is_empty());
  }

  #[actix_web::test]
  async fn test_empty_payload_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let (create, get_pdf) = use_cases(dir.path(), Arc::new(CapturingPdfRenderer::default()));
    let app = test_app!(create, get_pdf);

    for request in [create_request(Some("{}"), None), create_request(None, None)] {
      let response = test::call_service(&app, request.to_request()).await;
      assert_eq!(response.status(), StatusCode::BAD_REQUEST);
      let body: serde_json::Value = test::read_body_json(response).await;
      assert_eq!(body["message"], "Invalid or empty payload");
    }
  }

  #[actix_web::test]
  async fn test_malformed_payload_returns_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let (create, get_pdf) = use_cases(dir.path(), Arc::new(CapturingPdfRenderer::default()));
    let app = test_app!(create, get_pdf);

    let response =
      test::call_service(&app, create_request(Some("{not json"), None).to_request()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Server error creating invoice");
  }

  #[actix_web::test]
  async fn test_pdf_conversion_failure_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let (create, get_pdf) = use_cases(dir.path(), Arc::new(FailingPdfRenderer));
    let app = test_app!(create, get_pdf);

    let response = test::call_service(&app, create_request(Some(SOAP_PAYLOAD), None).to_request()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Error generating PDF");
  }
}
