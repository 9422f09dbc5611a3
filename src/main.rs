use actix_web::{App, HttpServer, middleware::Logger, web};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quickbill::{
  adapters::http::configure_invoice_routes,
  application::invoice::{CreateInvoiceUseCase, GetInvoicePdfUseCase},
  domain::invoice::{
    ArtifactStore, InvoiceHtmlRenderer, InvoiceNumberAllocator, InvoiceService,
    InvoiceServiceDependencies, PdfRenderer,
  },
  infrastructure::{
    config::Config, counter::FileInvoiceNumberAllocator, pdf::WkHtmlToPdfRenderer,
    render::TeraInvoiceRenderer, workspace::FsArtifactStore,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickbill=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting QuickBill invoice service");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Initialize the artifact workspace
  let artifacts: Arc<dyn ArtifactStore> = Arc::new(
    FsArtifactStore::new(PathBuf::from(&config.workspace.dir))
      .expect("Failed to prepare artifact workspace"),
  );
  tracing::info!(dir = %config.workspace.dir, "Artifact workspace ready");

  // Initialize the invoice number allocator
  let allocator: Arc<dyn InvoiceNumberAllocator> = Arc::new(FileInvoiceNumberAllocator::new(
    PathBuf::from(&config.workspace.counter_file),
  ));

  // Initialize the template renderer
  let html_renderer: Arc<dyn InvoiceHtmlRenderer> =
    Arc::new(TeraInvoiceRenderer::new().expect("Failed to initialize template engine"));
  tracing::info!("Template engine initialized");

  // Initialize the PDF renderer
  let pdf_renderer: Arc<dyn PdfRenderer> =
    Arc::new(WkHtmlToPdfRenderer::new(config.pdf.wkhtmltopdf_path.clone()));
  tracing::info!("PDF renderer initialized");

  // Initialize the domain service and use cases
  let invoice_service = Arc::new(InvoiceService::new(InvoiceServiceDependencies {
    allocator,
    artifacts,
    html_renderer,
    pdf_renderer,
  }));
  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(invoice_service.clone()));
  let get_invoice_pdf_use_case = Arc::new(GetInvoicePdfUseCase::new(invoice_service.clone()));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add logging middleware
      .wrap(Logger::default())
      // Configure invoice API routes
      .service(web::scope("/api/v1/invoices").configure(|cfg| {
        configure_invoice_routes(
          cfg,
          create_invoice_use_case.clone(),
          get_invoice_pdf_use_case.clone(),
        )
      }))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
