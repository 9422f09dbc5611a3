mod tera_renderer;

pub use tera_renderer::TeraInvoiceRenderer;
