mod wkhtmltopdf_renderer;

pub use wkhtmltopdf_renderer::WkHtmlToPdfRenderer;
