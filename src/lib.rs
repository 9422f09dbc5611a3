//! QuickBill — a small invoice PDF generation service.
//!
//! Accepts invoice line-item data and an optional company logo over HTTP,
//! renders an HTML invoice, converts it to a PDF with wkhtmltopdf and serves
//! the result back on request.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
