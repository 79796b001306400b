// Letter layout: page geometry, monospace wrapping, pagination, and the PDF writer.
// PDF rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font;
pub mod page_config;
pub mod paginate;
pub mod pdf;

// Re-export the public API consumed by other modules (export, state).
pub use page_config::{default_page_config, PageConfig};
pub use paginate::{paginate, wrap_text};
pub use pdf::render_pdf;
