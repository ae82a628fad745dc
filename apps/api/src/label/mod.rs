//! Shipping-label generation: request validation, layout, and the PDF backend.

pub mod assembler;
pub mod canvas;
pub mod composer;
pub mod drawers;
pub mod error;
pub mod font_metrics;
pub mod layout;
pub mod pdf;
pub mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::{LabelGenerator, PdfLabelGenerator};
pub use error::GenerationError;
pub use request::ValidationError;
