use thiserror::Error;

use crate::label::font_metrics::StandardFont;

/// Any failure while embedding resources, drawing, or serializing a label.
///
/// Generation is all-or-nothing: once one of these is raised the partially
/// built document is dropped and no bytes leave the assembler.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to decode logo image: {0}")]
    Logo(#[from] image::ImageError),

    #[error("Failed to embed font {font}: {reason}")]
    FontEmbedding { font: StandardFont, reason: String },

    #[error("Character {ch:?} cannot be encoded with {font}")]
    UnencodableCharacter { ch: char, font: StandardFont },

    #[error("Failed to serialize document: {0}")]
    Serialization(String),

    #[error("Label generation task failed: {0}")]
    Task(String),
}
