//! Turns a validated request into a finished document.
//!
//! A fresh document is built per request: fonts and the logo are embedded,
//! exactly one page is added and composed, then the document is serialized.
//! Any failure aborts the whole document; no partial bytes are returned.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use image::ImageFormat;
use tracing::info;

use crate::label::canvas::LabelDocument;
use crate::label::composer::{compose_label, LabelResources};
use crate::label::error::GenerationError;
use crate::label::font_metrics::StandardFont;
use crate::label::layout::LabelLayout;
use crate::label::pdf::PdfDocument;
use crate::label::request::LabelRequest;

/// Builds one label into `document` and serializes it.
pub fn assemble<D: LabelDocument>(
    mut document: D,
    request: &LabelRequest,
    logo_png: &[u8],
    layout: &LabelLayout,
) -> Result<Vec<u8>, GenerationError> {
    let resources = LabelResources {
        regular: document.embed_font(StandardFont::Helvetica)?,
        bold: document.embed_font(StandardFont::HelveticaBold)?,
        logo: document.embed_png(logo_png)?,
    };

    let page = document.add_page();
    compose_label(page, &resources, request, layout)?;

    document.save()
}

/// Produces label documents. Implementations are synchronous and CPU-bound;
/// callers on an async runtime should move the call onto a blocking thread.
pub trait LabelGenerator: Send + Sync {
    fn generate(&self, request: &LabelRequest) -> Result<Vec<u8>, GenerationError>;
}

/// The production generator: PDF output with the logo loaded once at startup.
pub struct PdfLabelGenerator {
    logo: Bytes,
    layout: LabelLayout,
}

impl PdfLabelGenerator {
    pub fn new(logo: Bytes, layout: LabelLayout) -> Self {
        Self { logo, layout }
    }

    /// Reads the logo from disk and checks that it decodes as a PNG, so a bad
    /// asset fails at startup instead of on every request.
    pub fn from_logo_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let logo = std::fs::read(path)
            .with_context(|| format!("Failed to read logo at {}", path.display()))?;
        let decoded = image::load_from_memory_with_format(&logo, ImageFormat::Png)
            .with_context(|| format!("Logo at {} is not a valid PNG", path.display()))?;

        info!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            "Loaded label logo"
        );

        Ok(Self::new(Bytes::from(logo), LabelLayout::default()))
    }
}

impl LabelGenerator for PdfLabelGenerator {
    fn generate(&self, request: &LabelRequest) -> Result<Vec<u8>, GenerationError> {
        let pdf = assemble(PdfDocument::new(), request, &self.logo, &self.layout)?;
        info!(
            order = %request.order,
            bytes = pdf.len(),
            "Generated shipping label"
        );
        Ok(pdf)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::label::testing::{
        sample_request, test_logo_png, FailingFontDocument, RecordingDocument,
    };

    fn transcript(request: &LabelRequest) -> String {
        let bytes = assemble(
            RecordingDocument::default(),
            request,
            &test_logo_png(),
            &LabelLayout::default(),
        )
        .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_assemble_is_idempotent() {
        assert_eq!(transcript(&sample_request()), transcript(&sample_request()));
    }

    #[test]
    fn test_assemble_adds_exactly_one_page() {
        let transcript = transcript(&sample_request());
        let pages = transcript.lines().filter(|l| l.starts_with("page ")).count();
        assert_eq!(pages, 1);
        assert!(transcript.starts_with("page 595.28x841.89\n"));
    }

    #[test]
    fn test_assemble_scales_logo_from_png_size() {
        let transcript = transcript(&sample_request());
        let image_line = transcript
            .lines()
            .find(|l| l.starts_with("Image("))
            .unwrap();
        assert!(image_line.contains("width: 12.0"), "{image_line}");
        assert!(image_line.contains("height: 5.0"), "{image_line}");
    }

    #[test]
    fn test_font_failure_aborts_document() {
        let err = assemble(
            FailingFontDocument::default(),
            &sample_request(),
            &test_logo_png(),
            &LabelLayout::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GenerationError::FontEmbedding { .. }));
    }

    #[test]
    fn test_bad_logo_aborts_document() {
        let err = assemble(
            RecordingDocument::default(),
            &sample_request(),
            b"not a png",
            &LabelLayout::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GenerationError::Logo(_)));
    }

    #[test]
    fn test_pdf_generator_produces_pdf() {
        let generator =
            PdfLabelGenerator::new(Bytes::from(test_logo_png()), LabelLayout::default());
        let pdf = generator.generate(&sample_request()).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_pdf_generator_text_is_extractable() {
        let generator =
            PdfLabelGenerator::new(Bytes::from(test_logo_png()), LabelLayout::default());
        let pdf = generator.generate(&sample_request()).unwrap();
        let text = pdf_extract::extract_text_from_mem(&pdf).unwrap();
        for expected in ["POSTAGE", "REQUIRED", "ORD-1", "Jane"] {
            assert!(text.contains(expected), "{expected:?} missing from {text:?}");
        }
    }

    #[test]
    fn test_pdf_generator_rejects_unencodable_text() {
        let generator =
            PdfLabelGenerator::new(Bytes::from(test_logo_png()), LabelLayout::default());
        let mut request = sample_request();
        request.return_address.city = "東京".to_string();
        let err = generator.generate(&request).unwrap_err();
        assert!(matches!(err, GenerationError::UnencodableCharacter { .. }));
    }

    #[test]
    fn test_pdf_generator_text_is_stable_across_runs() {
        let generator =
            PdfLabelGenerator::new(Bytes::from(test_logo_png()), LabelLayout::default());
        let first = generator.generate(&sample_request()).unwrap();
        let second = generator.generate(&sample_request()).unwrap();

        let first_text = pdf_extract::extract_text_from_mem(&first).unwrap();
        let second_text = pdf_extract::extract_text_from_mem(&second).unwrap();
        assert_eq!(first_text, second_text);
        assert!(first_text.contains("ORD-1"));
    }

    #[test]
    fn test_pdf_generator_draws_tabbed_and_multiline_name() {
        let generator =
            PdfLabelGenerator::new(Bytes::from(test_logo_png()), LabelLayout::default());
        let mut request = sample_request();
        request.name = "Jane\tDoe\nSmith".to_string();
        let pdf = generator.generate(&request).unwrap();
        let text = pdf_extract::extract_text_from_mem(&pdf).unwrap();
        assert!(text.contains("Smith"), "{text:?}");
    }

    #[test]
    fn test_shipped_logo_asset_renders_label() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/code-logo.png");
        let generator = PdfLabelGenerator::from_logo_path(path).unwrap();
        let pdf = generator.generate(&sample_request()).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let text = pdf_extract::extract_text_from_mem(&pdf).unwrap();
        for expected in ["Co", "ORD-1", "Jane"] {
            assert!(text.contains(expected), "{expected:?} missing from {text:?}");
        }
    }

    #[test]
    fn test_from_logo_path_loads_png() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&test_logo_png()).unwrap();
        let generator = PdfLabelGenerator::from_logo_path(file.path()).unwrap();
        assert!(generator.generate(&sample_request()).is_ok());
    }

    #[test]
    fn test_from_logo_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfLabelGenerator::from_logo_path(dir.path().join("missing.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_logo_path_rejects_non_png() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"GIF89a").unwrap();
        assert!(PdfLabelGenerator::from_logo_path(file.path()).is_err());
    }
}
