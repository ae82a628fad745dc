//! Test doubles for the drawing seam: a document that records every primitive
//! instead of encoding it, and one whose font embedding always fails.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::label::canvas::{
    Canvas, Colour, FontRef, ImagePlacement, ImageRef, LabelDocument, LineStyle, PageSize,
    PathOp, RectangleStyle, TextStyle, A4,
};
use crate::label::composer::LabelResources;
use crate::label::error::GenerationError;
use crate::label::font_metrics::{encode_win_ansi, StandardFont};
use crate::label::request::{LabelRequest, ReturnAddress};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text { text: String, style: TextStyle },
    Line(LineStyle),
    Rectangle(RectangleStyle),
    Image(ImagePlacement),
    Path { ops: Vec<PathOp>, colour: Colour },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Text { .. } => "text",
            DrawCommand::Line(_) => "line",
            DrawCommand::Rectangle(_) => "rectangle",
            DrawCommand::Image(_) => "image",
            DrawCommand::Path { .. } => "path",
        }
    }
}

pub struct RecordingPage {
    size: PageSize,
    pub commands: Vec<DrawCommand>,
}

impl RecordingPage {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<(String, TextStyle)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, style } => Some((text.clone(), *style)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineStyle> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }
}

impl Canvas for RecordingPage {
    fn size(&self) -> PageSize {
        self.size
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle) -> Result<(), GenerationError> {
        encode_win_ansi(text, style.font.font)?;
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            style: *style,
        });
        Ok(())
    }

    fn draw_line(&mut self, line: &LineStyle) {
        self.commands.push(DrawCommand::Line(*line));
    }

    fn draw_rectangle(&mut self, rect: &RectangleStyle) {
        self.commands.push(DrawCommand::Rectangle(*rect));
    }

    fn draw_image(&mut self, _image: &ImageRef, placement: &ImagePlacement) {
        self.commands.push(DrawCommand::Image(*placement));
    }

    fn fill_path(&mut self, path: &[PathOp], colour: Colour) {
        self.commands.push(DrawCommand::Path {
            ops: path.to_vec(),
            colour,
        });
    }
}

/// Records draw commands; `save` returns a transcript with one `page WxH`
/// header per page followed by one debug line per command.
#[derive(Default)]
pub struct RecordingDocument {
    fonts: Vec<StandardFont>,
    images: usize,
    pages: Vec<RecordingPage>,
}

impl LabelDocument for RecordingDocument {
    type Page = RecordingPage;

    fn embed_font(&mut self, font: StandardFont) -> Result<FontRef, GenerationError> {
        self.fonts.push(font);
        Ok(FontRef {
            font,
            index: self.fonts.len() - 1,
        })
    }

    fn embed_png(&mut self, png: &[u8]) -> Result<ImageRef, GenerationError> {
        let image = image::load_from_memory_with_format(png, ImageFormat::Png)?;
        self.images += 1;
        Ok(ImageRef {
            index: self.images - 1,
            width: image.width() as f32,
            height: image.height() as f32,
        })
    }

    fn add_page(&mut self) -> &mut RecordingPage {
        let index = self.pages.len();
        self.pages.push(RecordingPage::new(A4));
        &mut self.pages[index]
    }

    fn save(self) -> Result<Vec<u8>, GenerationError> {
        let mut transcript = String::new();
        for page in &self.pages {
            transcript.push_str(&format!("page {}x{}\n", page.size.width, page.size.height));
            for command in &page.commands {
                transcript.push_str(&format!("{command:?}\n"));
            }
        }
        Ok(transcript.into_bytes())
    }
}

/// A document whose font embedding always fails.
#[derive(Default)]
pub struct FailingFontDocument {
    page: Option<RecordingPage>,
}

impl LabelDocument for FailingFontDocument {
    type Page = RecordingPage;

    fn embed_font(&mut self, font: StandardFont) -> Result<FontRef, GenerationError> {
        Err(GenerationError::FontEmbedding {
            font,
            reason: "font program unavailable".to_string(),
        })
    }

    fn embed_png(&mut self, _png: &[u8]) -> Result<ImageRef, GenerationError> {
        Ok(ImageRef {
            index: 0,
            width: 1.0,
            height: 1.0,
        })
    }

    fn add_page(&mut self) -> &mut RecordingPage {
        self.page.insert(RecordingPage::new(A4))
    }

    fn save(self) -> Result<Vec<u8>, GenerationError> {
        Ok(b"should never be reached".to_vec())
    }
}

pub fn regular_font() -> FontRef {
    FontRef {
        font: StandardFont::Helvetica,
        index: 0,
    }
}

pub fn bold_font() -> FontRef {
    FontRef {
        font: StandardFont::HelveticaBold,
        index: 1,
    }
}

pub fn test_resources() -> LabelResources {
    LabelResources {
        regular: regular_font(),
        bold: bold_font(),
        logo: ImageRef {
            index: 0,
            width: 600.0,
            height: 250.0,
        },
    }
}

/// The request used throughout the tests.
pub fn sample_request() -> LabelRequest {
    LabelRequest {
        return_address: ReturnAddress {
            company: "Co".to_string(),
            address: "Addr".to_string(),
            zip_code: "1234".to_string(),
            city: "City".to_string(),
            country: "NL".to_string(),
        },
        order: "ORD-1".to_string(),
        name: "Jane".to_string(),
        language: "en".to_string(),
    }
}

/// A small PNG with an alpha channel, encoded in memory.
pub fn test_logo_png() -> Vec<u8> {
    let mut logo = RgbaImage::from_pixel(60, 25, Rgba([204, 51, 102, 255]));
    for x in 0..60 {
        logo.put_pixel(x, 0, Rgba([0, 0, 0, 0]));
    }
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(logo)
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode test logo");
    bytes.into_inner()
}
