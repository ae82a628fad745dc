//! Drawing primitives shared by every document backend.
//!
//! Coordinates are page-local points with the origin at the bottom-left corner
//! and Y increasing upward. A `Canvas` is one page; a `LabelDocument` owns the
//! embedded resources and the pages, and is the only thing that can serialize.

use crate::label::error::GenerationError;
use crate::label::font_metrics::StandardFont;

/// A DeviceRGB colour; components range from 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour { r, g, b }
    }
}

/// The fixed palette of the label.
pub mod colours {
    use super::Colour;

    pub const BLACK: Colour = Colour::rgb(0.0, 0.0, 0.0);
    /// Accent used for the fold instructions and direction markers.
    pub const BURGUNDY: Colour = Colour::rgb(0.8, 0.2, 0.4);
    pub const GRAY: Colour = Colour::rgb(0.5, 0.5, 0.5);
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// ISO A4, the default page the layout constants were tuned against.
pub const A4: PageSize = PageSize {
    width: 595.28,
    height: 841.89,
};

/// Handle to a font embedded in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontRef {
    pub font: StandardFont,
    pub(crate) index: usize,
}

/// Handle to a raster image embedded in a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRef {
    pub(crate) index: usize,
    /// Intrinsic width in pixels.
    pub width: f32,
    /// Intrinsic height in pixels.
    pub height: f32,
}

impl ImageRef {
    /// Size of the image after uniform scaling.
    pub fn scale(&self, factor: f32) -> (f32, f32) {
        (self.width * factor, self.height * factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub x: f32,
    /// Baseline.
    pub y: f32,
    pub size: f32,
    pub font: FontRef,
    pub colour: Colour,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub thickness: f32,
    pub colour: Colour,
}

/// A stroked, unfilled rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleStyle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub border_colour: Colour,
    pub border_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One segment of a vector path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Close,
}

/// A single page that drawing primitives are executed against, in call order.
pub trait Canvas {
    fn size(&self) -> PageSize;

    /// Fails when the text cannot be encoded in the font.
    fn draw_text(&mut self, text: &str, style: &TextStyle) -> Result<(), GenerationError>;

    fn draw_line(&mut self, line: &LineStyle);

    fn draw_rectangle(&mut self, rect: &RectangleStyle);

    fn draw_image(&mut self, image: &ImageRef, placement: &ImagePlacement);

    /// Fills a closed path with a solid colour, isolated in its own graphics state.
    fn fill_path(&mut self, path: &[PathOp], colour: Colour);
}

/// A document under construction.
///
/// Resources are embedded before the page is added; the page is then borrowed
/// mutably for drawing, and the document is consumed by `save`.
pub trait LabelDocument {
    type Page: Canvas;

    fn embed_font(&mut self, font: StandardFont) -> Result<FontRef, GenerationError>;

    /// Decodes and embeds a PNG.
    fn embed_png(&mut self, png: &[u8]) -> Result<ImageRef, GenerationError>;

    fn add_page(&mut self) -> &mut Self::Page;

    fn save(self) -> Result<Vec<u8>, GenerationError>;
}
