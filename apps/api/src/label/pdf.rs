//! PDF backend for the drawing seam, built on `pdf-writer`.
//!
//! Fonts are the standard Type1 faces with WinAnsiEncoding, so nothing but a
//! name is written for them. Raster images are stored as Flate-compressed RGB
//! with an optional grey soft mask for the alpha channel. Nothing is resolved
//! into PDF objects until `save`.

use chrono::{Datelike, Timelike, Utc};
use image::{DynamicImage, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::label::canvas::{
    Canvas, Colour, FontRef, ImagePlacement, ImageRef, LabelDocument, LineStyle, PageSize,
    PathOp, RectangleStyle, TextStyle, A4,
};
use crate::label::error::GenerationError;
use crate::label::font_metrics::{encode_win_ansi, StandardFont};

const DOCUMENT_TITLE: &str = "Shipping label";

struct EncodedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl EncodedImage {
    fn encode(image: &DynamicImage) -> EncodedImage {
        let level = CompressionLevel::DefaultLevel as u8;

        let alpha = image.color().has_alpha().then(|| {
            let alphas: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });

        EncodedImage {
            width: image.width(),
            height: image.height(),
            rgb: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
            alpha,
        }
    }
}

/// One page's content stream.
pub struct PdfPage {
    size: PageSize,
    content: Content,
}

impl PdfPage {
    fn new(size: PageSize) -> PdfPage {
        PdfPage {
            size,
            content: Content::new(),
        }
    }
}

fn font_name(index: usize) -> String {
    format!("F{index}")
}

fn image_name(index: usize) -> String {
    format!("I{index}")
}

impl Canvas for PdfPage {
    fn size(&self) -> PageSize {
        self.size
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle) -> Result<(), GenerationError> {
        let encoded = encode_win_ansi(text, style.font.font)?;
        let Colour { r, g, b } = style.colour;

        self.content.save_state();
        self.content.set_fill_rgb(r, g, b);
        self.content.begin_text();
        self.content
            .set_font(Name(font_name(style.font.index).as_bytes()), style.size);
        self.content.next_line(style.x, style.y);
        self.content.show(Str(&encoded));
        self.content.end_text();
        self.content.restore_state();
        Ok(())
    }

    fn draw_line(&mut self, line: &LineStyle) {
        let Colour { r, g, b } = line.colour;
        self.content.save_state();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(line.thickness);
        self.content.move_to(line.start.0, line.start.1);
        self.content.line_to(line.end.0, line.end.1);
        self.content.stroke();
        self.content.restore_state();
    }

    fn draw_rectangle(&mut self, rect: &RectangleStyle) {
        let Colour { r, g, b } = rect.border_colour;
        self.content.save_state();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(rect.border_width);
        self.content.rect(rect.x, rect.y, rect.width, rect.height);
        self.content.stroke();
        self.content.restore_state();
    }

    fn draw_image(&mut self, image: &ImageRef, placement: &ImagePlacement) {
        self.content.save_state();
        self.content.transform([
            placement.width,
            0.0,
            0.0,
            placement.height,
            placement.x,
            placement.y,
        ]);
        self.content.x_object(Name(image_name(image.index).as_bytes()));
        self.content.restore_state();
    }

    fn fill_path(&mut self, path: &[PathOp], colour: Colour) {
        let Colour { r, g, b } = colour;
        self.content.save_state();
        for op in path {
            match *op {
                PathOp::MoveTo(x, y) => {
                    self.content.move_to(x, y);
                }
                PathOp::LineTo(x, y) => {
                    self.content.line_to(x, y);
                }
                PathOp::Close => {
                    self.content.close_path();
                }
            }
        }
        self.content.set_fill_rgb(r, g, b);
        self.content.fill_nonzero();
        self.content.restore_state();
    }
}

/// An in-memory PDF under construction.
#[derive(Default)]
pub struct PdfDocument {
    fonts: Vec<StandardFont>,
    images: Vec<EncodedImage>,
    pages: Vec<PdfPage>,
}

impl PdfDocument {
    pub fn new() -> PdfDocument {
        PdfDocument::default()
    }
}

impl LabelDocument for PdfDocument {
    type Page = PdfPage;

    fn embed_font(&mut self, font: StandardFont) -> Result<FontRef, GenerationError> {
        if self.fonts.contains(&font) {
            return Err(GenerationError::FontEmbedding {
                font,
                reason: "already embedded in this document".to_string(),
            });
        }
        self.fonts.push(font);
        Ok(FontRef {
            font,
            index: self.fonts.len() - 1,
        })
    }

    fn embed_png(&mut self, png: &[u8]) -> Result<ImageRef, GenerationError> {
        let image = image::load_from_memory_with_format(png, ImageFormat::Png)?;
        let encoded = EncodedImage::encode(&image);
        let image_ref = ImageRef {
            index: self.images.len(),
            width: encoded.width as f32,
            height: encoded.height as f32,
        };
        self.images.push(encoded);
        Ok(image_ref)
    }

    fn add_page(&mut self) -> &mut PdfPage {
        let index = self.pages.len();
        self.pages.push(PdfPage::new(A4));
        &mut self.pages[index]
    }

    fn save(self) -> Result<Vec<u8>, GenerationError> {
        let PdfDocument {
            fonts,
            images,
            pages,
        } = self;

        if pages.is_empty() {
            return Err(GenerationError::Serialization(
                "document has no pages".to_string(),
            ));
        }

        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let info_id = alloc.bump();

        let mut writer = Pdf::new();
        writer.catalog(catalog_id).pages(page_tree_id);
        write_info(&mut writer, info_id);

        let font_ids: Vec<Ref> = fonts
            .iter()
            .map(|font| {
                let id = alloc.bump();
                writer
                    .type1_font(id)
                    .base_font(Name(font.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                id
            })
            .collect();

        let image_ids: Vec<Ref> = images
            .iter()
            .map(|image| write_image(&mut writer, &mut alloc, image))
            .collect();

        let page_ids: Vec<Ref> = pages.iter().map(|_| alloc.bump()).collect();
        writer
            .pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        for (page, page_id) in pages.into_iter().zip(page_ids) {
            let content_id = alloc.bump();

            let mut pdf_page = writer.page(page_id);
            pdf_page.media_box(Rect::new(0.0, 0.0, page.size.width, page.size.height));
            pdf_page.parent(page_tree_id);
            pdf_page.contents(content_id);

            let mut resources = pdf_page.resources();
            let mut resource_fonts = resources.fonts();
            for (i, id) in font_ids.iter().enumerate() {
                resource_fonts.pair(Name(font_name(i).as_bytes()), *id);
            }
            resource_fonts.finish();
            let mut resource_xobjects = resources.x_objects();
            for (i, id) in image_ids.iter().enumerate() {
                resource_xobjects.pair(Name(image_name(i).as_bytes()), *id);
            }
            resource_xobjects.finish();
            resources.finish();
            pdf_page.finish();

            let compressed = compress_to_vec_zlib(
                &page.content.finish(),
                CompressionLevel::DefaultLevel as u8,
            );
            writer
                .stream(content_id, &compressed)
                .filter(Filter::FlateDecode);
        }

        Ok(writer.finish())
    }
}

fn write_image(writer: &mut Pdf, alloc: &mut Ref, image: &EncodedImage) -> Ref {
    let id = alloc.bump();
    let mask_id = image.alpha.as_ref().map(|_| alloc.bump());

    let mut xobject = writer.image_xobject(id, &image.rgb);
    xobject.filter(Filter::FlateDecode);
    xobject.width(image.width as i32);
    xobject.height(image.height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        xobject.s_mask(mask_id);
    }
    xobject.finish();

    if let (Some(mask_id), Some(alpha)) = (mask_id, image.alpha.as_ref()) {
        let mut s_mask = writer.image_xobject(mask_id, alpha);
        s_mask.filter(Filter::FlateDecode);
        s_mask.width(image.width as i32);
        s_mask.height(image.height as i32);
        s_mask.color_space().device_gray();
        s_mask.bits_per_component(8);
    }

    id
}

fn write_info(writer: &mut Pdf, id: Ref) {
    let now = Utc::now();
    let date = Date::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(0)
        .utc_offset_minute(0);

    let mut info = writer.document_info(id);
    info.title(TextStr(DOCUMENT_TITLE));
    info.producer(TextStr(concat!(
        env!("CARGO_PKG_NAME"),
        " v",
        env!("CARGO_PKG_VERSION")
    )));
    info.creation_date(date);
}
