//! Primitive drawers. Each one draws a single visual element onto a page at
//! the position it is given and nothing else.

use tracing::debug;

use crate::label::canvas::{
    colours, Canvas, Colour, FontRef, ImagePlacement, ImageRef, LineStyle, PathOp,
    RectangleStyle, TextStyle,
};
use crate::label::error::GenerationError;
use crate::label::font_metrics::{text_lines, text_width};
use crate::label::layout::{DottedLine, PostageLayout, TriangleShape};
use crate::label::request::ReturnAddress;

const POSTAGE: &str = "POSTAGE";
const REQUIRED: &str = "REQUIRED";

/// Which way a fold marker points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleDirection {
    Upward,
    Downward,
}

impl TriangleDirection {
    fn sign(self) -> f32 {
        match self {
            TriangleDirection::Upward => 1.0,
            TriangleDirection::Downward => -1.0,
        }
    }
}

/// Draws the logo with its bottom-left corner at `(x, y)`, scaled uniformly.
pub fn draw_logo(page: &mut dyn Canvas, logo: &ImageRef, x: f32, y: f32, scale: f32) {
    let (width, height) = logo.scale(scale);
    page.draw_image(
        logo,
        &ImagePlacement {
            x,
            y,
            width,
            height,
        },
    );
}

/// X coordinate that horizontally centres a run of `width` inside a box.
pub fn centered_x(box_x: f32, box_width: f32, width: f32) -> f32 {
    box_x + (box_width - width) / 2.0
}

/// Draws the bordered "POSTAGE / REQUIRED" box, anchored by padding from the
/// top-right corner of the page.
pub fn draw_postage_required(
    page: &mut dyn Canvas,
    font: FontRef,
    postage: &PostageLayout,
) -> Result<(), GenerationError> {
    let page_size = page.size();
    let box_x = page_size.width - postage.width - postage.padding_right;
    let box_y = page_size.height - postage.height - postage.padding_top;

    page.draw_rectangle(&RectangleStyle {
        x: box_x,
        y: box_y,
        width: postage.width,
        height: postage.height,
        border_colour: colours::GRAY,
        border_width: postage.border_width,
    });

    let middle = box_y + postage.height / 2.0;
    let lines = [
        (POSTAGE, middle - (postage.text_size - postage.upper_nudge)),
        (REQUIRED, middle - (postage.text_size + postage.lower_nudge)),
    ];

    for (text, y) in lines {
        let width = text_width(text, postage.text_size, font.font);
        page.draw_text(
            text,
            &TextStyle {
                x: centered_x(box_x, postage.width, width),
                y,
                size: postage.text_size,
                font,
                colour: colours::GRAY,
            },
        )?;
    }

    Ok(())
}

/// Draws free-form field text at `style`, one line per line break, each
/// following line `line_height` below the previous baseline.
pub fn draw_text_lines(
    page: &mut dyn Canvas,
    text: &str,
    style: &TextStyle,
    line_height: f32,
) -> Result<(), GenerationError> {
    for (i, line) in text_lines(text).iter().enumerate() {
        page.draw_text(
            line,
            &TextStyle {
                y: style.y - line_height * i as f32,
                ..*style
            },
        )?;
    }
    Ok(())
}

/// Draws the return address as four left-aligned lines, the first baseline at
/// `(x, start_y)` and each following one `line_spacing` lower. A field that
/// itself holds line breaks continues downward by `line_spacing`; the next
/// field keeps its own position.
pub fn draw_address(
    page: &mut dyn Canvas,
    address: &ReturnAddress,
    x: f32,
    start_y: f32,
    line_spacing: f32,
    size: f32,
    font: FontRef,
) -> Result<(), GenerationError> {
    let zip_and_city = format!("{} {}", address.zip_code, address.city);
    let lines = [
        address.company.as_str(),
        address.address.as_str(),
        zip_and_city.as_str(),
        address.country.as_str(),
    ];

    let mut y = start_y;
    for line in lines {
        draw_text_lines(
            page,
            line,
            &TextStyle {
                x,
                y,
                size,
                font,
                colour: colours::BLACK,
            },
            line_spacing,
        )?;
        y -= line_spacing;
    }

    Ok(())
}

/// Draws the perforation guide at `y`, or at the line's default height.
pub fn draw_dotted_line(page: &mut dyn Canvas, y: Option<f32>, line: &DottedLine) {
    let y = y.unwrap_or(line.default_y);
    debug!(y, segments = line.segments, "Drawing perforation line");

    for i in 0..line.segments {
        let x = line.start_x + line.pitch * i as f32;
        page.draw_line(&LineStyle {
            start: (x, y),
            end: (x + line.segment_length, y),
            thickness: line.thickness,
            colour: colours::BLACK,
        });
    }
}

/// Builds the closed outline of a fold marker whose base starts at `(x, y)`.
pub fn triangle_path(
    x: f32,
    y: f32,
    direction: TriangleDirection,
    shape: &TriangleShape,
) -> [PathOp; 4] {
    let base = shape.base * shape.scale;
    [
        PathOp::MoveTo(x, y),
        PathOp::LineTo(x + base, y),
        PathOp::LineTo(x + base / 2.0, y + direction.sign() * shape.apex_height),
        PathOp::Close,
    ]
}

/// Draws a filled fold marker.
pub fn draw_triangle(
    page: &mut dyn Canvas,
    x: f32,
    y: f32,
    direction: TriangleDirection,
    shape: &TriangleShape,
    colour: Colour,
) {
    page.fill_path(&triangle_path(x, y, direction, shape), colour);
}
