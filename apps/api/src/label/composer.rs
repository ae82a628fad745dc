//! Lays out one shipping label on one page.
//!
//! Drawing order is fixed: logo, postage box, return address, fold guide,
//! order/name details. Later elements paint over earlier ones where they
//! overlap. Coordinates come from `LabelLayout` and are absolute; a page that
//! is not A4 gets the same positions, so elements anchored to the bottom do
//! not move with the page height.

use tracing::debug;

use crate::label::canvas::{colours, Canvas, FontRef, ImageRef, TextStyle};
use crate::label::drawers::{
    draw_address, draw_dotted_line, draw_logo, draw_postage_required, draw_text_lines,
    draw_triangle, TriangleDirection,
};
use crate::label::error::GenerationError;
use crate::label::layout::{DetailsLayout, LabelLayout, PerforationLayout};
use crate::label::request::LabelRequest;

const PASTE_OUTSIDE: &str = "Please paste this address label on the outside of the box";
const PUT_INSIDE: &str = "Please put this part inside the box on top of your products,";
const PUT_INSIDE_CONTINUED: &str = "so we can identify your return parcel upon arrival";
const ORDER_LABEL: &str = "Order Number:";
const NAME_LABEL: &str = "Name:";

/// Resources embedded once per document and shared by every drawer.
#[derive(Debug, Clone, Copy)]
pub struct LabelResources {
    pub regular: FontRef,
    pub bold: FontRef,
    pub logo: ImageRef,
}

/// Draws the complete label for `request` onto `page`.
pub fn compose_label(
    page: &mut dyn Canvas,
    resources: &LabelResources,
    request: &LabelRequest,
    layout: &LabelLayout,
) -> Result<(), GenerationError> {
    let page_size = page.size();
    debug!(
        width = page_size.width,
        height = page_size.height,
        "Composing shipping label"
    );

    draw_logo(
        page,
        &resources.logo,
        layout.logo.x,
        page_size.height - layout.logo.top_offset,
        layout.logo.scale,
    );

    draw_postage_required(page, resources.regular, &layout.postage)?;

    draw_address(
        page,
        &request.return_address,
        layout.address.x,
        page_size.height - layout.address.top_offset,
        layout.address.line_spacing,
        layout.text_size,
        resources.bold,
    )?;

    draw_fold_guide(page, resources.regular, &layout.perforation)?;

    draw_details(
        page,
        resources,
        request,
        &layout.details,
        layout.text_size + layout.details.size_increase,
    )
}

/// The perforation section: "paste outside" between upward markers, the
/// dotted line, then "put inside" between downward markers.
fn draw_fold_guide(
    page: &mut dyn Canvas,
    font: FontRef,
    guide: &PerforationLayout,
) -> Result<(), GenerationError> {
    let instruction = |x: f32, y: f32| TextStyle {
        x,
        y,
        size: guide.text_size,
        font,
        colour: colours::BURGUNDY,
    };
    let text_x = guide.left_marker_x + guide.text_indent;

    for x in [guide.left_marker_x, guide.right_marker_x] {
        draw_triangle(
            page,
            x,
            guide.upper_y,
            TriangleDirection::Upward,
            &guide.marker,
            colours::BURGUNDY,
        );
    }

    page.draw_text(PASTE_OUTSIDE, &instruction(text_x, guide.upper_y))?;

    draw_dotted_line(
        page,
        Some(guide.upper_y - guide.dotted_line_drop),
        &guide.dotted_line,
    );

    for x in [guide.left_marker_x, guide.right_marker_x] {
        draw_triangle(
            page,
            x,
            guide.lower_y,
            TriangleDirection::Downward,
            &guide.marker,
            colours::BURGUNDY,
        );
    }

    page.draw_text(
        PUT_INSIDE,
        &instruction(text_x, guide.upper_y - guide.inside_first_drop),
    )?;
    page.draw_text(
        PUT_INSIDE_CONTINUED,
        &instruction(
            guide.left_marker_x + guide.continuation_indent,
            guide.upper_y - guide.inside_second_drop,
        ),
    )?;

    Ok(())
}

fn draw_details(
    page: &mut dyn Canvas,
    resources: &LabelResources,
    request: &LabelRequest,
    details: &DetailsLayout,
    size: f32,
) -> Result<(), GenerationError> {
    let rows = [
        (ORDER_LABEL, request.order.as_str(), details.order_y),
        (NAME_LABEL, request.name.as_str(), details.name_y),
    ];

    for (label, value, y) in rows {
        page.draw_text(
            label,
            &TextStyle {
                x: details.label_x,
                y,
                size,
                font: resources.regular,
                colour: colours::BLACK,
            },
        )?;
        draw_text_lines(
            page,
            value,
            &TextStyle {
                x: details.value_x,
                y,
                size,
                font: resources.bold,
                colour: colours::BLACK,
            },
            details.line_height,
        )?;
    }

    Ok(())
}
