//! Every position, size and offset on the label.
//!
//! These are hand-tuned against an A4 page and are not derived from one
//! another; change them only together with a visual check of the output.
//! Positions given as `*_top_offset` are measured down from the page top, all
//! others are absolute page coordinates.

#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Body size of the address block; the order/name fields are drawn at
    /// `text_size + details.size_increase`.
    pub text_size: f32,
    pub logo: LogoLayout,
    pub postage: PostageLayout,
    pub address: AddressLayout,
    pub perforation: PerforationLayout,
    pub details: DetailsLayout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogoLayout {
    pub x: f32,
    /// Distance from the page top to the bottom edge of the logo.
    pub top_offset: f32,
    pub scale: f32,
}

/// The "POSTAGE REQUIRED" box in the top-right corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PostageLayout {
    pub width: f32,
    pub height: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub border_width: f32,
    pub text_size: f32,
    /// First line baseline is `box_y + height / 2 - (text_size - upper_nudge)`.
    pub upper_nudge: f32,
    /// Second line baseline is `box_y + height / 2 - (text_size + lower_nudge)`.
    pub lower_nudge: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressLayout {
    pub x: f32,
    /// Distance from the page top to the first baseline.
    pub top_offset: f32,
    pub line_spacing: f32,
}

/// The fold guide: instruction text, direction markers and the dotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct PerforationLayout {
    pub text_size: f32,
    pub left_marker_x: f32,
    pub right_marker_x: f32,
    /// Baseline of the markers pointing up, and of the "paste outside" text.
    pub upper_y: f32,
    /// Baseline of the markers pointing down.
    pub lower_y: f32,
    /// Instruction text starts this far right of the left marker.
    pub text_indent: f32,
    /// Indent of the second "put inside" line.
    pub continuation_indent: f32,
    /// Drop from `upper_y` to the dotted line.
    pub dotted_line_drop: f32,
    /// Drops from `upper_y` to the two "put inside" baselines.
    pub inside_first_drop: f32,
    pub inside_second_drop: f32,
    pub marker: TriangleShape,
    pub dotted_line: DottedLine,
}

/// An isosceles triangle with its base on the anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleShape {
    pub base: f32,
    /// Horizontal scale applied to the base.
    pub scale: f32,
    /// Apex distance from the base line. Not scaled.
    pub apex_height: f32,
}

/// A row of short strokes simulating perforation.
#[derive(Debug, Clone, PartialEq)]
pub struct DottedLine {
    pub start_x: f32,
    /// Used when no explicit y is given.
    pub default_y: f32,
    pub segments: usize,
    pub segment_length: f32,
    /// Distance between the starts of two neighbouring segments.
    pub pitch: f32,
    pub thickness: f32,
}

/// The "Order Number:" and "Name:" rows at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsLayout {
    pub label_x: f32,
    pub value_x: f32,
    pub order_y: f32,
    pub name_y: f32,
    pub size_increase: f32,
    /// Step between the lines of a value that contains line breaks.
    pub line_height: f32,
}

impl Default for LabelLayout {
    fn default() -> Self {
        LabelLayout {
            text_size: 17.0,
            logo: LogoLayout {
                x: 50.0,
                top_offset: 120.0,
                scale: 0.2,
            },
            postage: PostageLayout {
                width: 120.0,
                height: 140.0,
                padding_right: 50.0,
                padding_top: 70.0,
                border_width: 1.0,
                text_size: 13.0,
                upper_nudge: 20.0,
                lower_nudge: 10.0,
            },
            address: AddressLayout {
                x: 50.0,
                top_offset: 180.0,
                line_spacing: 24.0,
            },
            perforation: PerforationLayout {
                text_size: 10.0,
                left_marker_x: 100.0,
                right_marker_x: 450.0,
                upper_y: 400.0,
                lower_y: 330.0,
                text_indent: 50.0,
                continuation_indent: 70.0,
                dotted_line_drop: 35.0,
                inside_first_drop: 80.0,
                inside_second_drop: 93.0,
                marker: TriangleShape {
                    base: 50.0,
                    scale: 0.4,
                    apex_height: 12.0,
                },
                dotted_line: DottedLine::default(),
            },
            details: DetailsLayout {
                label_x: 50.0,
                value_x: 230.0,
                order_y: 180.0,
                name_y: 120.0,
                size_increase: 5.0,
                line_height: 24.0,
            },
        }
    }
}

impl Default for DottedLine {
    fn default() -> Self {
        DottedLine {
            start_x: 50.0,
            default_y: 465.0,
            segments: 80,
            segment_length: 3.0,
            pitch: 6.0,
            thickness: 1.0,
        }
    }
}
