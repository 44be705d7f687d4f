//! Table elements built on top of `genpdf` primitives.
//!
//! `genpdf` has no filled rectangles or fixed-width cells, so the report table
//! is drawn with the small custom elements below.  Background fills are a
//! stack of hairline strokes, close enough together to cover the full line
//! height.

use genpdf::error::Error;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

/// Distance between two fill strokes; the default stroke is about 0.35 mm wide.
const FILL_STROKE_STEP_MM: f64 = 0.3;

/// Converts a millimetre value into a `genpdf` length.
pub fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Converts a `genpdf` length back into millimetres.
pub fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Vertical offsets of the strokes that paint a band `height` millimetres tall.
pub fn fill_stroke_offsets(height: Mm) -> Vec<Mm> {
    let height = mm_to_f64(height);
    if height <= 0.0 {
        return Vec::new();
    }
    let count = (height / FILL_STROKE_STEP_MM).ceil() as usize;
    (0..count)
        .map(|index| {
            let offset = FILL_STROKE_STEP_MM * (index as f64 + 0.5);
            mm_from_f64(offset.min(height))
        })
        .collect()
}

fn fill_band(area: &render::Area<'_>, width: Mm, height: Mm, color: Color) {
    let style = Style::new().with_color(color);
    for offset in fill_stroke_offsets(height) {
        area.draw_line(
            vec![Position::new(0, offset), Position::new(width, offset)],
            style,
        );
    }
}

fn overflow() -> RenderResult {
    let mut result = RenderResult::default();
    result.has_more = true;
    result
}

/// Empty vertical space of a fixed height.
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    /// Creates a gap of `height` millimetres.
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let mut result = RenderResult::default();
        // Gaps are not carried over to the next page.
        result.size = Size::new(0, if self.height > available { available } else { self.height });
        Ok(result)
    }
}

/// A horizontal separator spanning the available width.
pub struct Rule {
    space_before: Mm,
    space_after: Mm,
    color: Color,
}

impl Rule {
    /// Creates a thin black separator without surrounding space.
    pub fn new() -> Self {
        Self {
            space_before: Mm::default(),
            space_after: Mm::default(),
            color: Color::Rgb(0, 0, 0),
        }
    }

    /// Sets the vertical space above and below the stroke.
    pub fn with_spacing(mut self, before: impl Into<Mm>, after: impl Into<Mm>) -> Self {
        self.space_before = before.into();
        self.space_after = after.into();
        self
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for Rule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let height = self.space_before + self.space_after;
        let width = area.size().width;
        if height > area.size().height {
            return Ok(overflow());
        }

        area.draw_line(
            vec![
                Position::new(0, self.space_before),
                Position::new(width, self.space_before),
            ],
            Style::new().with_color(self.color),
        );

        let mut result = RenderResult::default();
        result.size = Size::new(width, height);
        Ok(result)
    }
}

/// One fixed-height line of the report table.
///
/// The line has a left-aligned cell and a right-aligned cell, both with fixed
/// widths measured from the left edge of the area, and an optional background
/// that covers the whole area width.  Text is centred vertically.  When the
/// line does not fit into the remaining area nothing is drawn and the element
/// asks for another page.
pub struct TableLine {
    label: String,
    value: String,
    label_width: Mm,
    value_width: Mm,
    height: Mm,
    fill: Option<Color>,
    style: Style,
}

impl TableLine {
    /// Creates a line with the given texts and column widths.
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        label_width: impl Into<Mm>,
        value_width: impl Into<Mm>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            label_width: label_width.into(),
            value_width: value_width.into(),
            height: mm_from_f64(6.0),
            fill: None,
            style: Style::new(),
        }
    }

    /// Sets the line height.
    pub fn with_height(mut self, height: impl Into<Mm>) -> Self {
        self.height = height.into();
        self
    }

    /// Sets the background fill.
    pub fn with_fill(mut self, fill: impl Into<Option<Color>>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text style, merged on top of the inherited style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Element for TableLine {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let available = area.size();
        if self.height > available.height {
            return Ok(overflow());
        }

        if let Some(color) = self.fill {
            fill_band(&area, available.width, self.height, color);
        }

        let line_height = style.line_height(&context.font_cache);
        let top = ((self.height - line_height) / 2.0).max(Mm::default());

        let value = StyledString::new(self.value.clone(), style);
        let value_x = self.label_width + self.value_width - value.width(&context.font_cache);

        let cells = [
            (Position::new(0, top), self.label.as_str()),
            (Position::new(value_x, top), self.value.as_str()),
        ];
        for (position, text) in cells {
            if !area.print_str(&context.font_cache, position, style, text)? {
                return Ok(overflow());
            }
        }

        let mut result = RenderResult::default();
        result.size = Size::new(available.width, self.height);
        Ok(result)
    }
}
