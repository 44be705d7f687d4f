//! Turns report rows into a finished PDF document.

use std::cell::Cell;
use std::rc::Rc;

use genpdf::elements::Paragraph;
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{self, Alignment, Element, Margins, PageDecorator, PaperSize, Size};
use log::debug;

use crate::currency::CurrencyLocale;
use crate::elements::{Rule, Spacer, TableLine};
use crate::error::{RenderError, Result};
use crate::fonts::FontSource;
use crate::model::{ReportLabels, ReportLayout, ReportRow, ReportTotals};

const TITLE_FONT_SIZE: u8 = 16;
const BODY_FONT_SIZE: u8 = 12;
const PAGE_MARGIN_MM: i32 = 10;

const NAME_COLUMN_MM: i32 = 80;
const AMOUNT_COLUMN_MM: i32 = 90;

const HEADER_LINE_MM: i32 = 6;
const BODY_LINE_MM: i32 = 6;
const FOOTER_LINE_MM: i32 = 10;
const SECTION_GAP_MM: i32 = 10;
const TITLE_RULE_GAP_MM: i32 = 10;
const HEADER_GAP_MM: i32 = 5;

/// Output of a successful render.
#[derive(Clone, Debug)]
pub struct RenderedReport {
    /// Complete PDF file contents.
    pub bytes: Vec<u8>,
    /// Totals printed in the footer.
    pub totals: ReportTotals,
    /// Number of pages the layout engine produced.
    pub page_count: usize,
}

/// Renders sales reports with a fixed layout.
///
/// A renderer holds configuration only.  Every call to [`ReportRenderer::render`]
/// builds its own document, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct ReportRenderer {
    locale: CurrencyLocale,
    labels: ReportLabels,
    fonts: FontSource,
    paper_size: Size,
    margins: Margins,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self {
            locale: CurrencyLocale::default(),
            labels: ReportLabels::default(),
            fonts: FontSource::default(),
            paper_size: PaperSize::A4.into(),
            margins: Margins::all(PAGE_MARGIN_MM),
        }
    }
}

impl ReportRenderer {
    /// Creates a renderer for A4 pages, pt-BR amounts and the default font search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locale used to format amounts.
    pub fn with_locale(mut self, locale: CurrencyLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Replaces the fixed report texts.
    pub fn with_labels(mut self, labels: ReportLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Sets where fonts are loaded from.
    pub fn with_font_source(mut self, fonts: FontSource) -> Self {
        self.fonts = fonts;
        self
    }

    /// Sets the paper size of generated documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Returns the configured currency locale.
    pub fn locale(&self) -> &CurrencyLocale {
        &self.locale
    }

    /// Returns the configured font source.
    pub fn font_source(&self) -> &FontSource {
        &self.fonts
    }

    /// Computes the layout for `rows` without drawing anything.
    pub fn layout(&self, rows: &[ReportRow]) -> ReportLayout {
        ReportLayout::build(rows, &self.labels, &self.locale)
    }

    /// Renders `rows` into a PDF.
    ///
    /// Returns `Ok(None)` for an empty row sequence without loading fonts or
    /// creating a document.
    pub fn render(&self, rows: &[ReportRow]) -> Result<Option<RenderedReport>> {
        let layout = self.layout(rows);
        if layout.is_empty() {
            return Ok(None);
        }

        let family = self.fonts.load().map_err(RenderError::Fonts)?;
        let mut document = genpdf::Document::new(family);
        document.set_title(layout.title());
        document.set_paper_size(self.paper_size);
        document.set_font_size(BODY_FONT_SIZE);

        let pages = Rc::new(Cell::new(0));
        document.set_page_decorator(ReportPageDecorator::new(self.margins, Rc::clone(&pages)));

        push_layout(&mut document, &layout);

        let mut bytes = Vec::new();
        document
            .render(&mut bytes)
            .map_err(RenderError::Document)?;

        let report = RenderedReport {
            bytes,
            totals: layout.totals(),
            page_count: pages.get(),
        };
        debug!(
            "Rendered sales report: {} rows, {} page(s), {} bytes",
            report.totals.row_count(),
            report.page_count,
            report.bytes.len()
        );
        Ok(Some(report))
    }
}

fn push_layout(document: &mut genpdf::Document, layout: &ReportLayout) {
    let mut title = Paragraph::new(layout.title());
    title.set_alignment(Alignment::Center);
    document.push(title.styled(Style::new().with_font_size(TITLE_FONT_SIZE)));
    document.push(Rule::new().with_spacing(TITLE_RULE_GAP_MM, SECTION_GAP_MM));

    let header = layout.header();
    document.push(
        TableLine::new(
            header.label.as_str(),
            header.value.as_str(),
            NAME_COLUMN_MM,
            AMOUNT_COLUMN_MM,
        )
        .with_height(HEADER_LINE_MM)
        .with_style(Style::new().bold()),
    );
    document.push(Spacer::new(HEADER_GAP_MM));

    for line in layout.body() {
        let (r, g, b) = line.fill.rgb();
        document.push(
            TableLine::new(
                line.cells.label.as_str(),
                line.cells.value.as_str(),
                NAME_COLUMN_MM,
                AMOUNT_COLUMN_MM,
            )
            .with_height(BODY_LINE_MM)
            .with_fill(Color::Rgb(r, g, b))
            .with_style(Style::new().with_color(Color::Rgb(0, 0, 0))),
        );
    }

    document.push(Rule::new().with_spacing(SECTION_GAP_MM, SECTION_GAP_MM));

    let footer = layout.footer();
    document.push(
        TableLine::new(
            footer.label.as_str(),
            footer.value.as_str(),
            NAME_COLUMN_MM,
            AMOUNT_COLUMN_MM,
        )
        .with_height(FOOTER_LINE_MM)
        .with_style(Style::new().bold()),
    );
}

/// Applies the page margins and counts the pages the engine creates.
struct ReportPageDecorator {
    margins: Margins,
    pages: Rc<Cell<usize>>,
}

impl ReportPageDecorator {
    fn new(margins: Margins, pages: Rc<Cell<usize>>) -> Self {
        Self { margins, pages }
    }
}

impl PageDecorator for ReportPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: Style,
    ) -> std::result::Result<genpdf::render::Area<'a>, Error> {
        self.pages.set(self.pages.get() + 1);
        area.add_margins(self.margins);
        Ok(area)
    }
}
