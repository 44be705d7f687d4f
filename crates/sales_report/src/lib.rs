//! Per-customer sales report rendered to PDF.
//!
//! [`ReportRenderer`] takes an ordered sequence of [`ReportRow`] values and
//! produces a single PDF with a centred title, a bold header, zebra-striped
//! body rows and a grand-total footer formatted for a [`CurrencyLocale`].

pub mod builder;
pub mod currency;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;

pub use builder::{RenderedReport, ReportRenderer};
pub use currency::{format_currency, CurrencyLocale, CurrencySymbol};
pub use error::{LocaleError, RenderError};
pub use fonts::FontSource;
pub use model::{ReportLabels, ReportLayout, ReportRow, ReportTotals, RowFill};
