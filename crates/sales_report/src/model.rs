//! Data structures describing the logical content of a sales report.
//!
//! The types in this module never touch the rendering crate.  A
//! [`ReportLayout`] captures every decision the renderer makes (striping,
//! formatted amounts, totals) so those decisions can be inspected and tested
//! without loading any fonts; [`crate::builder`] later turns the layout into
//! `genpdf` elements.

use rust_decimal::Decimal;

use crate::currency::{format_currency, CurrencyLocale, CurrencySymbol};

/// One customer's aggregated order total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    name: String,
    amount: Decimal,
}

impl ReportRow {
    /// Creates a row from a display label and its amount.
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// Returns the customer label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the aggregated amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Values derived from the full row sequence before layout begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportTotals {
    grand_total: Decimal,
    row_count: usize,
}

impl ReportTotals {
    /// Sums every row amount at the source precision.
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        Self {
            grand_total: rows.iter().map(ReportRow::amount).sum(),
            row_count: rows.len(),
        }
    }

    /// Returns the sum of all row amounts.
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Returns the number of rows that contributed to the total.
    pub fn row_count(&self) -> usize {
        self.row_count
    }
}

/// Background fill applied behind a body row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowFill {
    /// White background.
    Neutral,
    /// Light gray background.
    Shaded,
}

impl RowFill {
    /// Returns the fill for the zero-based row position.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Neutral
        } else {
            Self::Shaded
        }
    }

    /// Returns the fill as an RGB triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Neutral => (255, 255, 255),
            Self::Shaded => (230, 230, 230),
        }
    }
}

/// Fixed texts printed on the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLabels {
    /// Centered title line.
    pub title: String,
    /// Header of the name column.
    pub name_header: String,
    /// Header of the amount column.
    pub amount_header: String,
    /// Left cell of the totals footer.
    pub total_label: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            title: "Relatório de Vendas por Cliente".to_owned(),
            name_header: "Cliente".to_owned(),
            amount_header: "Total de Vendas".to_owned(),
            total_label: "Total Geral".to_owned(),
        }
    }
}

/// A two-cell line of the table: a left label and a right-aligned value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineCells {
    /// Left-aligned text.
    pub label: String,
    /// Right-aligned text.
    pub value: String,
}

impl LineCells {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A body line together with its background fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyLine {
    /// Name and formatted amount.
    pub cells: LineCells,
    /// Position-based background.
    pub fill: RowFill,
}

/// Font-independent description of one rendered report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLayout {
    title: String,
    header: LineCells,
    body: Vec<BodyLine>,
    footer: LineCells,
    totals: ReportTotals,
}

impl ReportLayout {
    /// Lays out the rows in order, striping by position and formatting
    /// amounts through `locale`.
    pub fn build(rows: &[ReportRow], labels: &ReportLabels, locale: &CurrencyLocale) -> Self {
        let totals = ReportTotals::from_rows(rows);

        let body = rows
            .iter()
            .enumerate()
            .map(|(index, row)| BodyLine {
                cells: LineCells::new(
                    row.name(),
                    format_currency(row.amount(), locale, CurrencySymbol::Omit),
                ),
                fill: RowFill::for_index(index),
            })
            .collect();

        let footer = LineCells::new(
            labels.total_label.as_str(),
            format_currency(totals.grand_total(), locale, CurrencySymbol::Prefix),
        );

        Self {
            title: labels.title.clone(),
            header: LineCells::new(labels.name_header.as_str(), labels.amount_header.as_str()),
            body,
            footer,
            totals,
        }
    }

    /// Returns the title line.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the column headers.
    pub fn header(&self) -> &LineCells {
        &self.header
    }

    /// Returns the body lines in render order.
    pub fn body(&self) -> &[BodyLine] {
        &self.body
    }

    /// Returns the totals footer.
    pub fn footer(&self) -> &LineCells {
        &self.footer
    }

    /// Returns the totals the footer was built from.
    pub fn totals(&self) -> ReportTotals {
        self.totals
    }

    /// Returns whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
