use lopdf::content::Content;
use lopdf::Object;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sales_report::fonts;
use sales_report::{ReportRenderer, ReportRow};
use sha2::{Digest, Sha256};

const NEUTRAL_LEVEL: f64 = 1.0;
const SHADED_LEVEL: f64 = 230.0 / 255.0;
const LEVEL_TOLERANCE: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Band {
    Neutral,
    Shaded,
}

const SKIP_NOTE: &str = "report fonts missing. Set SALES_REPORT_FONTS_DIR or install DejaVu Sans.";

fn sample_rows() -> Vec<ReportRow> {
    vec![
        ReportRow::new("Ana", dec!(100.00)),
        ReportRow::new("Bruno", dec!(50.00)),
        ReportRow::new("Conceição Araújo", dec!(0)),
    ]
}

fn render_rows(rows: &[ReportRow]) -> Option<sales_report::RenderedReport> {
    if !fonts::default_fonts_available() {
        return None;
    }

    ReportRenderer::new()
        .render(rows)
        .expect("render sample report")
}

fn operand_level(operand: &Object) -> Option<f64> {
    match operand {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

fn band_for(operands: &[Object]) -> Option<Band> {
    let levels: Vec<f64> = operands.iter().filter_map(operand_level).collect();
    if levels.len() != 3 {
        return None;
    }
    let all_near = |target: f64| levels.iter().all(|level| (level - target).abs() < LEVEL_TOLERANCE);
    if all_near(SHADED_LEVEL) {
        Some(Band::Shaded)
    } else if all_near(NEUTRAL_LEVEL) {
        Some(Band::Neutral)
    } else {
        None
    }
}

/// Row background colours in drawing order, one entry per painted row.
fn row_bands(bytes: &[u8]) -> Vec<Band> {
    let mut document = lopdf::Document::load_mem(bytes).expect("rendered PDF parses");
    document.decompress();

    let mut bands: Vec<Band> = Vec::new();
    for page_id in document.get_pages().into_values() {
        let raw = document.get_page_content(page_id).expect("page content");
        let content = Content::decode(&raw).expect("decodable content stream");
        for operation in content.operations {
            if operation.operator != "RG" {
                continue;
            }
            // Every stroke of a band repeats the same colour; collapse the runs.
            if let Some(band) = band_for(&operation.operands) {
                if bands.last() != Some(&band) {
                    bands.push(band);
                }
            }
        }
    }
    bands
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_a_pdf_document() {
    let Some(report) = render_rows(&sample_rows()) else {
        eprintln!("Skipping renders_a_pdf_document: {SKIP_NOTE}");
        return;
    };

    assert!(report.bytes.starts_with(b"%PDF-"), "output must be a PDF file");
    assert_eq!(report.page_count, 1);

    let document = lopdf::Document::load_mem(&report.bytes).expect("rendered PDF parses");
    assert_eq!(document.get_pages().len(), 1);
}

#[test]
fn footer_total_is_the_sum_of_rendered_rows() {
    let rows = sample_rows();
    let Some(report) = render_rows(&rows) else {
        eprintln!("Skipping footer_total_is_the_sum_of_rendered_rows: {SKIP_NOTE}");
        return;
    };

    let expected: Decimal = rows.iter().map(ReportRow::amount).sum();
    assert_eq!(report.totals.grand_total(), expected);
    assert_eq!(report.totals.grand_total(), dec!(150.00));
    assert_eq!(report.totals.row_count(), rows.len());
}

#[test]
fn second_row_is_shaded_and_first_is_not() {
    let rows = vec![
        ReportRow::new("Ana", dec!(100.00)),
        ReportRow::new("Bruno", dec!(50.00)),
    ];
    let Some(report) = render_rows(&rows) else {
        eprintln!("Skipping second_row_is_shaded_and_first_is_not: {SKIP_NOTE}");
        return;
    };

    assert_eq!(row_bands(&report.bytes), vec![Band::Neutral, Band::Shaded]);
}

#[test]
fn row_backgrounds_alternate() {
    let Some(report) = render_rows(&sample_rows()) else {
        eprintln!("Skipping row_backgrounds_alternate: {SKIP_NOTE}");
        return;
    };

    assert_eq!(
        row_bands(&report.bytes),
        vec![Band::Neutral, Band::Shaded, Band::Neutral]
    );
}

#[test]
fn empty_rows_produce_no_document() {
    let rendered = ReportRenderer::new()
        .render(&[])
        .expect("empty input is not an error");
    assert!(rendered.is_none());
}

#[test]
fn rows_past_one_page_flow_onto_the_next() {
    let rows: Vec<_> = (0..80)
        .map(|index| ReportRow::new(format!("Cliente {index:02}"), Decimal::from(80 - index)))
        .collect();
    let Some(report) = render_rows(&rows) else {
        eprintln!("Skipping rows_past_one_page_flow_onto_the_next: {SKIP_NOTE}");
        return;
    };

    assert!(report.page_count >= 2, "80 rows cannot fit one A4 page");
    let document = lopdf::Document::load_mem(&report.bytes).expect("rendered PDF parses");
    assert_eq!(document.get_pages().len(), report.page_count);
    assert_eq!(report.totals.grand_total(), Decimal::from(3240));
}

#[test]
fn rendering_is_deterministic() {
    let Some(report_a) = render_rows(&sample_rows()) else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_NOTE}");
        return;
    };
    let Some(report_b) = render_rows(&sample_rows()) else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_NOTE}");
        return;
    };

    assert_eq!(
        report_a.bytes.len(),
        report_b.bytes.len(),
        "PDF sizes should match"
    );
    assert_eq!(
        normalized_hash(&report_a.bytes),
        normalized_hash(&report_b.bytes),
        "PDF renders must be deterministic after metadata normalization"
    );
}
