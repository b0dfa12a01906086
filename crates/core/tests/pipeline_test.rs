//! End-to-end tests: page geometry in, merged cause list records out.

use causelist_core::CauseListError;
use causelist_core::layout::{FillColor, FillRect, Page, Token};
use causelist_core::pipeline::{CauseListParser, MissingLabel};
use causelist_core::record::Column;
use causelist_core::source::JsonPageSource;

// ============================================================================
// Page builders
// ============================================================================

const PAGE_WIDTH: f64 = 612.0;

fn page(number: u32) -> Page {
    Page::new(number, PAGE_WIDTH, 792.0)
}

/// Add one line of words at `top`; each word is 5pt per character wide.
fn words(page: &mut Page, top: f64, words: &[(&str, f64)]) {
    for &(text, x0) in words {
        let x1 = x0 + 5.0 * text.chars().count() as f64;
        page.tokens.push(Token::new(text, x0, x1, top, top + 8.0));
    }
}

fn header(page: &mut Page, top: f64) {
    shifted_header(page, top, 0.0);
}

/// The standard header moved `dx` points to the right.
fn shifted_header(page: &mut Page, top: f64, dx: f64) {
    let labels = [
        ("SNO.", 40.0),
        ("CASE", 70.0),
        ("NO.", 100.0),
        ("Petitioner", 180.0),
        ("/", 232.0),
        ("Respondent", 238.0),
        ("Petitioner", 400.0),
        ("/", 452.0),
        ("Respondent", 458.0),
        ("ADVOCATE", 512.0),
    ];
    let moved: Vec<(&str, f64)> = labels.iter().map(|&(w, x0)| (w, x0 + dx)).collect();
    words(page, top, &moved);
}

fn table_end(page: &mut Page, top: f64) {
    words(page, top, &[("NEW", 45.0), ("DELHI", 65.0)]);
}

// ============================================================================
// Single table
// ============================================================================

#[test]
fn header_and_data_line_make_one_record() {
    let mut p = page(1);
    header(&mut p, 100.0);
    words(
        &mut p,
        120.0,
        &[
            ("1", 42.0),
            ("C.A.", 72.0),
            ("No.", 95.0),
            ("123/2025", 115.0),
            ("John", 182.0),
            ("Doe", 210.0),
            ("vs", 230.0),
            ("Jane", 245.0),
            ("Roe", 270.0),
            ("Adv.", 402.0),
            ("X", 430.0),
        ],
    );

    let report = CauseListParser::default().parse_pages(&[p]).unwrap();

    assert_eq!(report.tables, 1);
    assert_eq!(report.records.len(), 1);
    assert!(report.missing_labels.is_empty());
    assert_eq!(report.dropped_tokens, 0);

    let record = &report.records[0];
    assert_eq!(record.cells.sno, "1");
    assert_eq!(record.cells.case_no, "C.A. No. 123/2025");
    assert_eq!(record.cells.parties, "John Doe vs Jane Roe");
    assert_eq!(record.cells.advocate, "Adv. X");
    assert_eq!(record.pages, vec![1]);
}

#[test]
fn wrapped_lines_fold_into_previous_record() {
    let mut p = page(1);
    header(&mut p, 100.0);
    words(&mut p, 120.0, &[("1719", 42.0), ("W.P.", 72.0), ("Alpha", 182.0)]);
    words(&mut p, 130.0, &[(".1", 42.0)]);
    words(&mut p, 140.0, &[("88/2025", 72.0), ("vs", 182.0), ("Beta", 200.0)]);
    words(&mut p, 150.0, &[("1720", 42.0), ("W.P.", 72.0), ("Gamma", 182.0)]);

    let report = CauseListParser::default().parse_pages(&[p]).unwrap();

    assert_eq!(report.rows, 4);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].cells.sno, "1719.1");
    assert_eq!(report.records[0].cells.case_no, "W.P. 88/2025");
    assert_eq!(report.records[0].cells.parties, "Alpha vs Beta");
    assert_eq!(report.records[1].cells.sno, "1720");
}

#[test]
fn tokens_outside_columns_are_counted() {
    let mut p = page(1);
    header(&mut p, 100.0);
    // 69.0 sits in the gap between the serial and case columns.
    words(&mut p, 120.0, &[("1", 42.0), ("*", 69.0), ("C.A.", 72.0)]);

    let report = CauseListParser::default().parse_pages(&[p]).unwrap();

    assert_eq!(report.dropped_tokens, 1);
    assert_eq!(report.records[0].cells.case_no, "C.A.");
}

// ============================================================================
// Session metadata
// ============================================================================

#[test]
fn metadata_is_stamped_until_table_end() {
    let mut p = page(1);
    words(
        &mut p,
        40.0,
        &[
            ("DAILY", 150.0),
            ("CAUSE", 185.0),
            ("LIST", 220.0),
            ("FOR", 245.0),
            ("DATED", 265.0),
            (":", 300.0),
            ("30-12-2025", 310.0),
        ],
    );
    words(&mut p, 55.0, &[("COURT", 200.0), ("NO.", 235.0), (":", 255.0), ("2", 265.0)]);
    words(&mut p, 70.0, &[("HON'BLE", 150.0), ("MR.", 190.0), ("JUSTICE", 210.0), ("A", 250.0)]);
    words(&mut p, 80.0, &[("HON'BLE", 150.0), ("MS.", 190.0), ("JUSTICE", 210.0), ("B", 250.0)]);
    header(&mut p, 100.0);
    words(&mut p, 120.0, &[("1", 42.0), ("C.A.", 72.0)]);
    words(&mut p, 130.0, &[("2", 42.0), ("C.A.", 72.0)]);
    table_end(&mut p, 140.0);
    words(&mut p, 160.0, &[("COURT", 200.0), ("NO.", 235.0), (":", 255.0), ("3", 265.0)]);
    header(&mut p, 180.0);
    words(&mut p, 200.0, &[("3", 42.0), ("C.A.", 72.0)]);

    let report = CauseListParser::default().parse_pages(&[p]).unwrap();

    assert_eq!(report.tables, 2);
    assert_eq!(report.records.len(), 3);
    for record in &report.records[..2] {
        assert_eq!(record.meta.date.as_deref(), Some("30-12-2025"));
        assert_eq!(record.meta.court_no.as_deref(), Some("2"));
        assert_eq!(record.meta.court, None);
        assert_eq!(
            record.meta.justices,
            "HON'BLE MR. JUSTICE A | HON'BLE MS. JUSTICE B"
        );
    }
    assert_eq!(
        report.records[0].judges().collect::<Vec<_>>(),
        vec!["HON'BLE MR. JUSTICE A", "HON'BLE MS. JUSTICE B"]
    );

    let after = &report.records[2];
    assert_eq!(after.meta.date, None);
    assert_eq!(after.meta.court_no.as_deref(), Some("3"));
    assert_eq!(after.meta.court.as_deref(), Some("NEW DELHI"));
    assert!(after.meta.justices.is_empty());
}

#[test]
fn header_inside_table_starts_new_instance() {
    let mut p = page(1);
    words(&mut p, 40.0, &[("DATED", 200.0), (":", 235.0), ("30-12-2025", 245.0)]);
    words(&mut p, 55.0, &[("COURT", 200.0), ("NO.", 235.0), (":", 255.0), ("2", 265.0)]);
    header(&mut p, 100.0);
    words(&mut p, 120.0, &[("1", 42.0), ("C.A.", 72.0)]);
    // No table-end line before the next header.
    shifted_header(&mut p, 140.0, 20.0);
    // 45.0 was inside the old serial column and is left of the new one.
    words(&mut p, 160.0, &[("*", 45.0), ("2", 62.0), ("W.P.", 92.0)]);

    let report = CauseListParser::default().parse_pages(&[p]).unwrap();

    assert_eq!(report.tables, 2);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].cells.sno, "1");
    assert_eq!(report.records[0].cells.case_no, "C.A.");
    assert_eq!(report.records[1].cells.sno, "2");
    assert_eq!(report.records[1].cells.case_no, "W.P.");
    assert_eq!(report.dropped_tokens, 1);
    // Only a table-end line resets the session.
    for record in &report.records {
        assert_eq!(record.meta.date.as_deref(), Some("30-12-2025"));
        assert_eq!(record.meta.court_no.as_deref(), Some("2"));
    }
}

// ============================================================================
// Page boundaries
// ============================================================================

#[test]
fn record_continues_across_pages() {
    let mut first = page(1);
    words(&mut first, 40.0, &[("DATED", 200.0), (":", 235.0), ("30-12-2025", 245.0)]);
    header(&mut first, 100.0);
    words(
        &mut first,
        700.0,
        &[("5", 42.0), ("W.P.", 72.0), ("Alpha", 182.0), ("vs", 215.0)],
    );

    let mut second = page(2);
    // Restated banner at the top of the next page is skipped inside the table.
    words(
        &mut second,
        30.0,
        &[
            ("DAILY", 150.0),
            ("CAUSE", 185.0),
            ("LIST", 220.0),
            ("FOR", 245.0),
            ("DATED", 265.0),
            (":", 300.0),
            ("30-12-2025", 310.0),
        ],
    );
    words(&mut second, 50.0, &[("Beta", 182.0), ("Adv.", 402.0), ("Y", 430.0)]);
    words(&mut second, 60.0, &[("6", 42.0), ("W.P.", 72.0)]);

    let report = CauseListParser::default()
        .parse_pages(&[first, second])
        .unwrap();

    assert_eq!(report.tables, 1);
    assert_eq!(report.records.len(), 2);
    let record = &report.records[0];
    assert_eq!(record.cells.parties, "Alpha vs Beta");
    assert_eq!(record.cells.advocate, "Adv. Y");
    assert_eq!(record.pages, vec![1, 2]);
    assert_eq!(record.page_list(), "1, 2");
    assert_eq!(report.records[1].pages, vec![2]);
    assert_eq!(report.records[1].meta.date.as_deref(), Some("30-12-2025"));
}

#[test]
fn pages_out_of_order_are_rejected() {
    let pages = vec![page(2), page(1)];
    let err = CauseListParser::default().parse_pages(&pages).unwrap_err();
    assert!(matches!(err, CauseListError::InvalidSource(_)));
}

// ============================================================================
// Header detection
// ============================================================================

fn shaded_header_page(shaded: bool) -> Page {
    let mut p = page(1);
    if shaded {
        p.rects.push(FillRect {
            x0: 36.0,
            x1: 576.0,
            top: 98.0,
            bottom: 112.0,
            fill: Some(FillColor::gray(0.8)),
        });
    }
    // No "SNO" anchor: only the shading marks this line as a header.
    words(
        &mut p,
        100.0,
        &[
            ("Sr.", 40.0),
            ("CASE", 70.0),
            ("NO.", 100.0),
            ("Petitioner", 180.0),
            ("/", 232.0),
            ("Respondent", 238.0),
            ("Petitioner", 400.0),
            ("/", 452.0),
            ("Respondent", 458.0),
            ("ADVOCATE", 512.0),
        ],
    );
    words(&mut p, 120.0, &[("1", 42.0), ("C.A.", 72.0), ("Alpha", 182.0)]);
    p
}

#[test]
fn shaded_line_is_header_without_anchors() {
    let report = CauseListParser::default()
        .parse_pages(&[shaded_header_page(true)])
        .unwrap();

    assert_eq!(report.tables, 1);
    assert_eq!(
        report.missing_labels,
        vec![MissingLabel {
            page: 1,
            column: Column::Sno
        }]
    );
    // With no serial column the "1" is dropped and the row has no anchor.
    assert_eq!(report.dropped_tokens, 1);
    assert_eq!(report.orphan_rows, 1);
    assert!(report.records.is_empty());
}

#[test]
fn unshaded_line_without_anchors_is_preamble() {
    let report = CauseListParser::default()
        .parse_pages(&[shaded_header_page(false)])
        .unwrap();

    assert_eq!(report.tables, 0);
    assert_eq!(report.rows, 0);
}

#[test]
fn custom_probe_replaces_fill_lookup() {
    let params = Default::default();
    let probe = |token: &Token, _: &Page| token.text == "Sr.";
    let parser = CauseListParser::with_probe(params, probe);

    let report = parser.parse_pages(&[shaded_header_page(false)]).unwrap();
    assert_eq!(report.tables, 1);
}

// ============================================================================
// Merge validation
// ============================================================================

#[test]
fn continuation_across_courts_is_a_merge_conflict() {
    let mut p = page(1);
    words(&mut p, 50.0, &[("COURT", 200.0), ("NO.", 235.0), (":", 255.0), ("2", 265.0)]);
    header(&mut p, 100.0);
    words(&mut p, 120.0, &[("1", 42.0), ("C.A.", 72.0)]);
    table_end(&mut p, 130.0);
    words(&mut p, 150.0, &[("COURT", 200.0), ("NO.", 235.0), (":", 255.0), ("3", 265.0)]);
    header(&mut p, 170.0);
    words(&mut p, 190.0, &[("Beta", 182.0)]);

    let err = CauseListParser::default().parse_pages(&[p]).unwrap_err();
    match err {
        CauseListError::MergeConflict {
            serial,
            field,
            existing,
            incoming,
        } => {
            assert_eq!(serial, "1");
            assert_eq!(field, "court_no");
            assert_eq!(existing, "2");
            assert_eq!(incoming, "3");
        }
        other => panic!("expected merge conflict, got {other:?}"),
    }
}

// ============================================================================
// JSON source
// ============================================================================

#[test]
fn json_dump_parses_end_to_end() {
    let json = r#"{"pages": [{"width": 612, "height": 792,
        "rects": [{"x0": 36, "x1": 576, "top": 98, "bottom": 112, "fill": [0.8]}],
        "tokens": [
            {"text": "SNO.", "x0": 40, "x1": 60, "top": 100, "bottom": 108},
            {"text": "CASE", "x0": 70, "x1": 90, "top": 100, "bottom": 108},
            {"text": "NO.", "x0": 100, "x1": 115, "top": 100, "bottom": 108},
            {"text": "Petitioner", "x0": 180, "x1": 230, "top": 100, "bottom": 108},
            {"text": "/", "x0": 232, "x1": 237, "top": 100, "bottom": 108},
            {"text": "Respondent", "x0": 238, "x1": 288, "top": 100, "bottom": 108},
            {"text": "Petitioner", "x0": 400, "x1": 450, "top": 100, "bottom": 108},
            {"text": "/", "x0": 452, "x1": 457, "top": 100, "bottom": 108},
            {"text": "Respondent", "x0": 458, "x1": 508, "top": 100, "bottom": 108},
            {"text": "ADVOCATE", "x0": 512, "x1": 552, "top": 100, "bottom": 108},
            {"text": "7", "x0": 42, "x1": 47, "top": 120, "bottom": 128},
            {"text": "Delta", "x0": 182, "x1": 207, "top": 120, "bottom": 128}
        ]}]}"#;

    let mut source = JsonPageSource::new(json.as_bytes());
    let report = CauseListParser::default().parse(&mut source).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].cells.sno, "7");
    assert_eq!(report.records[0].cells.parties, "Delta");
    assert_eq!(report.records[0].pages, vec![1]);
}
