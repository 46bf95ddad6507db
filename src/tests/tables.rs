// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::*;

fn simple() -> SimpleDocRenderer {
    SimpleDocRenderer::default()
}

// -------------------------------------------------------------------------------------------------
// Rows
// -------------------------------------------------------------------------------------------------

#[test]
fn a_row_ends_its_line() {
    let doc = row([Doc::text("a"), Doc::text("bb")], RowInfo::default());
    assert_eq!(simple().to_str(&doc).unwrap(), "a bb\n");
}

#[test]
fn min_col_widths_force_wider_columns() {
    let info = RowInfo {
        min_col_widths: vec![Some(5), None],
        ..RowInfo::default()
    };
    let doc = row([Doc::text("ab"), Doc::text("c")], info);
    assert_eq!(simple().to_str(&doc).unwrap(), "ab    c\n");
}

#[test]
fn row_adopts_cells_of_matching_rows() {
    let info = RowInfo::default();
    let inner = row([Doc::text("a"), Doc::text("b")], info.clone());
    let outer = row([inner, Doc::text("c")], info.clone());
    assert_eq!(
        outer,
        row([Doc::text("a"), Doc::text("b"), Doc::text("c")], info)
    );
}

#[test]
fn row_hints_end_the_line() {
    let doc = row([Doc::text("ab"), Doc::text("cde")], RowInfo::default());
    assert_eq!(doc.width_hint(), WidthHint::new(6, true));
}

// -------------------------------------------------------------------------------------------------
// Tables
// -------------------------------------------------------------------------------------------------

#[test]
fn table_unifies_column_widths() {
    let info = RowInfo::default();
    let doc = table([
        row([Doc::text("a"), Doc::text("bb")], info.clone()),
        row([Doc::text("ccc"), Doc::text("d")], info),
    ]);
    assert_eq!(simple().to_str(&doc).unwrap(), "a   bb\nccc d\n");
}

#[test]
fn custom_padding_and_separator() {
    let info = RowInfo {
        hpad: Token::new("."),
        hsep: Token::new("|"),
        ..RowInfo::default()
    };
    let doc = table([
        row([Doc::text("a"), Doc::text("bb")], info.clone()),
        row([Doc::text("ccc"), Doc::text("d")], info),
    ]);
    assert_eq!(simple().to_str(&doc).unwrap(), "a..|bb\nccc|d\n");
}

#[test]
fn declared_minimums_unify_across_rows() {
    let wide = RowInfo {
        min_col_widths: vec![Some(6)],
        ..RowInfo::default()
    };
    let doc = table([
        row([Doc::text("a"), Doc::text("x")], wide),
        row([Doc::text("bbb"), Doc::text("y")], RowInfo::default()),
    ]);
    assert_eq!(simple().to_str(&doc).unwrap(), "a      x\nbbb    y\n");
}

// -------------------------------------------------------------------------------------------------
// Table Discovery
// -------------------------------------------------------------------------------------------------

#[test]
fn create_tables_groups_adjacent_rows() {
    let info = RowInfo::default();
    let docs = vec![
        Doc::text("header"),
        row([Doc::text("a"), Doc::text("bb")], info.clone()),
        row([Doc::text("ccc"), Doc::text("d")], info),
        Doc::text("footer"),
    ];
    let grouped = create_tables(docs);
    assert_eq!(grouped.len(), 3);
    let mut longest = SimpleDocRenderer::new(SimpleLayout::LongestLines);
    assert_eq!(longest.to_str(&grouped[1]).unwrap(), "a   bb\nccc d\n");
    let mut shortest = SimpleDocRenderer::new(SimpleLayout::ShortestLines);
    assert_eq!(shortest.to_str(&grouped[1]).unwrap(), "a bb\n\nccc d\n");
}

#[test]
fn create_tables_needs_at_least_two_rows() {
    let docs = vec![
        row([Doc::text("only")], RowInfo::default()),
        Doc::text("tail"),
    ];
    let grouped = create_tables(docs.clone());
    assert_eq!(grouped, docs);
}

#[test]
fn create_tables_respects_type_boundaries() {
    let a = RowInfo {
        table_type: Some("a".into()),
        ..RowInfo::default()
    };
    let b = RowInfo {
        table_type: Some("b".into()),
        ..RowInfo::default()
    };
    let docs = vec![row([Doc::text("x")], a), row([Doc::text("y")], b)];
    let grouped = create_tables(docs.clone());
    assert_eq!(grouped, docs);
}

#[test]
fn create_tables_sees_rows_inside_alternatives() {
    let info = RowInfo::default();
    let r1 = row([Doc::text("k1"), Doc::text("v1")], info.clone());
    let r2 = row([Doc::text("key2"), Doc::text("v2")], info);
    let docs = vec![
        alt([Doc::text("k1=v1"), r1]),
        alt([Doc::text("key2=v2"), r2]),
    ];
    let grouped = create_tables(docs);
    assert_eq!(grouped.len(), 1);
    let mut longest = SimpleDocRenderer::new(SimpleLayout::LongestLines);
    assert_eq!(longest.to_str(&grouped[0]).unwrap(), "k1   v1\nkey2 v2\n");
    let mut shortest = SimpleDocRenderer::new(SimpleLayout::ShortestLines);
    assert_eq!(shortest.to_str(&grouped[0]).unwrap(), "k1=v1\nkey2=v2");
}
