// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use serde_json::json;

use crate::*;

fn round_trip(doc: &Doc) {
    let value = serde_json::to_value(doc).unwrap();
    let back: Doc = serde_json::from_value(value).unwrap();
    assert_eq!(&back, doc);
}

// -------------------------------------------------------------------------------------------------
// Round Trips
// -------------------------------------------------------------------------------------------------

#[test]
fn round_trip_core_variants() {
    round_trip(&Doc::empty());
    round_trip(&Doc::space());
    round_trip(&Doc::line());
    round_trip(&Doc::softline());
    round_trip(&Doc::fail());
    round_trip(&Doc::text("hello"));
    round_trip(&cat(["hello world"]));
    round_trip(&alt([Doc::text("a"), Doc::text("bbb")]));
    round_trip(&Doc::text("body").nest(4));
    round_trip(&Doc::text("body").nest_overlap(4));
    round_trip(&single_quote([Doc::text("it")]));
    round_trip(&double_quote([Doc::text("it")]));
    round_trip(&smart_quote([Doc::text("it")]));
    round_trip(&inline(cat(["a\nb"])));
}

#[test]
fn round_trip_rows_and_tables() {
    let info = RowInfo {
        table_type: Some("bindings".into()),
        hpad: Token::new("."),
        hsep: Token::new("|"),
        min_col_widths: vec![Some(4), None],
    };
    let table_doc = table([
        row([Doc::text("a"), Doc::text("b")], info.clone()),
        row([Doc::text("cc"), Doc::text("dd")], info),
    ]);
    round_trip(&table_doc);
}

#[test]
fn round_trip_restores_interning() {
    let value = serde_json::to_value(Doc::softline()).unwrap();
    let back: Doc = serde_json::from_value(value).unwrap();
    assert!(back.ptr_eq(&Doc::softline()));
    let value = serde_json::to_value(Doc::space()).unwrap();
    let back: Doc = serde_json::from_value(value).unwrap();
    assert!(back.ptr_eq(&Doc::space()));
}

// -------------------------------------------------------------------------------------------------
// Dictionary Shape
// -------------------------------------------------------------------------------------------------

#[test]
fn dictionary_form_uses_type_tags() {
    assert_eq!(
        serde_json::to_value(Doc::text("hi")).unwrap(),
        json!({"type": "Text", "text": "hi"})
    );
    assert_eq!(
        serde_json::to_value(Doc::softline()).unwrap(),
        json!({"type": "SoftLine"})
    );
    assert_eq!(
        serde_json::to_value(Doc::fail()).unwrap(),
        json!({"type": "Fail"})
    );
    assert_eq!(
        serde_json::to_value(single_quote([Doc::text("x")])).unwrap(),
        json!({
            "type": "Cat",
            "docs": [
                {"type": "Text", "text": "'"},
                {
                    "type": "Edit",
                    "function": "escape_single_and_unescape_double",
                    "doc": {"type": "Text", "text": "x"},
                },
                {"type": "Text", "text": "'"},
            ],
        })
    );
}

#[test]
fn golden_render_from_dictionary() {
    let doc: Doc = serde_json::from_value(json!({
        "type": "Cat",
        "docs": [
            {"type": "Text", "text": "label:"},
            {"type": "Space"},
            {"type": "Nest", "indent": 2, "overlap": false, "doc": {
                "type": "Cat",
                "docs": [
                    {"type": "Text", "text": "a"},
                    {"type": "Line"},
                    {"type": "Text", "text": "b"},
                ],
            }},
        ],
    }))
    .unwrap();
    let mut renderer = SimpleDocRenderer::default();
    assert_eq!(renderer.to_str(&doc).unwrap(), "label: a\n  b");
}

#[test]
fn golden_smart_render_from_dictionary() {
    let words: Vec<_> = (1..=9)
        .map(|i| json!({"type": "Text", "text": format!("{i:02}")}))
        .collect();
    let mut docs = Vec::new();
    for (i, word) in words.into_iter().enumerate() {
        if i > 0 {
            docs.push(json!({"type": "SoftLine"}));
        }
        docs.push(word);
    }
    let doc: Doc = serde_json::from_value(json!({"type": "Cat", "docs": docs})).unwrap();
    let mut renderer = SmartDocRenderer::new(10);
    assert_eq!(
        renderer.to_str(&doc).unwrap(),
        ["01 02 03", "04 05 06", "07 08 09"].join("\n")
    );
}

#[test]
fn plain_escape_editors_decode_and_render() {
    // The non-unescaping editors are reachable through the dictionary form.
    let doc: Doc = serde_json::from_value(json!({
        "type": "Edit",
        "function": "escape_single",
        "doc": {"type": "Text", "text": "\\'it\\'"},
    }))
    .unwrap();
    let mut renderer = SimpleDocRenderer::default();
    assert_eq!(renderer.to_str(&doc).unwrap(), "\\'it\\'");

    let doc: Doc = serde_json::from_value(json!({
        "type": "Edit",
        "function": "escape_double",
        "doc": {"type": "Text", "text": "\"q\""},
    }))
    .unwrap();
    assert_eq!(renderer.to_str(&doc).unwrap(), "\\\"q\\\"");
}

// -------------------------------------------------------------------------------------------------
// Validation
// -------------------------------------------------------------------------------------------------

#[test]
fn decode_rejects_whitespace_text() {
    let result: Result<Doc, _> =
        serde_json::from_value(json!({"type": "Text", "text": "a b"}));
    assert!(result.is_err());
}

#[test]
fn decode_rejects_bad_padding() {
    let result: Result<Doc, _> = serde_json::from_value(json!({
        "type": "Row",
        "cells": [{"type": "Text", "text": "a"}],
        "info": {"table_type": null, "hpad": "--", "hsep": " ", "min_col_widths": []},
    }));
    assert!(result.is_err());
}

#[test]
fn decode_rejects_newline_separators() {
    let result: Result<Doc, _> = serde_json::from_value(json!({
        "type": "Row",
        "cells": [{"type": "Text", "text": "a"}],
        "info": {"table_type": null, "hpad": " ", "hsep": "\n", "min_col_widths": []},
    }));
    assert!(result.is_err());
}

#[test]
fn decode_rejects_unknown_tags() {
    let result: Result<Doc, _> = serde_json::from_value(json!({"type": "Wat"}));
    assert!(result.is_err());
}
