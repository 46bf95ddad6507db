// Copyright 2026 Pretty Stream Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::*;

// -------------------------------------------------------------------------------------------------
// Soft Line Filling
// -------------------------------------------------------------------------------------------------

#[test]
fn softline_join_breaks_at_the_budget() {
    let words = "01 02 03 04 05 06 07 08 09".split(' ').map(Doc::text);
    let doc = Doc::softline().join(words);
    let mut smart = SmartDocRenderer::new(10);
    assert_eq!(
        smart.to_str(&doc).unwrap(),
        ["01 02 03", "04 05 06", "07 08 09"].join("\n")
    );
}

#[test]
fn narrow_budget_packs_three_per_line() {
    let words = "1 2 3 4 5 6 7 8 9".split(' ').map(Doc::text);
    let doc = Doc::softline().join(words);
    let mut smart = SmartDocRenderer::new(5);
    assert_eq!(
        smart.to_str(&doc).unwrap(),
        ["1 2 3", "4 5 6", "7 8 9"].join("\n")
    );
}

#[test]
fn everything_fits_on_one_line() {
    let words = "a b c".split(' ').map(Doc::text);
    let doc = Doc::softline().join(words);
    assert_eq!(SmartDocRenderer::default().to_str(&doc).unwrap(), "a b c");
}

// -------------------------------------------------------------------------------------------------
// Candidate Selection
// -------------------------------------------------------------------------------------------------

#[test]
fn widest_fitting_candidate_wins() {
    let doc = alt([
        Doc::text("multi"),
        Doc::text("medium1"),
        Doc::text("widest-form"),
    ]);
    assert_eq!(SmartDocRenderer::new(20).to_str(&doc).unwrap(), "widest-form");
    assert_eq!(SmartDocRenderer::new(8).to_str(&doc).unwrap(), "medium1");
    // Nothing fits: the fallback is rendered unconditionally.
    assert_eq!(SmartDocRenderer::new(3).to_str(&doc).unwrap(), "multi");
}

#[test]
fn lines_stay_within_budget_when_fallbacks_fit() {
    let words = (1..=12).map(|i| Doc::text(format!("w{i:02}")));
    let doc = Doc::softline().join(words);
    let mut smart = SmartDocRenderer::new(13);
    let rendered = smart.to_str(&doc).unwrap();
    for line in rendered.lines() {
        assert!(line.chars().count() <= 13, "line too wide: {line:?}");
    }
}

#[test]
fn line_breaks_are_never_charged_against_the_budget() {
    // The candidate fills the line exactly and then breaks; the break must
    // not push it over the edge.
    let doc = alt([
        Doc::text("nope"),
        Doc::text("12345") / Doc::line() / Doc::text("ok"),
    ]);
    let mut smart = SmartDocRenderer::new(5);
    assert_eq!(smart.to_str(&doc).unwrap(), "12345\nok");
}

#[test]
fn emit_hooks_skip_rejected_candidates() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut smart = SmartDocRenderer::new(5);
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let log = Rc::clone(&seen);
    smart.on_emit(move |_, token| {
        log.borrow_mut().push(token.text().to_string());
        Ok(token)
    });
    let doc = alt([Doc::text("multi"), Doc::text("too-wide-for-it")]);
    assert_eq!(smart.to_str(&doc).unwrap(), "multi");
    assert_eq!(*seen.borrow(), vec!["multi"]);
}

#[test]
fn fail_candidates_do_not_mask_errors() {
    let doc = alt([Doc::text("fallback"), cat([Doc::text("x"), Doc::fail()])]);
    assert_eq!(
        SmartDocRenderer::default().to_str(&doc),
        Err(RenderError::Fail)
    );
}

// -------------------------------------------------------------------------------------------------
// Interplay with the Simple Rules
// -------------------------------------------------------------------------------------------------

#[test]
fn smart_renders_tables_like_simple() {
    let info = RowInfo::default();
    let doc = table([
        row([Doc::text("a"), Doc::text("bb")], info.clone()),
        row([Doc::text("ccc"), Doc::text("d")], info),
    ]);
    assert_eq!(
        SmartDocRenderer::default().to_str(&doc).unwrap(),
        "a   bb\nccc d\n"
    );
}

#[test]
fn table_alternative_falls_back_when_too_wide() {
    let info = RowInfo::default();
    let docs = vec![
        row([Doc::text("a"), Doc::text("bb")], info.clone()),
        row([Doc::text("ccc"), Doc::text("d")], info),
    ];
    let doc = cat(create_tables(docs));
    assert_eq!(
        SmartDocRenderer::new(10).to_str(&doc).unwrap(),
        "a   bb\nccc d\n"
    );
    // The aligned table does not fit, so the rows render one by one.
    assert_eq!(
        SmartDocRenderer::new(5).to_str(&doc).unwrap(),
        "a bb\n\nccc d\n"
    );
}

#[test]
fn quoting_survives_the_smart_path() {
    let doc = single_quote([Doc::text("'hi'")]);
    assert_eq!(SmartDocRenderer::default().to_str(&doc).unwrap(), "'\\'hi\\''");
}
