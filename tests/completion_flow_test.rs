//! Integration tests for the completion pipeline
//!
//! Exercises the full keystroke-to-splice flow across components:
//! trigger detection → ranking → suggestion list → commit splicing,
//! plus the editor wired to a filesystem-backed candidate catalog.

use promptloom::editor::{Movement, PromptEditor};
use promptloom::{
    detect, rank, CandidateCatalog, CandidateKind, CandidateProvider, CatalogData, SuggestionList,
    SUGGESTION_CAP,
};
use std::fs;
use tempfile::TempDir;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn wildcard_completion_end_to_end() {
    let buffer = "a cat, __col";
    let candidates = strings(&["colors", "collars", "cool"]);

    let ctx = detect(buffer, buffer.len()).expect("caret sits in a wildcard token");
    assert_eq!(ctx.kind, CandidateKind::File);
    assert_eq!(ctx.query, "col");
    assert_eq!(ctx.start, 7);

    let ranked = rank(&ctx.query, &candidates);
    // Both prefix matches keep input order; the subsequence match ranks last
    assert_eq!(ranked, strings(&["colors", "collars", "cool"]));

    let mut list = SuggestionList::new();
    list.show(ctx, ranked);
    let completion = list.commit().expect("a selection is pending");

    let (text, caret) = completion.apply(buffer);
    assert_eq!(text, "a cat, __colors__");
    assert_eq!(caret, 17);
    assert!(!list.is_visible());
}

#[test]
fn lora_completion_end_to_end() {
    let buffer = "<lora:anim";
    let candidates = strings(&["anime_v1", "animal_style"]);

    let ctx = detect(buffer, 10).expect("caret sits in a lora token");
    assert_eq!(ctx.kind, CandidateKind::Lora);
    assert_eq!(ctx.query, "anim");
    assert_eq!(ctx.start, 0);

    let mut list = SuggestionList::new();
    list.show(ctx, rank("anim", &candidates));
    let completion = list.commit().unwrap();

    let (text, caret) = completion.apply(buffer);
    assert_eq!(text, "<lora:anime_v1:1.0>");
    assert_eq!(caret, 19);
}

#[test]
fn tag_completion_end_to_end() {
    let buffer = "<[re";
    let ctx = detect(buffer, 4).unwrap();
    assert_eq!(ctx.kind, CandidateKind::Tag);

    let mut list = SuggestionList::new();
    let ranked = rank(&ctx.query, &strings(&["red", "blue", "green"]));
    list.show(ctx, ranked);
    let completion = list.commit().unwrap();

    let (text, _) = completion.apply(buffer);
    assert_eq!(text, "<[red]>");
}

#[test]
fn splice_preserves_text_after_the_caret() {
    // Caret in the middle of the buffer: only [start, caret) is replaced
    let buffer = "__col and a hat";
    let ctx = detect(buffer, 5).unwrap();
    assert_eq!(ctx.query, "col");

    let mut list = SuggestionList::new();
    list.show(ctx, strings(&["colors"]));
    let (text, caret) = list.commit().unwrap().apply(buffer);

    assert_eq!(text, "__colors__ and a hat");
    assert_eq!(caret, 10);
}

#[test]
fn cap_bounds_display_but_reports_true_count() {
    let candidates: Vec<String> = (0..120).map(|i| format!("entry_{i:03}")).collect();
    let ctx = detect("__entry", 7).unwrap();

    let mut list = SuggestionList::new();
    list.show(ctx, rank("entry", &candidates));

    assert_eq!(list.total(), 120);
    assert_eq!(list.visible_count(), SUGGESTION_CAP);
    assert!(list.is_truncated());

    // Navigation wraps within the capped window
    list.navigate(-1);
    assert_eq!(list.selected_index(), SUGGESTION_CAP - 1);
    list.navigate(1);
    assert_eq!(list.selected_index(), 0);
}

#[test]
fn editor_with_filesystem_catalog() {
    let temp = TempDir::new().unwrap();
    let wildcards = temp.path().join("wildcards");
    fs::create_dir_all(wildcards.join("clothing")).unwrap();
    fs::write(wildcards.join("colors.txt"), "Red\nBlue\n").unwrap();
    fs::write(wildcards.join("clothing/dresses.txt"), "sundress\n").unwrap();
    fs::write(
        wildcards.join("styles.yaml"),
        "Crimson Fire:\n  Tags:\n    - red\n    - fire\n",
    )
    .unwrap();

    let provider = CandidateProvider::new().wildcards_dir(&wildcards);
    let catalog = CandidateCatalog::new(provider.build());
    let mut editor = PromptEditor::new(catalog.clone());

    for c in "wearing __".chars() {
        editor.type_char(c);
    }
    assert!(editor.suggestions().is_visible());
    assert_eq!(
        editor.suggestions().visible_items(),
        ["clothing/dresses", "colors", "styles"]
    );

    for c in "dre".chars() {
        editor.type_char(c);
    }
    assert_eq!(editor.suggestions().visible_items(), ["clothing/dresses"]);

    assert!(editor.confirm());
    assert_eq!(editor.buffer().text(), "wearing __clothing/dresses__");

    // Tag context draws from the yaml Tags lists
    for c in " <[f".chars() {
        editor.type_char(c);
    }
    assert_eq!(editor.suggestions().visible_items(), ["fire"]);
}

#[test]
fn empty_catalog_degrades_to_no_suggestions() {
    let catalog = CandidateCatalog::new(CatalogData::default());
    let mut editor = PromptEditor::new(catalog);

    for c in "__col".chars() {
        editor.type_char(c);
    }
    assert!(!editor.suggestions().is_visible());
    assert!(!editor.confirm());
    assert_eq!(editor.buffer().text(), "__col");
}

#[test]
fn catalog_refresh_is_visible_on_next_keystroke() {
    let temp = TempDir::new().unwrap();
    let wildcards = temp.path().join("wildcards");
    fs::create_dir_all(&wildcards).unwrap();

    let provider = CandidateProvider::new().wildcards_dir(&wildcards);
    let catalog = CandidateCatalog::new(provider.build());
    let mut editor = PromptEditor::new(catalog.clone());

    for c in "__co".chars() {
        editor.type_char(c);
    }
    assert!(!editor.suggestions().is_visible());

    // New wildcard appears after an explicit refresh plus the next keystroke
    fs::write(wildcards.join("colors.txt"), "Red\n").unwrap();
    provider.refresh(&catalog);

    editor.type_char('l');
    assert!(editor.suggestions().is_visible());
    assert_eq!(editor.suggestions().visible_items(), ["colors"]);
}

#[test]
fn navigation_keys_keep_the_list_steady() {
    let catalog = CandidateCatalog::new(CatalogData {
        files: strings(&["colors", "collars", "cool"]),
        ..Default::default()
    });
    let mut editor = PromptEditor::new(catalog);

    for c in "__col".chars() {
        editor.type_char(c);
    }
    assert_eq!(editor.suggestions().total(), 3);

    // Down/Up move the selection, not the caret; Left doesn't re-detect
    editor.arrow(Movement::Down);
    editor.arrow(Movement::Down);
    assert_eq!(editor.suggestions().selected_item(), Some("cool"));
    editor.arrow(Movement::Left);
    assert_eq!(editor.suggestions().total(), 3);

    assert!(editor.confirm());
    assert_eq!(editor.buffer().text(), "__cool__");
}
