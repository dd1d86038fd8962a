// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Integration tests for the full editing session lifecycle.

use jangin::backend::MockBackend;
use jangin::catalog::Catalog;
use jangin::clock::ManualClock;
use jangin::config::EntryKind;
use jangin::refine::Phase;
use jangin::session::{Session, CONFIG_KEY, DRAFT_KEY};
use jangin::storage::{KvStore, MemoryKv, MemoryStore, PromptStore};
use jangin::suggestion::Suggestion;
use std::time::Duration;

fn suggestion(category: &str, improvement: &str) -> Suggestion {
    Suggestion {
        category: category.to_string(),
        improvement: improvement.to_string(),
        reason: "review".to_string(),
    }
}

#[test]
fn test_full_editing_flow() {
    let mut session = Session::new(Catalog::builtin());

    session.set_project_definition("A team wiki with live collaboration");
    session.apply_layout(jangin::catalog::LayoutKind::SidebarContent);
    session.toggle_module("md_io");
    session.toggle_module("preview");
    session
        .add_entry(EntryKind::Module, "Presence", "Show who is editing each page")
        .unwrap();
    session
        .add_entry(EntryKind::Step, "Scaffold", "Generate the project skeleton")
        .unwrap();

    let text = session.current_text();
    assert!(text.contains("A team wiki with live collaboration"));
    assert!(text.contains("collapsible sidebar"));
    assert!(text.contains("## Markdown import/export"));
    assert!(text.contains("## Live preview"));
    assert!(text.contains("## Presence"));
    assert!(text.contains("1. **Scaffold**: Generate the project skeleton"));
    assert!(!session.is_dirty());
}

#[test]
fn test_optimize_attaches_suggestions_then_restore_clears_them() {
    let mut session = Session::new(Catalog::builtin());
    session.set_project_definition("An expense tracker");
    let baseline = session.current_text().to_string();

    let backend = MockBackend::new(|text, _| format!("# Engineering-grade\n\n{text}"))
        .with_suggestions(vec![
            suggestion("structure", "Group modules by domain"),
            suggestion("performance", "Debounce the preview"),
        ]);

    let report = session.optimize(&backend).unwrap();
    assert_eq!(report.stored_suggestions, 2);
    assert_eq!(session.phase(), Phase::Refined);
    assert_eq!(session.suggestions().len(), 2);
    assert_eq!(session.suggestions()[0].category, "structure");
    assert!(session.current_text().starts_with("# Engineering-grade"));

    session.restore_original();
    assert_eq!(session.current_text(), baseline);
    assert!(session.suggestions().is_empty());
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn test_two_passes_restore_to_first_baseline() {
    let mut session = Session::new(Catalog::builtin());
    session.set_project_definition("A podcast feed reader");
    let original = session.current_text().to_string();

    let backend = MockBackend::new(|text, _| format!("{text}\n\n[pass]"));
    session.optimize(&backend).unwrap();
    session.optimize(&backend).unwrap();
    assert_eq!(session.current_text().matches("[pass]").count(), 2);

    session.restore_original();
    assert_eq!(session.current_text(), original);
}

#[test]
fn test_structural_changes_suppressed_after_refinement() {
    let mut session = Session::new(Catalog::builtin());
    let backend = MockBackend::new(|_, _| "ai text".to_string());
    session.optimize(&backend).unwrap();

    // The refinement set the dirty flag: config edits no longer propagate.
    session.set_project_definition("Ignored until reset");
    assert_eq!(session.current_text(), "ai text");

    session.reset_to_template();
    assert!(session.current_text().contains("Ignored until reset"));
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn test_critique_degradation_keeps_refined_text() {
    let mut session = Session::new(Catalog::builtin());
    let backend = MockBackend::new(|_, _| "refined output".to_string())
        .with_failing_critique("response was prose, not JSON");

    let report = session.optimize(&backend).unwrap();
    assert_eq!(session.current_text(), "refined output");
    assert!(session.suggestions().is_empty());
    assert_eq!(session.phase(), Phase::Refined);
    assert!(report.critique_error.unwrap().is_parse_error());
}

#[test]
fn test_autosave_then_hydrate_new_session() {
    let clock = ManualClock::new();
    let mut kv = MemoryKv::new();

    let mut session = Session::with_clock(Catalog::builtin(), &clock)
        .with_autosave_interval(Duration::from_secs(30));
    session.set_project_definition("A habit tracker");
    session.edit_text("my own spin on the template");

    clock.advance(Duration::from_secs(31));
    assert!(session.autosave(&mut kv).unwrap());
    assert!(kv.get(CONFIG_KEY).unwrap().unwrap().contains("habit tracker"));
    assert_eq!(
        kv.get(DRAFT_KEY).unwrap().as_deref(),
        Some("my own spin on the template")
    );

    let mut restored = Session::new(Catalog::builtin());
    restored.hydrate(&kv).unwrap();
    assert_eq!(restored.config().project_definition, "A habit tracker");
    assert_eq!(restored.current_text(), "my own spin on the template");
    assert!(restored.is_dirty());
}

#[test]
fn test_remote_store_round_trip() {
    let mut store = MemoryStore::new();

    let mut author = Session::new(Catalog::builtin());
    author.set_project_definition("A CI dashboard");
    let id = author.save_to_store(&mut store, "ci dashboard v1").unwrap();

    let records = store.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "ci dashboard v1");

    let mut reader = Session::new(Catalog::builtin());
    let name = reader.load_from_store(&store, id).unwrap();
    assert_eq!(name, "ci dashboard v1");
    assert!(reader.current_text().contains("A CI dashboard"));
    assert!(reader.is_dirty());

    // Loaded text is an edit: recompilation no longer propagates.
    reader.set_project_definition("something else");
    assert!(reader.current_text().contains("A CI dashboard"));
}

#[test]
fn test_store_failure_is_surfaced_verbatim() {
    let store = MemoryStore::new();
    let mut session = Session::new(Catalog::builtin());
    let err = session.load_from_store(&store, 42).unwrap_err();
    assert!(err.is_store_error());
    assert!(err.to_string().contains("42"));
}
