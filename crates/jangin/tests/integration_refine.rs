// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Integration tests for refinement flow edge cases: busy rejection,
//! staleness, and failure handling across the split delivery API.

use jangin::backend::{FailingBackend, MockBackend};
use jangin::catalog::Catalog;
use jangin::error::Error;
use jangin::refine::{Completion, CritiqueOutcome, Phase};
use jangin::session::Session;
use jangin::suggestion::{parse_suggestions, Suggestion};

fn suggestion(category: &str) -> Suggestion {
    Suggestion {
        category: category.to_string(),
        improvement: "tighten".to_string(),
        reason: "clarity".to_string(),
    }
}

#[test]
fn test_second_pass_rejected_while_in_flight() {
    let mut session = Session::new(Catalog::builtin());
    let _ticket = session.begin_optimize().unwrap();

    assert!(matches!(session.begin_optimize(), Err(Error::Busy)));
    // The blocking composition is rejected the same way.
    let backend = MockBackend::new(|t, _| t.to_string());
    assert!(matches!(session.optimize(&backend), Err(Error::Busy)));
}

#[test]
fn test_refine_failure_is_single_terminal_error() {
    let mut session = Session::new(Catalog::builtin());
    let before = session.current_text().to_string();

    let err = session.optimize(&FailingBackend::new("dns failure")).unwrap_err();
    assert!(err.is_backend_error());
    assert!(!err.is_parse_error());
    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(session.current_text(), before);
    assert!(session.suggestions().is_empty());

    // Re-invocation restarts the sequence from the current text.
    let backend = MockBackend::new(|text, _| format!("fixed {text}"));
    session.optimize(&backend).unwrap();
    assert_eq!(session.phase(), Phase::Refined);
    assert!(session.current_text().starts_with("fixed "));
}

#[test]
fn test_restore_during_flight_invalidates_pass() {
    let mut session = Session::new(Catalog::builtin());

    // First pass establishes a baseline and refined text.
    let backend = MockBackend::new(|_, _| "first refinement".to_string());
    session.optimize(&backend).unwrap();

    // Second pass goes in flight; the user restores before it lands.
    let ticket = session.begin_optimize().unwrap();
    session.restore_original();
    assert_eq!(session.phase(), Phase::Idle);
    let restored = session.current_text().to_string();

    let completion = session
        .deliver_refined(ticket, Ok("zombie refinement".to_string()))
        .unwrap();
    assert_eq!(completion, Completion::Discarded);
    assert_eq!(session.current_text(), restored);
}

#[test]
fn test_split_delivery_happy_path() {
    let mut session = Session::new(Catalog::builtin());
    session.set_project_definition("A log viewer");

    let ticket = session.begin_optimize().unwrap();
    assert_eq!(session.phase(), Phase::Refining);

    let completion = session
        .deliver_refined(ticket, Ok("refined by host".to_string()))
        .unwrap();
    assert_eq!(completion, Completion::Applied);
    assert_eq!(session.current_text(), "refined by host");

    let outcome = session.deliver_critique(ticket, Ok(vec![suggestion("style")]));
    assert!(matches!(outcome, CritiqueOutcome::Stored(1)));
    assert_eq!(session.phase(), Phase::Refined);
    assert_eq!(session.suggestions().len(), 1);
}

#[test]
fn test_unparseable_critique_leaves_previous_suggestions() {
    let mut session = Session::new(Catalog::builtin());

    // First pass stores suggestions.
    let backend = MockBackend::new(|_, _| "v1".to_string())
        .with_suggestions(vec![suggestion("structure")]);
    session.optimize(&backend).unwrap();
    assert_eq!(session.suggestions().len(), 1);

    // A standalone critique call that fails to parse never reaches the
    // session: the set keeps whatever it had.
    let err = parse_suggestions("not json").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(session.suggestions().len(), 1);
}

#[test]
fn test_delivery_after_failure_pass_is_ignored() {
    let mut session = Session::new(Catalog::builtin());

    let ticket = session.begin_optimize().unwrap();
    let err = session
        .deliver_refined(ticket, Err(Error::backend("socket closed")))
        .unwrap_err();
    assert!(err.is_backend_error());
    assert_eq!(session.phase(), Phase::Failed);

    // A duplicate delivery for the dead pass changes nothing.
    let completion = session
        .deliver_refined(ticket, Ok("duplicate".to_string()))
        .unwrap();
    assert_eq!(completion, Completion::Discarded);
    assert_eq!(session.phase(), Phase::Failed);
}
