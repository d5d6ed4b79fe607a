use std::path::PathBuf;

use compressor_core::{
    update, AppState, Effect, IntakeFilter, IntakeReport, IntakeStats, JobSnapshot, Msg,
};
use serde_json::json;

fn with_jobs(jobs: &[serde_json::Value]) -> AppState {
    let listing = jobs
        .iter()
        .cloned()
        .map(|value| JobSnapshot::from_json(value).expect("snapshot"))
        .collect();
    let (state, _) = update(AppState::new(), Msg::JobsLoaded(listing));
    state
}

#[test]
fn dropped_paths_become_one_ingest_effect() {
    let (next, effects) = update(
        AppState::new(),
        Msg::FilesDropped(vec![PathBuf::from("/a"), PathBuf::from("/b")]),
    );

    assert_eq!(next, AppState::new());
    assert_eq!(
        effects,
        vec![Effect::IngestFolders {
            paths: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            active_sources: Vec::new(),
        }]
    );
}

#[test]
fn blank_drops_are_ignored() {
    let (_, effects) = update(
        AppState::new(),
        Msg::FilesDropped(vec![PathBuf::from(""), PathBuf::from("   ")]),
    );
    assert!(effects.is_empty());

    let (_, effects) = update(AppState::new(), Msg::FilesDropped(Vec::new()));
    assert!(effects.is_empty());
}

#[test]
fn ingest_effect_carries_only_active_sources() {
    let state = with_jobs(&[
        json!({"id": "1", "sourcePath": "/running", "status": "processing"}),
        json!({"id": "2", "sourcePath": "/held", "status": "paused"}),
        json!({"id": "3", "sourcePath": "/done", "status": "completed"}),
    ]);

    let (_, effects) = update(state, Msg::AddFolderRequested(PathBuf::from("/new")));

    assert_eq!(
        effects,
        vec![Effect::IngestFolders {
            paths: vec![PathBuf::from("/new")],
            active_sources: vec![PathBuf::from("/running"), PathBuf::from("/held")],
        }]
    );
}

#[test]
fn intake_report_updates_last_stats() {
    let report = IntakeReport {
        submitted: vec![PathBuf::from("/b")],
        skipped_empty: vec![PathBuf::from("/empty")],
        skipped_duplicate: Vec::new(),
        failed: vec![(PathBuf::from("/a"), "permission denied".into())],
    };

    let (mut next, effects) = update(AppState::new(), Msg::IntakeFinished(report));

    assert!(effects.is_empty());
    assert_eq!(
        next.view().last_intake,
        Some(IntakeStats {
            submitted: 1,
            skipped: 1,
            failed: 1,
        })
    );
    assert!(next.consume_dirty());
}

#[test]
fn intake_filter_rejects_repeats_and_active_folders() {
    let mut filter = IntakeFilter::new(vec![PathBuf::from("/running")]);

    assert!(!filter.admit(&PathBuf::from("/running")));
    assert!(filter.admit(&PathBuf::from("/fresh")));
    assert!(!filter.admit(&PathBuf::from("/fresh")));
    assert!(filter.admit(&PathBuf::from("/other")));
}
