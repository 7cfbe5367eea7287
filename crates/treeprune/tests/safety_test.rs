mod common;

use common::*;
use treeprune_lib::*;

#[test]
fn test_missing_patterns_fails_before_any_mutation() {
    let fixture = TreeFixture::with_files(&["README.md", "junk/a.txt"]);
    let spy = SpyFileSystem::default();
    let mut engine = PruneEngine::new(
        &spy,
        PruneConfig {
            skip: false,
            patterns: None,
            post_prune: None,
        },
        Platform::Linux,
        &fixture.trash,
        EngineOptions::default(),
    );

    let result = engine.run(&fixture.root);

    assert!(matches!(result, Err(PruneError::Config(_))));
    assert_eq!(spy.call_count(), 0);
    assert_eq!(engine.state(), EngineState::Failed);
    assert_eq!(TreeFixture::list(&fixture.root), vec!["README.md", "junk/a.txt"]);
    assert!(!fixture.trash.exists());
}

#[test]
fn test_invalid_platform_fails_before_any_mutation() {
    let fixture = TreeFixture::with_files(&["README.md", "junk/a.txt"]);
    let spy = SpyFileSystem::default();
    let mut engine = PruneEngine::new(
        &spy,
        config(vec![rule(&["README.md"], &[]), rule_for(&["*.dll"], "win64")]),
        Platform::Linux,
        &fixture.trash,
        EngineOptions::default(),
    );

    let err = engine.run(&fixture.root).unwrap_err();

    assert!(err.to_string().contains("win64"));
    assert_eq!(spy.call_count(), 0);
    assert!(fixture.exists("junk/a.txt"));
}

#[test]
fn test_invalid_glob_fails_before_any_mutation() {
    let fixture = TreeFixture::with_files(&["a.txt"]);
    let spy = SpyFileSystem::default();
    let mut engine = PruneEngine::new(
        &spy,
        config(vec![rule(&["src/[oops"], &[])]),
        Platform::Linux,
        &fixture.trash,
        EngineOptions::default(),
    );

    let err = engine.run(&fixture.root).unwrap_err();

    assert!(matches!(err, PruneError::Pattern { ref pattern, .. } if pattern == "src/[oops"));
    assert_eq!(spy.call_count(), 0);
}

#[test]
fn test_dry_run_performs_no_mutation() {
    let fixture = TreeFixture::with_files(&["README.md", "junk/a.txt"]);
    let spy = SpyFileSystem::default();
    let mut engine = PruneEngine::new(
        &spy,
        config(vec![rule(&["README.md"], &[])]),
        Platform::Linux,
        &fixture.trash,
        EngineOptions { dry_run: true },
    );

    let report = engine.run(&fixture.root).unwrap();

    assert_eq!(report.pruned_paths(), vec!["junk/a.txt"]);
    assert_eq!(spy.call_count(), 0);
}

#[test]
fn test_move_failure_aborts_run() {
    let fixture = TreeFixture::with_files(&["a.txt", "b.txt", "c.txt", "keep.md"]);
    let failing = FailingRename::new(1);
    let mut engine = PruneEngine::new(
        &failing,
        config(vec![rule(&["keep.md"], &[])]),
        Platform::Linux,
        &fixture.trash,
        EngineOptions::default(),
    );

    let result = engine.run(&fixture.root);

    match result {
        Err(PruneError::Quarantine { path, .. }) => assert_eq!(path, fixture.root.join("b.txt")),
        other => panic!("Expected Quarantine error, got {:?}", other),
    }
    assert_eq!(engine.state(), EngineState::Failed);

    // a.txt was already quarantined; b.txt failed; c.txt was never touched.
    assert!(fixture.in_trash("a.txt"));
    assert!(fixture.exists("b.txt"));
    assert!(fixture.exists("c.txt"));
    assert!(!fixture.in_trash("c.txt"));
    assert_eq!(failing.seen.get(), 2);

    assert!(matches!(
        engine.run(&fixture.root),
        Err(PruneError::InvalidStateTransition { .. })
    ));
}

#[test]
fn test_failed_run_keeps_audit_log() {
    let fixture = TreeFixture::with_files(&["a.txt", "b.txt", "keep.md"]);
    let failing = FailingRename::new(1);
    let mut engine = PruneEngine::new(
        &failing,
        config(vec![rule(&["keep.md"], &[])]),
        Platform::Linux,
        &fixture.trash,
        EngineOptions::default(),
    );

    let mut seen = Vec::new();
    let result = engine.run_with(&fixture.root, |d| seen.push(d.path.clone()));
    assert!(result.is_err());
    assert_eq!(seen, vec!["a.txt", "b.txt"]);

    let partial = engine.partial_report().expect("failed run keeps its report");
    assert!(partial.is_failed());
    assert_eq!(partial.pruned_paths(), vec!["a.txt", "b.txt"]);

    let log_path = fixture.temp_dir.path().join("prune.log");
    partial.write_log(&log_path).unwrap();
    let log = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines[0], "pruned a.txt");
    assert_eq!(lines[1], "pruned b.txt");
    assert!(lines[2].starts_with("failed: Failed to quarantine"));
    assert!(lines[2].contains("b.txt"));
}

#[test]
fn test_invalid_command_platform_fails_before_any_mutation() {
    let fixture = TreeFixture::with_files(&["README.md", "junk/a.txt"]);
    let spy = SpyFileSystem::default();
    let mut engine = PruneEngine::new(
        &spy,
        PruneConfig {
            post_prune: Some(vec![PostPruneCommand::Scoped(ScopedCommand {
                command: "touch ran.txt".to_string(),
                platform: Some(PlatformSpec::One("plan9".to_string())),
            })]),
            ..config(vec![rule(&["README.md"], &[])])
        },
        Platform::Linux,
        &fixture.trash,
        EngineOptions::default(),
    );

    let err = engine.run(&fixture.root).unwrap_err();

    assert!(matches!(err, PruneError::InvalidCommandPlatform { index: 1, .. }));
    assert_eq!(spy.call_count(), 0);
    assert!(fixture.exists("junk/a.txt"));
    assert!(!fixture.exists("ran.txt"));
}

#[test]
fn test_existing_trash_entry_is_never_overwritten() {
    let fixture = TreeFixture::with_files(&["a.txt"]);
    std::fs::create_dir_all(&fixture.trash).unwrap();
    std::fs::write(fixture.trash.join("a.txt"), b"earlier run").unwrap();

    let err = run_default(&fixture).unwrap_err();

    assert!(matches!(err, PruneError::Conflict(_)));
    assert_eq!(std::fs::read(fixture.trash.join("a.txt")).unwrap(), b"earlier run");
    assert!(fixture.exists("a.txt"));
}

fn run_default(fixture: &TreeFixture) -> Result<PruneReport> {
    let mut engine = PruneEngine::new(
        &RealFileSystem,
        config(vec![]),
        Platform::Linux,
        &fixture.trash,
        EngineOptions::default(),
    );
    engine.run(&fixture.root)
}
