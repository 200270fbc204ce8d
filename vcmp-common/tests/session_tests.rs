//! End-to-end session tests against a corpus on disk
//!
//! Tests cover:
//! - Corpus load through export for a full session
//! - Conservation of media counts while drawing
//! - Quit with and without export
//! - Missing fake folder
//! - Media names that cannot be exported as text

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vcmp_common::{Error, Session, SessionConfig, SessionPhase, Side};

/// Test helper: corpus with `real` and `fake` mp4 files under `fake_dir`
fn create_corpus(root: &Path, real: usize, fake: usize, fake_dir: &str) {
    fs::create_dir_all(root.join("real")).unwrap();
    fs::create_dir_all(root.join(fake_dir)).unwrap();
    for i in 0..real {
        fs::write(root.join("real").join(format!("r{i}.mp4")), b"").unwrap();
    }
    for i in 0..fake {
        fs::write(root.join(fake_dir).join(format!("f{i}.mp4")), b"").unwrap();
    }
}

fn config(base: &Path, out: &Path) -> SessionConfig {
    SessionConfig {
        base_dir: base.to_path_buf(),
        layout: Default::default(),
        output_dir: out.to_path_buf(),
        run_id: Some("session-test".to_string()),
        shuffle_seed: Some(2024),
    }
}

#[test]
fn test_two_by_two_corpus_is_fully_consumed() {
    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    create_corpus(base.path(), 2, 2, "fake");

    let mut session = Session::start(&config(base.path(), out.path())).unwrap();
    for choice in [Side::Left, Side::Right] {
        let trial = session.next_trial().unwrap();
        session.submit(trial.id, choice).unwrap();
    }

    let summary = session.summary();
    assert_eq!(summary.remaining_real, 0);
    assert_eq!(summary.remaining_fake, 0);
    assert_eq!(summary.completed, 2);
    assert_eq!(session.selections().len(), 2);
    assert_eq!(summary.phase, SessionPhase::Exhausted);
    assert!(!session.has_next());
}

#[test]
fn test_leftover_items_are_unused() {
    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    create_corpus(base.path(), 5, 2, "synthetic");

    let mut session = Session::start(&config(base.path(), out.path())).unwrap();
    let mut drawn = 0;
    while session.has_next() {
        let trial = session.next_trial().unwrap();
        session.submit(trial.id, Side::Left).unwrap();
        drawn += 1;
        assert_eq!(session.summary().remaining_real + drawn, 5);
    }

    assert_eq!(drawn, 2);
    assert_eq!(session.summary().remaining_real, 3);
    assert!(matches!(session.next_trial(), Err(Error::SequenceExhausted)));
}

#[test]
fn test_quit_with_export_after_three_selections() {
    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    create_corpus(base.path(), 4, 4, "fake");

    let mut session = Session::start(&config(base.path(), out.path())).unwrap();
    let choices = [Side::Left, Side::Right, Side::Right];
    let mut expected = Vec::new();
    for choice in choices {
        let trial = session.next_trial().unwrap();
        expected.push(choice == trial.real_position);
        session.submit(trial.id, choice).unwrap();
    }

    let outcome = session.quit(true).unwrap();
    let path = outcome.exported_to.unwrap();
    assert_eq!(path, out.path().join("session-test.csv"));
    assert_eq!(outcome.selections, 3);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "real_vid,fake_vid,real_selection,real_pos,selected_real");

    for (line, want) in lines[1..].iter().zip(expected) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5);
        let selected_real: bool = fields[4].parse().unwrap();
        assert_eq!(selected_real, want);
        assert_eq!(selected_real, fields[2] == fields[3]);
        assert!(fields[0].contains("real"));
    }
}

#[test]
fn test_quit_without_export_writes_nothing() {
    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    create_corpus(base.path(), 1, 1, "fake");

    let mut session = Session::start(&config(base.path(), out.path())).unwrap();
    let trial = session.next_trial().unwrap();
    session.submit(trial.id, Side::Left).unwrap();

    let outcome = session.quit(false).unwrap();
    assert!(outcome.exported_to.is_none());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_export_twice_overwrites() {
    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    create_corpus(base.path(), 2, 2, "fake");

    let mut session = Session::start(&config(base.path(), out.path())).unwrap();
    let trial = session.next_trial().unwrap();
    session.submit(trial.id, Side::Right).unwrap();

    session.export().unwrap();
    let path = session.export().unwrap();
    let rows = fs::read_to_string(path).unwrap().lines().count() - 1;
    assert_eq!(rows, session.selections().len());
}

#[test]
fn test_missing_fake_folder_fails_before_any_trial() {
    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::create_dir(base.path().join("real")).unwrap();

    let err = Session::start(&config(base.path(), out.path())).unwrap_err();
    assert!(matches!(err, Error::InvalidCorpus { .. }));
}

#[test]
fn test_generated_run_id_when_absent() {
    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    create_corpus(base.path(), 1, 1, "fake");

    let mut cfg = config(base.path(), out.path());
    cfg.run_id = None;
    let session = Session::start(&cfg).unwrap();
    assert_eq!(session.run_id().len(), "YYYYMMDD_HHMMSS_".len() + 32);
}

#[test]
fn test_same_seed_same_pairs() {
    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    create_corpus(base.path(), 6, 6, "fake");

    let draw = || {
        let mut session = Session::start(&config(base.path(), out.path())).unwrap();
        let mut pairs = Vec::new();
        while session.has_next() {
            let trial = session.next_trial().unwrap();
            session.submit(trial.id, Side::Left).unwrap();
            pairs.push((trial.real.path, trial.fake.path, trial.real_position));
        }
        pairs
    };
    assert_eq!(draw(), draw());
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_media_name_does_not_block_export() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let base = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    create_corpus(base.path(), 1, 1, "fake");
    fs::write(
        base.path().join("real").join(OsStr::from_bytes(b"r\xff.mp4")),
        b"",
    )
    .unwrap();

    let mut session = Session::start(&config(base.path(), out.path())).unwrap();
    assert_eq!(session.summary().remaining_real, 1);

    let trial = session.next_trial().unwrap();
    assert!(trial.real.path.to_str().is_some());
    session.submit(trial.id, Side::Left).unwrap();

    let outcome = session.quit(true).unwrap();
    let written = fs::read_to_string(outcome.exported_to.unwrap()).unwrap();
    assert_eq!(written.lines().count(), 2);
}
