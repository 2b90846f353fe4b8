use std::fs;
use std::path::{Path, PathBuf};

use file_gather::prelude::*;
use tempfile::tempdir;

/// Keeps a plain-text trace of the events of a run
#[derive(Default)]
struct RecordingReporter {
    events: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &Event<'_>) {
        let line = match event {
            Event::SourceMissing { source } => format!("missing {}", source.display()),
            Event::Started { mode, .. } => format!("started {}", mode.verb()),
            Event::FileHandled { outcome, .. } => match outcome {
                FileOutcome::Transferred { source, .. } => format!("ok {}", file_name(source)),
                FileOutcome::Failed { source, .. } => format!("failed {}", file_name(source)),
            },
            Event::ScanFailed { .. } => "scan failed".to_string(),
            Event::Completed { .. } => "completed".to_string(),
        };
        self.events.push(line);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn is_timestamped(name: &str, stem: &str, extension: &str) -> bool {
    name.strip_prefix(&format!("{stem}_"))
        .and_then(|rest| rest.strip_suffix(extension))
        .is_some_and(|stamp| stamp.len() == 14 && stamp.chars().all(|c| c.is_ascii_digit()))
}

fn run(options: &Options) -> (ConsolidationReport, Vec<String>) {
    let mut reporter = RecordingReporter::default();
    let report = consolidate(options, &mut reporter).expect("run should not fail");
    (report, reporter.events)
}

#[test]
fn test_missing_source_aborts_without_creating_destination() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("does_not_exist");
    let destination = dir.path().join("out");

    let (report, events) = run(&Options::builder(&source, &destination).build());

    assert_eq!(report.state, RunState::Aborted);
    assert!(report.outcomes.is_empty());
    assert!(!destination.exists());
    assert_eq!(events, vec![format!("missing {}", source.display())]);
}

#[test]
fn test_exclusion_and_type_filter_scenario() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("A");
    let destination = dir.path().join("D");
    write(&source.join("1.jpg"), "one");
    write(&source.join("B/2.txt"), "two");
    write(&source.join("C/3.jpg"), "three");

    let options = Options::builder(&source, &destination)
        .types(TypeFilter::new(["jpg"]))
        .exclude(ExclusionSet::new(["C"]))
        .build();
    let (report, events) = run(&options);

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(listing(&destination), vec!["1.jpg"]);
    assert_eq!(fs::read_to_string(destination.join("1.jpg")).unwrap(), "one");
    assert!(source.join("B/2.txt").exists());
    assert!(source.join("C/3.jpg").exists());
    assert_eq!(events, vec!["started copy", "ok 1.jpg", "completed"]);
}

#[test]
fn test_excluded_directory_is_skipped_at_every_depth() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("keep.txt"), "k");
    write(&source.join("x/y/node_modules/lib.js"), "l");
    write(&source.join("node_modules/top.js"), "t");
    write(&source.join("x/y/app.js"), "a");

    let options = Options::builder(&source, &destination)
        .exclude(ExclusionSet::new(["node_modules"]))
        .build();
    run(&options);

    assert_eq!(listing(&destination), vec!["app.js", "keep.txt"]);
}

#[test]
fn test_collision_keeps_existing_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&destination.join("1.jpg"), "original");
    write(&source.join("1.jpg"), "incoming");

    let (report, _) = run(&Options::builder(&source, &destination).build());

    assert_eq!(report.transferred(), 1);
    assert_eq!(
        fs::read_to_string(destination.join("1.jpg")).unwrap(),
        "original"
    );
    let names = listing(&destination);
    assert_eq!(names.len(), 2);
    let renamed = names.iter().find(|name| *name != "1.jpg").unwrap();
    assert!(is_timestamped(renamed, "1", ".jpg"), "unexpected name {renamed}");
    assert_eq!(
        fs::read_to_string(destination.join(renamed)).unwrap(),
        "incoming"
    );
}

#[test]
fn test_second_run_never_overwrites() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a.txt"), "a");
    write(&source.join("sub/b.txt"), "b");

    let options = Options::builder(&source, &destination).build();
    run(&options);
    let (report, _) = run(&options);

    assert_eq!(report.transferred(), 2);
    assert_eq!(report.failed(), 0);
    let names = listing(&destination);
    assert_eq!(names.len(), 4);
    assert!(names.contains(&"a.txt".to_string()));
    assert!(names.contains(&"b.txt".to_string()));
    assert!(names.iter().any(|name| is_timestamped(name, "a", ".txt")));
    assert!(names.iter().any(|name| is_timestamped(name, "b", ".txt")));
}

#[test]
fn test_same_name_in_two_folders() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a/notes.txt"), "first");
    write(&source.join("b/notes.txt"), "second");

    let (report, _) = run(&Options::builder(&source, &destination).build());

    assert_eq!(report.transferred(), 2);
    assert_eq!(
        fs::read_to_string(destination.join("notes.txt")).unwrap(),
        "first"
    );
    let renamed: Vec<PathBuf> = report
        .destinations()
        .filter(|path| path.file_name().unwrap() != "notes.txt")
        .map(Path::to_path_buf)
        .collect();
    assert_eq!(renamed.len(), 1);
    assert_eq!(fs::read_to_string(&renamed[0]).unwrap(), "second");
}

#[test]
fn test_copy_leaves_sources_untouched() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a.bin"), "alpha");
    write(&source.join("deep/er/b.bin"), "beta");

    run(&Options::builder(&source, &destination).build());

    assert_eq!(fs::read_to_string(source.join("a.bin")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(source.join("deep/er/b.bin")).unwrap(), "beta");
    assert_eq!(fs::read_to_string(destination.join("a.bin")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(destination.join("b.bin")).unwrap(), "beta");
}

#[test]
fn test_move_empties_sources() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a.bin"), "alpha");
    write(&source.join("deep/er/b.bin"), "beta");

    let options = Options::builder(&source, &destination)
        .mode(TransferMode::Move)
        .build();
    let (_, events) = run(&options);

    assert!(!source.join("a.bin").exists());
    assert!(!source.join("deep/er/b.bin").exists());
    assert!(source.join("deep/er").is_dir());
    assert_eq!(fs::read_to_string(destination.join("a.bin")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(destination.join("b.bin")).unwrap(), "beta");
    assert_eq!(events[0], "started move");
}

/// Deletes `victim` as soon as the first file has been handled
struct VanishingReporter {
    victim: PathBuf,
    inner: RecordingReporter,
}

impl Reporter for VanishingReporter {
    fn report(&mut self, event: &Event<'_>) {
        if let Event::FileHandled { .. } = event
            && self.victim.exists()
        {
            fs::remove_file(&self.victim).unwrap();
        }
        self.inner.report(event);
    }
}

#[test]
fn test_failed_file_does_not_stop_the_run() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a.txt"), "a");
    write(&source.join("b.txt"), "b");
    write(&source.join("c.txt"), "c");

    let mut reporter = VanishingReporter {
        victim: source.join("b.txt"),
        inner: RecordingReporter::default(),
    };
    let report = consolidate(&Options::builder(&source, &destination).build(), &mut reporter)
        .unwrap();

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.transferred(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(
        reporter.inner.events,
        vec!["started copy", "ok a.txt", "failed b.txt", "ok c.txt", "completed"]
    );
    assert_eq!(listing(&destination), vec!["a.txt", "c.txt"]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_reported_and_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a.txt"), "a");
    write(&source.join("b.txt"), "b");
    write(&source.join("c.txt"), "c");
    let locked = source.join("b.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to privileged users.
    if fs::File::open(&locked).is_ok() {
        return;
    }

    let (report, events) = run(&Options::builder(&source, &destination).build());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(report.failed(), 1);
    assert!(events.contains(&"failed b.txt".to_string()));
    assert_eq!(listing(&destination), vec!["a.txt", "c.txt"]);
}

#[test]
fn test_dry_run_touches_nothing() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a.txt"), "a");

    let options = Options::builder(&source, &destination)
        .mode(TransferMode::Move)
        .dry_run(true)
        .build();
    let (report, _) = run(&options);

    assert!(report.dry_run);
    assert_eq!(report.transferred(), 1);
    assert_eq!(
        report.destinations().collect::<Vec<_>>(),
        vec![destination.join("a.txt").as_path()]
    );
    assert!(source.join("a.txt").exists());
    assert!(!destination.exists());
}

#[test]
fn test_dry_run_plans_distinct_names_for_same_base_name() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a/notes.txt"), "first");
    write(&source.join("b/notes.txt"), "second");

    let options = Options::builder(&source, &destination)
        .dry_run(true)
        .build();
    let (report, _) = run(&options);

    let planned: Vec<&Path> = report.destinations().collect();
    assert_eq!(planned.len(), 2);
    assert_eq!(planned[0], destination.join("notes.txt").as_path());
    assert!(is_timestamped(&file_name(planned[1]), "notes", ".txt"));
    assert!(!destination.exists());
}

#[cfg(unix)]
#[test]
fn test_dangling_link_is_reported_as_failed() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = dir.path().join("dst");
    write(&source.join("a.txt"), "a");
    std::os::unix::fs::symlink(source.join("gone.txt"), source.join("broken.txt")).unwrap();

    let (report, events) = run(&Options::builder(&source, &destination).build());

    assert_eq!(report.transferred(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(
        events,
        vec!["started copy", "ok a.txt", "failed broken.txt", "completed"]
    );
    assert_eq!(listing(&destination), vec!["a.txt"]);
}

#[test]
fn test_destination_inside_source_is_not_gathered_again() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    let destination = source.join("all");
    write(&source.join("a.txt"), "a");
    write(&source.join("z/b.txt"), "b");

    let options = Options::builder(&source, &destination).build();
    run(&options);
    let (report, _) = run(&options);

    assert_eq!(report.transferred(), 2);
    assert_eq!(listing(&destination).len(), 4);
}
