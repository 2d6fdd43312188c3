//! Integration tests for the library batch driver.

use yoloremap::batch::{BatchDriver, BatchOptions, FileStatus, LinePrompt};
use yoloremap::classes::{ClassIndex, ClassTable};
use yoloremap::remap::ClassRemap;
use yoloremap::RemapError;

mod common;
use common::{read, Workspace, ORIGINAL_CLASSES, SMALLER_CLASSES, TARGET_CLASSES};

#[test]
fn class_files_on_disk_drive_the_remap() {
    let ws = Workspace::new(ORIGINAL_CLASSES, TARGET_CLASSES);
    let original = ClassTable::read(&ws.original).expect("read original");
    let target = ClassTable::read(&ws.target).expect("read target");

    assert_eq!(original.len(), 4);
    assert_eq!(original.name(ClassIndex(3)), Some("dog"));

    let remap = ClassRemap::new(&original, &target);
    for (index, name) in original.index_to_name() {
        let mapped = remap.remap(*index).expect("every class maps");
        assert_eq!(target.name(mapped), Some(name.as_str()));
    }
}

#[test]
fn batch_with_scripted_stdin_commits_and_skips() {
    let ws = Workspace::new(ORIGINAL_CLASSES, TARGET_CLASSES);
    let a = ws.label("a.txt", "0 0.5 0.5 0.2 0.2\n");
    let b = ws.label("b.txt", "1 0.5 0.5 0.2 0.2\n");

    let original = ClassTable::read(&ws.original).expect("read original");
    let target = ClassTable::read(&ws.target).expect("read target");
    let options = BatchOptions {
        confirm: true,
        ..Default::default()
    };

    let mut prompt_out = Vec::new();
    let prompt = LinePrompt::new(b"n\ny\n".as_slice(), &mut prompt_out);
    let mut driver = BatchDriver::new(
        ClassRemap::new(&original, &target),
        &options,
        prompt,
        Vec::new(),
    );

    let report = driver.run(&[a.clone(), b.clone()]).expect("run batch");
    drop(driver);

    assert_eq!(report.files[0].status, FileStatus::Skipped);
    assert_eq!(report.files[1].status, FileStatus::Committed);
    assert_eq!(read(&a), "0 0.5 0.5 0.2 0.2\n");
    assert_eq!(read(&b), "3 0.5 0.5 0.2 0.2");

    let asked = String::from_utf8(prompt_out).unwrap();
    assert_eq!(asked.matches("[N/y]? ").count(), 2);
}

#[test]
fn preflight_decline_leaves_every_file_untouched() {
    let ws = Workspace::new(ORIGINAL_CLASSES, SMALLER_CLASSES);
    let a = ws.label("a.txt", "2 0.5 0.5 0.2 0.2\n");

    let original = ClassTable::read(&ws.original).expect("read original");
    let target = ClassTable::read(&ws.target).expect("read target");
    let options = BatchOptions::default();
    let mut driver = BatchDriver::new(
        ClassRemap::new(&original, &target),
        &options,
        LinePrompt::new(b"\n".as_slice(), Vec::new()),
        Vec::new(),
    );

    let proceed = driver
        .preflight(&ws.original, &ws.target)
        .expect("preflight");

    assert!(!proceed);
    assert_eq!(read(&a), "2 0.5 0.5 0.2 0.2\n");
}

#[test]
fn unmappable_error_names_file_line_and_class() {
    let ws = Workspace::new(ORIGINAL_CLASSES, SMALLER_CLASSES);
    let a = ws.label("a.txt", "2 0.5 0.5 0.2 0.2\n1 0.5 0.5 0.2 0.2\n");

    let original = ClassTable::read(&ws.original).expect("read original");
    let target = ClassTable::read(&ws.target).expect("read target");
    let options = BatchOptions {
        strict: true,
        ..Default::default()
    };
    let mut driver = BatchDriver::new(
        ClassRemap::new(&original, &target),
        &options,
        LinePrompt::new(b"".as_slice(), Vec::new()),
        Vec::new(),
    );

    let err = driver.run(&[a.clone()]).unwrap_err();
    match err {
        RemapError::UnmappableClass {
            path,
            line,
            index,
            name,
        } => {
            assert_eq!(path, a);
            assert_eq!(line, 2);
            assert_eq!(index, ClassIndex(1));
            assert_eq!(name, "bicycle");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(read(&a), "2 0.5 0.5 0.2 0.2\n1 0.5 0.5 0.2 0.2\n");
}

#[test]
fn remapping_twice_through_inverse_restores_indices() {
    let ws = Workspace::new(ORIGINAL_CLASSES, TARGET_CLASSES);
    let content = "0 0.5 0.5 0.2 0.2\n1 0.1 0.2 0.3 0.4\n2 0.9 0.9 0.1 0.1\n3 0.4 0.4 0.4 0.4";
    let a = ws.label("a.txt", content);

    let original = ClassTable::read(&ws.original).expect("read original");
    let target = ClassTable::read(&ws.target).expect("read target");
    let options = BatchOptions::default();

    for (from, to) in [(&original, &target), (&target, &original)] {
        let mut driver = BatchDriver::new(
            ClassRemap::new(from, to),
            &options,
            LinePrompt::new(b"".as_slice(), Vec::new()),
            Vec::new(),
        );
        driver.run(&[a.clone()]).expect("run batch");
    }

    assert_eq!(read(&a), content);
}
