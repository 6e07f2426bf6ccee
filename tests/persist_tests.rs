// Snapshot dump/load tests
// Every test works inside its own tempdir.

use std::fs;

use skipstore::{Error, LoadReport, Options, SkipList};
use tempfile::tempdir;

// =============================================================================
// Test 1: Dump writes key:value; lines in key order
// =============================================================================
#[test]
fn dump_writes_sorted_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");

    let sl = SkipList::new(6);
    sl.insert(9, "nine".to_string());
    sl.insert(1, "one".to_string());
    sl.insert(4, "four".to_string());

    assert_eq!(sl.dump_to(&path).unwrap(), 3);
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "1:one;\n4:four;\n9:nine;\n");
}

// =============================================================================
// Test 2: Dump then load into a fresh list reproduces the same pairs
// =============================================================================
#[test]
fn dump_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");

    let original = SkipList::new(10);
    for i in (0..500).rev() {
        original.insert(i * 3, format!("value {i} with spaces"));
    }
    original.dump_to(&path).unwrap();

    let restored: SkipList<i32, String> = SkipList::new(10);
    let report = restored.load_from(&path).unwrap();

    assert_eq!(report.inserted, 500);
    assert_eq!(report.skipped(), 0);
    assert_eq!(restored.size(), original.size());
    assert_eq!(restored.entries(), original.entries());
}

// =============================================================================
// Test 3: Loader tolerance
// =============================================================================
// "5:x;\n\n7:y\n" loads exactly keys 5 and 7; the blank line contributes nothing.
#[test]
fn load_skips_blank_lines_and_optional_terminator() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");
    fs::write(&path, "5:x;\n\n7:y\n").unwrap();

    let sl: SkipList<i32, String> = SkipList::new(6);
    let report = sl.load_from(&path).unwrap();

    assert_eq!(
        report,
        LoadReport {
            inserted: 2,
            duplicates: 0,
            malformed: 0,
        }
    );
    assert_eq!(
        sl.entries(),
        vec![(5, "x".to_string()), (7, "y".to_string())]
    );
}

// =============================================================================
// Test 4: Malformed and duplicate lines are skipped and counted
// =============================================================================
#[test]
fn load_counts_malformed_and_duplicates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");
    fs::write(
        &path,
        "1:a;\nno separator\n:empty key;\n2:;\nabc:not a number;\n1:again;\n3:c:d;\r\n",
    )
    .unwrap();

    let sl: SkipList<i64, String> = SkipList::new(6);
    let report = sl.load_from(&path).unwrap();

    assert_eq!(report.inserted, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.malformed, 4);
    assert_eq!(sl.get(&1), Some("a".to_string()));
    assert_eq!(sl.get(&3), Some("c:d".to_string()));
}

// =============================================================================
// Test 5: Load merges into existing contents without overwriting
// =============================================================================
#[test]
fn load_into_populated_list_keeps_existing_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");
    fs::write(&path, "1:from file;\n2:from file;\n").unwrap();

    let sl = SkipList::new(6);
    sl.insert(1, "in memory".to_string());
    let report = sl.load_from(&path).unwrap();

    assert_eq!(report.inserted, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(sl.get(&1), Some("in memory".to_string()));
    assert_eq!(sl.get(&2), Some("from file".to_string()));
}

// =============================================================================
// Test 6: Missing file is an explicit error
// =============================================================================
#[test]
fn load_missing_file_is_open_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does-not-exist");

    let sl: SkipList<i32, String> = SkipList::new(6);
    match sl.load_from(&path) {
        Err(Error::Open { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected open error, got {other:?}"),
    }
    assert_eq!(sl.size(), 0);
}

// =============================================================================
// Test 7: Configured path, parent directories created on dump
// =============================================================================
#[test]
fn dump_and_load_use_configured_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store").join("dumpFile");

    let sl = SkipList::with_options(Options::default().dump_path(&path));
    sl.insert(2, "b".to_string());
    sl.insert(1, "a".to_string());
    sl.dump().unwrap();
    assert!(path.exists());

    let fresh: SkipList<i32, String> = SkipList::with_options(Options::default().dump_path(&path));
    fresh.load().unwrap();
    assert_eq!(fresh.entries(), sl.entries());
}

// =============================================================================
// Test 8: Dump truncates previous contents
// =============================================================================
#[test]
fn dump_truncates_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");
    fs::write(&path, "100:stale;\n200:stale;\n300:stale;\n").unwrap();

    let sl = SkipList::new(6);
    sl.insert(1, "fresh".to_string());
    sl.dump_to(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "1:fresh;\n");
}

// =============================================================================
// Test 9: Empty list dumps an empty file
// =============================================================================
#[test]
fn dump_empty_list() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");

    let sl: SkipList<i32, String> = SkipList::new(6);
    assert_eq!(sl.dump_to(&path).unwrap(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    let fresh: SkipList<i32, String> = SkipList::new(6);
    assert_eq!(fresh.load_from(&path).unwrap(), LoadReport::default());
}

// =============================================================================
// Test 10: A line that is not UTF-8 is skipped, not fatal
// =============================================================================
#[test]
fn load_skips_invalid_utf8_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");
    fs::write(&path, b"1:a;\n2:\xff\xfe;\n3:c;\n").unwrap();

    let sl: SkipList<i32, String> = SkipList::new(6);
    let report = sl.load_from(&path).unwrap();

    assert_eq!(
        report,
        LoadReport {
            inserted: 2,
            duplicates: 0,
            malformed: 1,
        }
    );
    assert_eq!(sl.get(&1), Some("a".to_string()));
    assert_eq!(sl.get(&3), Some("c".to_string()));
    assert!(!sl.search(&2));
}

// =============================================================================
// Test 11: Whitespace around an integer key is tolerated
// =============================================================================
#[test]
fn load_accepts_padded_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump");
    fs::write(&path, " 5:x;\n\t6 :y;\n").unwrap();

    let sl: SkipList<i32, String> = SkipList::new(6);
    let report = sl.load_from(&path).unwrap();

    assert_eq!(report.inserted, 2);
    assert_eq!(report.malformed, 0);
    assert_eq!(
        sl.entries(),
        vec![(5, "x".to_string()), (6, "y".to_string())]
    );
}
