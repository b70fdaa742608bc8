use checkoff::flatfile::{load, save};
use checkoff::TaskList;
use std::fs;

fn example_list() -> TaskList {
    let mut list = TaskList::new();
    list.append("Buy milk").unwrap();
    list.append("Call Bob").unwrap();
    list.toggle_at(Some(0)).unwrap();
    list
}

#[test]
fn missing_file_loads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let list = load(&dir.path().join("tasks.txt")).unwrap();
    assert!(list.is_empty());
}

#[test]
fn save_writes_one_line_per_task() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    save(&path, &example_list()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Buy milk|True\nCall Bob|False\n"
    );
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let list = example_list();
    save(&path, &list).unwrap();
    assert_eq!(load(&path).unwrap(), list);
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    save(&path, &example_list()).unwrap();
    save(&path, &TaskList::new()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert!(load(&path).unwrap().is_empty());
}

#[test]
fn malformed_and_blank_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(
        &path,
        "Buy milk|True\n\nno delimiter\n|False\n  Call Bob |False\r\n",
    )
    .unwrap();
    let list = load(&path).unwrap();
    assert_eq!(list, example_list());
}

#[test]
fn non_utf8_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let mut bytes = b"Buy milk|True\n".to_vec();
    bytes.extend_from_slice(b"\xff\xfe|False\n");
    bytes.extend_from_slice(b"Call Bob|False\n");
    fs::write(&path, bytes).unwrap();
    assert_eq!(load(&path).unwrap(), example_list());
}

#[test]
fn saving_over_a_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(save(dir.path(), &example_list()).is_err());
}
