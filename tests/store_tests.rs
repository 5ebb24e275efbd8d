//! Library-level tests for the payload store and its JSON document

use payman::application::PayloadStore;
use payman::domain::{Folder, Node, NodePath, NodeRef};
use payman::infrastructure::{JsonFileRepository, PayloadRepository};
use payman::PayloadError;
use std::fs;
use tempfile::TempDir;

fn path(s: &str) -> NodePath {
    NodePath::from(s)
}

fn open_store(temp: &TempDir) -> PayloadStore {
    PayloadStore::open(JsonFileRepository::new(temp.path().join("payload_data.json"))).unwrap()
}

#[test]
fn test_round_trip_of_nested_tree() {
    let temp = TempDir::new().unwrap();
    let repo = JsonFileRepository::new(temp.path().join("payload_data.json"));

    let mut web = Folder::new();
    web.insert("xss.txt", Node::File("<svg/onload=alert(1)>\n\"quoted\"".to_string()))
        .unwrap();
    web.insert("空目录", Node::empty_folder()).unwrap();
    let mut tree = Folder::new();
    tree.insert("web", Node::Folder(web)).unwrap();
    tree.insert("zeta", Node::File("tab\there\\backslash".to_string()))
        .unwrap();
    tree.insert("alpha", Node::empty_file()).unwrap();

    repo.save(&tree).unwrap();
    assert_eq!(repo.load().unwrap(), tree);
}

#[test]
fn test_open_existing_document_preserves_order() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("payload_data.json"),
        r#"{"z": "1", "a": {"m": "", "b": {}}, "k": "x\ny"}"#,
    )
    .unwrap();

    let store = open_store(&temp);
    let names: Vec<&str> = store.tree().entries().map(|(name, _)| name).collect();
    assert_eq!(names, ["z", "a", "k"]);
    assert_eq!(store.read_file(&path("k")).unwrap(), "x\ny");
}

#[test]
fn test_create_resolve_and_delete_scenario() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);

    store.create_folder(&NodePath::root(), "tools").unwrap();
    store.create_file(&path("tools"), "xss.txt").unwrap();
    assert_eq!(
        store.resolve(&path("tools/xss.txt")).unwrap(),
        NodeRef::File("")
    );

    store.delete_node(&path("tools")).unwrap();
    assert!(store.tree().is_empty());

    let reopened = open_store(&temp);
    assert!(reopened.tree().is_empty());
}

#[test]
fn test_every_mutation_is_persisted() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);

    store.create_file(&NodePath::root(), "f").unwrap();
    store.append_lines(&path("f"), ["a", "b", "c"]).unwrap();
    assert_eq!(open_store(&temp).read_file(&path("f")).unwrap(), "a\nb\nc");

    store.remove_lines(&path("f"), ["b"]).unwrap();
    assert_eq!(open_store(&temp).read_file(&path("f")).unwrap(), "a\nc");

    store.import_lines(&path("f"), ["d", "a"]).unwrap();
    assert_eq!(open_store(&temp).read_file(&path("f")).unwrap(), "a\nc\nd");
}

#[test]
fn test_append_empty_batch_keeps_blank_lines_from_disk() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("payload_data.json"),
        r#"{"f": "a\n\nb"}"#,
    )
    .unwrap();
    let mut store = open_store(&temp);

    let content = store.append_lines(&path("f"), Vec::<String>::new()).unwrap();
    assert_eq!(content, "a\n\nb");

    let content = store.append_lines(&path("f"), ["c"]).unwrap();
    assert_eq!(content, "a\n\nb\nc");
}

#[test]
fn test_remove_without_match_leaves_document_untouched() {
    let temp = TempDir::new().unwrap();
    let document = "{\"f\": \"a\\nb\"}";
    fs::write(temp.path().join("payload_data.json"), document).unwrap();
    let mut store = open_store(&temp);

    let (content, changed) = store.remove_lines(&path("f"), ["nope"]).unwrap();

    assert!(!changed);
    assert_eq!(content, "a\nb");
    assert_eq!(
        fs::read_to_string(temp.path().join("payload_data.json")).unwrap(),
        document
    );
}

#[test]
fn test_failed_load_keeps_current_tree() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);
    store.create_file(&NodePath::root(), "f").unwrap();

    fs::write(temp.path().join("payload_data.json"), "[1, 2]").unwrap();

    assert!(matches!(
        store.load(),
        Err(PayloadError::CorruptData { .. })
    ));
    assert_eq!(store.read_file(&path("f")).unwrap(), "");
}

#[test]
fn test_save_failure_surfaces_io_error() {
    let temp = TempDir::new().unwrap();
    // A directory where the document should be makes every write fail
    let data = temp.path().join("payload_data.json");
    fs::create_dir(&data).unwrap();
    let mut store = PayloadStore::new(JsonFileRepository::new(data));

    let result = store.create_file(&NodePath::root(), "f");

    assert!(matches!(result, Err(PayloadError::Io(_))));
    assert!(store.tree().is_empty());
}
