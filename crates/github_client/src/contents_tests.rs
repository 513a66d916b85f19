use super::*;
use serde_json::{from_str, to_string};

#[test]
fn test_entry_type_serialization() {
    assert_eq!(to_string(&EntryType::File).unwrap(), r#""file""#);
    assert_eq!(to_string(&EntryType::Dir).unwrap(), r#""dir""#);
}

#[test]
fn test_entry_type_deserialization() {
    assert_eq!(from_str::<EntryType>(r#""file""#).unwrap(), EntryType::File);
    assert_eq!(from_str::<EntryType>(r#""dir""#).unwrap(), EntryType::Dir);
}

#[test]
fn test_entry_type_unknown_values_map_to_other() {
    assert_eq!(
        from_str::<EntryType>(r#""symlink""#).unwrap(),
        EntryType::Other
    );
    assert_eq!(
        from_str::<EntryType>(r#""submodule""#).unwrap(),
        EntryType::Other
    );
}

#[test]
fn test_tree_entry_deserialization_ignores_extra_fields() {
    let json_str = r#"{
        "name": "banana.png",
        "path": "emojis/banana.png",
        "sha": "xyz789",
        "size": 4312,
        "url": "https://api.github.com/repos/o/r/contents/emojis/banana.png",
        "type": "file",
        "download_url": "https://raw.githubusercontent.com/o/r/main/emojis/banana.png"
    }"#;

    let entry: TreeEntry = from_str(json_str).expect("Failed to deserialize TreeEntry");

    assert_eq!(entry.name, "banana.png");
    assert_eq!(entry.path, "emojis/banana.png");
    assert_eq!(entry.entry_type, EntryType::File);
    assert_eq!(
        entry.download_url.as_deref(),
        Some("https://raw.githubusercontent.com/o/r/main/emojis/banana.png")
    );
}

#[test]
fn test_tree_entry_deserialization_null_download_url() {
    let json_str = r#"{
        "name": "fruit",
        "path": "emojis/fruit",
        "type": "dir",
        "download_url": null
    }"#;

    let entry: TreeEntry = from_str(json_str).expect("Failed to deserialize TreeEntry");

    assert_eq!(entry.entry_type, EntryType::Dir);
    assert_eq!(entry.download_url, None);
    assert_eq!(entry.fetchable_download_url(), None);
}

#[test]
fn test_tree_entry_deserialization_missing_download_url() {
    let json_str = r#"{ "name": "fruit", "path": "emojis/fruit", "type": "dir" }"#;

    let entry: TreeEntry = from_str(json_str).expect("Failed to deserialize TreeEntry");

    assert_eq!(entry.download_url, None);
}

#[test]
fn test_fetchable_download_url_skips_empty_url() {
    let entry = TreeEntry {
        name: "blank.png".to_string(),
        path: "emojis/blank.png".to_string(),
        entry_type: EntryType::File,
        download_url: Some(String::new()),
    };

    assert_eq!(entry.fetchable_download_url(), None);
}

#[test]
fn test_fetchable_download_url_ignores_url_on_directory() {
    let entry = TreeEntry {
        name: "fruit".to_string(),
        path: "emojis/fruit".to_string(),
        entry_type: EntryType::Dir,
        download_url: Some("https://example.com/should-not-be-used".to_string()),
    };

    assert_eq!(entry.fetchable_download_url(), None);
}

#[test]
fn test_fetchable_download_url_ignores_other_entries() {
    let entry = TreeEntry {
        name: "link".to_string(),
        path: "emojis/link".to_string(),
        entry_type: EntryType::Other,
        download_url: Some("https://example.com/link".to_string()),
    };

    assert_eq!(entry.fetchable_download_url(), None);
}
