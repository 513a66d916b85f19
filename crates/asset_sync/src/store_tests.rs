use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_save_creates_missing_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = LocalStore::new(temp_dir.path().join("nested").join("root"));

    let path = store
        .save("emojis", "banana.png", b"banana")
        .await
        .expect("Save should succeed");

    assert_eq!(path, store.directory("emojis").join("banana.png"));
    assert_eq!(std::fs::read(&path).unwrap(), b"banana");
}

#[tokio::test]
async fn test_save_into_existing_directory_is_not_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = LocalStore::new(temp_dir.path());
    std::fs::create_dir_all(store.directory("emojis")).unwrap();

    let result = store.save("emojis", "apple.png", b"apple").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_save_overwrites_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = LocalStore::new(temp_dir.path());

    store
        .save("emojis", "banana.png", b"a much longer original payload")
        .await
        .unwrap();
    let path = store.save("emojis", "banana.png", b"short").await.unwrap();

    assert_eq!(std::fs::read(path).unwrap(), b"short");
}

#[tokio::test]
async fn test_save_rejects_names_with_separators() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = LocalStore::new(temp_dir.path());

    for name in ["", ".", "..", "../escape.png", "sub/dir.png", "win\\dir.png"] {
        let result = store.save("emojis", name, b"x").await;
        assert!(
            matches!(result, Err(SyncError::InvalidFileName(_))),
            "Name {name:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_save_reports_io_error_when_root_is_a_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let store = LocalStore::new(&blocker);

    let result = store.save("emojis", "banana.png", b"banana").await;

    assert!(matches!(result, Err(SyncError::Io { .. })));
}

#[tokio::test]
async fn test_list_missing_directory_is_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = LocalStore::new(temp_dir.path());

    let files = store.list("emojis").await.expect("List should succeed");

    assert!(files.is_empty());
}

#[tokio::test]
async fn test_list_returns_sorted_regular_files_only() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = LocalStore::new(temp_dir.path());
    store.save("emojis", "cherry.png", b"c").await.unwrap();
    store.save("emojis", "apple.png", b"a").await.unwrap();
    std::fs::create_dir_all(store.directory("emojis").join("subdir")).unwrap();

    let files = store.list("emojis").await.expect("List should succeed");

    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["apple.png", "cherry.png"]);
}
