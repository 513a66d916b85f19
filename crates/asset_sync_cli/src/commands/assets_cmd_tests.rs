use super::*;
use tempfile::TempDir;

fn args_for(root: &std::path::Path) -> (TempDir, StorageArgs) {
    // An explicit config file keeps the tests independent of the working directory.
    let config_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = config_dir.path().join("asset-sync.toml");
    let mut config = AppConfig::default();
    config.storage.root = root.to_path_buf();
    config.save(&config_path).expect("Failed to save config");

    let args = StorageArgs {
        config: Some(config_path),
        storage_root: None,
    };
    (config_dir, args)
}

#[tokio::test]
async fn test_list_empty_when_nothing_downloaded() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (_config_dir, args) = args_for(temp_dir.path());

    let assets = list(&args).await.expect("List should succeed");

    assert!(assets.is_empty());
}

#[tokio::test]
async fn test_list_returns_downloaded_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let asset_dir = temp_dir.path().join("emojis");
    std::fs::create_dir_all(&asset_dir).unwrap();
    std::fs::write(asset_dir.join("banana.png"), b"banana").unwrap();
    let (_config_dir, args) = args_for(temp_dir.path());

    let assets = list(&args).await.expect("List should succeed");

    assert_eq!(assets, vec![asset_dir.join("banana.png")]);
}

#[tokio::test]
async fn test_storage_root_flag_overrides_config() {
    let configured = TempDir::new().expect("Failed to create temp directory");
    let overridden = TempDir::new().expect("Failed to create temp directory");
    std::fs::create_dir_all(overridden.path().join("emojis")).unwrap();
    std::fs::write(overridden.path().join("emojis").join("apple.png"), b"apple").unwrap();
    let (_config_dir, mut args) = args_for(configured.path());
    args.storage_root = Some(overridden.path().to_path_buf());

    let assets = list(&args).await.expect("List should succeed");

    assert_eq!(assets.len(), 1);
}

#[tokio::test]
async fn test_status_reports_marker_state() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (_config_dir, args) = args_for(temp_dir.path());

    let (path, before) = status(&args).await.expect("Status should succeed");
    assert!(before.is_none());

    CompletionMarker::new(&path).mark_complete().await.unwrap();
    let (_, after) = status(&args).await.expect("Status should succeed");

    assert!(after.is_some_and(|state| state.assets_downloaded));
}
