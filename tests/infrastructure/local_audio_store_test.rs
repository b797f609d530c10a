use bytes::Bytes;

use speech_lab::application::ports::{AudioStore, AudioStoreError};
use speech_lab::domain::StoredFileName;
use speech_lab::infrastructure::storage::LocalAudioStore;

fn create_test_store() -> (tempfile::TempDir, LocalAudioStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalAudioStore::new(dir.path()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_missing_directory_when_creating_store_then_directory_is_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let nested = dir.path().join("uploads").join("audio");

    let store = LocalAudioStore::new(&nested).unwrap();
    let path = store
        .store(&StoredFileName::from_raw("first.wav"), Bytes::from_static(b"RIFF"))
        .await
        .unwrap();

    assert!(nested.is_dir());
    assert!(path.is_absolute());
    assert_eq!(path, nested.canonicalize().unwrap().join("first.wav"));
}

#[tokio::test]
async fn given_audio_bytes_when_storing_then_file_is_written_under_upload_dir() {
    let (dir, store) = create_test_store();
    let filename = StoredFileName::generate("sample.wav");

    let path = store
        .store(&filename, Bytes::from_static(b"RIFF-data"))
        .await
        .unwrap();

    assert_eq!(
        path,
        dir.path().canonicalize().unwrap().join(filename.as_str())
    );
    assert_eq!(std::fs::read(&path).unwrap(), b"RIFF-data");
}

#[tokio::test]
async fn given_existing_name_when_storing_again_then_refuses_to_overwrite() {
    let (_dir, store) = create_test_store();
    let filename = StoredFileName::from_raw("fixed.wav");
    let path = store
        .store(&filename, Bytes::from_static(b"first"))
        .await
        .unwrap();

    let result = store.store(&filename, Bytes::from_static(b"second")).await;

    assert!(matches!(result, Err(AudioStoreError::WriteFailed(_))));
    assert_eq!(std::fs::read(&path).unwrap(), b"first");
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_file_is_gone() {
    let (_dir, store) = create_test_store();
    let filename = StoredFileName::generate("a.mp3");
    let path = store.store(&filename, Bytes::from_static(b"id3")).await.unwrap();

    store.delete(&filename).await.unwrap();

    assert!(!path.exists());
}

#[tokio::test]
async fn given_unknown_file_when_deleting_then_returns_not_found() {
    let (_dir, store) = create_test_store();

    let result = store.delete(&StoredFileName::from_raw("missing.wav")).await;

    assert!(matches!(result, Err(AudioStoreError::NotFound(_))));
}
