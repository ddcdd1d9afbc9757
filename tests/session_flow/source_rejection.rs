use super::image_fixtures::jpeg_bytes;
use agemorph::error::ErrorKind;
use agemorph::media::load_image;
use tempfile::TempDir;

#[tokio::test]
async fn non_image_file_is_rejected_before_selection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "just some text").unwrap();

    let err = load_image(&path).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSourceType);
    assert!(err.kind().is_transient());
}

#[tokio::test]
async fn image_file_becomes_payload_with_declared_type() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portrait.jpg");
    std::fs::write(&path, jpeg_bytes()).unwrap();

    let payload = load_image(&path).await.unwrap();
    assert_eq!(payload.mime_type(), "image/jpeg");
    assert_eq!(payload.bytes(), jpeg_bytes().as_slice());
    assert!(payload.to_data_uri().starts_with("data:image/jpeg;base64,/9j/"));
}
