//! 弹窗附件编码测试

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::api::feedback_api::attach_popup_image;

/// PNG 文件被编码为 image/png 附件
#[tokio::test]
async fn test_attach_png_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("screenshot.png");
    let bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    std::fs::write(&path, &bytes).unwrap();

    let attachment = attach_popup_image(path.to_string_lossy().to_string()).await.unwrap();

    assert_eq!(attachment.media_type, "image/png");
    assert_eq!(attachment.filename.as_deref(), Some("screenshot.png"));
    assert_eq!(STANDARD.decode(&attachment.data).unwrap(), bytes);
}

/// 非图片类型被拒绝
#[tokio::test]
async fn test_attach_non_image_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text").unwrap();

    let result = attach_popup_image(path.to_string_lossy().to_string()).await;
    assert!(result.is_err());
}

/// 文件不存在时报错
#[tokio::test]
async fn test_attach_missing_file_fails() {
    let result = attach_popup_image("/nonexistent/path/picture.png".to_string()).await;
    assert!(result.is_err());
}
