use mime::Mime;

#[must_use]
pub fn detect_mime(data: &[u8]) -> Option<String> {
    infer::get(data).map(|info| info.mime_type().to_string())
}

/// Content type a file picker would declare for this name.
#[must_use]
pub fn detect_mime_from_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg".into()),
        "png" => Some("image/png".into()),
        "gif" => Some("image/gif".into()),
        "webp" => Some("image/webp".into()),
        "heic" => Some("image/heic".into()),
        "bmp" => Some("image/bmp".into()),
        "mp3" => Some("audio/mpeg".into()),
        "mp4" => Some("video/mp4".into()),
        "pdf" => Some("application/pdf".into()),
        "txt" => Some("text/plain".into()),
        _ => None,
    }
}

/// Declared type for a picked file: the extension wins (that is what a
/// picker reports), magic bytes fill in when the name says nothing.
#[must_use]
pub fn declared_content_type(data: &[u8], filename: Option<&str>) -> String {
    filename
        .and_then(detect_mime_from_extension)
        .or_else(|| detect_mime(data))
        .unwrap_or_else(|| "application/octet-stream".into())
}

#[must_use]
pub fn is_image_type(content_type: &str) -> bool {
    content_type
        .parse::<Mime>()
        .is_ok_and(|mime| mime.type_() == mime::IMAGE)
}

#[cfg(test)]
mod tests {
    use super::{declared_content_type, detect_mime, detect_mime_from_extension, is_image_type};

    const PNG_MAGIC: [u8; 9] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

    #[test]
    fn detect_mime_png_magic_bytes() {
        assert_eq!(detect_mime(&PNG_MAGIC).as_deref(), Some("image/png"));
    }

    #[test]
    fn detect_mime_jpeg_magic_bytes() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(detect_mime(&jpeg).as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn detect_mime_unknown_returns_none() {
        assert!(detect_mime(&[0x00, 0x11, 0x22, 0x33, 0x44]).is_none());
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(
            detect_mime_from_extension("portrait.JPG").as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            detect_mime_from_extension("notes.pdf").as_deref(),
            Some("application/pdf")
        );
        assert!(detect_mime_from_extension("no_extension").is_none());
    }

    #[test]
    fn declared_type_prefers_extension_then_magic() {
        assert_eq!(declared_content_type(&PNG_MAGIC, Some("scan.pdf")), "application/pdf");
        assert_eq!(declared_content_type(&PNG_MAGIC, Some("blob")), "image/png");
        assert_eq!(declared_content_type(&PNG_MAGIC, None), "image/png");
        assert_eq!(
            declared_content_type(&[0x00, 0x01], None),
            "application/octet-stream"
        );
    }

    #[test]
    fn image_type_check_uses_top_level_type() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/svg+xml"));
        assert!(!is_image_type("application/pdf"));
        assert!(!is_image_type("text/plain"));
        assert!(!is_image_type("not a mime"));
    }
}
