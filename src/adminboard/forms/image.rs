//! Upload-time checks for image fields.
//!
//! These only run when a file is picked. A reference set programmatically
//! (a URL, a data URI from a snapshot) is never re-checked.

use super::ValidationErrors;
use std::path::Path;

pub const MAX_IMAGE_BYTES: u64 = 1024 * 1024;

/// Accepted for product and event images.
pub const PHOTO_TYPES: &[&str] = &["image/png", "image/jpg", "image/jpeg"];

/// Accepted for blog covers and content blocks.
pub const BLOG_IMAGE_TYPES: &[&str] = &["image/png", "image/jpg", "image/jpeg", "image/gif"];

pub fn check_image_upload(
    field: &str,
    mime: &str,
    size: u64,
    allowed: &[&str],
    max_bytes: u64,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(
        allowed.contains(&mime),
        field,
        &format!("Unsupported image type {}, expected one of: {}", mime, allowed.join(", ")),
    );
    errors.check(
        size <= max_bytes,
        field,
        &format!("Image must be at most {} KB", max_bytes / 1024),
    );
    errors.finish(|| ())
}

/// MIME type guessed from a file extension.
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" => Some("image/jpg"),
        "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_small_png() {
        assert!(
            check_image_upload("image", "image/png", 2048, PHOTO_TYPES, MAX_IMAGE_BYTES).is_ok()
        );
    }

    #[test]
    fn gif_only_allowed_for_blogs() {
        assert!(
            check_image_upload("image", "image/gif", 10, PHOTO_TYPES, MAX_IMAGE_BYTES).is_err()
        );
        assert!(
            check_image_upload("image", "image/gif", 10, BLOG_IMAGE_TYPES, MAX_IMAGE_BYTES).is_ok()
        );
    }

    #[test]
    fn rejects_oversized_file() {
        let errors = check_image_upload(
            "image",
            "image/jpeg",
            MAX_IMAGE_BYTES + 1,
            PHOTO_TYPES,
            MAX_IMAGE_BYTES,
        )
        .unwrap_err();
        assert_eq!(errors.get("image"), Some("Image must be at most 1024 KB"));
    }

    #[test]
    fn guesses_mime_from_extension() {
        assert_eq!(mime_from_path(Path::new("a/b/Cover.JPG")), Some("image/jpg"));
        assert_eq!(mime_from_path(Path::new("notes.txt")), None);
        assert_eq!(mime_from_path(Path::new("noext")), None);
    }
}
