//! MIME type resolution and attachment classification.
//!
//! Two layers:
//! 1. Filename-based lookup — the classifier used by the listing pipeline,
//!    which only sees stored metadata and never touches file contents.
//! 2. Magic-byte refinement via `infer` for upload paths that do hold the
//!    bytes.

/// MIME type returned when no extension mapping exists.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Resolve a MIME type from a filename alone.
///
/// Deterministic and total: unknown or missing extensions resolve to
/// [`FALLBACK_MIME`]. Case-insensitive on the extension.
pub fn mime_type_for_filename(filename: &str) -> &'static str {
    let ext = match filename.rsplit('.').next() {
        Some(ext) if ext.len() < filename.len() => ext,
        _ => return FALLBACK_MIME,
    };
    mime_from_extension(&ext.to_lowercase()).unwrap_or(FALLBACK_MIME)
}

/// True when the filename resolves to an `image/*` MIME type.
pub fn is_image_filename(filename: &str) -> bool {
    mime_type_for_filename(filename).starts_with("image")
}

fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext {
        // Images
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        // Documents
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        "xls" => Some("application/vnd.ms-excel"),
        "xlsx" => Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        "ppt" => Some("application/vnd.ms-powerpoint"),
        "pptx" => {
            Some("application/vnd.openxmlformats-officedocument.presentationml.presentation")
        }
        // Text
        "txt" | "log" => Some("text/plain"),
        "csv" => Some("text/csv"),
        "html" | "htm" => Some("text/html"),
        "xml" => Some("application/xml"),
        "json" => Some("application/json"),
        "md" | "markdown" => Some("text/markdown"),
        // Audio/video
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "ogg" => Some("audio/ogg"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mov" => Some("video/quicktime"),
        "avi" => Some("video/x-msvideo"),
        // Archives
        "zip" => Some("application/zip"),
        "gz" => Some("application/gzip"),
        "tar" => Some("application/x-tar"),
        "7z" => Some("application/x-7z-compressed"),
        // Packaged learning content
        "scorm" | "ims" => Some("application/zip"),
        _ => None,
    }
}

/// Detect the actual content type of uploaded bytes.
///
/// Magic bytes win over the filename, which wins over the claimed type.
/// Used on upload paths only; listing-time classification stays
/// filename-based.
pub fn detect_content_type(filename: &str, data: &[u8], claimed: &str) -> String {
    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }
    let by_name = mime_type_for_filename(filename);
    if by_name != FALLBACK_MIME {
        return by_name.to_string();
    }
    claimed.to_string()
}
