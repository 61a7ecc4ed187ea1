use std::path::Path;

/// Lowercased extension of a file name, without the dot.
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_ascii_lowercase())
}

/// Content type hint sent with the file part.
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("licence.JPG").as_deref(), Some("jpg"));
        assert_eq!(file_extension("dir/scan.front.png").as_deref(), Some("png"));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Some("jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Some("pdf")), "application/pdf");
        assert_eq!(content_type_for(Some("xyz")), "application/octet-stream");
        assert_eq!(content_type_for(None), "application/octet-stream");
    }
}
