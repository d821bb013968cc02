//! Response validation: content type and error-page detection.

use crate::config::{ERROR_PAGE_TITLE_MARKERS, HTML_CONTENT_TYPES};
use crate::error_handling::ScrapeError;

/// Requires an HTML media type in `Content-Type` (case-insensitive substring).
pub fn validate_content_type(url: &str, content_type: &str) -> Result<(), ScrapeError> {
    let lowered = content_type.to_ascii_lowercase();
    if HTML_CONTENT_TYPES.iter().any(|t| lowered.contains(t)) {
        Ok(())
    } else {
        Err(ScrapeError::InvalidContentType {
            url: url.to_string(),
            content_type: content_type.to_string(),
        })
    }
}

/// Rejects pages whose title marks them as a block or error page.
pub fn check_error_page(url: &str, title: Option<&str>) -> Result<(), ScrapeError> {
    let Some(title) = title else {
        return Ok(());
    };
    let lowered = title.trim().to_lowercase();
    if ERROR_PAGE_TITLE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return Err(ScrapeError::ErrorPageDetected {
            url: url.to_string(),
            title: title.trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorKind;

    #[test]
    fn test_html_content_types_accepted() {
        assert!(validate_content_type("u", "text/html; charset=utf-8").is_ok());
        assert!(validate_content_type("u", "Application/XHTML+xml").is_ok());
    }

    #[test]
    fn test_json_content_type_rejected() {
        let err = validate_content_type("u", "application/json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidContentType);
        assert!(err.to_string().contains("application/json"));
    }

    #[test]
    fn test_missing_content_type_rejected() {
        assert!(validate_content_type("u", "").is_err());
    }

    #[test]
    fn test_error_page_titles() {
        for title in ["403 Forbidden", "Access Denied", "You have been BLOCKED", "Error"] {
            let err = check_error_page("u", Some(title)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ErrorPageDetected, "{title}");
        }
        assert!(check_error_page("u", Some("Welcome home")).is_ok());
        assert!(check_error_page("u", None).is_ok());
    }
}
