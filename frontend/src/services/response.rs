//! Interpretation of backend responses.
//!
//! The backend answers `/process` with either a ZIP attachment or a
//! `{"error": "..."}` JSON body and status 500.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::config::DEFAULT_DOWNLOAD_NAME;

/// Error body sent by the backend on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Longest raw body echoed back to the user.
const MAX_RAW_MESSAGE: usize = 200;

/// Build the user-facing message for a non-success response.
///
/// Prefers the backend's `error` field, then a short raw body, then the
/// status line.
pub fn server_error_message(status: u16, status_text: &str, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.chars().count() <= MAX_RAW_MESSAGE {
        return trimmed.to_string();
    }

    if status_text.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {} {}", status, status_text)
    }
}

/// Extract the download name from a `Content-Disposition` header.
///
/// Falls back to [`DEFAULT_DOWNLOAD_NAME`] when the header is missing,
/// unreadable or names an empty file.
pub fn download_filename(content_disposition: Option<&str>) -> String {
    content_disposition
        .and_then(parse_disposition_filename)
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

/// `filename*` (RFC 5987, percent-encoded) wins over plain `filename`.
fn parse_disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename" => plain = Some(value.trim().trim_matches('"').to_string()),
            // RFC 5987 form: filename*=UTF-8''name.zip
            "filename*" => extended = decode_extended_value(value.trim()),
            _ => {}
        }
    }

    extended.or(plain)
}

/// Decode `charset'lang'percent-encoded`. Only UTF-8 is understood.
fn decode_extended_value(value: &str) -> Option<String> {
    let (charset, rest) = value.split_once('\'')?;
    let (_language, encoded) = rest.split_once('\'')?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }

    percent_decode_str(encoded.trim_matches('"'))
        .decode_utf8()
        .ok()
        .map(|name| name.into_owned())
}

fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    base.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_body_is_unwrapped() {
        let msg = server_error_message(500, "Internal Server Error", r#"{"error":"bad format"}"#);
        assert_eq!(msg, "bad format");
    }

    #[test]
    fn test_plain_text_body_is_kept() {
        let msg = server_error_message(502, "Bad Gateway", "  upstream down \n");
        assert_eq!(msg, "upstream down");
    }

    #[test]
    fn test_empty_body_falls_back_to_status_line() {
        assert_eq!(server_error_message(404, "Not Found", ""), "HTTP 404 Not Found");
        assert_eq!(server_error_message(500, "", ""), "HTTP 500");
    }

    #[test]
    fn test_huge_body_is_not_echoed() {
        let body = "x".repeat(MAX_RAW_MESSAGE + 1);
        assert_eq!(server_error_message(500, "", &body), "HTTP 500");
    }

    #[test]
    fn test_download_filename_from_header() {
        assert_eq!(
            download_filename(Some(r#"attachment; filename="organized_result.zip""#)),
            "organized_result.zip"
        );
        assert_eq!(download_filename(Some("attachment; filename=out.zip")), "out.zip");
        assert_eq!(
            download_filename(Some("attachment; filename*=UTF-8''r%C3%A9sultat.zip")),
            "résultat.zip"
        );
    }

    #[test]
    fn test_extended_filename_wins_over_plain() {
        assert_eq!(
            download_filename(Some(
                r#"attachment; filename="fallback.zip"; filename*=UTF-8''r%C3%A9sultat.zip"#
            )),
            "résultat.zip"
        );
        assert_eq!(
            download_filename(Some(
                r#"attachment; filename*=utf-8'fr'r%C3%A9sultat.zip; filename="fallback.zip""#
            )),
            "résultat.zip"
        );
    }

    #[test]
    fn test_undecodable_extended_filename_falls_back_to_plain() {
        assert_eq!(
            download_filename(Some(
                r#"attachment; filename="fallback.zip"; filename*=ISO-8859-1''r%E9sultat.zip"#
            )),
            "fallback.zip"
        );
        assert_eq!(
            download_filename(Some(r#"attachment; filename="fallback.zip"; filename*=UTF-8''%FF.zip"#)),
            "fallback.zip"
        );
    }

    #[test]
    fn test_download_filename_fallbacks() {
        assert_eq!(download_filename(None), "organized_result.zip");
        assert_eq!(download_filename(Some("attachment")), "organized_result.zip");
        assert_eq!(download_filename(Some(r#"attachment; filename="""#)), "organized_result.zip");
    }

    #[test]
    fn test_download_filename_strips_directories() {
        assert_eq!(
            download_filename(Some(r#"attachment; filename="../../etc/result.zip""#)),
            "result.zip"
        );
    }
}
