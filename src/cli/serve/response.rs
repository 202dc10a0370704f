//! HTTP response handlers.

use crate::utils::mime::types::PLAIN;
use anyhow::{Context, Result};
use std::{
    fs,
    io::{Read, Seek, SeekFrom},
    path::Path,
};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Cache policy of the generated documents.
pub const DOCUMENT_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

/// Respond with a generated document.
pub fn respond_document(request: Request, content_type: &'static str, body: Vec<u8>) -> Result<()> {
    let headers = [
        make_header("Content-Type", content_type),
        make_header("Cache-Control", DOCUMENT_CACHE_CONTROL),
    ];
    send(request, 200, &headers, body)
}

/// Respond with a static file, honoring `Range` for audio seeking.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if let Some(range) = get_range_header(&request) {
        return respond_range(request, path, content_type, &range);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let headers = [
        make_header("Content-Type", content_type),
        make_header("Accept-Ranges", "bytes"),
    ];
    send(request, 200, &headers, body)
}

/// Handle Range request for media files.
fn respond_range(
    request: Request,
    path: &Path,
    content_type: &'static str,
    range: &str,
) -> Result<()> {
    let file_size = fs::metadata(path)?.len();

    let range = range.strip_prefix("bytes=").unwrap_or(range);
    let Some((start, end)) = parse_range(range, file_size) else {
        let content_range = format!("bytes */{file_size}");
        let response = Response::empty(StatusCode(416))
            .with_header(dynamic_header("Content-Range", &content_range)?);
        request.respond(response)?;
        return Ok(());
    };

    let length = end - start + 1;
    let content_range = format!("bytes {start}-{end}/{file_size}");
    let headers = vec![
        make_header("Content-Type", content_type),
        dynamic_header("Content-Range", &content_range)?,
        make_header("Accept-Ranges", "bytes"),
    ];

    if is_head_request(&request) {
        let response = Response::new(StatusCode(206), headers, std::io::empty(), Some(length as usize), None);
        request.respond(response)?;
        return Ok(());
    }

    // Stream the requested range without buffering it
    let mut file = fs::File::open(path)?;
    file.seek(SeekFrom::Start(start))?;
    let reader = file.take(length);

    let response = Response::new(StatusCode(206), headers, reader, Some(length as usize), None);
    request.respond(response)?;
    Ok(())
}

/// Parse a single `start-end` byte range. `None` if unsatisfiable.
fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    if file_size == 0 {
        return None;
    }
    let last = file_size - 1;
    let (start, end) = range.trim().split_once('-')?;
    let (start, end) = (start.trim(), end.trim());

    let (start, end) = match (start.is_empty(), end.is_empty()) {
        // "0-499"
        (false, false) => (start.parse().ok()?, end.parse::<u64>().ok()?.min(last)),
        // "500-"
        (false, true) => (start.parse().ok()?, last),
        // "-500": last 500 bytes
        (true, false) => {
            let suffix: u64 = end.parse().ok()?;
            if suffix == 0 {
                return None;
            }
            (file_size.saturating_sub(suffix), last)
        }
        (true, true) => return None,
    };

    (start <= end).then_some((start, end))
}

/// Extract Range header from request.
fn get_range_header(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case("range"))
        .map(|h| h.value.to_string())
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send(request, 404, &[make_header("Content-Type", PLAIN)], b"404 Not Found".to_vec())
}

pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let headers = [
        make_header("Content-Type", PLAIN),
        make_header("Allow", "GET, HEAD"),
    ];
    send(request, 405, &headers, b"405 Method Not Allowed".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send(
        request,
        503,
        &[make_header("Content-Type", PLAIN)],
        b"503 Service Unavailable".to_vec(),
    )
}

/// Respond with 500 and the error chain.
pub fn respond_internal_error(request: Request, error: &anyhow::Error) -> Result<()> {
    let body = format!("500 Internal Server Error\n\n{error:#}");
    send(request, 500, &[make_header("Content-Type", PLAIN)], body.into_bytes())
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

pub fn is_get_or_head(request: &Request) -> bool {
    matches!(request.method(), Method::Get | Method::Head)
}

/// Send `body`, or only its headers and length for HEAD.
fn send(request: Request, status: u16, headers: &[Header], body: Vec<u8>) -> Result<()> {
    if is_head_request(&request) {
        let response = Response::new(
            StatusCode(status),
            headers.to_vec(),
            std::io::empty(),
            Some(body.len()),
            None,
        );
        request.respond(response)?;
        return Ok(());
    }

    let mut response = Response::from_data(body).with_status_code(StatusCode(status));
    for header in headers {
        response.add_header(header.clone());
    }
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).expect("static header is valid")
}

fn dynamic_header(key: &'static str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow::anyhow!("invalid {key} header: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_forms() {
        assert_eq!(parse_range("0-499", 1000), Some((0, 499)));
        assert_eq!(parse_range("500-", 1000), Some((500, 999)));
        assert_eq!(parse_range("-200", 1000), Some((800, 999)));
        assert_eq!(parse_range("900-5000", 1000), Some((900, 999)));
    }

    #[test]
    fn test_parse_range_unsatisfiable() {
        assert_eq!(parse_range("1000-", 1000), None);
        assert_eq!(parse_range("500-100", 1000), None);
        assert_eq!(parse_range("-0", 1000), None);
        assert_eq!(parse_range("-", 1000), None);
        assert_eq!(parse_range("abc-def", 1000), None);
        assert_eq!(parse_range("0-10", 0), None);
    }

    #[test]
    fn test_suffix_larger_than_file() {
        assert_eq!(parse_range("-5000", 1000), Some((0, 999)));
    }

    #[test]
    fn test_static_headers_are_valid() {
        let header = make_header("Cache-Control", DOCUMENT_CACHE_CONTROL);
        assert_eq!(header.value.as_str(), DOCUMENT_CACHE_CONTROL);
    }
}
