//! Minimal HTTP/1.1 client over a [`RelayStream`].
//!
//! Exactly what the relay and the cache worker need: one request per
//! connection (`Connection: close`), status and headers parsed, bodies
//! framed by content length or chunked encoding. No redirects, no
//! keep-alive, no compression.

use yafe_types::error::{Result, YafeError};
use yafe_types::url::Url;

use crate::stream::{RelayStream, TcpRelayStream, TlsProvider};

/// Responses past this size are refused.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Header lookup, case-insensitive on the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_value(&self.headers, name)
    }

    /// `Content-Type` without parameters (`text/html;charset=x` gives
    /// `text/html`).
    pub fn content_type(&self) -> Option<&str> {
        let value = self.header("content-type")?;
        Some(match value.split_once(';') {
            Some((media, _)) => media.trim(),
            None => value,
        })
    }
}

/// POST a JSON body and read the full response.
pub fn post_json(url: &Url, body: &str, tls: Option<&dyn TlsProvider>) -> Result<HttpResponse> {
    let mut stream = open_stream(url, tls)?;
    let request = format!(
        "POST {} HTTP/1.1\r\n\
         Host: {}\r\n\
         User-Agent: yafe-relay/0.1\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Accept: application/json\r\n\
         Connection: close\r\n\
         \r\n",
        url.request_target(),
        url.host_header(),
        body.len(),
    );
    stream.write_all(request.as_bytes())?;
    stream.write_all(body.as_bytes())?;
    let response = read_response(&mut *stream);
    stream.close();
    response
}

/// GET a resource and read the full response.
pub fn get(url: &Url, tls: Option<&dyn TlsProvider>) -> Result<HttpResponse> {
    let mut stream = open_stream(url, tls)?;
    let request = format!(
        "GET {} HTTP/1.1\r\n\
         Host: {}\r\n\
         User-Agent: yafe-relay/0.1\r\n\
         Accept: */*\r\n\
         Connection: close\r\n\
         \r\n",
        url.request_target(),
        url.host_header(),
    );
    stream.write_all(request.as_bytes())?;
    let response = read_response(&mut *stream);
    stream.close();
    response
}

fn open_stream(url: &Url, tls: Option<&dyn TlsProvider>) -> Result<Box<dyn RelayStream>> {
    let tls = match (url.is_secure(), tls) {
        (false, _) => None,
        (true, Some(tls)) => Some(tls),
        (true, None) => {
            return Err(YafeError::Relay(format!(
                "https endpoint {} but no TLS provider",
                url.host,
            )));
        },
    };
    let stream = TcpRelayStream::connect(&url.host, url.connect_port())?;
    match tls {
        Some(tls) => tls.wrap(Box::new(stream), &url.host),
        None => Ok(Box::new(stream)),
    }
}

fn read_response(stream: &mut dyn RelayStream) -> Result<HttpResponse> {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf)?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
        if raw.len() > MAX_BODY_SIZE {
            return Err(YafeError::Relay("response exceeds size limit".to_string()));
        }
    }
    parse_response(&raw)
}

/// Parse a complete HTTP/1.1 response held in memory.
pub(crate) fn parse_response(raw: &[u8]) -> Result<HttpResponse> {
    let header_end = find_blank_line(raw)
        .ok_or_else(|| YafeError::Relay("response missing header terminator".to_string()))?;
    let head = String::from_utf8_lossy(&raw[..header_end]);
    let mut lines = head.lines();

    let status_line = lines
        .next()
        .ok_or_else(|| YafeError::Relay("empty response".to_string()))?;
    let status = parse_status_line(status_line)?;

    let mut headers = Vec::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let mut body = raw[header_end + 4..].to_vec();
    let chunked = header_value(&headers, "transfer-encoding")
        .is_some_and(|v| v.eq_ignore_ascii_case("chunked"));
    if chunked {
        body = decode_chunked(&body)?;
    } else if let Some(len) = header_value(&headers, "content-length")
        .and_then(|v| v.parse::<usize>().ok())
    {
        if body.len() < len {
            return Err(YafeError::Relay(format!(
                "truncated body: {} of {len} bytes",
                body.len(),
            )));
        }
        body.truncate(len);
    }

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn parse_status_line(line: &str) -> Result<u16> {
    let mut parts = line.split_whitespace();
    let version_ok = parts.next().is_some_and(|v| v.starts_with("HTTP/"));
    let status = parts.next().and_then(|code| code.parse().ok());
    match status {
        Some(status) if version_ok => Ok(status),
        _ => Err(YafeError::Relay(format!("malformed status line: {line}"))),
    }
}

fn find_blank_line(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

pub(crate) fn header_value<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

fn decode_chunked(body: &[u8]) -> Result<Vec<u8>> {
    let truncated = || YafeError::Relay("truncated chunked body".to_string());
    let mut out = Vec::new();
    let mut rest = body;
    loop {
        let line_end = rest
            .windows(2)
            .position(|w| w == b"\r\n")
            .ok_or_else(truncated)?;
        let size_line = std::str::from_utf8(&rest[..line_end])
            .map_err(|_| YafeError::Relay("bad chunk size encoding".to_string()))?;
        let size_hex = match size_line.split_once(';') {
            Some((size, _extensions)) => size,
            None => size_line,
        };
        let size = usize::from_str_radix(size_hex.trim(), 16)
            .map_err(|_| YafeError::Relay(format!("bad chunk size: {size_line}")))?;
        rest = &rest[line_end + 2..];
        if size == 0 {
            break;
        }
        if rest.len() < size + 2 {
            return Err(truncated());
        }
        out.extend_from_slice(&rest[..size]);
        rest = &rest[size + 2..];
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    // ---- parsing tests ----

    #[test]
    fn parses_a_plain_response() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 5\r\n\r\nhello";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"hello");
        assert_eq!(response.content_type(), Some("text/html"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let raw = b"HTTP/1.1 200 OK\r\nX-Thing: abc\r\n\r\n";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.header("x-thing"), Some("abc"));
        assert_eq!(response.header("X-THING"), Some("abc"));
        assert_eq!(response.header("missing"), None);
    }

    #[test]
    fn content_type_strips_parameters() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/css; charset=utf-8\r\n\r\n";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.content_type(), Some("text/css"));
    }

    #[test]
    fn content_length_trims_trailing_bytes() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nokEXTRA";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.body, b"ok");
    }

    #[test]
    fn short_body_is_an_error() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nok";
        assert!(parse_response(raw).is_err());
    }

    #[test]
    fn decodes_chunked_bodies() {
        let raw =
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nyafe\r\n3\r\n!!!\r\n0\r\n\r\n";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.body, b"yafe!!!");
    }

    #[test]
    fn chunk_extensions_are_ignored() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n2;ext=1\r\nok\r\n0\r\n\r\n";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.body, b"ok");
    }

    #[test]
    fn truncated_chunk_is_an_error() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nff\r\nshort";
        assert!(parse_response(raw).is_err());
    }

    #[test]
    fn rejects_malformed_status_lines() {
        assert!(parse_response(b"garbage\r\n\r\n").is_err());
        assert!(parse_response(b"HTTP/1.1 lots OK\r\n\r\n").is_err());
        assert!(parse_response(b"no terminator at all").is_err());
    }

    #[test]
    fn non_200_statuses_parse() {
        let raw = b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n";
        assert_eq!(parse_response(raw).unwrap().status, 400);
    }

    // ---- socket tests ----

    fn read_full_request(socket: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&raw[..pos]).to_ascii_lowercase();
                let body_len = head
                    .split("content-length:")
                    .nth(1)
                    .and_then(|rest| rest.lines().next())
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= pos + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&raw).to_string()
    }

    fn serve_once(response: &'static str) -> (u16, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let request = read_full_request(&mut socket);
            socket.write_all(response.as_bytes()).unwrap();
            request
        });
        (port, handle)
    }

    #[test]
    fn get_fetches_from_a_local_server() {
        let (port, server) =
            serve_once("HTTP/1.1 200 OK\r\nContent-Type: text/css\r\nContent-Length: 6\r\n\r\nbody{}");
        let url = Url::parse(&format!("http://127.0.0.1:{port}/style.css")).unwrap();
        let response = get(&url, None).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"body{}");

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /style.css HTTP/1.1\r\n"));
        assert!(request.contains("Connection: close"));
    }

    #[test]
    fn post_sends_the_json_body() {
        let (port, server) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok");
        let url = Url::parse(&format!("http://127.0.0.1:{port}/api/v1.0/email/send")).unwrap();
        let body = r#"{"service_id":"service_a"}"#;
        let response = post_json(&url, body, None).unwrap();
        assert_eq!(response.status, 200);

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/v1.0/email/send HTTP/1.1\r\n"));
        assert!(request.contains("Content-Type: application/json"));
        assert!(request.contains(&format!("Content-Length: {}", body.len())));
        assert!(request.ends_with(body));
    }

    #[test]
    fn host_header_carries_the_port() {
        let (port, server) = serve_once("HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n");
        let url = Url::parse(&format!("http://127.0.0.1:{port}/x")).unwrap();
        get(&url, None).unwrap();
        let request = server.join().unwrap();
        assert!(request.contains(&format!("Host: 127.0.0.1:{port}\r\n")));
    }

    #[test]
    fn https_without_a_provider_is_refused() {
        let url = Url::parse("https://api.emailjs.com/api/v1.0/email/send").unwrap();
        let err = get(&url, None).unwrap_err();
        assert!(matches!(err, YafeError::Relay(_)));
    }
}
