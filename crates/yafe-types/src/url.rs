//! URL parsing and resolution (simplified RFC 3986).
//!
//! Cache stores key responses by URL, the worker needs origin checks for
//! its cacheability rule, and the relay client needs host/port/path to
//! build requests. This covers exactly that, nothing more.

use std::fmt;

/// A parsed absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Url {
    /// Scheme component, lowercased (`"http"`, `"https"`).
    pub scheme: String,
    /// Host component (e.g. `"api.emailjs.com"`).
    pub host: String,
    /// Optional explicit port number.
    pub port: Option<u16>,
    /// Path component starting with `/`.
    pub path: String,
    /// Optional query string (without the leading `?`).
    pub query: Option<String>,
    /// Optional fragment (without the leading `#`).
    pub fragment: Option<String>,
}

impl Url {
    /// Parse an absolute URL string.
    ///
    /// Handles full URLs (`https://host/path?q#frag`), protocol-relative
    /// references (`//host/path`), and fragment-only references
    /// (`#section`, as produced by in-page navigation links).
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        if let Some(frag) = url.strip_prefix('#') {
            return Some(Url {
                scheme: String::new(),
                host: String::new(),
                port: None,
                path: String::new(),
                query: None,
                fragment: Some(frag.to_string()),
            });
        }

        if let Some(rest) = url.strip_prefix("//") {
            return Self::parse_after_scheme("", rest);
        }

        if let Some(idx) = url.find("://") {
            return Self::parse_after_scheme(&url[..idx], &url[idx + 3..]);
        }

        None
    }

    /// Parse `host[:port]/path?query#fragment` once the scheme is gone.
    fn parse_after_scheme(scheme: &str, rest: &str) -> Option<Url> {
        let (rest, fragment) = match rest.find('#') {
            Some(i) => (&rest[..i], Some(rest[i + 1..].to_string())),
            None => (rest, None),
        };
        let (rest, query) = match rest.find('?') {
            Some(i) => (&rest[..i], Some(rest[i + 1..].to_string())),
            None => (rest, None),
        };
        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.rfind(':') {
            Some(i) => match authority[i + 1..].parse::<u16>() {
                Ok(p) => (&authority[..i], Some(p)),
                Err(_) => (authority, None),
            },
            None => (authority, None),
        };

        Some(Url {
            scheme: scheme.to_lowercase(),
            host: host.to_string(),
            port,
            path: if path.is_empty() { "/" } else { path }.to_string(),
            query,
            fragment,
        })
    }

    /// Resolve a relative reference against this base URL.
    ///
    /// Handles absolute URLs (returned as-is), protocol-relative
    /// (`//host/path`), rooted paths (`/path`), relative paths
    /// (`path`, `../path`), query-only (`?q=x`), and fragment-only
    /// (`#frag`) references.
    pub fn resolve(&self, reference: &str) -> Option<Url> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Some(self.clone());
        }

        if reference.contains("://") {
            return Url::parse(reference);
        }

        if reference.starts_with("//") {
            return Url::parse(&format!("{}:{}", self.scheme, reference));
        }

        if let Some(frag) = reference.strip_prefix('#') {
            let mut out = self.clone();
            out.fragment = Some(frag.to_string());
            return Some(out);
        }

        if let Some(query) = reference.strip_prefix('?') {
            let mut out = self.clone();
            out.query = Some(query.to_string());
            out.fragment = None;
            return Some(out);
        }

        let (ref_path, query, fragment) = split_marks(reference);
        let path = if reference.starts_with('/') {
            ref_path
        } else {
            merge_paths(self.directory(), &ref_path)
        };

        Some(Url {
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            port: self.port,
            path,
            query,
            fragment,
        })
    }

    /// Get the origin (`scheme://host[:port]`).
    pub fn origin(&self) -> String {
        let mut s = format!("{}://{}", self.scheme, self.host);
        if let Some(port) = self.port {
            s.push_str(&format!(":{port}"));
        }
        s
    }

    /// Whether the scheme implies TLS.
    pub fn is_secure(&self) -> bool {
        self.scheme == "https"
    }

    /// The port to connect to, falling back to the scheme default.
    pub fn connect_port(&self) -> u16 {
        self.port
            .unwrap_or(if self.is_secure() { 443 } else { 80 })
    }

    /// Value for an HTTP `Host` header: `host`, or `host:port` when the
    /// port differs from the scheme default.
    pub fn host_header(&self) -> String {
        match self.port {
            Some(p) if p != if self.is_secure() { 443 } else { 80 } => {
                format!("{}:{}", self.host, p)
            },
            _ => self.host.clone(),
        }
    }

    /// Path plus query, as written on an HTTP request line.
    pub fn request_target(&self) -> String {
        match self.query {
            Some(ref q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// File extension of the path (without the dot), if any.
    pub fn extension(&self) -> Option<&str> {
        let filename = self.path.rsplit('/').next()?;
        let dot = filename.rfind('.')?;
        let ext = &filename[dot + 1..];
        if ext.is_empty() { None } else { Some(ext) }
    }

    /// Directory portion of the path (up to and including the last `/`).
    fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(i) => &self.path[..=i],
            None => "/",
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        write!(f, "{}", self.path)?;
        if let Some(ref q) = self.query {
            write!(f, "?{q}")?;
        }
        if let Some(ref frag) = self.fragment {
            write!(f, "#{frag}")?;
        }
        Ok(())
    }
}

/// Whether two URL strings share scheme, host, and port.
///
/// Unparseable input is never same-origin.
pub fn same_origin(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Some(a), Some(b)) => {
            a.scheme == b.scheme && a.host == b.host && a.connect_port() == b.connect_port()
        },
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Split a path reference into `(path, query, fragment)`.
fn split_marks(s: &str) -> (String, Option<String>, Option<String>) {
    let (s, fragment) = match s.find('#') {
        Some(i) => (&s[..i], Some(s[i + 1..].to_string())),
        None => (s, None),
    };
    let (path, query) = match s.find('?') {
        Some(i) => (s[..i].to_string(), Some(s[i + 1..].to_string())),
        None => (s.to_string(), None),
    };
    (path, query, fragment)
}

/// Merge a relative path into a base directory, collapsing `.` and `..`.
fn merge_paths(base_dir: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for seg in relative.split('/') {
        match seg {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
