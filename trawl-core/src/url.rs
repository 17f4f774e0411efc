// String-level URL helpers used for crawl scope decisions

use std::net::IpAddr;
use thiserror::Error;

const SCHEME_DELIMITER: &str = "://";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Unsupported scheme {scheme} in {url}")]
    UnsupportedScheme { scheme: String, url: String },
}

pub fn has_protocol(s: &str) -> bool {
    s.contains(SCHEME_DELIMITER)
}

/// Everything before the first `://`, or an empty string.
pub fn get_protocol(s: &str) -> String {
    s.split_once(SCHEME_DELIMITER)
        .map(|(scheme, _)| scheme.to_string())
        .unwrap_or_default()
}

pub fn remove_protocol(s: &str) -> String {
    s.split_once(SCHEME_DELIMITER)
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_else(|| s.to_string())
}

/// Authority of `s` without userinfo, lower-cased. The port is kept.
pub fn get_host(s: &str) -> String {
    let rest = remove_protocol(s);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };
    host.to_ascii_lowercase()
}

/// Path component of `s`, empty when there is none.
pub fn get_path(s: &str) -> String {
    let rest = remove_protocol(s);
    let start = match rest.find(['/', '?', '#']) {
        Some(i) if rest[i..].starts_with('/') => i,
        _ => return String::new(),
    };
    let path = &rest[start..];
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].to_string()
}

fn strip_port(host: &str) -> &str {
    if let Some(stripped) = host.strip_prefix('[') {
        return stripped.split(']').next().unwrap_or_default();
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Registrable domain (eTLD+1) of the host in `s`. An IP literal is its own root.
pub fn get_root_host(s: &str) -> Result<String, UrlError> {
    let host = get_host(s);
    let name = strip_port(&host).trim_end_matches('.');

    if name.is_empty() {
        return Err(UrlError::Malformed(s.to_string()));
    }

    if name.parse::<IpAddr>().is_ok() {
        return Ok(name.to_string());
    }

    psl::domain_str(name)
        .map(|domain| domain.to_string())
        .ok_or_else(|| UrlError::Malformed(s.to_string()))
}

pub fn same_domain(base: &str, candidate: &str) -> bool {
    get_host(base) == get_host(candidate)
}

/// Pins a link to `protocol://host` unless it already carries a scheme.
pub fn absolute_url(protocol: &str, host: &str, link: &str) -> String {
    if has_protocol(link) {
        link.to_string()
    } else if link.starts_with('/') {
        format!("{}://{}{}", protocol, host, link)
    } else {
        format!("{}://{}/{}", protocol, host, link)
    }
}

fn query_of(url: &str) -> &str {
    let Some((_, query)) = url.split_once('?') else {
        return "";
    };
    query.split('#').next().unwrap_or_default()
}

/// Query parameter names exactly as written, first occurrence only.
pub fn retrieve_raw_parameters(url: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (name, _) in ::url::form_urlencoded::parse(query_of(url).as_bytes()) {
        if !name.is_empty() && !names.iter().any(|n| *n == name) {
            names.push(name.into_owned());
        }
    }
    names
}

/// Query parameter names, lower-cased and deduplicated.
pub fn retrieve_parameters(url: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in retrieve_raw_parameters(url) {
        let lowered = name.to_lowercase();
        if !names.contains(&lowered) {
            names.push(lowered);
        }
    }
    names
}

pub fn ignore_match(url: &str, ignore: &[String]) -> bool {
    ignore.iter().any(|needle| url.contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_host() {
        assert_eq!(get_host(""), "");
        assert_eq!(get_host("example.com/path?id=1"), "example.com");
        assert_eq!(get_host("http://example.com/path?id=1"), "example.com");
        assert_eq!(get_host("https://user:pw@Example.COM:8443/x"), "example.com:8443");
        assert_eq!(get_host("http://example.com#frag"), "example.com");
    }

    #[test]
    fn test_get_protocol() {
        assert_eq!(get_protocol(""), "");
        assert_eq!(get_protocol("example.com"), "");
        assert_eq!(get_protocol("https://example.com/a"), "https");
    }

    #[test]
    fn test_has_protocol_anywhere() {
        assert!(!has_protocol(""));
        assert!(!has_protocol("sub.example.com"));
        assert!(has_protocol("ftp://sub.example.com/://x"));
    }

    #[test]
    fn test_remove_protocol() {
        assert_eq!(remove_protocol("https://example.com/a"), "example.com/a");
        assert_eq!(remove_protocol("example.com/a"), "example.com/a");
    }

    #[test]
    fn test_get_path() {
        assert_eq!(get_path("http://example.com"), "");
        assert_eq!(get_path("http://example.com?x=1"), "");
        assert_eq!(get_path("example.com/dir/page?x=1"), "/dir/page");
    }

    #[test]
    fn test_get_root_host() {
        assert_eq!(get_root_host("ciao.com").unwrap(), "ciao.com");
        assert_eq!(get_root_host("ciao.ciao.com").unwrap(), "ciao.com");
        assert_eq!(
            get_root_host("http://sub.example.com/ciao?id=1").unwrap(),
            "example.com"
        );
        assert_eq!(get_root_host("http://a.b.example.co.uk:8080/").unwrap(), "example.co.uk");
        assert_eq!(get_root_host("http://127.0.0.1:3000/x").unwrap(), "127.0.0.1");
        assert!(matches!(get_root_host(""), Err(UrlError::Malformed(_))));
        assert!(get_root_host("http:///path").is_err());
    }

    #[test]
    fn test_same_domain_is_exact() {
        assert!(same_domain("http://example.com", "https://example.com/a/b"));
        assert!(!same_domain("http://example.com", "http://sub.example.com/"));
        assert!(!same_domain("http://example.com", "http://example.com:8080/"));
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https", "example.com", "http://other.com/x"),
            "http://other.com/x"
        );
        assert_eq!(
            absolute_url("https", "example.com", "/login"),
            "https://example.com/login"
        );
        assert_eq!(
            absolute_url("https", "example.com", "login"),
            "https://example.com/login"
        );
    }

    #[test]
    fn test_retrieve_parameters() {
        let url = "http://example.com/a?ID=1&debug=true&id=2&Token=x#frag";
        assert_eq!(retrieve_parameters(url), vec!["id", "debug", "token"]);
        assert_eq!(retrieve_raw_parameters(url), vec!["ID", "debug", "id", "Token"]);
        assert!(retrieve_parameters("http://example.com/").is_empty());
    }

    #[test]
    fn test_ignore_match() {
        let ignore = vec!["logout".to_string(), ".pdf".to_string()];
        assert!(ignore_match("http://example.com/logout", &ignore));
        assert!(ignore_match("http://example.com/doc.pdf", &ignore));
        assert!(!ignore_match("http://example.com/login", &ignore));
        assert!(!ignore_match("http://example.com/", &[]));
    }
}
