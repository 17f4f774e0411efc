use crate::url::{
    UrlError, get_host, get_path, get_protocol, get_root_host, has_protocol, ignore_match,
    remove_protocol,
};

/// Per-run crawl target, resolved once from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub protocol: String,
    pub host: String,
    /// User input without its scheme, e.g. `example.com/app`.
    pub seed: String,
    /// Registrable domain, only resolved in intensive mode.
    pub root_host: Option<String>,
    pub intensive: bool,
    pub ignore: Vec<String>,
}

/// Outcome of the scope decision for one discovered URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Ignored,
    OutOfScope,
    /// Intensive mode could not compute a root host for the URL.
    Unresolvable(UrlError),
}

impl Target {
    pub fn resolve(input: &str, intensive: bool, ignore: Vec<String>) -> Result<Self, UrlError> {
        let input = input.trim();
        let protocol = if has_protocol(input) {
            get_protocol(input).to_ascii_lowercase()
        } else {
            "http".to_string()
        };

        if protocol != "http" && protocol != "https" {
            return Err(UrlError::UnsupportedScheme {
                scheme: protocol,
                url: input.to_string(),
            });
        }

        let seed = remove_protocol(input);
        let host = get_host(&seed);
        if host.is_empty() {
            return Err(UrlError::Malformed(input.to_string()));
        }

        let root_host = if intensive {
            Some(get_root_host(&format!("{}://{}", protocol, host))?)
        } else {
            None
        };

        let ignore = ignore
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            protocol,
            host,
            seed,
            root_host,
            intensive,
            ignore,
        })
    }

    pub fn root_url(&self) -> String {
        format!("{}://{}", self.protocol, self.seed)
    }

    /// `robots.txt` and `sitemap.xml` next to the seed, minus ignored ones.
    pub fn well_known_urls(&self) -> Vec<String> {
        let root = self.root_url();
        let base = if get_path(&root).ends_with('/') {
            root
        } else {
            format!("{}/", root)
        };

        ["robots.txt", "sitemap.xml"]
            .iter()
            .map(|file| format!("{}{}", base, file))
            .filter(|url| !self.is_ignored(url))
            .collect()
    }

    pub fn is_ignored(&self, url: &str) -> bool {
        ignore_match(url, &self.ignore)
    }

    pub fn in_scope(&self, url: &str) -> Result<bool, UrlError> {
        match self.root_host {
            Some(ref root) if self.intensive => Ok(get_root_host(url)? == *root),
            _ => Ok(get_host(url) == self.host),
        }
    }

    pub fn admits(&self, url: &str) -> Admission {
        match self.in_scope(url) {
            Ok(false) => Admission::OutOfScope,
            Err(e) => Admission::Unresolvable(e),
            Ok(true) if self.is_ignored(url) => Admission::Ignored,
            Ok(true) => Admission::Admitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_to_http() {
        let target = Target::resolve("Example.com/app", false, vec![]).unwrap();
        assert_eq!(target.protocol, "http");
        assert_eq!(target.host, "example.com");
        assert_eq!(target.seed, "Example.com/app");
        assert_eq!(target.root_host, None);
    }

    #[test]
    fn test_resolve_rejects_empty_host() {
        assert!(matches!(
            Target::resolve("https://", false, vec![]),
            Err(UrlError::Malformed(_))
        ));
        assert!(Target::resolve("", false, vec![]).is_err());
    }

    #[test]
    fn test_resolve_rejects_other_schemes() {
        assert!(matches!(
            Target::resolve("ftp://example.com", false, vec![]),
            Err(UrlError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_intensive_resolves_root() {
        let target = Target::resolve("https://www.example.com", true, vec![]).unwrap();
        assert_eq!(target.root_host.as_deref(), Some("example.com"));
        assert!(target.root_host.as_deref().is_some_and(|r| target.host.ends_with(r)));
    }

    #[test]
    fn test_well_known_urls() {
        let target = Target::resolve("https://example.com", false, vec![]).unwrap();
        assert_eq!(
            target.well_known_urls(),
            vec![
                "https://example.com/robots.txt",
                "https://example.com/sitemap.xml"
            ]
        );

        let target = Target::resolve("example.com/", false, vec!["sitemap".to_string()]).unwrap();
        assert_eq!(target.well_known_urls(), vec!["http://example.com/robots.txt"]);
    }

    #[test]
    fn test_blank_ignore_entries_dropped() {
        let target =
            Target::resolve("example.com", false, vec![" ".to_string(), "".to_string()]).unwrap();
        assert!(target.ignore.is_empty());
        assert!(!target.is_ignored("http://example.com/"));
    }
}
