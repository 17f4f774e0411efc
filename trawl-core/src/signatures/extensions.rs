use super::Extension;

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 7;

const EXTENSIONS: &[(&str, u8)] = &[
    // 1: credentials, keys, dumps
    ("key", 1),
    ("pem", 1),
    ("ppk", 1),
    ("p12", 1),
    ("pfx", 1),
    ("jks", 1),
    ("env", 1),
    ("sql", 1),
    ("db", 1),
    ("sqlite", 1),
    ("sqlite3", 1),
    ("mdb", 1),
    ("bak", 1),
    ("backup", 1),
    ("old", 1),
    ("swp", 1),
    ("log", 1),
    ("htpasswd", 1),
    ("kdbx", 1),
    // 2: configuration
    ("config", 2),
    ("conf", 2),
    ("cfg", 2),
    ("ini", 2),
    ("yml", 2),
    ("yaml", 2),
    ("toml", 2),
    ("properties", 2),
    ("npmrc", 2),
    ("git", 2),
    ("svn", 2),
    // 3: archives and office documents
    ("zip", 3),
    ("tar", 3),
    ("gz", 3),
    ("tgz", 3),
    ("7z", 3),
    ("rar", 3),
    ("war", 3),
    ("jar", 3),
    ("doc", 3),
    ("docx", 3),
    ("xls", 3),
    ("xlsx", 3),
    ("ppt", 3),
    ("pptx", 3),
    ("odt", 3),
    ("csv", 3),
    ("pdf", 3),
    // 4: binaries and source
    ("exe", 4),
    ("dll", 4),
    ("bin", 4),
    ("sh", 4),
    ("bat", 4),
    ("ps1", 4),
    ("py", 4),
    ("rb", 4),
    ("java", 4),
    ("class", 4),
    ("c", 4),
    ("cpp", 4),
    ("go", 4),
    // 5: server-side pages and data
    ("php", 5),
    ("asp", 5),
    ("aspx", 5),
    ("jsp", 5),
    ("cgi", 5),
    ("pl", 5),
    ("json", 5),
    ("xml", 5),
    ("txt", 5),
    ("js", 5),
    ("map", 5),
    // 6: markup and styles
    ("html", 6),
    ("htm", 6),
    ("css", 6),
    ("md", 6),
    ("rss", 6),
    // 7: media
    ("png", 7),
    ("jpg", 7),
    ("jpeg", 7),
    ("gif", 7),
    ("svg", 7),
    ("ico", 7),
    ("webp", 7),
    ("bmp", 7),
    ("mp3", 7),
    ("mp4", 7),
    ("woff", 7),
    ("woff2", 7),
    ("ttf", 7),
];

pub fn default_extensions() -> Vec<Extension> {
    EXTENSIONS
        .iter()
        .map(|(extension, severity)| Extension {
            extension: extension.to_string(),
            severity: *severity,
        })
        .collect()
}

/// Parses `ext` or `ext:severity`. A missing severity means 1.
pub fn parse_extension_line(line: &str) -> Result<Extension, String> {
    let (ext, severity) = match line.split_once(':') {
        Some((ext, severity)) => {
            let severity: u8 = severity
                .trim()
                .parse()
                .map_err(|_| format!("invalid severity {:?}", severity.trim()))?;
            (ext, severity)
        }
        None => (line, MIN_SEVERITY),
    };

    if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
        return Err(format!(
            "severity {} outside {}..={}",
            severity, MIN_SEVERITY, MAX_SEVERITY
        ));
    }

    let extension = ext.trim().trim_start_matches('.').to_ascii_lowercase();
    if extension.is_empty() {
        return Err("empty extension".to_string());
    }

    Ok(Extension {
        extension,
        severity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extension_line() {
        assert_eq!(
            parse_extension_line(".ENV").unwrap(),
            Extension {
                extension: "env".to_string(),
                severity: 1
            }
        );
        assert_eq!(parse_extension_line("php:5").unwrap().severity, 5);
        assert!(parse_extension_line("php:9").is_err());
        assert!(parse_extension_line("php:x").is_err());
        assert!(parse_extension_line(":3").is_err());
    }

    #[test]
    fn test_default_severities_in_range() {
        assert!(
            default_extensions()
                .iter()
                .all(|e| (MIN_SEVERITY..=MAX_SEVERITY).contains(&e.severity))
        );
    }
}
