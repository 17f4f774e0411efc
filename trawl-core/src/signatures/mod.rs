// Built-in signature catalogs and user overrides

mod errors;
mod extensions;
mod infos;
mod params;
mod secrets;

pub use errors::default_error_fingerprints;
pub use extensions::{default_extensions, parse_extension_line};
pub use infos::default_info_fingerprints;
pub use params::default_juicy_parameters;
pub use secrets::default_secrets;

use serde::{Deserialize, Serialize};

/// Name given to every entry built from an override list.
pub const CUSTOM_ENTRY_NAME: &str = "CustomFromFile";

/// Which table a category uses for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    #[default]
    Default,
    /// Replaces the built-in table. Never merged with it.
    Override(Vec<String>),
}

impl CatalogSource {
    /// An empty list selects the built-in table.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() {
            CatalogSource::Default
        } else {
            CatalogSource::Override(lines)
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, CatalogSource::Override(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    pub description: String,
    pub regex: String,
    /// Lower-case substrings that mark a match as noise.
    pub false_positives: Vec<String>,
    pub poc: String,
}

impl Secret {
    pub fn custom(regex: &str) -> Self {
        Self {
            name: CUSTOM_ENTRY_NAME.to_string(),
            description: String::new(),
            regex: regex.to_string(),
            false_positives: Vec::new(),
            poc: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub parameter: String,
    pub attacks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub extension: String,
    /// 1 is the most interesting, 7 the least.
    pub severity: u8,
}

/// Error and info entries share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub name: String,
    pub regexes: Vec<String>,
}

impl Fingerprint {
    pub fn custom(regexes: &[String]) -> Self {
        Self {
            name: CUSTOM_ENTRY_NAME.to_string(),
            regexes: regexes.to_vec(),
        }
    }
}

pub(crate) fn strs(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn secrets_catalog(source: &CatalogSource) -> Vec<Secret> {
    match source {
        CatalogSource::Default => default_secrets(),
        CatalogSource::Override(lines) => lines.iter().map(|l| Secret::custom(l)).collect(),
    }
}

pub fn parameters_catalog(source: &CatalogSource) -> Vec<Parameter> {
    match source {
        CatalogSource::Default => default_juicy_parameters(),
        CatalogSource::Override(lines) => lines
            .iter()
            .map(|l| Parameter {
                parameter: l.clone(),
                attacks: Vec::new(),
            })
            .collect(),
    }
}

pub fn extensions_catalog(source: &CatalogSource) -> Vec<Extension> {
    match source {
        CatalogSource::Default => default_extensions(),
        CatalogSource::Override(lines) => lines
            .iter()
            .filter_map(|l| match parse_extension_line(l) {
                Ok(ext) => Some(ext),
                Err(reason) => {
                    tracing::warn!("Skipping extension override {:?}: {}", l, reason);
                    None
                }
            })
            .collect(),
    }
}

pub fn errors_catalog(source: &CatalogSource) -> Vec<Fingerprint> {
    match source {
        CatalogSource::Default => default_error_fingerprints(),
        CatalogSource::Override(lines) => vec![Fingerprint::custom(lines)],
    }
}

pub fn infos_catalog(source: &CatalogSource) -> Vec<Fingerprint> {
    match source {
        CatalogSource::Default => default_info_fingerprints(),
        CatalogSource::Override(lines) => vec![Fingerprint::custom(lines)],
    }
}
