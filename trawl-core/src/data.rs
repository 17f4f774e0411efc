// Match records produced by the response scanner

use crate::signatures::{Extension, Fingerprint, Parameter, Secret};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretMatch {
    pub secret: Secret,
    pub url: String,
    #[serde(rename = "match")]
    pub matched: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMatch {
    pub parameters: Vec<Parameter>,
    pub url: String,
}

impl EndpointMatch {
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.parameter.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeMatch {
    pub filetype: Extension,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMatch {
    pub error: Fingerprint,
    pub url: String,
    #[serde(rename = "match")]
    pub matched: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoMatch {
    pub info: Fingerprint,
    pub url: String,
    #[serde(rename = "match")]
    pub matched: String,
}

/// Identity used to collapse duplicate findings: (match text, URL).
pub trait MatchKey {
    fn match_text(&self) -> &str;
    fn url(&self) -> &str;
}

impl MatchKey for SecretMatch {
    fn match_text(&self) -> &str {
        &self.matched
    }
    fn url(&self) -> &str {
        &self.url
    }
}

impl MatchKey for ErrorMatch {
    fn match_text(&self) -> &str {
        &self.matched
    }
    fn url(&self) -> &str {
        &self.url
    }
}

impl MatchKey for InfoMatch {
    fn match_text(&self) -> &str {
        &self.matched
    }
    fn url(&self) -> &str {
        &self.url
    }
}

// Endpoints and file types carry no match text; one record per URL.
impl MatchKey for EndpointMatch {
    fn match_text(&self) -> &str {
        ""
    }
    fn url(&self) -> &str {
        &self.url
    }
}

impl MatchKey for FileTypeMatch {
    fn match_text(&self) -> &str {
        &self.filetype.extension
    }
    fn url(&self) -> &str {
        &self.url
    }
}

/// Everything found in one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub secrets: Vec<SecretMatch>,
    pub endpoint: Option<EndpointMatch>,
    pub filetype: Option<FileTypeMatch>,
    pub errors: Vec<ErrorMatch>,
    pub infos: Vec<InfoMatch>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
            && self.endpoint.is_none()
            && self.filetype.is_none()
            && self.errors.is_empty()
            && self.infos.is_empty()
    }
}
