use crate::data::{EndpointMatch, ErrorMatch, FileTypeMatch, InfoMatch, ScanReport, SecretMatch};
use crate::signatures::{
    CatalogSource, Extension, Fingerprint, Parameter, Secret, errors_catalog, extensions_catalog,
    infos_catalog, parameters_catalog, secrets_catalog,
};
use crate::url::{retrieve_parameters, retrieve_raw_parameters};
use regex::Regex;
use tracing::warn;

/// Bodies this short never contain a secret worth reporting.
pub const MIN_SECRET_BODY_LEN: usize = 10;

/// Which catalogs run, and where each one comes from.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub secrets: bool,
    pub endpoints: bool,
    /// Severity threshold 1..=7. `None` disables file type hunting.
    pub file_type: Option<u8>,
    pub errors: bool,
    pub info: bool,
    pub secrets_source: CatalogSource,
    pub endpoints_source: CatalogSource,
    pub extensions_source: CatalogSource,
    pub errors_source: CatalogSource,
    pub info_source: CatalogSource,
}

impl ScanOptions {
    pub fn any_enabled(&self) -> bool {
        self.secrets || self.endpoints || self.file_type.is_some() || self.errors || self.info
    }
}

struct CompiledSecret {
    secret: Secret,
    regex: Regex,
}

struct CompiledFingerprint {
    fingerprint: Fingerprint,
    regexes: Vec<Regex>,
}

/// Compiled catalogs. Build once per run and share.
pub struct Scanner {
    secrets: Vec<CompiledSecret>,
    filter_false_positives: bool,
    parameters: Vec<Parameter>,
    exact_parameters: bool,
    endpoints: bool,
    file_type: Option<u8>,
    extensions: Vec<Extension>,
    errors: Vec<CompiledFingerprint>,
    infos: Vec<CompiledFingerprint>,
}

fn compile(pattern: &str, label: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Skipping {} pattern {:?}: {}", label, pattern, e);
            None
        }
    }
}

fn compile_fingerprints(catalog: Vec<Fingerprint>) -> Vec<CompiledFingerprint> {
    catalog
        .into_iter()
        .map(|fingerprint| CompiledFingerprint {
            regexes: fingerprint
                .regexes
                .iter()
                .filter_map(|p| compile(p, &fingerprint.name))
                .collect(),
            fingerprint,
        })
        .filter(|c| !c.regexes.is_empty())
        .collect()
}

impl Scanner {
    pub fn new(options: &ScanOptions) -> Self {
        let secrets = if options.secrets {
            secrets_catalog(&options.secrets_source)
                .into_iter()
                .filter_map(|secret| {
                    compile(&secret.regex, &secret.name).map(|regex| CompiledSecret { secret, regex })
                })
                .collect()
        } else {
            Vec::new()
        };

        let parameters = if options.endpoints {
            parameters_catalog(&options.endpoints_source)
        } else {
            Vec::new()
        };

        let file_type = options
            .file_type
            .filter(|threshold| (1..=7).contains(threshold));
        let extensions = if file_type.is_some() {
            extensions_catalog(&options.extensions_source)
        } else {
            Vec::new()
        };

        let errors = if options.errors {
            compile_fingerprints(errors_catalog(&options.errors_source))
        } else {
            Vec::new()
        };

        let infos = if options.info {
            compile_fingerprints(infos_catalog(&options.info_source))
        } else {
            Vec::new()
        };

        Self {
            secrets,
            filter_false_positives: !options.secrets_source.is_override(),
            parameters,
            exact_parameters: options.endpoints_source.is_override(),
            endpoints: options.endpoints,
            file_type,
            extensions,
            errors,
            infos,
        }
    }

    /// `raw_len` is the body length in bytes before lossy UTF-8 decoding.
    pub fn scan(&self, url: &str, body: &str, raw_len: usize) -> ScanReport {
        ScanReport {
            secrets: self.hunt_secrets(url, body, raw_len),
            endpoint: self.hunt_endpoint(url),
            filetype: self.hunt_file_type(url),
            errors: hunt_fingerprints(&self.errors, body)
                .map(|(error, matched)| ErrorMatch {
                    error,
                    url: url.to_string(),
                    matched,
                })
                .collect(),
            infos: hunt_fingerprints(&self.infos, body)
                .map(|(info, matched)| InfoMatch {
                    info,
                    url: url.to_string(),
                    matched,
                })
                .collect(),
        }
    }

    pub fn hunt_secrets(&self, url: &str, body: &str, raw_len: usize) -> Vec<SecretMatch> {
        if raw_len <= MIN_SECRET_BODY_LEN {
            return Vec::new();
        }

        let mut found = Vec::new();
        for compiled in &self.secrets {
            let Some(m) = compiled.regex.find(body) else {
                continue;
            };
            let matched = m.as_str();

            if self.filter_false_positives {
                let lowered = matched.to_lowercase();
                if compiled
                    .secret
                    .false_positives
                    .iter()
                    .any(|fp| lowered.contains(fp.as_str()))
                {
                    continue;
                }
            }

            found.push(SecretMatch {
                secret: compiled.secret.clone(),
                url: url.to_string(),
                matched: matched.to_string(),
            });
        }
        found
    }

    /// One record per URL listing the juicy parameters it carries, in catalog order.
    pub fn hunt_endpoint(&self, url: &str) -> Option<EndpointMatch> {
        if !self.endpoints {
            return None;
        }

        let present = if self.exact_parameters {
            retrieve_raw_parameters(url)
        } else {
            retrieve_parameters(url)
        };
        if present.is_empty() {
            return None;
        }

        let matched: Vec<Parameter> = self
            .parameters
            .iter()
            .filter(|p| {
                if self.exact_parameters {
                    present.contains(&p.parameter)
                } else {
                    present.contains(&p.parameter.to_lowercase())
                }
            })
            .cloned()
            .collect();

        if matched.is_empty() {
            None
        } else {
            Some(EndpointMatch {
                parameters: matched,
                url: url.to_string(),
            })
        }
    }

    pub fn hunt_file_type(&self, url: &str) -> Option<FileTypeMatch> {
        let threshold = self.file_type?;
        let path = url.split(['?', '#']).next().unwrap_or_default().to_ascii_lowercase();

        self.extensions
            .iter()
            .filter(|ext| ext.severity <= threshold)
            .find(|ext| {
                path.len() > ext.extension.len()
                    && path.ends_with(&ext.extension)
                    && path[..path.len() - ext.extension.len()].ends_with('.')
            })
            .map(|ext| FileTypeMatch {
                filetype: ext.clone(),
                url: url.to_string(),
            })
    }
}

/// Every alternative is tested on its own; each hit is one (entry, match) pair.
fn hunt_fingerprints<'a>(
    catalog: &'a [CompiledFingerprint],
    body: &'a str,
) -> impl Iterator<Item = (Fingerprint, String)> + 'a {
    catalog.iter().flat_map(move |compiled| {
        compiled.regexes.iter().filter_map(move |regex| {
            regex
                .find(body)
                .map(|m| (compiled.fingerprint.clone(), m.as_str().to_string()))
        })
    })
}
