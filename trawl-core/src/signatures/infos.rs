use super::{Fingerprint, strs};

pub fn default_info_fingerprints() -> Vec<Fingerprint> {
    let table: &[(&str, &[&str])] = &[
        (
            "Email address",
            &[r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,24}"],
        ),
        ("HTML comment", &[r"(?s)<!--.*?-->"]),
        (
            "Internal IP address",
            &[
                r"\b10\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\b",
                r"\b172\.(1[6-9]|2[0-9]|3[01])\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\b",
                r"\b192\.168\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\b",
            ],
        ),
        (
            "IPv6 address",
            &[r"\b([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b"],
        ),
        ("Bitcoin address", &[r"\b(bc1|[13])[a-km-zA-HJ-NP-Z1-9]{25,39}\b"]),
        ("Ethereum address", &[r"\b0x[a-fA-F0-9]{40}\b"]),
        (
            "Server version",
            &[
                r"(?i)Apache/[0-9]+\.[0-9]+(\.[0-9]+)?",
                r"(?i)nginx/[0-9]+\.[0-9]+(\.[0-9]+)?",
                r"(?i)Microsoft-IIS/[0-9]+\.[0-9]+",
                r"(?i)PHP/[0-9]+\.[0-9]+(\.[0-9]+)?",
            ],
        ),
        (
            "Directory listing",
            &[r"(?i)<title>Index of /", r"(?i)Directory listing for /"],
        ),
    ];

    table
        .iter()
        .map(|(name, regexes)| Fingerprint {
            name: name.to_string(),
            regexes: strs(regexes),
        })
        .collect()
}
