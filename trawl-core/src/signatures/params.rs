use super::{Parameter, strs};

const XSS: &str = "XSS";
const SQLI: &str = "SQLi";
const LFI: &str = "LFI";
const RCE: &str = "RCE";
const SSRF: &str = "SSRF";
const SSTI: &str = "SSTI";
const IDOR: &str = "IDOR";
const REDIRECT: &str = "Open Redirect";

/// Query parameter names that tend to reach interesting sinks. Catalog order
/// is the order matched parameters are reported in.
pub fn default_juicy_parameters() -> Vec<Parameter> {
    let table: &[(&str, &[&str])] = &[
        ("api", &[IDOR]),
        ("admin", &["Privilege escalation"]),
        ("debug", &["Debug mode", "Information disclosure"]),
        ("test", &["Debug mode"]),
        ("cmd", &[RCE]),
        ("exec", &[RCE]),
        ("execute", &[RCE]),
        ("command", &[RCE]),
        ("ping", &[RCE]),
        ("query", &[SQLI, RCE]),
        ("code", &[RCE]),
        ("eval", &[RCE]),
        ("func", &[RCE]),
        ("function", &[RCE]),
        ("process", &[RCE]),
        ("file", &[LFI, SSRF]),
        ("filename", &[LFI]),
        ("document", &[LFI]),
        ("folder", &[LFI]),
        ("dir", &[LFI]),
        ("path", &[LFI, SSRF]),
        ("include", &[LFI]),
        ("inc", &[LFI]),
        ("page", &[LFI, XSS]),
        ("pg", &[LFI]),
        ("template", &[LFI, SSTI]),
        ("preview", &[SSTI, XSS]),
        ("view", &[LFI, SSTI]),
        ("load", &[LFI, SSRF]),
        ("download", &[LFI]),
        ("url", &[SSRF, REDIRECT]),
        ("uri", &[SSRF, REDIRECT]),
        ("redirect", &[REDIRECT, SSRF]),
        ("redirect_uri", &[REDIRECT]),
        ("redirect_url", &[REDIRECT]),
        ("return", &[REDIRECT]),
        ("returnto", &[REDIRECT]),
        ("return_to", &[REDIRECT]),
        ("next", &[REDIRECT]),
        ("dest", &[REDIRECT, SSRF]),
        ("destination", &[REDIRECT, SSRF]),
        ("target", &[REDIRECT, SSRF]),
        ("callback", &[XSS, SSRF]),
        ("continue", &[REDIRECT]),
        ("domain", &[SSRF]),
        ("host", &[SSRF]),
        ("site", &[SSRF, REDIRECT]),
        ("feed", &[SSRF]),
        ("window", &[REDIRECT]),
        ("id", &[SQLI, IDOR]),
        ("uid", &[IDOR]),
        ("user", &[SQLI, IDOR]),
        ("user_id", &[SQLI, IDOR]),
        ("account", &[IDOR]),
        ("number", &[SQLI, IDOR]),
        ("order", &[SQLI]),
        ("sort", &[SQLI]),
        ("column", &[SQLI]),
        ("table", &[SQLI]),
        ("select", &[SQLI]),
        ("where", &[SQLI]),
        ("search", &[XSS, SQLI]),
        ("q", &[XSS, SQLI]),
        ("keyword", &[XSS]),
        ("name", &[XSS, SSTI]),
        ("email", &[XSS, SQLI]),
        ("lang", &[LFI, XSS]),
        ("type", &[SQLI]),
        ("role", &["Privilege escalation"]),
        ("token", &["Information disclosure"]),
        ("key", &["Information disclosure"]),
        ("password", &["Information disclosure"]),
        ("pass", &["Information disclosure"]),
        ("secret", &["Information disclosure"]),
        ("jsonp", &[XSS]),
        ("html", &[XSS]),
        ("content", &[XSS, SSTI]),
        ("message", &[XSS]),
        ("msg", &[XSS]),
    ];

    table
        .iter()
        .map(|(parameter, attacks)| Parameter {
            parameter: parameter.to_string(),
            attacks: strs(attacks),
        })
        .collect()
}
