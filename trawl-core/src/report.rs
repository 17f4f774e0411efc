// Report rendering for finished crawls

use crate::results::CrawlResults;
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn generated_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn html_table(title: &str, headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut html = format!("<h2>{} ({})</h2>\n<table>\n<tr>", escape_html(title), rows.len());
    for header in headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr>\n");

    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(&cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

pub fn generate_html_report(results: &CrawlResults, targets: &[String]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>trawl report</title>\n<style>\n");
    html.push_str("body { font-family: monospace; margin: 2em; background: #101418; color: #e0e0e0; }\n");
    html.push_str("h1, h2 { color: #4fc3f7; }\n");
    html.push_str("table { border-collapse: collapse; width: 100%; margin-bottom: 2em; }\n");
    html.push_str("th, td { border: 1px solid #37474f; padding: 4px 8px; text-align: left; word-break: break-all; }\n");
    html.push_str("th { background: #263238; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<h1>trawl report</h1>\n");
    html.push_str(&format!(
        "<p>Generated {} for {}</p>\n",
        generated_at(),
        escape_html(&targets.join(", "))
    ));
    html.push_str(&format!(
        "<p>{} URLs visited, {} findings</p>\n",
        results.visited.len(),
        results.findings_count()
    ));

    html.push_str(&html_table(
        "Secrets",
        &["Name", "Match", "URL"],
        results
            .secrets
            .iter()
            .map(|s| vec![s.secret.name.clone(), s.matched.clone(), s.url.clone()])
            .collect(),
    ));
    html.push_str(&html_table(
        "Juicy endpoints",
        &["Parameters", "Attacks", "URL"],
        results
            .endpoints
            .iter()
            .map(|e| {
                let mut attacks: Vec<&str> = Vec::new();
                for p in &e.parameters {
                    for a in &p.attacks {
                        if !attacks.contains(&a.as_str()) {
                            attacks.push(a);
                        }
                    }
                }
                vec![e.parameter_names().join(", "), attacks.join(", "), e.url.clone()]
            })
            .collect(),
    ));
    html.push_str(&html_table(
        "Interesting files",
        &["Extension", "Severity", "URL"],
        results
            .filetypes
            .iter()
            .map(|f| {
                vec![
                    f.filetype.extension.clone(),
                    f.filetype.severity.to_string(),
                    f.url.clone(),
                ]
            })
            .collect(),
    ));
    html.push_str(&html_table(
        "Errors",
        &["Name", "Match", "URL"],
        results
            .errors
            .iter()
            .map(|e| vec![e.error.name.clone(), e.matched.clone(), e.url.clone()])
            .collect(),
    ));
    html.push_str(&html_table(
        "Useful information",
        &["Name", "Match", "URL"],
        results
            .infos
            .iter()
            .map(|i| vec![i.info.name.clone(), i.matched.clone(), i.url.clone()])
            .collect(),
    ));
    html.push_str(&html_table(
        "Visited URLs",
        &["URL"],
        results.visited.iter().map(|u| vec![u.clone()]).collect(),
    ));

    html.push_str("</body>\n</html>\n");
    html
}

/// Plain text: visited URLs first, then one line per finding.
pub fn generate_text_report(results: &CrawlResults) -> String {
    let mut report = String::new();

    for url in &results.visited {
        report.push_str(url);
        report.push('\n');
    }

    if results.findings_count() == 0 {
        return report;
    }

    report.push('\n');
    for s in &results.secrets {
        report.push_str(&format!("[secret] {} in {} : {}\n", s.secret.name, s.url, s.matched));
    }
    for e in &results.endpoints {
        report.push_str(&format!(
            "[endpoint] {} : {}\n",
            e.url,
            e.parameter_names().join(", ")
        ));
    }
    for f in &results.filetypes {
        report.push_str(&format!(
            "[filetype] {} : {} (severity {})\n",
            f.url, f.filetype.extension, f.filetype.severity
        ));
    }
    for e in &results.errors {
        report.push_str(&format!("[error] {} in {} : {}\n", e.error.name, e.url, e.matched));
    }
    for i in &results.infos {
        report.push_str(&format!("[info] {} in {} : {}\n", i.info.name, i.url, i.matched));
    }

    report
}

fn section(report: &mut String, title: &str, plain: bool) {
    report.push('\n');
    if plain {
        report.push_str(&format!("{}\n", title));
    } else {
        report.push_str(&format!("{}\n{}\n", RULE, title.bold()));
    }
}

/// Findings summary for the terminal. `plain` drops colors and rules.
pub fn generate_console_summary(results: &CrawlResults, plain: bool) -> String {
    let mut report = String::new();
    let tag = |label: &str, color: &str| -> String {
        if plain {
            format!("[{}]", label)
        } else {
            format!("[{}]", label).color(color).bold().to_string()
        }
    };

    if !results.secrets.is_empty() {
        section(&mut report, "Secrets", plain);
        for s in &results.secrets {
            report.push_str(&format!(
                "{} {} in {}\n    {}\n",
                tag("secret", "red"),
                s.secret.name,
                s.url,
                s.matched
            ));
        }
    }

    if !results.endpoints.is_empty() {
        section(&mut report, "Juicy endpoints", plain);
        for e in &results.endpoints {
            report.push_str(&format!(
                "{} {} ({})\n",
                tag("endpoint", "yellow"),
                e.url,
                e.parameter_names().join(", ")
            ));
        }
    }

    if !results.filetypes.is_empty() {
        section(&mut report, "Interesting files", plain);
        for f in &results.filetypes {
            report.push_str(&format!(
                "{} {} ({}, severity {})\n",
                tag("file", "magenta"),
                f.url,
                f.filetype.extension,
                f.filetype.severity
            ));
        }
    }

    if !results.errors.is_empty() {
        section(&mut report, "Errors", plain);
        for e in &results.errors {
            report.push_str(&format!(
                "{} {} in {}\n    {}\n",
                tag("error", "red"),
                e.error.name,
                e.url,
                e.matched
            ));
        }
    }

    if !results.infos.is_empty() {
        section(&mut report, "Useful information", plain);
        for i in &results.infos {
            report.push_str(&format!(
                "{} {} in {}\n    {}\n",
                tag("info", "cyan"),
                i.info.name,
                i.url,
                i.matched
            ));
        }
    }

    report.push('\n');
    report.push_str(&format!(
        "{} URLs visited, {} findings\n",
        results.visited.len(),
        results.findings_count()
    ));
    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
