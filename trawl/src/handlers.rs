use anyhow::{Context, bail};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, debug, warn};
use trawl_core::crawl::{CrawlRequestCallback, ResponseEvent, ResponseEventCallback};
use trawl_core::report::{
    generate_console_summary, generate_html_report, generate_text_report, save_report,
};
use trawl_core::signatures::CatalogSource;
use trawl_core::{CrawlOptions, CrawlResults, ScanOptions, StopSignal, execute_crawl};
use trawl_scanner::UserAgent;
use url::Url;

// Helper functions for the crawl handler

/// Load targets from either a hosts file or a single URL argument
pub fn load_urls_from_source(
    url: Option<&String>,
    hosts_file: Option<&PathBuf>,
) -> anyhow::Result<Vec<String>> {
    if let Some(hosts_file_path) = hosts_file {
        load_urls_from_file(hosts_file_path)
    } else if let Some(url) = url {
        match parse_url_line(url.trim()) {
            Some(url) => Ok(vec![url]),
            None => bail!("The URL provided is not built in a proper way: {}", url),
        }
    } else {
        bail!("Either --url or --hosts-file must be provided")
    }
}

/// Load and parse targets from a file
pub fn load_urls_from_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let urls: Vec<String> = load_list_file(path)?
        .iter()
        .filter_map(|line| parse_url_line(line))
        .collect();

    if urls.is_empty() {
        bail!("No valid URLs found in {}", path.display());
    }

    Ok(urls)
}

/// Parse a single line as a URL, adding http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if line.contains("://") {
        if Url::parse(line).is_ok() {
            return Some(line.to_string());
        }
    } else {
        let with_scheme = format!("http://{}", line);
        if Url::parse(&with_scheme).is_ok() {
            return Some(with_scheme);
        }
    }

    eprintln!("⚠️  Skipping invalid URL '{}'", line);
    None
}

/// Non-empty trimmed lines of a file. `~` is expanded.
pub fn load_list_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let content = fs::read_to_string(&expanded)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Parse `Name: value`. The value may itself contain colons.
pub fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// Comma-separated `--ignore` value into its non-empty entries.
pub fn split_ignore_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn catalog_source(path: Option<&PathBuf>) -> anyhow::Result<CatalogSource> {
    match path {
        Some(path) => Ok(CatalogSource::from_lines(load_list_file(path)?)),
        None => Ok(CatalogSource::Default),
    }
}

fn collect_headers(sub_matches: &ArgMatches) -> anyhow::Result<Vec<(String, String)>> {
    let mut lines: Vec<String> = sub_matches
        .get_many::<String>("header")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if let Some(path) = sub_matches.get_one::<PathBuf>("headers-file") {
        lines.extend(load_list_file(path)?);
    }

    let mut headers = Vec::with_capacity(lines.len());
    for line in lines {
        match parse_header_line(&line) {
            Some(header) => headers.push(header),
            None => bail!("Invalid header '{}', expected \"Name: value\"", line),
        }
    }
    Ok(headers)
}

/// Everything but the target, shared by every target of the run
pub fn build_crawl_options(sub_matches: &ArgMatches) -> anyhow::Result<CrawlOptions> {
    let ignore = if let Some(path) = sub_matches.get_one::<PathBuf>("ignore-file") {
        load_list_file(path)?
    } else {
        sub_matches
            .get_one::<String>("ignore")
            .map(|value| split_ignore_list(value))
            .unwrap_or_default()
    };

    let user_agent = if let Some(agent) = sub_matches.get_one::<String>("user-agent") {
        UserAgent::Custom(agent.clone())
    } else if sub_matches.get_flag("random-agent") {
        UserAgent::Rotating
    } else {
        UserAgent::Fixed
    };

    let scan = ScanOptions {
        secrets: sub_matches.get_flag("secrets"),
        endpoints: sub_matches.get_flag("endpoints"),
        file_type: sub_matches.get_one::<u8>("ext").copied(),
        errors: sub_matches.get_flag("err"),
        info: sub_matches.get_flag("info"),
        secrets_source: catalog_source(sub_matches.get_one::<PathBuf>("secrets-file"))?,
        endpoints_source: catalog_source(sub_matches.get_one::<PathBuf>("endpoints-file"))?,
        extensions_source: catalog_source(sub_matches.get_one::<PathBuf>("extensions-file"))?,
        errors_source: catalog_source(sub_matches.get_one::<PathBuf>("errors-file"))?,
        info_source: catalog_source(sub_matches.get_one::<PathBuf>("info-file"))?,
    };

    Ok(CrawlOptions {
        intensive: sub_matches.get_flag("intensive"),
        ignore,
        concurrency: *sub_matches.get_one::<usize>("concurrency").unwrap_or(&20),
        delay: Duration::from_secs(*sub_matches.get_one::<u64>("delay").unwrap_or(&0)),
        timeout: Duration::from_secs(*sub_matches.get_one::<u64>("timeout").unwrap_or(&10)),
        cache: sub_matches.get_flag("cache"),
        proxy: sub_matches.get_one::<Url>("proxy").map(|u| u.to_string()),
        insecure: sub_matches.get_flag("insecure"),
        user_agent,
        headers: collect_headers(sub_matches)?,
        scan,
        ..Default::default()
    })
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn fail(spinner: Option<&ProgressBar>, message: impl std::fmt::Display) -> ! {
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    eprintln!("✗ {}", message);
    std::process::exit(1);
}

fn crawl_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn request_echo(json: bool, spinner: Option<ProgressBar>) -> Option<CrawlRequestCallback> {
    if json {
        return None;
    }
    Some(Arc::new(move |url: &str| match &spinner {
        Some(pb) => {
            pb.set_message(url.to_string());
            pb.println(url);
        }
        None => println!("{}", url),
    }))
}

fn json_lines(json: bool) -> Option<ResponseEventCallback> {
    if !json {
        return None;
    }
    Some(Arc::new(|event: ResponseEvent| {
        match serde_json::to_string(&event) {
            Ok(line) => {
                let mut stdout = io::stdout().lock();
                let _ = writeln!(stdout, "{}", line);
            }
            Err(e) => warn!("Could not serialize response for {}: {}", event.url, e),
        }
    }))
}

fn write_reports(sub_matches: &ArgMatches, results: &CrawlResults, targets: &[String]) {
    if let Some(path) = sub_matches.get_one::<PathBuf>("output-html") {
        match save_report(&generate_html_report(results, targets), path) {
            Ok(()) => debug!("HTML report written to {}", path.display()),
            Err(e) => eprintln!("✗ Failed to write {}: {}", path.display(), e),
        }
    }
    if let Some(path) = sub_matches.get_one::<PathBuf>("output-txt") {
        match save_report(&generate_text_report(results), path) {
            Ok(()) => debug!("Text report written to {}", path.display()),
            Err(e) => eprintln!("✗ Failed to write {}: {}", path.display(), e),
        }
    }
}

pub async fn handle_crawl(sub_matches: &ArgMatches) {
    let json = sub_matches.get_flag("json");
    let plain = sub_matches.get_flag("plain");
    init_tracing(sub_matches.get_flag("debug"));

    if plain {
        colored::control::set_override(false);
    }

    let targets = match load_urls_from_source(
        sub_matches.get_one::<String>("url"),
        sub_matches.get_one::<PathBuf>("hosts-file"),
    ) {
        Ok(targets) => targets,
        Err(e) => fail(None, format!("{:#}", e)),
    };
    let options = match build_crawl_options(sub_matches) {
        Ok(options) => options,
        Err(e) => fail(None, format!("{:#}", e)),
    };

    let stop = StopSignal::new();
    let listener = stop.listen_for_interrupts(!json && !plain);

    let spinner = (!json && !plain).then(crawl_spinner);
    let request_callback = request_echo(json, spinner.clone());
    let response_callback = json_lines(json);

    let mut results = CrawlResults::default();
    for target in &targets {
        if !stop.is_running() {
            break;
        }
        debug!("Crawling {}", target);

        let run = CrawlOptions {
            target: target.clone(),
            ..options.clone()
        };
        match execute_crawl(
            run,
            stop.clone(),
            request_callback.clone(),
            response_callback.clone(),
        )
        .await
        {
            Ok(target_results) => results.extend(target_results),
            Err(e) => fail(spinner.as_ref(), e),
        }
    }
    listener.abort();

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    write_reports(sub_matches, &results, &targets);

    if !json {
        print!("{}", generate_console_summary(&results, plain));
    }
}
