use crate::CLAP_STYLING;
use clap::{ArgAction, arg, command};
use std::path::PathBuf;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("trawl")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("trawl")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress the banner").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl a host or collection of hosts and hunt every response for secrets, \
                juicy endpoints, interesting files, errors and useful information.",
                )
                // Input
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("The URL to crawl")
                        .conflicts_with("hosts-file"),
                )
                .arg(
                    arg!(-H --"hosts-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of URLs to crawl")
                        .value_parser(clap::value_parser!(PathBuf))
                        .conflicts_with("url"),
                )
                // Crawl policy
                .arg(
                    arg!(-i --"intensive")
                        .required(false)
                        .help("Follow every subdomain of the target's registrable domain")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(-c --"concurrency" <NUM>)
                        .required(false)
                        .help("Maximum number of concurrent requests")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("20"),
                )
                .arg(
                    arg!(-d --"delay" <SECONDS>)
                        .required(false)
                        .help("Delay between requests to the same host")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("0"),
                )
                .arg(
                    arg!(-t --"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"cache")
                        .required(false)
                        .help("Cache responses in .trawl_cache/ and reuse them on later runs")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"proxy" <URL>)
                        .required(false)
                        .help("Send every request through this proxy")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"insecure")
                        .required(false)
                        .help("Skip TLS certificate verification")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"random-agent")
                        .required(false)
                        .help("Use a different browser User-Agent for every request")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"user-agent" <AGENT>)
                        .required(false)
                        .help("Use exactly this User-Agent (wins over --random-agent)"),
                )
                // Filtering
                .arg(
                    arg!(--"ignore" <WORDS>)
                        .required(false)
                        .help("Comma-separated substrings; matching URLs are never visited")
                        .conflicts_with("ignore-file"),
                )
                .arg(
                    arg!(--"ignore-file" <PATH>)
                        .required(false)
                        .help("File with one ignore substring per line")
                        .value_parser(clap::value_parser!(PathBuf))
                        .conflicts_with("ignore"),
                )
                // Scanning
                .arg(
                    arg!(-s --"secrets")
                        .required(false)
                        .help("Hunt for secrets in response bodies")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"secrets-file" <PATH>)
                        .required(false)
                        .help("Replace the secret catalog with one regex per line")
                        .value_parser(clap::value_parser!(PathBuf))
                        .requires("secrets"),
                )
                .arg(
                    arg!(-e --"endpoints")
                        .required(false)
                        .help("Hunt for juicy parameters in URLs")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"endpoints-file" <PATH>)
                        .required(false)
                        .help("Replace the parameter catalog with one name per line")
                        .value_parser(clap::value_parser!(PathBuf))
                        .requires("endpoints"),
                )
                .arg(
                    arg!(--"ext" <LEVEL>)
                        .required(false)
                        .help("Hunt for interesting file extensions up to this level (1 = most juicy, 7 = least)")
                        .value_parser(clap::value_parser!(u8).range(1..=7)),
                )
                .arg(
                    arg!(--"extensions-file" <PATH>)
                        .required(false)
                        .help("Replace the extension catalog; lines are `ext` or `ext:level`")
                        .value_parser(clap::value_parser!(PathBuf))
                        .requires("ext"),
                )
                .arg(
                    arg!(--"err")
                        .required(false)
                        .help("Hunt for error messages in response bodies")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"errors-file" <PATH>)
                        .required(false)
                        .help("Replace the error catalog with one regex per line")
                        .value_parser(clap::value_parser!(PathBuf))
                        .requires("err"),
                )
                .arg(
                    arg!(--"info")
                        .required(false)
                        .help("Hunt for useful information in response bodies")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"info-file" <PATH>)
                        .required(false)
                        .help("Replace the information catalog with one regex per line")
                        .value_parser(clap::value_parser!(PathBuf))
                        .requires("info"),
                )
                // Headers
                .arg(
                    arg!(--"header" <HEADER>)
                        .required(false)
                        .help("Extra request header as \"Name: value\" (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    arg!(--"headers-file" <PATH>)
                        .required(false)
                        .help("File with one \"Name: value\" header per line")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                // Output
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Print one JSON object per response to stdout")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"output-html" <PATH>)
                        .required(false)
                        .help("Write an HTML report to this file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"output-txt" <PATH>)
                        .required(false)
                        .help("Write a plain-text report to this file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"plain")
                        .required(false)
                        .help("No banner, colors or spinner")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("json"),
                )
                .arg(
                    arg!(--"debug")
                        .required(false)
                        .help("Log fetch errors and engine decisions to stderr")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from(["trawl", "crawl", "-u", "example.com"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "crawl");
        assert_eq!(sub.get_one::<String>("url").unwrap(), "example.com");
        assert_eq!(*sub.get_one::<usize>("concurrency").unwrap(), 20);
        assert_eq!(*sub.get_one::<u64>("timeout").unwrap(), 10);
        assert!(!sub.get_flag("intensive"));
        assert!(sub.get_one::<u8>("ext").is_none());
    }

    #[test]
    fn test_url_conflicts_with_hosts_file() {
        let result = command_argument_builder().try_get_matches_from([
            "trawl", "crawl", "-u", "example.com", "-H", "hosts.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ext_level_out_of_range() {
        let result = command_argument_builder()
            .try_get_matches_from(["trawl", "crawl", "-u", "example.com", "--ext", "8"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_override_file_requires_its_hunt() {
        let result = command_argument_builder().try_get_matches_from([
            "trawl",
            "crawl",
            "-u",
            "example.com",
            "--secrets-file",
            "s.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_repeated_headers() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "trawl",
                "crawl",
                "-u",
                "example.com",
                "--header",
                "X-One: 1",
                "--header",
                "X-Two: 2",
            ])
            .unwrap();
        let sub = matches.subcommand_matches("crawl").unwrap();
        let headers: Vec<&String> = sub.get_many::<String>("header").unwrap().collect();
        assert_eq!(headers, vec!["X-One: 1", "X-Two: 2"]);
    }
}
