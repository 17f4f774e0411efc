pub mod crawl;
pub mod data;
pub mod report;
pub mod results;
pub mod scan;
pub mod scope;
pub mod signatures;
pub mod url;

use colored::Colorize;

pub use crawl::{CrawlError, CrawlOptions, CrawlState, StopSignal, execute_crawl};
pub use results::CrawlResults;
pub use scan::{ScanOptions, Scanner};
pub use scope::Target;

pub fn print_banner() {
    let banner = r#"
  _                    _
 | |_ _ __ __ ___      _| |
 | __| '__/ _` \ \ /\ / / |
 | |_| | | (_| |\ V  V /| |
  \__|_|  \__,_| \_/\_/ |_|"#;

    eprintln!("{} v{}", banner.cyan(), env!("CARGO_PKG_VERSION"));
    eprintln!(" > passive secrets and endpoint hunting while crawling");
    eprintln!(" > for authorized security testing only");
    eprintln!("========================================");
}
