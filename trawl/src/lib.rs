// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

pub use handlers::{
    build_crawl_options, handle_crawl, load_list_file, load_urls_from_file,
    load_urls_from_source, parse_header_line, parse_url_line, split_ignore_list,
};
