// Tests for crawl scope decisions

use trawl_core::scope::{Admission, Target};
use trawl_core::url::UrlError;

// ============================================================================
// Normal Mode Tests
// ============================================================================

#[test]
fn test_normal_mode_exact_host_only() {
    let target = Target::resolve("http://example.com", false, vec![]).unwrap();
    assert_eq!(target.admits("http://example.com/a"), Admission::Admitted);
    assert_eq!(target.admits("https://example.com/b"), Admission::Admitted);
    assert_eq!(target.admits("http://sub.example.com/"), Admission::OutOfScope);
    assert_eq!(target.admits("http://example.org/"), Admission::OutOfScope);
}

#[test]
fn test_seed_path_does_not_narrow_scope() {
    let target = Target::resolve("example.com/app/", false, vec![]).unwrap();
    assert_eq!(target.admits("http://example.com/other"), Admission::Admitted);
    assert_eq!(target.root_url(), "http://example.com/app/");
    assert_eq!(
        target.well_known_urls(),
        vec![
            "http://example.com/app/robots.txt",
            "http://example.com/app/sitemap.xml"
        ]
    );
}

#[test]
fn test_ignore_list_wins_over_scope() {
    let target = Target::resolve("example.com", false, vec!["/logout".to_string()]).unwrap();
    assert_eq!(target.admits("http://example.com/logout?x=1"), Admission::Ignored);
}

#[test]
fn test_admission_is_idempotent() {
    let target = Target::resolve("example.com", true, vec![]).unwrap();
    let url = "http://api.example.com/v1";
    assert_eq!(target.admits(url), target.admits(url));
}

// ============================================================================
// Intensive Mode Tests
// ============================================================================

#[test]
fn test_intensive_mode_admits_subdomains() {
    let target = Target::resolve("https://www.example.com", true, vec![]).unwrap();
    assert_eq!(target.admits("http://sub.example.com/x"), Admission::Admitted);
    assert_eq!(target.admits("http://example.com/"), Admission::Admitted);
    assert_eq!(target.admits("http://example.co.uk/"), Admission::OutOfScope);
}

#[test]
fn test_intensive_mode_unresolvable_link() {
    let target = Target::resolve("example.com", true, vec![]).unwrap();
    assert!(matches!(
        target.admits("http:///nohost"),
        Admission::Unresolvable(UrlError::Malformed(_))
    ));
}

#[test]
fn test_intensive_mode_fails_on_bare_suffix() {
    assert!(Target::resolve("co.uk", true, vec![]).is_err());
    assert!(Target::resolve("co.uk", false, vec![]).is_ok());
}
