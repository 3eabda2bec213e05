pub mod audit;
pub mod crawl;
pub mod report;
pub mod summary;

pub use audit::{collect_issues, CrawlIssue, IssueCategory, IssueType, Severity};
pub use crawl::{crawl_website, CrawlReport, CrawlSettings, CrawlStats};
pub use summary::{build_summary, CrawlSummary};

pub fn print_banner() {
    println!(
        r#"
     _ _                           _
 ___(_) |_ _____ __ ____ _ _ _ __| |___ _ _
(_-<| |  _/ -_) V  V / _` | '_/ _` / -_) ' \
/__/|_|\__\___|\_/\_/\__,_|_| \__,_\___|_||_|
"#
    );
    println!(
        "sitewarden v{} - website crawler & SEO auditor\n",
        env!("CARGO_PKG_VERSION")
    );
}
