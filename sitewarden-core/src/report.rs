// Report generation from a completed crawl

use crate::audit::Severity;
use crate::crawl::CrawlReport;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

struct SeverityCounts {
    high: usize,
    medium: usize,
    low: usize,
}

fn count_severities(report: &CrawlReport) -> SeverityCounts {
    let mut counts = SeverityCounts {
        high: 0,
        medium: 0,
        low: 0,
    };
    for issue in &report.issues {
        match issue.severity {
            Severity::High => counts.high += 1,
            Severity::Medium => counts.medium += 1,
            Severity::Low => counts.low += 1,
        }
    }
    counts
}

pub fn generate_text_report(report: &CrawlReport) -> String {
    let mut out = String::new();
    let rule = "━".repeat(78);

    out.push_str(&rule);
    out.push_str("\n                        SITEWARDEN CRAWL REPORT\n");
    out.push_str(&rule);
    out.push_str("\n\n");

    out.push_str(&format!("Crawl ID:     {}\n", report.crawl_id));
    out.push_str(&format!("Start URL:    {}\n", report.start_url));
    out.push_str(&format!(
        "Started:      {}\n",
        report.stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Duration:     {:.1} seconds\n",
        report.stats.duration_ms as f64 / 1000.0
    ));
    out.push_str(&format!("Pages:        {}\n", report.summary.total_pages));
    out.push_str(&format!(
        "Avg response: {} ms\n",
        report.summary.avg_response_time_ms
    ));
    out.push('\n');

    // Severity breakdown
    out.push_str(&rule);
    out.push_str("\nISSUE SUMMARY\n");
    out.push_str(&rule);
    out.push_str("\n\n");

    let counts = count_severities(report);
    out.push_str(&format!("Total issues: {}\n\n", report.issues.len()));
    if counts.high > 0 {
        out.push_str(&format!("  [HIGH]   {}  (Fix first)\n", counts.high));
    }
    if counts.medium > 0 {
        out.push_str(&format!("  [MEDIUM] {}  (Should be addressed)\n", counts.medium));
    }
    if counts.low > 0 {
        out.push_str(&format!("  [LOW]    {}  (Minor issues)\n", counts.low));
    }
    out.push('\n');

    if !report.summary.slowest_pages.is_empty() {
        out.push_str("Slowest pages:\n");
        for timing in &report.summary.slowest_pages {
            out.push_str(&format!("  {:>6} ms  {}\n", timing.response_time_ms, timing.url));
        }
        out.push('\n');
    }

    if !report.summary.largest_pages.is_empty() {
        out.push_str("Largest pages:\n");
        for weight in &report.summary.largest_pages {
            out.push_str(&format!("  {:>8} B  {}\n", weight.content_length, weight.url));
        }
        out.push('\n');
    }

    if !report.issues.is_empty() {
        out.push_str(&rule);
        out.push_str("\nDETAILED ISSUES\n");
        out.push_str(&rule);
        out.push_str("\n\n");

        for (idx, issue) in report.issues.iter().enumerate() {
            out.push_str(&format!("[{}] {}\n", idx + 1, issue.issue));
            out.push_str(&format!(
                "Severity:     {}\n",
                issue.severity.as_str().to_uppercase()
            ));
            out.push_str(&format!("Category:     {}\n", issue.category.as_str()));
            out.push_str(&format!("Page:         {}\n", issue.page));
            out.push_str(&format!("\n  {}\n", issue.description));
            out.push_str(&format!("  Recommendation: {}\n\n", issue.recommendation));
        }
    }

    out.push_str(&rule);
    out.push_str("\n                              End of Report\n");
    out.push_str(&rule);
    out.push_str("\n\nGenerated by Sitewarden - website crawler & SEO auditor\n");

    out
}

pub fn generate_json_report(report: &CrawlReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Sitewarden",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "crawl": report
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("# Sitewarden crawl report\n\n");
    out.push_str(&format!("- **Start URL**: {}\n", report.start_url));
    out.push_str(&format!("- **Crawl ID**: {}\n", report.crawl_id));
    out.push_str(&format!(
        "- **Started**: {}\n",
        report.stats.started_at.to_rfc3339()
    ));
    out.push_str(&format!("- **Pages crawled**: {}\n", report.summary.total_pages));
    out.push_str(&format!(
        "- **Average response time**: {} ms\n\n",
        report.summary.avg_response_time_ms
    ));

    let counts = count_severities(report);
    out.push_str("## Issues\n\n");
    out.push_str(&format!(
        "{} total — {} high, {} medium, {} low\n\n",
        report.issues.len(),
        counts.high,
        counts.medium,
        counts.low
    ));
    for issue in &report.issues {
        out.push_str(&format!(
            "- **{}** ({}/{}): {} — {}\n",
            issue.issue,
            issue.severity.as_str(),
            issue.category.as_str(),
            issue.page,
            issue.recommendation
        ));
    }
    out.push('\n');

    if !report.summary.duplicate_titles.is_empty() {
        out.push_str("## Duplicate titles\n\n");
        for group in &report.summary.duplicate_titles {
            out.push_str(&format!(
                "- \"{}\" on {}\n",
                group.value,
                group.pages.join(", ")
            ));
        }
        out.push('\n');
    }

    if !report.summary.slowest_pages.is_empty() {
        out.push_str("## Slowest pages\n\n");
        out.push_str("| Response time | URL |\n|---:|---|\n");
        for timing in &report.summary.slowest_pages {
            out.push_str(&format!("| {} ms | {} |\n", timing.response_time_ms, timing.url));
        }
        out.push('\n');
    }

    out
}

/// Parse a saved crawl back out of either the JSON report envelope or a
/// bare serialized `CrawlReport`.
pub fn load_saved_crawl(content: &str) -> Result<CrawlReport, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if let Some(crawl) = value.get("report").and_then(|r| r.get("crawl")) {
        serde_json::from_value(crawl.clone())
    } else {
        serde_json::from_value(value)
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
