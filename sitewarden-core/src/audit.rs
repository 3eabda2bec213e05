// Cross-page issue detection over a completed crawl

use crate::summary::{duplicate_description_groups, duplicate_title_groups, DuplicateGroup};
use serde::{Deserialize, Serialize};
use sitewarden_crawler::{CrawlPage, FetchFailure};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Error,
    Warning,
    Info,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Error => "error",
            IssueType::Warning => "warning",
            IssueType::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Seo,
    Technical,
    Content,
    Performance,
    Accessibility,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Seo => "seo",
            IssueCategory::Technical => "technical",
            IssueCategory::Content => "content",
            IssueCategory::Performance => "performance",
            IssueCategory::Accessibility => "accessibility",
        }
    }
}

/// One crawl-level finding. `page` holds the affected URL, or a
/// comma-joined list for findings that span several pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlIssue {
    pub issue_type: IssueType,
    pub category: IssueCategory,
    pub page: String,
    pub issue: String,
    pub description: String,
    pub recommendation: String,
    pub severity: Severity,
}

/// Scan the completed page set for issues: fetch failures, the per-page
/// flags recorded during analysis, and cross-page duplicates.
pub fn collect_issues(pages: &[CrawlPage], failures: &[FetchFailure]) -> Vec<CrawlIssue> {
    let mut issues = Vec::new();

    for failure in failures {
        issues.push(CrawlIssue {
            issue_type: IssueType::Error,
            category: IssueCategory::Technical,
            page: failure.url.clone(),
            issue: "Page could not be fetched".to_string(),
            description: format!("Fetching {} failed: {}", failure.url, failure.error),
            recommendation:
                "Check that the URL is reachable and the server responds within the timeout."
                    .to_string(),
            severity: Severity::High,
        });
    }

    for page in pages {
        for flag in &page.issues {
            issues.push(page_issue(page, flag));
        }
    }

    for group in duplicate_title_groups(pages) {
        issues.push(duplicate_issue(&group, "title", "Write a unique title for every page."));
    }
    for group in duplicate_description_groups(pages) {
        issues.push(duplicate_issue(
            &group,
            "meta description",
            "Write a unique meta description for every page.",
        ));
    }

    issues
}

fn page_issue(page: &CrawlPage, flag: &str) -> CrawlIssue {
    let (issue_type, category, severity, recommendation) = classify_flag(flag);
    CrawlIssue {
        issue_type,
        category,
        page: page.url.clone(),
        issue: flag.to_string(),
        description: format!("{} on {}", flag, page.url),
        recommendation: recommendation.to_string(),
        severity,
    }
}

fn classify_flag(flag: &str) -> (IssueType, IssueCategory, Severity, &'static str) {
    if flag == "Missing title tag" {
        (
            IssueType::Error,
            IssueCategory::Seo,
            Severity::High,
            "Add a unique, descriptive <title> element to the page.",
        )
    } else if flag == "Missing H1 tag" {
        (
            IssueType::Error,
            IssueCategory::Seo,
            Severity::High,
            "Add one H1 heading describing the page's main topic.",
        )
    } else if flag == "Missing meta description" {
        (
            IssueType::Warning,
            IssueCategory::Seo,
            Severity::Medium,
            "Add a meta description of up to 160 characters summarizing the page.",
        )
    } else if flag.starts_with("Title too long") {
        (
            IssueType::Warning,
            IssueCategory::Seo,
            Severity::Medium,
            "Keep titles at 60 characters or fewer so search results do not truncate them.",
        )
    } else if flag.starts_with("Meta description too long") {
        (
            IssueType::Warning,
            IssueCategory::Content,
            Severity::Medium,
            "Trim the meta description to 160 characters or fewer.",
        )
    } else if flag.starts_with("Non-200 status code") {
        (
            IssueType::Warning,
            IssueCategory::Technical,
            Severity::Low,
            "Fix or redirect pages that do not return HTTP 200.",
        )
    } else if flag.ends_with("missing alt text") {
        (
            IssueType::Info,
            IssueCategory::Accessibility,
            Severity::Low,
            "Add alt text to every content image.",
        )
    } else {
        (
            IssueType::Info,
            IssueCategory::Content,
            Severity::Low,
            "Structure longer content with subheadings.",
        )
    }
}

fn duplicate_issue(group: &DuplicateGroup, what: &str, recommendation: &str) -> CrawlIssue {
    CrawlIssue {
        issue_type: IssueType::Warning,
        category: IssueCategory::Seo,
        page: group.pages.join(", "),
        issue: format!("Duplicate {what}"),
        description: format!(
            "{} pages share the {} \"{}\": {}",
            group.pages.len(),
            what,
            group.value,
            group.pages.join(", ")
        ),
        recommendation: recommendation.to_string(),
        severity: Severity::Medium,
    }
}
