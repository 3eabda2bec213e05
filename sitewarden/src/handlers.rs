use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitewarden_core::crawl::{crawl_website, CrawlReport, CrawlSettings};
use sitewarden_core::report::{
    generate_json_report, generate_markdown_report, generate_text_report, load_saved_crawl,
    save_report, ReportFormat,
};
use sitewarden_crawler::{CrawlProgress, ProgressCallback, DEFAULT_USER_AGENT};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Parse a URL argument, trying an http:// prefix when the scheme is
/// missing so `sitewarden crawl -u example.com` just works.
pub fn parse_url_arg(raw: &str) -> Option<String> {
    if Url::parse(raw).is_ok() {
        return Some(raw.to_string());
    }

    let with_scheme = format!("http://{raw}");
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    None
}

/// Tilde-expand a user-supplied output path.
pub fn resolve_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn settings_from_matches(matches: &ArgMatches) -> CrawlSettings {
    CrawlSettings {
        max_pages: *matches.get_one::<usize>("max-pages").unwrap_or(&50),
        max_depth: *matches.get_one::<usize>("max-depth").unwrap_or(&3),
        delay_ms: *matches.get_one::<u64>("delay").unwrap_or(&1000),
        respect_robots: !matches.get_flag("ignore-robots"),
        follow_external_links: matches.get_flag("follow-external"),
        user_agent: matches
            .get_one::<String>("user-agent")
            .cloned()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    }
}

fn render_report(report: &CrawlReport, format: &ReportFormat) -> anyhow::Result<String> {
    Ok(match format {
        ReportFormat::Text => generate_text_report(report),
        ReportFormat::Markdown => generate_markdown_report(report),
        ReportFormat::Json => generate_json_report(report).context("serializing report to JSON")?,
    })
}

/// Load a saved crawl JSON and render it in the requested format.
pub fn render_saved_report(path: &Path, format: &ReportFormat) -> anyhow::Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let report = load_saved_crawl(&content)
        .with_context(|| format!("{} is not a saved crawl", path.display()))?;
    render_report(&report, format)
}

fn deliver(content: &str, output: Option<&String>) {
    match output {
        Some(raw) => {
            let path = resolve_output_path(raw);
            if let Err(e) = save_report(content, &path) {
                eprintln!("✗ Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{content}"),
    }
}

fn requested_format(matches: &ArgMatches) -> ReportFormat {
    matches
        .get_one::<String>("format")
        .and_then(|value| ReportFormat::from_str(value))
        .unwrap_or(ReportFormat::Text)
}

pub async fn handle_crawl(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let raw_url = sub_matches.get_one::<String>("url").expect("url is required");
    let Some(start_url) = parse_url_arg(raw_url) else {
        eprintln!("✗ Invalid URL '{raw_url}'");
        std::process::exit(1);
    };

    let settings = settings_from_matches(sub_matches);
    let format = requested_format(sub_matches);
    let output = sub_matches.get_one::<String>("output").cloned();

    println!("{} Crawling {}", "→".blue(), start_url.bright_white());
    println!(
        "Max pages: {}  Max depth: {}  Delay: {} ms",
        settings.max_pages, settings.max_depth, settings.delay_ms
    );
    println!(
        "Robots.txt: {}\n",
        if settings.respect_robots {
            "respected"
        } else {
            "ignored"
        }
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Starting crawl...");

    let pb = spinner.clone();
    let progress: ProgressCallback = Arc::new(move |progress: CrawlProgress| {
        pb.set_message(format!(
            "[{}/{}] {}",
            progress.current, progress.total_estimate, progress.current_url
        ));
        pb.tick();
    });

    match crawl_website(&start_url, settings, Some(progress)).await {
        Ok(report) => {
            spinner.finish_with_message(format!(
                "Crawled {} page(s), {} issue(s) found",
                report.summary.total_pages,
                report.issues.len()
            ));
            println!();

            match render_report(&report, &format) {
                Ok(rendered) => deliver(&rendered, output.as_ref()),
                Err(e) => {
                    eprintln!("✗ Failed to render report: {e:#}");
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("✗ Crawl failed: {e}");
            std::process::exit(1);
        }
    }
}

pub fn handle_report(sub_matches: &ArgMatches) {
    let input = sub_matches
        .get_one::<String>("input")
        .expect("input is required");
    let format = requested_format(sub_matches);
    let output = sub_matches.get_one::<String>("output").cloned();

    let path = resolve_output_path(input);
    match render_saved_report(&path, &format) {
        Ok(rendered) => deliver(&rendered, output.as_ref()),
        Err(e) => {
            eprintln!("✗ {e:#}");
            std::process::exit(1);
        }
    }
}
