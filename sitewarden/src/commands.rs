use clap::{arg, command};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitewarden")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitewarden")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl a website breadth-first and audit every page for SEO, content and \
                technical issues.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The URL to start crawling from"),
                )
                .arg(
                    arg!(--"max-pages" <N>)
                        .required(false)
                        .help("Stop after this many pages")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("50"),
                )
                .arg(
                    arg!(--"max-depth" <N>)
                        .required(false)
                        .help("Do not follow links more than N hops from the start URL")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(--"delay" <MILLISECONDS>)
                        .required(false)
                        .help("Politeness delay between successive fetches")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1000"),
                )
                .arg(
                    arg!(--"ignore-robots")
                        .required(false)
                        .help("Also crawl paths disallowed by robots.txt")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"follow-external")
                        .required(false)
                        .help("Follow links that leave the start host (default: same host only)")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"user-agent" <UA>)
                        .required(false)
                        .help("User-agent header sent with every request"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save the report to a file (default: print to screen)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, markdown")
                        .value_parser(["text", "json", "markdown"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("report")
                .about("Re-render a crawl previously saved with --format json.")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(true)
                        .help("Path to the saved crawl JSON"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, markdown")
                        .value_parser(["text", "markdown"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save the rendered report to a file (default: print to screen)"),
                ),
        )
}
