//! Command-line interface for docbundle
//! Inspect, check and render saved documents.
//!
//! Usage:
//!   docbundle info `<path>` [--json]                   - Title, authors and item counts
//!   docbundle toc `<path>` [--json]                    - Numbered table of contents
//!   docbundle validate `<path>` [--strict]             - Report unreadable records and dangling references
//!   docbundle render `<path>` [--style `<name>`] [-o `<out>`] - Render typst markup
//!   docbundle bibtex `<path>`                          - Export the bibliography
//!   docbundle list [`<dir>`]                           - Documents in a directory, newest first
//!   docbundle styles                                 - List available styles

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::fmt::Display;
use std::fs;

use docbundle::bundle::config::{Loader, Settings};
use docbundle::bundle::persistence::{load_path, LoadOptions, Loaded};
use docbundle::bundle::render::render_document;
use docbundle::bundle::styles::StyleRegistry;
use docbundle::bundle::{library, LoadError};

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the document")
        .required(true)
        .index(1)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print JSON instead of text")
        .action(ArgAction::SetTrue)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("docbundle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and rendering saved documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("info")
                .about("Show title, authors and item counts")
                .arg(path_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("toc")
                .about("Show the numbered table of contents")
                .arg(path_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Report unreadable records and dangling references")
                .arg(path_arg())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail on the first unreadable record")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render the document as typst markup")
                .arg(path_arg())
                .arg(
                    Arg::new("style")
                        .long("style")
                        .short('s')
                        .help("Style to render with (default: the document's own style)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the markup here instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("bibtex")
                .about("Export the bibliography as BibTeX")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List documents in a directory, newest first")
                .arg(
                    Arg::new("dir")
                        .help("Directory to list")
                        .default_value(".")
                        .index(1),
                ),
        )
        .subcommand(Command::new("styles").about("List available styles"))
        .get_matches();

    let settings = load_settings(&matches);

    match matches.subcommand() {
        Some(("info", sub)) => handle_info_command(&settings, sub),
        Some(("toc", sub)) => handle_toc_command(&settings, sub),
        Some(("validate", sub)) => handle_validate_command(&settings, sub),
        Some(("render", sub)) => handle_render_command(&settings, sub),
        Some(("bibtex", sub)) => handle_bibtex_command(&settings, sub),
        Some(("list", sub)) => handle_list_command(&settings, sub),
        Some(("styles", _)) => handle_styles_command(),
        _ => unreachable!(),
    }
}

fn fail(context: &str, error: impl Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}

fn load_settings(matches: &ArgMatches) -> Settings {
    let loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader
        .build()
        .unwrap_or_else(|e| fail("Error reading configuration", e))
}

fn load(path: &str, options: &LoadOptions) -> Loaded {
    load_path(path, options).unwrap_or_else(|e| fail("Error loading document", e))
}

fn print_json<T: Serialize>(value: &T) {
    let text =
        serde_json::to_string_pretty(value).unwrap_or_else(|e| fail("Error formatting JSON", e));
    println!("{}", text);
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_else(|| fail("Missing argument", name))
}

/// Handle the info command
fn handle_info_command(settings: &Settings, matches: &ArgMatches) {
    let loaded = load(required(matches, "path"), &settings.load_options());
    let summary = loaded.document.summary();
    if matches.get_flag("json") {
        print_json(&summary);
        return;
    }
    println!("Title:      {}", summary.title);
    if !summary.authors.is_empty() {
        println!("Authors:    {}", summary.authors.join(", "));
    }
    if let Some(style) = loaded.document.style() {
        println!("Style:      {}", style);
    }
    println!("Sections:   {}", summary.sections);
    println!("Equations:  {}", summary.equations);
    println!("Figures:    {}", summary.figures);
    println!("Tables:     {}", summary.tables);
    println!("Theorems:   {}", summary.theorems);
    println!("Algorithms: {}", summary.algorithms);
    println!("Citations:  {}", summary.citations);
    println!("Abstract:   {} words", summary.abstract_words);
    if !loaded.skipped.is_empty() {
        println!("Skipped:    {} records", loaded.skipped.len());
    }
}

/// Handle the toc command
fn handle_toc_command(settings: &Settings, matches: &ArgMatches) {
    let loaded = load(required(matches, "path"), &settings.load_options());
    let toc = loaded.document.toc();
    if matches.get_flag("json") {
        print_json(&toc);
        return;
    }
    for entry in toc {
        let indent = "  ".repeat(entry.path.depth().saturating_sub(1));
        println!("{}{} {}", indent, entry.number, entry.title);
    }
}

/// Handle the validate command
fn handle_validate_command(settings: &Settings, matches: &ArgMatches) {
    let mut options = settings.load_options();
    options.strict |= matches.get_flag("strict");

    let path = required(matches, "path");
    let loaded = match load_path(path, &options) {
        Ok(loaded) => loaded,
        Err(LoadError::SkippedRecords(skipped)) => {
            for record in &skipped {
                eprintln!("unreadable: {}", record);
            }
            std::process::exit(1);
        }
        Err(e) => fail("Error loading document", e),
    };

    for record in &loaded.skipped {
        println!("skipped: {}", record);
    }
    let report = loaded.document.validate();
    for dangling in &report.dangling {
        println!("dangling: {}", dangling);
    }
    if report.is_valid() {
        println!("{}: ok", path);
    } else {
        std::process::exit(1);
    }
}

/// Handle the render command
fn handle_render_command(settings: &Settings, matches: &ArgMatches) {
    let loaded = load(required(matches, "path"), &settings.load_options());
    let registry = StyleRegistry::with_defaults();
    let name = matches
        .get_one::<String>("style")
        .map(String::as_str)
        .or_else(|| loaded.document.style())
        .unwrap_or(&settings.render.default_style);
    let style = registry
        .get(name)
        .unwrap_or_else(|e| fail("Error selecting style", e));

    let markup = render_document(&loaded.document, style);
    match matches.get_one::<String>("output") {
        Some(out) => {
            fs::write(out, markup).unwrap_or_else(|e| fail("Error writing output", e));
            log::info!("wrote {}", out);
        }
        None => print!("{}", markup),
    }
}

/// Handle the bibtex command
fn handle_bibtex_command(settings: &Settings, matches: &ArgMatches) {
    let loaded = load(required(matches, "path"), &settings.load_options());
    let bibtex = loaded.document.export_bibtex();
    if !bibtex.is_empty() {
        println!("{}", bibtex);
    }
}

/// Handle the list command
fn handle_list_command(settings: &Settings, matches: &ArgMatches) {
    let dir = required(matches, "dir");
    let entries = library::list_documents(dir, &settings.persistence.extension)
        .unwrap_or_else(|e| fail("Error listing documents", e));
    for entry in entries {
        println!("{}  {}", entry.file_name, entry.title);
    }
}

/// Handle the styles command
fn handle_styles_command() {
    let registry = StyleRegistry::with_defaults();
    println!("Available styles:\n");
    for name in registry.list_styles() {
        if let Ok(style) = registry.get(&name) {
            println!("  {}", style.name);
            println!("    {}", style.description);
            println!();
        }
    }
}
