//! webtmpl CLI
//!
//! Usage:
//!   webtmpl [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --context <FILE>   JSON file with the template context
//!   -s, --settings <FILE>  Extension settings (TOML format)
//!   --functions            List the registered functions
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use minijinja::Environment;

use webtmpl::{Settings, WebExtensions};

#[derive(Parser)]
#[command(name = "webtmpl")]
#[command(about = "Render MiniJinja templates with web content-management extensions")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// JSON file with the template context
    #[arg(short, long)]
    context: Option<PathBuf>,

    /// Extension settings file (TOML format)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// List the registered functions and exit
    #[arg(long)]
    functions: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.functions {
        print_functions();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load settings
    let settings = match &cli.settings {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    // Load context
    let context = match &cli.context {
        Some(path) => {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading context '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            };
            match serde_json::from_str::<serde_json::Value>(&content) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("Error parsing context '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => serde_json::Value::Null,
    };

    // Read template source
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let extensions = WebExtensions::new(settings);
    let mut env = Environment::new();
    extensions.register(&mut env);

    match env.render_str(&source, context) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"webtmpl - Render MiniJinja templates with web content-management extensions

USAGE:
    webtmpl [OPTIONS] [FILE]
    echo '<template>' | webtmpl

OPTIONS:
    -c, --context    JSON file with the template context
    -s, --settings   Extension settings (TOML file)
    --functions      List the registered functions
    -h, --help       Print help

QUICK START:
    echo '{{{{ register_component("navigation") }}}}' | webtmpl

This registers a component and prints its generated instance id.
Run --functions for the full function reference."#
    );
}

fn print_functions() {
    println!(
        r#"REGISTERED FUNCTIONS
====================

COMPONENTS
----------
register_component(name, options?, prefix?)   Register a component, returns its id
get_components(json_encode?, clear?)          Accumulated components (JSON by default)
get_component_list(json_encode?)              Distinct component names, first-seen order
call_service(name, func, args?)               Record a service call for bootstrapping
get_services(json_encode?, clear?)            Accumulated service calls (JSON by default)
get_service_list(json_encode?)                Distinct service names, first-seen order
set_component_prefix(prefix)                  Prefix for subsequently generated ids

IMAGES
------
get_image(media, attributes?, sources?)       <img> tag, or <picture> with sources
get_lazy_image(media, attributes?, sources?)  Lazy variant with placeholder src/srcset
has_lazy_image()                              True once a lazy image was rendered

Attributes may be a map or a bare format key ('640x480'). Source entries map
a media query to attributes (a bare string means srcset). Format keys resolve
through the media's thumbnails mapping.

INTL
----
intl_countries(display_locale?)               Country code to display name map
intl_country(code, display_locale?)           One country display name
intl_languages(display_locale?)               Language code to display name map
intl_language(code, region?, display_locale?) One language display name
intl_locales(display_locale?)                 Locale tag to display name map
intl_locale(code, display_locale?)            One locale display name

FILTERS
-------
intl_icu_locale                               'en-us' becomes 'en_US'"#
    );
}
