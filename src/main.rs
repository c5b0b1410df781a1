use std::path::PathBuf;

use clap::{ArgAction, Parser};

use contact_book::cli::{self, Settings};
use contact_book::migrate;

/// Contact Book - keep names and phone numbers in a plain-text file
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Contact file loaded at startup and written by "Save and Exit"
    #[arg(short, long, default_value = "contacts.txt")]
    file: PathBuf,

    /// Contacts shown per page when searching or listing
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,

    /// Import contacts from a JSON export into the contact file, then exit
    #[arg(long, value_name = "JSON_PATH", conflicts_with = "export")]
    import: Option<PathBuf>,

    /// Export the contact file as JSON, then exit
    #[arg(long, value_name = "JSON_PATH")]
    export: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Some(json_path) = args.import {
        println!("Importing from {}...", json_path.display());
        match migrate::import_into_file(&json_path, &args.file) {
            Ok(stats) => {
                println!("Import complete!");
                println!("  Contacts: {}", stats.contacts);
                println!("  Phone numbers: {}", stats.phone_numbers);
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(json_path) = args.export {
        match migrate::export_file(&args.file, &json_path) {
            Ok(stats) => {
                println!("Exported {} contact(s) to {}", stats.contacts, json_path.display());
            }
            Err(e) => {
                eprintln!("Export failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let settings = Settings {
        file: args.file,
        page_size: args.page_size as usize,
    };
    cli::run(&settings);
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
