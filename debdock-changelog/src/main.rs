//! debdock-changelog CLI
//!
//! Parses the newest `debian/changelog` entry and prints the fields a build
//! derives from it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use debdock_changelog::{release_alias, ChangelogEntry};

#[derive(Parser)]
#[command(name = "debdock-changelog")]
#[command(about = "Inspect the newest entry of a Debian changelog", long_about = None)]
#[command(version)]
struct Cli {
    /// Changelog file, or a source directory containing debian/changelog
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Print the parsed entry as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let path = if cli.path.is_dir() {
        cli.path.join("debian/changelog")
    } else {
        cli.path.clone()
    };

    let entry = match ChangelogEntry::from_path(&path) {
        Ok(entry) => entry,
        Err(err) => {
            eprintln!("{}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entry).expect("entry serializes")
        );
    } else {
        println!("package: {}", entry.source_package);
        if let Some(epoch) = entry.version.epoch() {
            println!("epoch: {}", epoch);
        }
        println!("upstream-version: {}", entry.version.upstream());
        if let Some(revision) = entry.version.revision() {
            println!("debian-revision: {}", revision);
        }
        println!("distribution: {}", entry.distribution);
        println!("build-distribution: {}", release_alias(&entry.distribution));
        println!("native: {}", entry.version.is_native());
    }

    ExitCode::SUCCESS
}
