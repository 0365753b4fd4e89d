//! debdock CLI
//!
//! Builds Debian packages inside Docker containers, optionally emulating a
//! foreign target architecture. Every option can also be supplied through
//! the `INPUT_*` environment variables CI runners export.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use clap::Parser;
use colored::Colorize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use debdock::builder::Builder;
use debdock::config::{self, Config, HOST_ARCHITECTURE};
use debdock::error::{Error, Result};
use debdock_changelog::{image_reference, release_alias, BuildPlan, ChangelogEntry, PlanOptions};
use debdock_hub::{resolve_image_os, DockerHubClient, ImageOs};

static CHECK_MARK: LazyLock<colored::ColoredString> = LazyLock::new(|| "✔".bright_green().bold());
static CROSS_MARK: LazyLock<colored::ColoredString> = LazyLock::new(|| "〤".bright_red().bold());

#[derive(Parser)]
#[command(name = "debdock")]
#[command(about = "Build Debian packages inside Docker containers", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the package source (with debian/changelog)
    #[arg(long, env = "INPUT_SOURCE_DIRECTORY")]
    source_directory: Option<PathBuf>,

    /// Directory receiving the built artifacts
    #[arg(long, env = "INPUT_ARTIFACTS_DIRECTORY")]
    artifacts_directory: Option<PathBuf>,

    /// Target architectures (repeatable, comma-separated accepted)
    #[arg(long = "arch", env = "INPUT_TARGET_ARCHITECTURES", value_delimiter = ',')]
    architectures: Vec<String>,

    /// Build for this distribution instead of the changelog's
    #[arg(long, env = "INPUT_DISTRIBUTION")]
    distribution: Option<String>,

    /// Use this image instead of resolving one from Docker Hub
    #[arg(long, env = "INPUT_DOCKER_IMAGE")]
    docker_image: Option<String>,

    /// Options passed to dpkg-buildpackage
    #[arg(long, env = "INPUT_DPKG_BUILDPACKAGE_OPTS")]
    dpkg_buildpackage_opts: Option<String>,

    /// Options passed to lintian
    #[arg(long, env = "INPUT_LINTIAN_OPTS")]
    lintian_opts: Option<String>,

    /// Comma-separated packages installed as name:arch for foreign targets
    #[arg(long, env = "INPUT_ADDITIONAL_TARGET_ARCH_MULTIARCH_PACKAGES")]
    multiarch_packages: Option<String>,

    /// Append --post-clean to the dpkg-buildpackage options
    #[arg(long, env = "INPUT_POST_CLEAN")]
    post_clean: bool,

    /// Rewrite tarball member paths to package-version/
    #[arg(long, env = "INPUT_TARBALL_TRANSFORM")]
    tarball_transform: bool,

    /// Name the container package_version instead of package
    #[arg(long, env = "INPUT_VERSIONED_CONTAINER")]
    versioned_container: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Where the container image comes from: a fixed override, or the first of
/// debian/ubuntu that publishes the distribution tag.
enum ImageSource {
    Fixed(String),
    Resolved(ImageOs),
}

fn load_config(cli: &Cli) -> Result<Config> {
    let workspace_directory = env::current_dir()?;
    let source_directory = cli
        .source_directory
        .clone()
        .unwrap_or_else(|| workspace_directory.clone());
    let artifacts_directory = cli
        .artifacts_directory
        .clone()
        .unwrap_or_else(|| workspace_directory.clone());
    let build_directory = source_directory
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| source_directory.clone());

    Ok(Config {
        workspace_directory,
        source_directory,
        build_directory,
        artifacts_directory,
        target_architectures: config::parse_architectures(&cli.architectures)?,
        distribution: cli.distribution.clone(),
        docker_image: cli.docker_image.clone(),
        dpkg_buildpackage_opts: config::dpkg_opts(
            cli.dpkg_buildpackage_opts.as_deref(),
            cli.post_clean,
        ),
        lintian_opts: config::split_opts(cli.lintian_opts.as_deref().unwrap_or_default()),
        multiarch_packages: config::split_packages(
            cli.multiarch_packages.as_deref().unwrap_or_default(),
        ),
        tarball_transform: cli.tarball_transform,
        versioned_container: cli.versioned_container,
    })
}

async fn run(cli: Cli) -> Result<()> {
    if which::which("docker").is_err() {
        return Err(Error::DockerNotFound);
    }

    let config = load_config(&cli)?;
    fs::create_dir_all(&config.artifacts_directory)?;

    let changelog = config.source_directory.join("debian/changelog");
    let entry = ChangelogEntry::from_path(&changelog)?;

    let build_distribution = match &config.distribution {
        Some(distribution) => distribution.clone(),
        None => release_alias(&entry.distribution),
    };

    let image_source = match &config.docker_image {
        Some(image) => ImageSource::Fixed(image.clone()),
        None => {
            let hub = DockerHubClient::new();
            ImageSource::Resolved(resolve_image_os(&hub, &build_distribution).await?)
        }
    };

    let arch_suffix = config.target_architectures.len() > 1;
    for &target in &config.target_architectures {
        let emulated = target != HOST_ARCHITECTURE;
        let image = match &image_source {
            ImageSource::Fixed(image) => image.clone(),
            ImageSource::Resolved(os) => image_reference(
                os.as_str(),
                &build_distribution,
                emulated.then(|| target.hub_namespace()),
            ),
        };

        let plan = BuildPlan::derive(
            &entry,
            target,
            HOST_ARCHITECTURE,
            build_distribution.clone(),
            image,
            &PlanOptions {
                versioned_container: config.versioned_container,
                arch_suffix,
            },
        );

        Builder::new(&config, &entry, plan).build()?;
        info!("built {} {} for {}", entry.source_package, entry.version, target);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    println!("debdock v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(cli).await {
        eprintln!("[{}] {}", &*CROSS_MARK, err);
        std::process::exit(1);
    }

    println!("[{}] all builds finished", &*CHECK_MARK);
}
