use std::path::Path;

use debdock_changelog::{Architecture, BuildPlan, ChangelogEntry};
use tracing::info;

use crate::config::{Config, HOST_ARCHITECTURE};
use crate::docker;
use crate::error::Result;
use crate::runner;

/// Executes the build pipeline for one derived plan.
///
/// Steps run strictly in sequence; the first failing external command aborts
/// the run. The container is left behind for the environment to dispose of.
pub struct Builder<'a> {
    config: &'a Config,
    entry: &'a ChangelogEntry,
    plan: BuildPlan,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a Config, entry: &'a ChangelogEntry, plan: BuildPlan) -> Self {
        Builder {
            config,
            entry,
            plan,
        }
    }

    pub fn build(&self) -> Result<()> {
        self.print_details();

        if self.plan.emulated() {
            self.setup_emulation()?;
        }
        self.create_container()?;
        self.start_container()?;

        if self.plan.needs_tarball {
            self.create_tarball()?;
        }
        self.update_package_lists()?;
        self.install_development_packages()?;
        self.install_build_dependencies()?;
        self.build_package()?;
        self.run_lintian()?;
        self.move_artifacts()?;

        Ok(())
    }

    fn print_details(&self) {
        info!("Host: build details");
        info!("  package: {}", self.entry.source_package);
        info!("  version: {}", self.entry.version);
        info!("  distribution: {}", self.plan.build_distribution);
        info!("  architecture: {} ({})", self.plan.target, self.plan.platform);
        info!("  container: {}", self.plan.container);
        info!("  image: {}", self.plan.image);
        info!("  workspace: {}", self.config.workspace_directory.display());
        info!("  source: {}", self.config.source_directory.display());
        info!("  build: {}", self.config.build_directory.display());
        info!("  artifacts: {}", self.config.artifacts_directory.display());
    }

    fn setup_emulation(&self) -> Result<()> {
        info!("Host: start architecture emulation");
        runner::run("docker", &docker::binfmt_args())
    }

    fn create_container(&self) -> Result<()> {
        info!("Host: create container");
        let args = docker::create_args(
            &self.plan,
            &self.config.workspace_directory,
            &self.config.source_directory,
        );
        runner::run("docker", &args)
    }

    fn start_container(&self) -> Result<()> {
        info!("Host: start container");
        runner::run(
            "docker",
            &["start".to_string(), self.plan.container.clone()],
        )
    }

    fn exec(&self, command: Vec<String>) -> Result<()> {
        runner::run("docker", &docker::exec_args(&self.plan.container, &command))
    }

    fn create_tarball(&self) -> Result<()> {
        info!("Container: create upstream tarball");
        self.exec(tar_command(
            self.entry,
            &self.config.build_directory,
            &self.config.source_directory,
            self.config.tarball_transform,
        ))
    }

    fn update_package_lists(&self) -> Result<()> {
        info!("Container: update package lists");
        self.exec(vec!["apt-get".to_string(), "update".to_string()])
    }

    fn install_development_packages(&self) -> Result<()> {
        info!("Container: install development packages");
        self.exec(install_command(
            &self.plan,
            &self.config.multiarch_packages,
            HOST_ARCHITECTURE,
        ))
    }

    fn install_build_dependencies(&self) -> Result<()> {
        info!("Container: install build dependencies");
        self.exec(vec![
            "apt-get".to_string(),
            "build-dep".to_string(),
            "-y".to_string(),
            self.config.source_directory.display().to_string(),
        ])
    }

    fn build_package(&self) -> Result<()> {
        info!("Container: build package");
        let mut command = vec!["dpkg-buildpackage".to_string()];
        command.extend(self.config.dpkg_buildpackage_opts.iter().cloned());
        self.exec(command)
    }

    fn run_lintian(&self) -> Result<()> {
        info!("Container: run static analysis");
        self.exec(lintian_command(
            &self.config.build_directory,
            self.plan.target,
            &self.config.lintian_opts,
        ))
    }

    fn move_artifacts(&self) -> Result<()> {
        info!("Container: move artifacts");
        self.exec(move_command(
            &self.config.build_directory,
            self.entry.version.upstream(),
            &self.config.artifacts_directory,
        ))
    }
}

/// Tar invocation producing the `.orig` upstream tarball next to the source
/// tree, excluding the packaging itself.
fn tar_command(
    entry: &ChangelogEntry,
    build_dir: &Path,
    source_dir: &Path,
    transform: bool,
) -> Vec<String> {
    let mut command = vec![
        "tar".to_string(),
        "--exclude-vcs".to_string(),
        "--exclude".to_string(),
        "./debian".to_string(),
    ];
    if transform {
        command.push(format!(
            "--transform=s,^\\./,{}-{}/,",
            entry.source_package,
            entry.version.upstream()
        ));
    }
    command.extend([
        "-cvzf".to_string(),
        format!(
            "{}/{}_{}.orig.tar.gz",
            build_dir.display(),
            entry.source_package,
            entry.version.upstream()
        ),
        "-C".to_string(),
        source_dir.display().to_string(),
        "./".to_string(),
    ]);
    command
}

/// Packaging toolchain install, pinned to the build distribution. Foreign
/// targets also get the configured multiarch extras as `name:arch`.
fn install_command(
    plan: &BuildPlan,
    multiarch_packages: &[String],
    host: Architecture,
) -> Vec<String> {
    let mut command = vec![
        "apt-get".to_string(),
        "install".to_string(),
        "-t".to_string(),
        plan.build_distribution.clone(),
        "--no-install-recommends".to_string(),
        "-y".to_string(),
        "dpkg-dev".to_string(),
        "debhelper".to_string(),
        "lintian".to_string(),
    ];
    if plan.target != host {
        for package in multiarch_packages {
            command.push(format!("{}:{}", package, plan.target));
        }
    }
    command
}

/// Lintian over every `.changes` file the build produced for the target.
fn lintian_command(build_dir: &Path, target: Architecture, lintian_opts: &[String]) -> Vec<String> {
    let mut command = vec![
        "find".to_string(),
        build_dir.display().to_string(),
        "-maxdepth".to_string(),
        "1".to_string(),
        "-name".to_string(),
        format!("*{}.changes", target),
        "-type".to_string(),
        "f".to_string(),
        "-print".to_string(),
        "-exec".to_string(),
        "lintian".to_string(),
    ];
    command.extend(lintian_opts.iter().cloned());
    command.extend(["{}".to_string(), "+".to_string()]);
    command
}

/// Collect everything carrying the upstream version into the artifacts
/// directory.
fn move_command(build_dir: &Path, upstream: &str, artifacts_dir: &Path) -> Vec<String> {
    vec![
        "find".to_string(),
        build_dir.display().to_string(),
        "-maxdepth".to_string(),
        "1".to_string(),
        "-name".to_string(),
        format!("*{}*.*", upstream),
        "-type".to_string(),
        "f".to_string(),
        "-print".to_string(),
        "-exec".to_string(),
        "mv".to_string(),
        "{}".to_string(),
        artifacts_dir.display().to_string(),
        ";".to_string(),
    ]
}
