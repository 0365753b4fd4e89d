use crate::arch::Architecture;
use crate::changelog::ChangelogEntry;

/// Replace the `UNRELEASED` placeholder distribution with `unstable`.
///
/// Only the placeholder is rewritten; real codenames pass through untouched.
/// This is not a general codename resolver.
pub fn release_alias(distribution: &str) -> String {
    distribution.replacen("UNRELEASED", "unstable", 1)
}

/// Assemble an image reference from a resolved base-image OS.
///
/// Emulated builds pull from the arch-specific Docker Hub namespace instead
/// of the default library one.
pub fn image_reference(os: &str, distribution: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(namespace) => format!("{}/{}:{}", namespace, os, distribution),
        None => format!("{}:{}", os, distribution),
    }
}

/// Switches selecting between historically divergent behaviors.
#[derive(Clone, Debug, Default)]
pub struct PlanOptions {
    /// Name the container `package_upstreamversion` instead of `package`.
    pub versioned_container: bool,
    /// Suffix the container with the target architecture. Set when one run
    /// builds for several architectures, so the names cannot collide.
    pub arch_suffix: bool,
}

/// Everything a single build needs to know, computed once up front and
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct BuildPlan {
    pub container: String,
    pub build_distribution: String,
    pub image: String,
    pub target: Architecture,
    pub platform: &'static str,
    pub qemu_arch: Option<&'static str>,
    pub needs_tarball: bool,
}

impl BuildPlan {
    pub fn derive(
        entry: &ChangelogEntry,
        target: Architecture,
        host: Architecture,
        build_distribution: String,
        image: String,
        opts: &PlanOptions,
    ) -> Self {
        let emulated = target != host;

        // Container names cannot hold the epoch's colon, so the versioned
        // profile uses the upstream component only.
        let mut container = if opts.versioned_container {
            format!("{}_{}", entry.source_package, entry.version.upstream())
        } else {
            entry.source_package.clone()
        };
        if opts.arch_suffix {
            container = format!("{}_{}", container, target);
        }

        Self {
            container,
            build_distribution,
            image,
            target,
            platform: target.platform(),
            qemu_arch: emulated.then(|| target.qemu_arch()),
            needs_tarball: !entry.version.is_native(),
        }
    }

    pub fn emulated(&self) -> bool {
        self.qemu_arch.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(line: &str) -> ChangelogEntry {
        ChangelogEntry::parse(line).unwrap()
    }

    #[test]
    fn test_release_alias() {
        assert_eq!(release_alias("UNRELEASED"), "unstable");
        assert_eq!(release_alias("bullseye"), "bullseye");
        assert_eq!(release_alias("unstable"), "unstable");
    }

    #[test]
    fn test_image_reference() {
        assert_eq!(image_reference("debian", "unstable", None), "debian:unstable");
        assert_eq!(
            image_reference("debian", "unstable", Some("arm64v8")),
            "arm64v8/debian:unstable"
        );
    }

    #[test]
    fn test_native_plan_on_host() {
        let entry = entry("mypkg (2.3) UNRELEASED; urgency=low");
        let plan = BuildPlan::derive(
            &entry,
            Architecture::Amd64,
            Architecture::Amd64,
            release_alias(&entry.distribution),
            "debian:unstable".to_string(),
            &PlanOptions::default(),
        );

        assert_eq!(plan.container, "mypkg");
        assert_eq!(plan.build_distribution, "unstable");
        assert_eq!(plan.image, "debian:unstable");
        assert!(!plan.emulated());
        assert_eq!(plan.qemu_arch, None);
        assert!(!plan.needs_tarball);
    }

    #[test]
    fn test_emulated_plan_enables_tarball_and_qemu() {
        let entry = entry("mypkg (1:2.3-4) unstable; urgency=low");
        let plan = BuildPlan::derive(
            &entry,
            Architecture::Arm64,
            Architecture::Amd64,
            "unstable".to_string(),
            "arm64v8/debian:unstable".to_string(),
            &PlanOptions::default(),
        );

        assert!(plan.emulated());
        assert_eq!(plan.platform, "linux/arm64/v8");
        assert_eq!(plan.qemu_arch, Some("aarch64"));
        assert!(plan.needs_tarball);
    }

    #[test]
    fn test_container_naming_profiles() {
        let entry = entry("mypkg (1:2.3-4) unstable; urgency=low");
        let opts = PlanOptions {
            versioned_container: true,
            arch_suffix: true,
        };
        let plan = BuildPlan::derive(
            &entry,
            Architecture::Armhf,
            Architecture::Amd64,
            "unstable".to_string(),
            "arm32v7/debian:unstable".to_string(),
            &opts,
        );

        assert_eq!(plan.container, "mypkg_2.3_armhf");
    }
}
