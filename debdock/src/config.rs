use std::path::PathBuf;
use std::str::FromStr;

use debdock_changelog::Architecture;

use crate::error::Result;

/// Architecture of the runners this tool executes on.
pub const HOST_ARCHITECTURE: Architecture = Architecture::Amd64;

/// No signing keys in CI, and build dependencies are installed up front, so
/// the dependency check is skipped too.
pub const DEFAULT_DPKG_BUILDPACKAGE_OPTS: &str = "-us -uc -d";

/// Run configuration, normalized from CLI arguments and the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub workspace_directory: PathBuf,
    pub source_directory: PathBuf,
    pub build_directory: PathBuf,
    pub artifacts_directory: PathBuf,
    pub target_architectures: Vec<Architecture>,
    pub distribution: Option<String>,
    pub docker_image: Option<String>,
    pub dpkg_buildpackage_opts: Vec<String>,
    pub lintian_opts: Vec<String>,
    pub multiarch_packages: Vec<String>,
    pub tarball_transform: bool,
    pub versioned_container: bool,
}

/// Split a whitespace-separated option string into argument vector form.
pub fn split_opts(opts: &str) -> Vec<String> {
    opts.split_whitespace().map(str::to_string).collect()
}

/// Split a comma-separated package list, dropping empty entries.
pub fn split_packages(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|package| !package.is_empty())
        .map(str::to_string)
        .collect()
}

/// Options handed to dpkg-buildpackage, with the post-clean profile applied.
pub fn dpkg_opts(raw: Option<&str>, post_clean: bool) -> Vec<String> {
    let mut opts = split_opts(raw.unwrap_or(DEFAULT_DPKG_BUILDPACKAGE_OPTS));
    if post_clean && !opts.iter().any(|opt| opt == "--post-clean") {
        opts.push("--post-clean".to_string());
    }
    opts
}

/// Parse architecture identifiers, defaulting to the host architecture.
///
/// Values may be repeated flags or comma-separated lists; an unknown
/// identifier fails the run before any external command is issued.
pub fn parse_architectures(values: &[String]) -> Result<Vec<Architecture>> {
    let mut architectures = Vec::new();
    for value in values {
        for token in value.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            architectures.push(Architecture::from_str(token)?);
        }
    }

    if architectures.is_empty() {
        architectures.push(HOST_ARCHITECTURE);
    }
    Ok(architectures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_opts() {
        assert_eq!(split_opts("-us -uc -d"), vec!["-us", "-uc", "-d"]);
        assert!(split_opts("").is_empty());
        assert!(split_opts("   ").is_empty());
    }

    #[test]
    fn test_split_packages() {
        assert_eq!(
            split_packages("libssl-dev, zlib1g-dev"),
            vec!["libssl-dev", "zlib1g-dev"]
        );
        assert!(split_packages("").is_empty());
    }

    #[test]
    fn test_dpkg_opts_profiles() {
        assert_eq!(dpkg_opts(None, false), vec!["-us", "-uc", "-d"]);
        assert_eq!(
            dpkg_opts(None, true),
            vec!["-us", "-uc", "-d", "--post-clean"]
        );
        assert_eq!(dpkg_opts(Some("-b"), false), vec!["-b"]);
        assert_eq!(
            dpkg_opts(Some("-us -uc -d --post-clean"), true),
            vec!["-us", "-uc", "-d", "--post-clean"]
        );
    }

    #[test]
    fn test_parse_architectures_defaults_to_host() {
        let architectures = parse_architectures(&[]).unwrap();
        assert_eq!(architectures, vec![HOST_ARCHITECTURE]);
    }

    #[test]
    fn test_parse_architectures_accepts_comma_lists() {
        let architectures =
            parse_architectures(&["amd64,arm64".to_string(), "armhf".to_string()]).unwrap();
        assert_eq!(architectures.len(), 3);
    }

    #[test]
    fn test_parse_architectures_rejects_unknown() {
        assert!(parse_architectures(&["riscv64".to_string()]).is_err());
    }
}
