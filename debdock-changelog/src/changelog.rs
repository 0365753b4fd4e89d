use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::version::PackageVersion;

/// The newest entry of a `debian/changelog` file.
///
/// Changelog files keep the newest entry first, so the first physical line
/// carries everything a build needs:
/// `<package> (<version>) <distribution>; <metadata>`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChangelogEntry {
    pub source_package: String,
    pub version: PackageVersion,
    pub distribution: String,
}

/// Read only the first line of a file, without loading the rest.
pub fn first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::Empty);
    }
    Ok(line)
}

impl ChangelogEntry {
    /// Parse one changelog entry line.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end();
        if line.trim().is_empty() {
            return Err(Error::Empty);
        }

        let (source_package, rest) = line
            .split_once(" (")
            .ok_or_else(|| Error::MissingVersion(line.to_string()))?;
        if source_package.is_empty() {
            return Err(Error::EmptyPackage(line.to_string()));
        }

        let (version, rest) = rest
            .split_once(')')
            .ok_or_else(|| Error::MissingVersion(line.to_string()))?;
        let version = PackageVersion::parse(version)?;

        let (distribution, _) = rest
            .split_once(';')
            .ok_or_else(|| Error::MissingDistribution(line.to_string()))?;
        let distribution = distribution.trim().to_string();
        if distribution.is_empty() {
            return Err(Error::EmptyDistribution(line.to_string()));
        }

        Ok(Self {
            source_package: source_package.to_string(),
            version,
            distribution,
        })
    }

    /// Parse the newest entry of a changelog file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&first_line(path)?)
    }
}
