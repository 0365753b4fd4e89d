use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::error::{Error, Result};

/// A Debian package version of the form `[epoch:]upstream[-revision]`.
///
/// The epoch is everything before the first colon and must be numeric. The
/// revision is everything after the last hyphen of what remains. A version
/// without a revision denotes a native package, which ships no separate
/// upstream tarball.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PackageVersion {
    epoch: Option<u32>,
    upstream: String,
    revision: Option<String>,
}

impl PackageVersion {
    pub fn parse(s: &str) -> Result<Self> {
        let (epoch, remainder) = match s.split_once(':') {
            Some((epoch, remainder)) => (Some(epoch), remainder),
            None => (None, s),
        };

        let epoch = match epoch {
            Some(raw) => {
                if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::EpochNonNumeric(s.to_string()));
                }
                Some(
                    raw.parse::<u32>()
                        .map_err(|_| Error::EpochNonNumeric(s.to_string()))?,
                )
            }
            None => None,
        };

        let (upstream, revision) = match remainder.rfind('-') {
            Some(pos) => (&remainder[..pos], Some(&remainder[pos + 1..])),
            None => (remainder, None),
        };

        if upstream.is_empty() {
            return Err(Error::EmptyUpstreamVersion(s.to_string()));
        }
        if upstream.contains(':') {
            return Err(Error::UpstreamIllegalChar(s.to_string()));
        }

        let revision = match revision {
            Some("") => return Err(Error::EmptyRevision(s.to_string())),
            Some(revision) => Some(revision.to_string()),
            None => None,
        };

        Ok(Self {
            epoch,
            upstream: upstream.to_string(),
            revision,
        })
    }

    pub fn epoch(&self) -> Option<u32> {
        self.epoch
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// A native package has no revision and no separate upstream tarball.
    pub fn is_native(&self) -> bool {
        self.revision.is_none()
    }
}

impl Display for PackageVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(epoch) = self.epoch {
            write!(f, "{}:", epoch)?;
        }
        write!(f, "{}", self.upstream)?;
        if let Some(ref revision) = self.revision {
            write!(f, "-{}", revision)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version() {
        let version = PackageVersion::parse("1:2.3-4").unwrap();
        assert_eq!(version.epoch(), Some(1));
        assert_eq!(version.upstream(), "2.3");
        assert_eq!(version.revision(), Some("4"));
        assert!(!version.is_native());
        assert_eq!(version.to_string(), "1:2.3-4");
    }

    #[test]
    fn test_native_version() {
        let version = PackageVersion::parse("2.3").unwrap();
        assert_eq!(version.epoch(), None);
        assert_eq!(version.upstream(), "2.3");
        assert!(version.is_native());
        assert_eq!(version.to_string(), "2.3");
    }

    #[test]
    fn test_revision_splits_on_last_hyphen() {
        let version = PackageVersion::parse("1.0-2-3").unwrap();
        assert_eq!(version.upstream(), "1.0-2");
        assert_eq!(version.revision(), Some("3"));
    }

    #[test]
    fn test_non_numeric_epoch() {
        assert!(matches!(
            PackageVersion::parse("a:1.0"),
            Err(Error::EpochNonNumeric(_))
        ));
    }

    #[test]
    fn test_empty_components() {
        assert!(matches!(
            PackageVersion::parse("-1"),
            Err(Error::EmptyUpstreamVersion(_))
        ));
        assert!(matches!(
            PackageVersion::parse("1.0-"),
            Err(Error::EmptyRevision(_))
        ));
    }

    #[test]
    fn test_stray_colon_in_upstream() {
        assert!(matches!(
            PackageVersion::parse("1:2:3"),
            Err(Error::UpstreamIllegalChar(_))
        ));
    }
}
