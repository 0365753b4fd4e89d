use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// CPU architectures a build can target.
///
/// Identifiers follow dpkg architecture names, not Docker platform names.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Amd64,
    Arm64,
    Armhf,
    I386,
    Mips64el,
    Ppc64el,
    S390x,
}

impl Architecture {
    pub const ALL: [Architecture; 7] = [
        Architecture::Amd64,
        Architecture::Arm64,
        Architecture::Armhf,
        Architecture::I386,
        Architecture::Mips64el,
        Architecture::Ppc64el,
        Architecture::S390x,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
            Architecture::Armhf => "armhf",
            Architecture::I386 => "i386",
            Architecture::Mips64el => "mips64el",
            Architecture::Ppc64el => "ppc64el",
            Architecture::S390x => "s390x",
        }
    }

    /// Platform string passed to `docker create --platform`.
    pub fn platform(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "linux/amd64",
            Architecture::Arm64 => "linux/arm64/v8",
            Architecture::Armhf => "linux/arm/v7",
            Architecture::I386 => "linux/386",
            Architecture::Mips64el => "linux/mips64le",
            Architecture::Ppc64el => "linux/ppc64le",
            Architecture::S390x => "linux/s390x",
        }
    }

    /// QEMU user-mode architecture name, for the static binary bind-mounted
    /// into emulated containers.
    pub fn qemu_arch(&self) -> &'static str {
        match self {
            Architecture::Armhf => "arm",
            _ => "aarch64",
        }
    }

    /// Docker Hub namespace publishing arch-specific official images.
    pub fn hub_namespace(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64v8",
            Architecture::Armhf => "arm32v7",
            Architecture::I386 => "i386",
            Architecture::Mips64el => "mips64le",
            Architecture::Ppc64el => "ppc64le",
            Architecture::S390x => "s390x",
        }
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "amd64" => Ok(Architecture::Amd64),
            "arm64" => Ok(Architecture::Arm64),
            "armhf" => Ok(Architecture::Armhf),
            "i386" => Ok(Architecture::I386),
            "mips64el" => Ok(Architecture::Mips64el),
            "ppc64el" => Ok(Architecture::Ppc64el),
            "s390x" => Ok(Architecture::S390x),
            other => Err(Error::UnsupportedArchitecture(other.to_string())),
        }
    }
}

impl Display for Architecture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_every_identifier() {
        for arch in Architecture::ALL {
            assert_eq!(arch.as_str().parse::<Architecture>().unwrap(), arch);
        }
    }

    #[test]
    fn test_platform_table() {
        assert_eq!(Architecture::Amd64.platform(), "linux/amd64");
        assert_eq!(Architecture::Arm64.platform(), "linux/arm64/v8");
        assert_eq!(Architecture::Armhf.platform(), "linux/arm/v7");
        assert_eq!(Architecture::I386.platform(), "linux/386");
        assert_eq!(Architecture::Mips64el.platform(), "linux/mips64le");
        assert_eq!(Architecture::Ppc64el.platform(), "linux/ppc64le");
        assert_eq!(Architecture::S390x.platform(), "linux/s390x");
    }

    #[test]
    fn test_unknown_architecture_is_rejected() {
        assert!(matches!(
            "riscv64".parse::<Architecture>(),
            Err(Error::UnsupportedArchitecture(_))
        ));
    }

    #[test]
    fn test_qemu_arch() {
        assert_eq!(Architecture::Armhf.qemu_arch(), "arm");
        assert_eq!(Architecture::Arm64.qemu_arch(), "aarch64");
    }
}
