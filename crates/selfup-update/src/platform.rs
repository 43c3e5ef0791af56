//! Platform labels for release archives
//!
//! Release archives are named `{binary}_{OS}_{Arch}.tar.gz` using the
//! labels below, independent of how the host toolchain spells them.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, UpdateError};

/// Operating systems with published archives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Darwin,
    Linux,
    Windows,
}

impl Os {
    pub fn label(&self) -> &'static str {
        match self {
            Os::Darwin => "Darwin",
            Os::Linux => "Linux",
            Os::Windows => "Windows",
        }
    }
}

impl FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "darwin" | "macos" => Ok(Os::Darwin),
            "linux" => Ok(Os::Linux),
            "windows" => Ok(Os::Windows),
            other => Err(format!("unknown operating system: {}", other)),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// CPU architectures with published archives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    I386,
    Arm64,
    Arm,
}

impl Arch {
    pub fn label(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::I386 => "i386",
            Arch::Arm64 => "arm64",
            Arch::Arm => "arm",
        }
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "amd64" | "x86_64" => Ok(Arch::X86_64),
            "386" | "x86" | "i386" | "i686" => Ok(Arch::I386),
            "arm64" | "aarch64" => Ok(Arch::Arm64),
            "arm" => Ok(Arch::Arm),
            other => Err(format!("unknown architecture: {}", other)),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An OS/architecture pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Platform of the running process
    pub fn current() -> Result<Self> {
        Self::from_names(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Resolve a platform from toolchain names such as `linux`/`aarch64`
    pub fn from_names(os: &str, arch: &str) -> Result<Self> {
        match (os.parse::<Os>(), arch.parse::<Arch>()) {
            (Ok(os), Ok(arch)) => Ok(Self { os, arch }),
            _ => Err(UpdateError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }

    /// Archive label, e.g. `Linux_x86_64`
    pub fn label(&self) -> String {
        format!("{}_{}", self.os.label(), self.arch.label())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}
