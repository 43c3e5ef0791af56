//! Shared constants for test infrastructure

use selfup_update::platform::{Arch, Os, Platform};

// Repository identity
pub const OWNER: &str = "acme";
pub const REPO: &str = "tool";
pub const BINARY_NAME: &str = "tool";

// Versions
pub const VERSION_1_9_0: &str = "1.9.0";
pub const VERSION_2_0_0: &str = "2.0.0";
pub const TAG_V1_9_0: &str = "v1.9.0";
pub const TAG_V2_0_0: &str = "v2.0.0";

// Asset names
pub const ASSET_LINUX_X86_64: &str = "tool_Linux_x86_64.tar.gz";
pub const ASSET_DARWIN_ARM64: &str = "tool_Darwin_arm64.tar.gz";
pub const CHECKSUMS_NAME: &str = "checksums.txt";

// Asset ids
pub const ARCHIVE_ID: u64 = 101;
pub const OTHER_ARCHIVE_ID: u64 = 102;
pub const CHECKSUMS_ID: u64 = 201;
pub const EXTRA_CHECKSUMS_ID: u64 = 202;

// Binary content
pub const OLD_BINARY_CONTENT: &[u8] = b"old tool binary";
pub const NEW_BINARY_CONTENT: &[u8] = b"new tool binary v2.0.0";

/// Platform used by pipeline tests regardless of the host
pub fn test_platform() -> Platform {
    Platform::new(Os::Linux, Arch::X86_64)
}
