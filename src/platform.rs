//! Platform detection and the target-triple lookup table.
//!
//! Release binaries are published for a fixed set of platform/architecture
//! pairs; everything else is an unsupported platform.

use anyhow::{Result, anyhow};

/// Target triples the release pipeline publishes binaries for, keyed by
/// (target_os, target_arch).
const TARGET_TRIPLES: &[(&str, &str, &str)] = &[
    ("linux", "x86_64", "x86_64-unknown-linux-musl"),
    ("linux", "aarch64", "aarch64-unknown-linux-musl"),
    ("macos", "x86_64", "x86_64-apple-darwin"),
    ("macos", "aarch64", "aarch64-apple-darwin"),
    ("windows", "x86_64", "x86_64-pc-windows-msvc"),
];

/// The operating system and architecture this process runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Detect the current platform.
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            arch: Self::detect_arch(),
        }
    }

    fn detect_os() -> String {
        #[cfg(target_os = "macos")]
        {
            "macos".to_string()
        }
        #[cfg(target_os = "linux")]
        {
            "linux".to_string()
        }
        #[cfg(target_os = "windows")]
        {
            "windows".to_string()
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            std::env::consts::OS.to_string()
        }
    }

    fn detect_arch() -> String {
        #[cfg(target_arch = "x86_64")]
        {
            "x86_64".to_string()
        }
        #[cfg(target_arch = "aarch64")]
        {
            "aarch64".to_string()
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            std::env::consts::ARCH.to_string()
        }
    }

    /// Canonical target triple for this platform, if release binaries are
    /// published for it.
    pub fn target_triple(&self) -> Result<&'static str> {
        TARGET_TRIPLES
            .iter()
            .find(|(os, arch, _)| *os == self.os && *arch == self.arch)
            .map(|(_, _, triple)| *triple)
            .ok_or_else(|| {
                let supported: Vec<String> = TARGET_TRIPLES
                    .iter()
                    .map(|(os, arch, _)| format!("{}/{}", os, arch))
                    .collect();
                anyhow!(
                    "Unsupported platform/arch: {}/{} (supported: {})",
                    self.os,
                    self.arch,
                    supported.join(", ")
                )
            })
    }

    /// Suffix of executable files on this platform.
    pub fn exe_suffix(&self) -> &'static str {
        if self.os == "windows" { ".exe" } else { "" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(os: &str, arch: &str) -> Platform {
        Platform {
            os: os.to_string(),
            arch: arch.to_string(),
        }
    }

    #[test]
    fn test_platform_detect() {
        let platform = Platform::detect();

        assert!(!platform.os.is_empty());
        assert!(!platform.arch.is_empty());

        #[cfg(target_os = "macos")]
        assert_eq!(platform.os, "macos");

        #[cfg(target_os = "linux")]
        assert_eq!(platform.os, "linux");

        #[cfg(target_os = "windows")]
        assert_eq!(platform.os, "windows");

        #[cfg(target_arch = "x86_64")]
        assert_eq!(platform.arch, "x86_64");

        #[cfg(target_arch = "aarch64")]
        assert_eq!(platform.arch, "aarch64");
    }

    #[test]
    fn test_target_triple_table() {
        let cases = [
            ("linux", "x86_64", "x86_64-unknown-linux-musl"),
            ("linux", "aarch64", "aarch64-unknown-linux-musl"),
            ("macos", "x86_64", "x86_64-apple-darwin"),
            ("macos", "aarch64", "aarch64-apple-darwin"),
            ("windows", "x86_64", "x86_64-pc-windows-msvc"),
        ];

        for (os, arch, triple) in cases {
            assert_eq!(platform(os, arch).target_triple().unwrap(), triple);
        }
    }

    #[test]
    fn test_target_triple_unsupported() {
        let result = platform("freebsd", "riscv64").target_triple();
        assert!(result.is_err());

        let message = result.unwrap_err().to_string();
        assert!(message.contains("freebsd/riscv64"));
        assert!(message.contains("linux/x86_64"));
    }

    #[test]
    fn test_target_triple_unsupported_arch_on_supported_os() {
        assert!(platform("windows", "aarch64").target_triple().is_err());
    }

    #[test]
    fn test_exe_suffix() {
        assert_eq!(platform("windows", "x86_64").exe_suffix(), ".exe");
        assert_eq!(platform("linux", "x86_64").exe_suffix(), "");
        assert_eq!(platform("macos", "aarch64").exe_suffix(), "");
    }
}
