//! Release-asset naming and download URL construction.

use anyhow::Result;

use crate::manifest::GitHubRepo;
use crate::platform::Platform;

/// Default host serving release downloads.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com";

/// A fully resolved download: what to fetch and what to name it locally.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRequest {
    pub asset_name: String,
    pub url: String,
    pub output_name: String,
}

impl AssetRequest {
    /// Resolves the release asset for `bin_name` at `tag` on `platform`.
    ///
    /// Assets are named `{bin}-{tag}-{triple}` (plus `.exe` on windows) and
    /// live under the repository's `releases/download/{tag}/` path. The base
    /// URL is overridable so tests can point at a local server.
    #[tracing::instrument(skip(repo, platform))]
    pub fn resolve(
        repo: &GitHubRepo,
        tag: &str,
        bin_name: &str,
        platform: &Platform,
        download_base: Option<&str>,
    ) -> Result<Self> {
        let triple = platform.target_triple()?;
        let asset_name = format!(
            "{}-{}-{}{}",
            bin_name,
            tag,
            triple,
            platform.exe_suffix()
        );
        let base = download_base.unwrap_or(DEFAULT_DOWNLOAD_BASE);
        let url = format!(
            "{}/{}/{}/releases/download/{}/{}",
            base.trim_end_matches('/'),
            repo.owner,
            repo.repo,
            tag,
            asset_name
        );

        Ok(Self {
            asset_name,
            url,
            output_name: format!("{}{}", bin_name, platform.exe_suffix()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> GitHubRepo {
        GitHubRepo {
            owner: "acme".to_string(),
            repo: "widget".to_string(),
        }
    }

    fn platform(os: &str, arch: &str) -> Platform {
        Platform {
            os: os.to_string(),
            arch: arch.to_string(),
        }
    }

    #[test]
    fn test_resolve_urls_for_all_supported_platforms() {
        // One expected URL per supported platform/arch pair.
        let cases = [
            (
                "linux",
                "x86_64",
                "https://github.com/acme/widget/releases/download/v1.2.3/widget-v1.2.3-x86_64-unknown-linux-musl",
            ),
            (
                "linux",
                "aarch64",
                "https://github.com/acme/widget/releases/download/v1.2.3/widget-v1.2.3-aarch64-unknown-linux-musl",
            ),
            (
                "macos",
                "x86_64",
                "https://github.com/acme/widget/releases/download/v1.2.3/widget-v1.2.3-x86_64-apple-darwin",
            ),
            (
                "macos",
                "aarch64",
                "https://github.com/acme/widget/releases/download/v1.2.3/widget-v1.2.3-aarch64-apple-darwin",
            ),
            (
                "windows",
                "x86_64",
                "https://github.com/acme/widget/releases/download/v1.2.3/widget-v1.2.3-x86_64-pc-windows-msvc.exe",
            ),
        ];

        for (os, arch, expected_url) in cases {
            let request =
                AssetRequest::resolve(&repo(), "v1.2.3", "widget", &platform(os, arch), None)
                    .unwrap();
            assert_eq!(request.url, expected_url, "for {}/{}", os, arch);
        }
    }

    #[test]
    fn test_resolve_windows_names() {
        let request =
            AssetRequest::resolve(&repo(), "v2.0.0", "widget", &platform("windows", "x86_64"), None)
                .unwrap();

        assert_eq!(
            request.asset_name,
            "widget-v2.0.0-x86_64-pc-windows-msvc.exe"
        );
        assert_eq!(request.output_name, "widget.exe");
    }

    #[test]
    fn test_resolve_unix_output_name_has_no_suffix() {
        let request =
            AssetRequest::resolve(&repo(), "v2.0.0", "widget", &platform("linux", "aarch64"), None)
                .unwrap();
        assert_eq!(request.output_name, "widget");
    }

    #[test]
    fn test_resolve_custom_base_trims_trailing_slash() {
        let request = AssetRequest::resolve(
            &repo(),
            "v1.0.0",
            "widget",
            &platform("linux", "x86_64"),
            Some("http://127.0.0.1:8080/"),
        )
        .unwrap();

        assert_eq!(
            request.url,
            "http://127.0.0.1:8080/acme/widget/releases/download/v1.0.0/widget-v1.0.0-x86_64-unknown-linux-musl"
        );
    }

    #[test]
    fn test_resolve_unsupported_platform_fails() {
        let result =
            AssetRequest::resolve(&repo(), "v1.0.0", "widget", &platform("freebsd", "x86_64"), None);
        assert!(result.is_err());
    }
}
