use anyhow::{Context, Result};
use reqwest::Client;
use std::path::PathBuf;

use crate::http::HttpClient;
use crate::runtime::Runtime;

mod installer;

pub use installer::Installer;

/// User agent sent with download requests.
const USER_AGENT: &str = concat!("binfetch/", env!("CARGO_PKG_VERSION"));

/// Installs the platform binary described by the manifest at `manifest_path`.
#[tracing::instrument(skip(runtime, manifest_path, bin_dir, download_base))]
pub async fn install<R: Runtime>(
    runtime: R,
    manifest_path: PathBuf,
    bin_dir: Option<PathBuf>,
    download_base: Option<String>,
) -> Result<()> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    let installer = Installer::new(runtime, HttpClient::new(client));
    installer
        .install(&manifest_path, bin_dir, download_base.as_deref())
        .await?;
    Ok(())
}
