use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::http::HttpClient;
use crate::manifest::Manifest;
use crate::platform::Platform;
use crate::release::AssetRequest;
use crate::runtime::Runtime;

pub struct Installer<R: Runtime> {
    runtime: R,
    http_client: HttpClient,
}

impl<R: Runtime> Installer<R> {
    pub fn new(runtime: R, http_client: HttpClient) -> Self {
        Self {
            runtime,
            http_client,
        }
    }

    /// Runs the whole fetch: manifest, platform lookup, download, executable
    /// bit. Returns the path of the installed binary.
    ///
    /// The download lands in a `.part` file that is renamed over the final
    /// path only once the body has been fully written, so a failed run never
    /// leaves a truncated binary behind.
    #[tracing::instrument(skip(self, manifest_path, bin_dir, download_base))]
    pub async fn install(
        &self,
        manifest_path: &Path,
        bin_dir: Option<PathBuf>,
        download_base: Option<&str>,
    ) -> Result<PathBuf> {
        let manifest = Manifest::load(&self.runtime, manifest_path)?;
        let repo = manifest.github_repo()?;
        let tag = manifest.release_tag()?;
        let bin_name = manifest.bin_name()?;

        let platform = Platform::detect();
        let request = AssetRequest::resolve(&repo, &tag, bin_name, &platform, download_base)?;
        info!("Resolved {} {} to asset {}", repo, tag, request.asset_name);

        let bin_dir = match bin_dir {
            Some(dir) => dir,
            None => manifest_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("bin"),
        };
        self.runtime
            .create_dir_all(&bin_dir)
            .with_context(|| format!("Failed to create output directory at {:?}", bin_dir))?;

        let out_path = bin_dir.join(&request.output_name);
        let temp_path = out_path.with_extension("part");

        info!("Downloading {} to {}", request.url, out_path.display());
        let downloaded = self
            .http_client
            .download_file(&request.url, || {
                self.runtime.create_file(&temp_path).with_context(|| {
                    format!("Failed to create temporary file at {:?}", temp_path)
                })
            })
            .await;

        if let Err(e) = downloaded {
            if self.runtime.exists(&temp_path) {
                if let Err(remove_err) = self.runtime.remove_file(&temp_path) {
                    warn!(
                        "Failed to remove partial download {:?}: {}. Continuing.",
                        temp_path, remove_err
                    );
                }
            }
            return Err(e);
        }

        self.runtime
            .rename(&temp_path, &out_path)
            .with_context(|| format!("Failed to move download into place at {:?}", out_path))?;
        self.runtime
            .set_executable(&out_path)
            .with_context(|| format!("Failed to mark {:?} executable", out_path))?;

        println!("   installed {} {} {}", repo, tag, out_path.display());

        Ok(out_path)
    }
}
