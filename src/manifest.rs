//! Package manifest parsing.
//!
//! The manifest is the `package.json`-style file of the package being
//! installed. The installer needs three things out of it: the GitHub
//! repository the release lives in, the declared version (normalized to a
//! release tag), and the name of the binary to install.

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::path::Path;

use crate::runtime::Runtime;

/// The manifest fields the installer reads.
#[derive(Deserialize, Debug, Clone)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub repository: Option<Repository>,
}

/// The repository field comes in two shapes: a bare URL string, or an
/// object with a `url` key (and usually a `type` we don't care about).
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Detailed { url: String },
}

impl Repository {
    fn url(&self) -> &str {
        match self {
            Repository::Url(url) => url,
            Repository::Detailed { url } => url,
        }
    }
}

/// A GitHub repository identified by owner and name.
#[derive(Debug, PartialEq, Clone)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl Manifest {
    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read manifest at {:?}", path))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest at {:?}", path))?;
        if manifest.name.is_empty() {
            bail!("Manifest at {:?} has an empty package name", path);
        }
        Ok(manifest)
    }

    /// GitHub repository parsed from the manifest's repository URL.
    pub fn github_repo(&self) -> Result<GitHubRepo> {
        let url = self
            .repository
            .as_ref()
            .ok_or_else(|| anyhow!("Manifest has no repository field"))?
            .url();
        parse_github_url(url)
    }

    /// Release tag for the declared version. Tags carry a `v` prefix, so one
    /// is added when the version doesn't already have it.
    pub fn release_tag(&self) -> Result<String> {
        let version = self.version.as_deref().unwrap_or("");
        if version.is_empty() {
            bail!("Manifest declares no version; cannot choose a release tag");
        }
        if version.starts_with('v') {
            Ok(version.to_string())
        } else {
            Ok(format!("v{}", version))
        }
    }

    /// File stem of the installed binary: the package name with any
    /// `@scope/` prefix removed.
    pub fn bin_name(&self) -> Result<&str> {
        let name = match self.name.strip_prefix('@') {
            Some(scoped) => scoped
                .split_once('/')
                .map(|(_, rest)| rest)
                .ok_or_else(|| anyhow!("Scoped package name {:?} has no name segment", self.name))?,
            None => self.name.as_str(),
        };
        if name.is_empty() {
            bail!("Package name {:?} leaves an empty binary name", self.name);
        }
        Ok(name)
    }
}

/// Parses owner and repo out of a GitHub repository URL.
///
/// Accepts `https://github.com/owner/repo`, the same with a `.git` suffix or
/// trailing slash, and the SSH form `git@github.com:owner/repo.git`.
fn parse_github_url(url: &str) -> Result<GitHubRepo> {
    const HOST: &str = "github.com";

    let idx = url
        .find(HOST)
        .ok_or_else(|| anyhow!("Repository URL {:?} is not a github.com URL", url))?;
    let rest = &url[idx + HOST.len()..];
    let rest = rest
        .strip_prefix('/')
        .or_else(|| rest.strip_prefix(':'))
        .ok_or_else(|| anyhow!("Repository URL {:?} has no owner/repo path", url))?;
    let rest = rest.trim_end_matches('/');
    let rest = rest.strip_suffix(".git").unwrap_or(rest);

    let mut segments = rest.split('/');
    let owner = segments.next().unwrap_or("");
    let repo = segments.next().unwrap_or("");
    if owner.is_empty() || repo.is_empty() || segments.next().is_some() {
        bail!("Repository URL {:?} does not end in owner/repo", url);
    }

    Ok(GitHubRepo {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
