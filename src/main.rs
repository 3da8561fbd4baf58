use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// binfetch - fetch the prebuilt release binary for this platform
///
/// Reads the package manifest, maps the current operating system and
/// architecture to a release target triple, downloads the matching binary
/// from the package's GitHub releases, and installs it executable under the
/// package's bin/ directory. Intended to run once, at package install time.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the package manifest
    #[arg(
        long = "manifest",
        short = 'm',
        env = "BINFETCH_MANIFEST",
        value_name = "PATH",
        default_value = "package.json"
    )]
    manifest: PathBuf,

    /// Output directory for the binary (defaults to bin/ next to the manifest)
    #[arg(long = "bin-dir", env = "BINFETCH_BIN_DIR", value_name = "PATH")]
    bin_dir: Option<PathBuf>,

    /// Base URL for release downloads (defaults to https://github.com)
    #[arg(long = "download-base", env = "BINFETCH_DOWNLOAD_BASE", value_name = "URL")]
    download_base: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = binfetch::runtime::RealRuntime;

    binfetch::install::install(runtime, cli.manifest, cli.bin_dir, cli.download_base).await
}
