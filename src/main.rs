//! Host-side helper: `cargo run` builds the WASM bundle, publishes `static/`
//! into `dist/`, starts a local HTTP server for it, and (if asked) exposes it
//! via ngrok.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use anyhow::{bail, Context as _};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "krea-web", version, about = "Build and serve the KREA site locally")]
struct Cli {
    /// Port for the local HTTP server.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Serve whatever is already in `static/pkg` instead of running wasm-pack.
    #[arg(long)]
    skip_wasm: bool,

    /// Also open an ngrok tunnel to the server.
    #[arg(long)]
    tunnel: bool,

    /// Directory that is served.
    #[arg(long, default_value = "dist")]
    dist: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if !cli.skip_wasm {
        build_wasm()?;
    }
    publish(Path::new("static"), &cli.dist)?;

    let mut server = serve(&cli.dist, cli.port)?;
    let _tunnel = if cli.tunnel { tunnel(cli.port) } else { None };

    let status = server.wait().context("waiting for http server")?;
    if !status.success() {
        bail!("http server exited with {status}");
    }
    Ok(())
}

fn build_wasm() -> anyhow::Result<()> {
    tracing::info!("building WASM pkg");
    let status = Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status();
    match status {
        Ok(st) if st.success() => Ok(()),
        Ok(st) => bail!(
            "wasm-pack finished with {st}. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
        ),
        Err(_) => {
            tracing::warn!("wasm-pack not found in PATH; the site may serve stale artifacts");
            Ok(())
        }
    }
}

/// Replaces `dist` with a fresh copy of `src`. Runs after wasm-pack so the
/// new `pkg/` is included; the build script's copy predates it.
fn publish(src: &Path, dist: &Path) -> anyhow::Result<()> {
    if !src.exists() {
        bail!("{} does not exist", src.display());
    }
    if dist.exists() {
        std::fs::remove_dir_all(dist)
            .with_context(|| format!("removing {}", dist.display()))?;
    }
    std::fs::create_dir_all(dist).with_context(|| format!("creating {}", dist.display()))?;

    let mut options = fs_extra::dir::CopyOptions::new();
    options.content_only = true;
    fs_extra::dir::copy(src, dist, &options)
        .with_context(|| format!("copying {} to {}", src.display(), dist.display()))?;
    tracing::info!(dist = %dist.display(), "published static site");
    Ok(())
}

fn serve(dir: &Path, port: u16) -> anyhow::Result<Child> {
    tracing::info!("launching local server at http://127.0.0.1:{port}");
    let dir = dir.to_str().context("dist path is not valid UTF-8")?;
    Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", dir])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to start http server (is python3 installed?)")
}

fn tunnel(port: u16) -> Option<Child> {
    match Command::new("ngrok")
        .args(["http", &port.to_string()])
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(child) => {
            tracing::info!("ngrok tunnel starting");
            Some(child)
        }
        Err(_) => {
            tracing::warn!("ngrok not found. Install it to expose the site over the internet.");
            None
        }
    }
}
