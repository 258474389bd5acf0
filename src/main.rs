use anyhow::{Context, Result};
use folio::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.verbose);
    config.validate().context("Invalid configuration")?;

    let summary = folio::build_site(&config).context("Failed to build site")?;

    tracing::info!(
        pages = summary.pages.len(),
        code_blocks = summary.code_blocks,
        assets = summary.assets.len(),
        output = %config.output.display(),
        "build complete"
    );
    if let Some(fallback) = &summary.fallback {
        tracing::info!(fallback = %fallback.display(), "generated fallback page");
    }

    if config.open {
        let index = config.output.join("index.html");
        if index.exists() {
            open::that(&index)
                .with_context(|| format!("Failed to open {}", index.display()))?;
        } else {
            tracing::warn!(path = %index.display(), "no index page to open");
        }
    }

    Ok(())
}

/// Installs the log subscriber. `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
