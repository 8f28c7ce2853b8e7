use clap::Parser;

/// Reference cap on how many targets one run will take on; targets beyond
/// the cap are never processed.
const JOB_CAP: usize = 30;

#[derive(Parser, Debug)]
#[command(
    name = "pagesnap",
    about = "Bulk full-page screenshots across viewport sizes"
)]
struct Cli {
    /// Place the viewport size before the target in artifact filenames
    #[arg(long)]
    flip: bool,
}

#[cfg(feature = "cdp")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::path::Path;

    use anyhow::Context;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    use pagesnap::{
        config, CaptureConfig, CdpRenderer, Dispatcher, NameOrder, PoolConfig, DEFAULT_USER_AGENT,
    };

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let naming = if cli.flip {
        tracing::info!("flipping the artifact naming order");
        NameOrder::SizeFirst
    } else {
        NameOrder::TargetFirst
    };

    let sizes = config::load_viewports(Path::new("sizes.json"));
    let targets = config::load_targets(Path::new("urls.txt"));

    let cwd = std::env::current_dir().context("could not get working directory")?;
    let out_dir = config::ensure_output_dir(&cwd)?;

    let renderer = CdpRenderer::new(CaptureConfig {
        out_dir,
        naming,
        user_agent: DEFAULT_USER_AGENT.to_string(),
    })
    .context("could not start the rendering engine")?;

    let dispatcher = Dispatcher::new(renderer, sizes, PoolConfig::default());
    let outcomes = dispatcher.run(&targets, JOB_CAP).await;

    for outcome in outcomes {
        match outcome.error {
            None => println!("success: {}", outcome.target),
            Some(err) => println!("error: {} ({:#})", outcome.target, anyhow::Error::new(err)),
        }
    }

    Ok(())
}

#[cfg(not(feature = "cdp"))]
fn main() {
    let _ = Cli::parse();
    eprintln!("pagesnap was built without a capture backend; rebuild with --features cdp");
    std::process::exit(1);
}
