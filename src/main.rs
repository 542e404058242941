use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = sipcalc::cli::Cli::parse();
    if let Err(e) = sipcalc::cli::run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
