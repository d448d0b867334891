mod cli_main;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;
use cli_main::Cli;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");

    let options = cli.run_options();
    info!("Running assembly pipeline on {}", options.input.display());
    let start = std::time::Instant::now();

    match dbgasm::pipeline::assemble::run(&options) {
        Ok(report) => {
            info!(
                "Assembly completed in {:.2}s: {} contigs, total length {}",
                start.elapsed().as_secs_f32(),
                report.contigs.total_contigs,
                report.contigs.total_length
            );
        }
        Err(e) => {
            error!("Error during assembly: {}", e);
            std::process::exit(1);
        }
    }
}
