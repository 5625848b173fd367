mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = platform::cli::CliArgs::parse();
    platform::logging::initialize(args.log_to, args.log_level);

    // Single-threaded cooperative scheduling: one turn, one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(platform::app::run_app(args))
}
