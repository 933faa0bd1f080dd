use anyhow::Result;
use std::io;
use tracing_subscriber::EnvFilter;

use bikeshare_stats::Config;
use bikeshare_stats::prompt::Prompter;
use bikeshare_stats::session::run_session;

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the reports
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = Config::load_or_default(".")?;
    tracing::debug!("using data directory {:?}", config.data_dir);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    run_session(&config, &mut prompter)
}
