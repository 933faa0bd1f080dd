use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

use crate::browser::browse_raw_data;
use crate::config::Config;
use crate::data::load_trips;
use crate::prompt::{Prompter, get_filters};
use crate::stats::write_all_reports;

/// Run filter → load → reports → raw data → restart until the user stops.
/// Closed input ends the session normally.
pub fn run_session<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    match session_loop(config, prompter) {
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            debug!("input closed, ending session");
            Ok(())
        }
        other => other.context("Failed to talk to the terminal"),
    }
}

fn session_loop<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    loop {
        run_iteration(config, prompter)?;

        let restart = prompter.ask("\n\nWould you like to restart?\nEnter yes or no.\n>> ")?;
        if restart != "yes" {
            return Ok(());
        }
    }
}

/// One pass; the trip table lives only for its duration
fn run_iteration<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    let selection = get_filters(prompter, &config.cities)?;

    let table = match load_trips(config, &selection) {
        Ok(table) => table,
        Err(e) => {
            warn!("load failed for {}: {}", selection, e);
            writeln!(prompter.output(), "\nCould not load trip data: {}", e)?;
            return Ok(());
        }
    };

    write_all_reports(prompter.output(), &table)?;
    browse_raw_data(prompter, &table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityMap;
    use std::io::Cursor;

    fn run(config: &Config, input: &str) -> String {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        run_session(config, &mut prompter).unwrap();
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_missing_source_reaches_restart_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            cities: CityMap::default(),
        };
        let output = run(&config, "chicago\nall\nall\nno\n");
        assert!(output.contains("Could not load trip data"));
        assert!(output.contains("Would you like to restart?"));
        assert!(!output.contains("Calculating"));
    }

    #[test]
    fn test_eof_ends_cleanly() {
        let output = run(&Config::default(), "chicago\n");
        assert!(output.contains("filter the data by month"));
    }
}
