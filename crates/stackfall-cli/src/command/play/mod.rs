use std::path::PathBuf;

use rand::Rng as _;
use stackfall_engine::PieceSeed;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Interval between automatic downward steps, in milliseconds
    #[clap(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Piece seed as 32 hex digits (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Ring the terminal bell when rows are cleared or the game is lost
    #[clap(long)]
    bell: bool,
    /// Do not show the controls dialog on start
    #[clap(long)]
    no_controls: bool,
    /// Save the session's events as JSON into this directory on exit
    #[clap(long)]
    record_dir: Option<PathBuf>,
    /// Maximum number of events to keep in memory (oldest are discarded)
    #[clap(long, default_value_t = 10000)]
    history_size: usize,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            tick_ms: 500,
            seed: None,
            bell: false,
            no_controls: false,
            record_dir: None,
            history_size: 10000,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut app = PlayApp::new(seed, arg);

    Tui::new().run(&mut app)?;

    if let Some(record_dir) = &arg.record_dir {
        let path = app.into_history().save(record_dir)?;
        println!("Recording saved to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Wrapper {
        #[clap(flatten)]
        arg: PlayArg,
    }

    fn parse(args: &[&str]) -> Result<PlayArg, clap::Error> {
        Wrapper::try_parse_from(iter_with_name(args)).map(|w| w.arg)
    }

    fn iter_with_name<'a>(args: &'a [&'a str]) -> impl Iterator<Item = &'a str> {
        ["stackfall"].into_iter().chain(args.iter().copied())
    }

    #[test]
    fn test_defaults_match_default_impl() {
        let parsed = parse(&[]).unwrap();
        let default = PlayArg::default();
        assert_eq!(parsed.tick_ms, default.tick_ms);
        assert_eq!(parsed.history_size, default.history_size);
        assert_eq!(parsed.seed, None);
        assert!(!parsed.bell);
        assert!(!parsed.no_controls);
        assert_eq!(parsed.record_dir, None);
    }

    #[test]
    fn test_seed_is_parsed_as_hex() {
        let parsed = parse(&["--seed", "0123456789abcdeffedcba9876543210"]).unwrap();
        assert_eq!(
            parsed.seed.map(|s| s.to_string()).as_deref(),
            Some("0123456789abcdeffedcba9876543210")
        );
        assert!(parse(&["--seed", "xyz"]).is_err());
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        assert!(parse(&["--tick-ms", "0"]).is_err());
        assert_eq!(parse(&["--tick-ms", "250"]).unwrap().tick_ms, 250);
    }
}
