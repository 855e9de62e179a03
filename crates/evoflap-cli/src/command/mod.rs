use clap::{Parser, Subcommand};

use self::{play::PlayArg, train::TrainArg, watch::WatchArg};

mod play;
mod train;
mod watch;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve controllers headlessly and write a statistics report
    Train(#[clap(flatten)] TrainArg),
    /// Watch a population evolve in the terminal
    Watch(#[clap(flatten)] WatchArg),
    /// Play the game yourself
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Watch(WatchArg::default())) {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Watch(arg) => watch::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_train() {
        let args = CommandArgs::try_parse_from([
            "evoflap",
            "train",
            "--generations",
            "5",
            "--population-size",
            "12",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Train(_))));
    }

    #[test]
    fn test_parse_watch_speed() {
        let args = CommandArgs::try_parse_from(["evoflap", "watch", "--speed", "max"]).unwrap();
        assert!(matches!(args.mode, Some(Mode::Watch(_))));
        assert!(CommandArgs::try_parse_from(["evoflap", "watch", "--speed", "3"]).is_err());
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(CommandArgs::try_parse_from(["evoflap", "play", "--seed", "xyz"]).is_err());
    }
}
