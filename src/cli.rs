use crate::config::{Config, Dimensions};
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) const USAGE: &str = "\
Usage: dimsnake [<options>]

Play snake on a 2D or 3D board in the terminal

Options:
  -c, --config <PATH>      Read configuration from the given file
  -d, --dimensions <2|3>   Play on a board with the given number of dimensions
      --2d                 Same as --dimensions 2
      --3d                 Same as --dimensions 3
  -n, --name <NAME>        Record high scores under the given player name
  -l, --log-file <PATH>    Write diagnostic logs to the given file
  -h, --help               Show this help message and exit
  -V, --version            Show the program version and exit
";

/// What the command line asks the program to do
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('d') | Arg::Long("dimensions") => {
                    args.dimensions = Some(parser.value()?.parse()?);
                }
                Arg::Long("2d") => args.dimensions = Some(Dimensions::Two),
                Arg::Long("3d") => args.dimensions = Some(Dimensions::Three),
                Arg::Short('n') | Arg::Long("name") => {
                    args.name = Some(parser.value()?.string()?);
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

/// Options for a normal run of the game
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) dimensions: Option<Dimensions>,
    pub(crate) name: Option<String>,
    pub(crate) log_file: Option<PathBuf>,
}

impl Arguments {
    /// Override values read from the configuration file with those given on
    /// the command line
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(dimensions) = self.dimensions {
            config.game.dimensions = dimensions;
        }
        if let Some(ref name) = self.name {
            config.player.name.clone_from(name);
        }
    }
}
