use crate::config::{Config, SoundOutput};
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) const USAGE: &str = "\
Usage: toxic-snake [options]

Options:
  -c, --config <PATH>   Read configuration from <PATH>
      --width <N>       Grid width in cells
      --height <N>      Grid height in cells
      --fps <N>         Target frame rate
      --walls           Start with deadly walls around the grid
      --mute            Don't play any sounds
      --log-file <PATH> Write log messages to <PATH>
  -h, --help            Show this help and exit
  -V, --version         Show the program version and exit

Keys:
  arrows, h j k l       Steer the snake
  Esc, p                Pause/resume
  w                     Toggle walls
  q, Ctrl-C             Quit
";

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cli {
    Run(Arguments),
    Help,
    Version,
}

impl Cli {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("width") => args.width = Some(parser.value()?.parse()?),
                Arg::Long("height") => args.height = Some(parser.value()?.parse()?),
                Arg::Long("fps") => args.fps = Some(parser.value()?.parse()?),
                Arg::Long("walls") => args.walls = true,
                Arg::Long("mute") => args.mute = true,
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}

/// Options for running the game
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) width: Option<u16>,
    pub(crate) height: Option<u16>,
    pub(crate) fps: Option<u32>,
    pub(crate) walls: bool,
    pub(crate) mute: bool,
    pub(crate) log_file: Option<PathBuf>,
}

impl Arguments {
    /// Override values in `config` with those given on the command line
    pub(crate) fn apply(&self, mut config: Config) -> Config {
        if let Some(width) = self.width {
            config.game.grid_width = width;
        }
        if let Some(height) = self.height {
            config.game.grid_height = height;
        }
        if let Some(fps) = self.fps {
            config.game.frames_per_second = fps;
        }
        if self.walls {
            config.game.walls = true;
        }
        if self.mute {
            config.sound.output = SoundOutput::Off;
        }
        config
    }
}
