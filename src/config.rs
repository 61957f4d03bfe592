use crate::consts;
use crate::game::{Bounds, Settings};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings for the game itself
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings for sound output
    #[serde(default)]
    pub(crate) sound: SoundConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("toxic-snake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Check that all values are within their permitted ranges
    pub(crate) fn validate(self) -> Result<Config, ConfigError> {
        let GameConfig {
            grid_width,
            grid_height,
            frames_per_second,
            ..
        } = self.game;
        let grid_range = consts::MIN_GRID_SIZE..=consts::MAX_GRID_SIZE;
        if !grid_range.contains(&grid_width) || !grid_range.contains(&grid_height) {
            return Err(ConfigError::GridSize {
                width: grid_width,
                height: grid_height,
            });
        }
        if !(1..=consts::MAX_FPS).contains(&frames_per_second) {
            return Err(ConfigError::FrameRate(frames_per_second));
        }
        Ok(self)
    }

    /// Return the parameters for a new game
    pub(crate) fn settings(&self) -> Settings {
        Settings::new(
            Bounds::new(self.game.grid_width, self.game.grid_height),
            self.game.walls,
        )
    }

    /// Return the target time to spend on each frame
    pub(crate) fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.game.frames_per_second.max(1)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Width of the grid in cells
    pub(crate) grid_width: u16,

    /// Height of the grid in cells
    pub(crate) grid_height: u16,

    /// Target frame rate
    pub(crate) frames_per_second: u32,

    /// Whether the grid edges are deadly at the start of a game
    pub(crate) walls: bool,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid_width: 32,
            grid_height: 32,
            frames_per_second: 60,
            walls: false,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct SoundConfig {
    /// Where to play sounds when things happen
    pub(crate) output: SoundOutput,
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SoundOutput {
    /// Synthesized tunes on the default audio device, or the terminal bell
    /// if there isn't one
    #[default]
    Speaker,
    /// The terminal bell
    Bell,
    Off,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error(
        "grid must be between {min}x{min} and {max}x{max} cells, got {width}x{height}",
        min = consts::MIN_GRID_SIZE,
        max = consts::MAX_GRID_SIZE
    )]
    GridSize { width: u16, height: u16 },
    #[error("frame rate must be between 1 and {max}, got {0}", max = consts::MAX_FPS)]
    FrameRate(u32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(src: &str) -> NamedTempFile {
        let mut tmpfile = NamedTempFile::new().unwrap();
        tmpfile.write_all(src.as_bytes()).unwrap();
        tmpfile.flush().unwrap();
        tmpfile
    }

    #[test]
    fn load_full() {
        let tmpfile = write_config(concat!(
            "[game]\n",
            "grid-width = 40\n",
            "grid-height = 20\n",
            "frames-per-second = 30\n",
            "walls = true\n",
            "\n",
            "[sound]\n",
            "output = \"bell\"\n",
        ));
        let config = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(
            config,
            Config {
                game: GameConfig {
                    grid_width: 40,
                    grid_height: 20,
                    frames_per_second: 30,
                    walls: true,
                },
                sound: SoundConfig {
                    output: SoundOutput::Bell,
                },
            }
        );
        assert_eq!(config.settings().bounds, Bounds::new(40, 20));
        assert!(config.settings().walls);
        assert_eq!(config.settings().hazard_delay, consts::HAZARD_DELAY);
        assert_eq!(config.frame_duration(), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn load_partial() {
        let tmpfile = write_config("[game]\nwalls = true\n");
        let config = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(
            config.game,
            GameConfig {
                walls: true,
                ..GameConfig::default()
            }
        );
        assert_eq!(config.sound, SoundConfig::default());
        assert_eq!(config.frame_duration(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn load_empty() {
        let tmpfile = write_config("");
        assert_eq!(
            Config::load(tmpfile.path(), false).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn load_missing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_sound_off() {
        let tmpfile = write_config("[sound]\noutput = \"off\"\n");
        let config = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(config.sound.output, SoundOutput::Off);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn load_bad_sound_output() {
        let tmpfile = write_config("[sound]\noutput = \"kazoo\"\n");
        assert!(matches!(
            Config::load(tmpfile.path(), false),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_invalid() {
        let tmpfile = write_config("[game]\ngrid-width = \"wide\"\n");
        assert!(matches!(
            Config::load(tmpfile.path(), false),
            Err(ConfigError::Parse(_))
        ));
    }

    #[rstest]
    #[case(32, 32, 60, true)]
    #[case(5, 5, 1, true)]
    #[case(200, 200, 240, true)]
    #[case(4, 32, 60, false)]
    #[case(32, 201, 60, false)]
    #[case(32, 32, 0, false)]
    #[case(32, 32, 241, false)]
    fn validate(
        #[case] grid_width: u16,
        #[case] grid_height: u16,
        #[case] frames_per_second: u32,
        #[case] ok: bool,
    ) {
        let config = Config {
            game: GameConfig {
                grid_width,
                grid_height,
                frames_per_second,
                walls: false,
            },
            sound: SoundConfig::default(),
        };
        assert_eq!(config.validate().is_ok(), ok);
    }

    #[test]
    fn grid_size_message() {
        let e = ConfigError::GridSize {
            width: 3,
            height: 300,
        };
        assert_eq!(
            e.to_string(),
            "grid must be between 5x5 and 200x200 cells, got 3x300"
        );
    }
}
