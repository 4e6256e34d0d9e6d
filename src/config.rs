use std::{env, fs, path::PathBuf};

use crate::board::Coord;
use crate::error::{GameError, Result};

pub const BOARD_COLS: u16 = 40;
pub const BOARD_ROWS: u16 = 30;
pub const BLOCK_SIZE: Coord = 20;
pub const BASE_RATE: u32 = 10;

const SCORES_FILE: &str = "high_scores.json";
const LOG_FILE: &str = "snake.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Holds the high scores and the log.
    pub data_dir: PathBuf,
    /// Sound files that must all be present when set.
    pub assets_dir: Option<PathBuf>,
    /// Ticks per second at level 1.
    pub base_rate: u32,
    pub bell: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match var("SNAKE_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .ok_or_else(|| GameError::Config("could not determine home directory".into()))?
                .join(".snake"),
        };

        let base_rate = match var("SNAKE_SPEED") {
            Some(v) => match v.trim().parse::<u32>() {
                Ok(rate) if rate > 0 => rate,
                _ => {
                    let msg = format!("SNAKE_SPEED must be a positive integer, got {:?}", v);
                    return Err(GameError::Config(msg));
                }
            },
            None => BASE_RATE,
        };

        Ok(Config {
            data_dir,
            assets_dir: var("SNAKE_ASSETS").map(PathBuf::from),
            base_rate,
            bell: var("SNAKE_BELL").map_or(true, |v| v.trim() != "0"),
        })
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join(SCORES_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("SNAKE_HOME", "/tmp/snake-home"),
            ("SNAKE_SPEED", "15"),
            ("SNAKE_BELL", "0"),
            ("SNAKE_ASSETS", "sounds"),
        ])
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/snake-home"));
        assert_eq!(cfg.scores_path(), PathBuf::from("/tmp/snake-home/high_scores.json"));
        assert_eq!(cfg.base_rate, 15);
        assert!(!cfg.bell);
        assert_eq!(cfg.assets_dir, Some(PathBuf::from("sounds")));
    }

    #[test]
    fn defaults_without_overrides() {
        let cfg = config(&[("SNAKE_HOME", "/tmp/snake-home")]).unwrap();
        assert_eq!(cfg.base_rate, BASE_RATE);
        assert!(cfg.bell);
        assert_eq!(cfg.assets_dir, None);
    }

    #[test]
    fn rejects_bad_speed() {
        for bad in ["0", "fast", "-3"] {
            let err = config(&[("SNAKE_HOME", "/tmp"), ("SNAKE_SPEED", bad)]).unwrap_err();
            assert!(matches!(err, GameError::Config(_)));
        }
    }
}
