use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

const SAVE_VERSION: u32 = 1;
const HIGH_SCORE_FILE: &str = "high_score.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HighScoreFile {
    pub version: u32,
    pub high_score: u32,
    pub saved_at_unix: u64,
}

pub fn save_dir() -> PathBuf {
    PathBuf::from("saves")
}

pub fn high_score_path(dir: &Path) -> PathBuf {
    dir.join(HIGH_SCORE_FILE)
}

fn current_unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Best score on record, or 0 when nothing has been saved yet.
pub fn load_high_score() -> GameResult<u32> {
    load_high_score_from(&save_dir())
}

pub fn load_high_score_from(dir: &Path) -> GameResult<u32> {
    let path = high_score_path(dir);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(source) => return Err(GameError::Io { path, source }),
    };
    parse_with_migration(&path, &contents).map(|file| file.high_score)
}

pub fn save_high_score(score: u32) -> GameResult<()> {
    save_high_score_to(&save_dir(), score)
}

pub fn save_high_score_to(dir: &Path, score: u32) -> GameResult<()> {
    fs::create_dir_all(dir).map_err(|source| GameError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let file = HighScoreFile {
        version: SAVE_VERSION,
        high_score: score,
        saved_at_unix: current_unix_timestamp(),
    };
    let serialized = toml::to_string_pretty(&file).map_err(|err| GameError::Serialize {
        reason: err.to_string(),
    })?;

    let path = high_score_path(dir);
    fs::write(&path, serialized).map_err(|source| GameError::Io { path, source })
}

fn parse_with_migration(path: &Path, contents: &str) -> GameResult<HighScoreFile> {
    let parse_err = |reason: String| GameError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let mut value: toml::Value = toml::from_str(contents).map_err(|err| parse_err(err.to_string()))?;
    let table = value
        .as_table_mut()
        .ok_or_else(|| parse_err("high score file root must be a TOML table".to_string()))?;

    if !table.contains_key("version") {
        table.insert("version".to_string(), toml::Value::Integer(SAVE_VERSION as i64));
    }
    if !table.contains_key("saved_at_unix") {
        table.insert("saved_at_unix".to_string(), toml::Value::Integer(0));
    }

    let version = table
        .get("version")
        .and_then(toml::Value::as_integer)
        .ok_or_else(|| parse_err("save version is missing or invalid".to_string()))?;
    if version != SAVE_VERSION as i64 {
        return Err(parse_err(format!(
            "unsupported save version {} (expected {})",
            version, SAVE_VERSION
        )));
    }

    value
        .try_into::<HighScoreFile>()
        .map_err(|err| parse_err(err.to_string()))
}
