//! Run configuration assembled from an optional TOML file and command-line flags.

use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use garden_guardian_core::AiMode;
use serde::Deserialize;

const DEFAULT_TICKS: u32 = 3_600;
const DEFAULT_FRAME_MS: u64 = 16;

/// AI autonomy requested for the headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Mode {
    /// Nobody moves unless told to.
    Off,
    /// The companion plays on its own.
    Assist,
    /// Both characters play on their own.
    Auto,
}

impl From<Mode> for AiMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Off => AiMode::Off,
            Mode::Assist => AiMode::Assist,
            Mode::Auto => AiMode::Auto,
        }
    }
}

/// Values a configuration file may set. Anything left out falls back to a default.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) seed: Option<u64>,
    pub(crate) ticks: Option<u32>,
    pub(crate) frame_ms: Option<u64>,
    pub(crate) ai_mode: Option<Mode>,
    pub(crate) high_score_path: Option<PathBuf>,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }
}

/// Fully resolved settings for one headless run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RunConfig {
    pub(crate) seed: u64,
    pub(crate) ticks: u32,
    pub(crate) frame: Duration,
    pub(crate) ai_mode: AiMode,
    pub(crate) high_score_path: Option<PathBuf>,
}

impl RunConfig {
    /// Layers `overrides` on top of `file`, then on top of the defaults.
    pub(crate) fn resolve(file: FileConfig, overrides: FileConfig) -> Result<Self> {
        let frame_ms = overrides
            .frame_ms
            .or(file.frame_ms)
            .unwrap_or(DEFAULT_FRAME_MS);
        if frame_ms == 0 {
            bail!("frame length must be at least one millisecond");
        }

        Ok(Self {
            seed: overrides.seed.or(file.seed).unwrap_or(0),
            ticks: overrides.ticks.or(file.ticks).unwrap_or(DEFAULT_TICKS),
            frame: Duration::from_millis(frame_ms),
            ai_mode: overrides.ai_mode.or(file.ai_mode).unwrap_or(Mode::Auto).into(),
            high_score_path: overrides.high_score_path.or(file.high_score_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let config = RunConfig::resolve(FileConfig::default(), FileConfig::default()).unwrap();
        assert_eq!(
            config,
            RunConfig {
                seed: 0,
                ticks: 3_600,
                frame: Duration::from_millis(16),
                ai_mode: AiMode::Auto,
                high_score_path: None,
            }
        );
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig::parse(
            r#"
            seed = 9
            ticks = 100
            ai_mode = "assist"
            high_score_path = "best.txt"
            "#,
        )
        .unwrap();
        let overrides = FileConfig {
            ticks: Some(5),
            ai_mode: Some(Mode::Off),
            ..FileConfig::default()
        };

        let config = RunConfig::resolve(file, overrides).unwrap();

        assert_eq!(config.seed, 9);
        assert_eq!(config.ticks, 5);
        assert_eq!(config.ai_mode, AiMode::Off);
        assert_eq!(config.high_score_path, Some(PathBuf::from("best.txt")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("speed = 3").is_err());
    }

    #[test]
    fn zero_frame_length_is_rejected() {
        let overrides = FileConfig {
            frame_ms: Some(0),
            ..FileConfig::default()
        };
        assert!(RunConfig::resolve(FileConfig::default(), overrides).is_err());
    }
}
