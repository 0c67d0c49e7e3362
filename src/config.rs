use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Discogs personal access token. Anonymous requests are rate limited harder.
    #[serde(default)]
    pub token: Option<String>,

    /// Extensions treated as audio files. Examples: ["*.mp3", "flac"]. Case-insensitive.
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,

    /// Template used by `rename` when none is given on the command line.
    #[serde(default = "default_rename_format")]
    pub rename_format: String,

    /// Fields skipped on every run, in addition to `--skip`.
    #[serde(default)]
    pub skip: Vec<String>,

    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_user_agent() -> String { "discogs-tag".into() }
fn default_api_base() -> String { "https://api.discogs.com".into() }
fn default_rename_format() -> String { "%z - (%y) %b/%d-%n %t".into() }

fn default_file_extensions() -> Vec<String> {
    vec!["*.flac", "*.mp3"].into_iter().map(String::from).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            api_base: default_api_base(),
            token: None,
            file_extensions: default_file_extensions(),
            rename_format: default_rename_format(),
            skip: Vec::new(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> crate::error::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        crate::options::SkipMask::parse(&cfg.skip)?;
        Ok(cfg)
    }

    /// `<config dir>/discogs-tag/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("discogs-tag").join("config.toml"))
    }

    /// Explicit path if given, else the default location if it exists, else built-in defaults.
    pub fn load(explicit: Option<&Path>) -> crate::error::Result<Self> {
        if let Some(p) = explicit {
            return Self::from_path(p);
        }
        match Self::default_path() {
            Some(p) if p.exists() => Self::from_path(&p),
            _ => Ok(Self::default()),
        }
    }
}
