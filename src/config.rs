use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub base_url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct Paths {
    pub content_index: PathBuf,
    pub template_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
pub struct Defaults {
    pub page_size: u32,
    #[serde(default = "default_summary_length")]
    pub summary_length: usize,
    #[serde(default = "default_home_series_count")]
    pub home_series_count: usize,
}

fn default_summary_length() -> usize {
    150
}

fn default_home_series_count() -> usize {
    5
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub log: Option<Log>,
}

const CONFIG_DIR_VAR: &str = "${config_dir}";

// Relative paths are relative to the configuration file
fn parse_path(path: PathBuf, config_dir: &Path) -> PathBuf {
    let str_path = path.to_string_lossy().to_string();
    if str_path.starts_with(CONFIG_DIR_VAR) {
        let rest = str_path[CONFIG_DIR_VAR.len()..].trim_start_matches(|c: char| c == '/' || c == '\\');
        config_dir.join(rest)
    } else if path.is_relative() {
        config_dir.join(path)
    } else {
        path
    }
}

pub fn parse_config(cfg_content: &str, config_dir: &Path) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.defaults.page_size == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "defaults.page_size has to be greater than 0"));
    }

    cfg.paths = Paths {
        content_index: parse_path(cfg.paths.content_index, config_dir),
        template_dir: cfg.paths.template_dir.map(|p| parse_path(p, config_dir)),
    };

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(|p| parse_path(p, config_dir));
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let config_dir = cfg_path.parent().unwrap_or_else(|| Path::new("."));
    parse_config(&cfg_content, config_dir)
}
