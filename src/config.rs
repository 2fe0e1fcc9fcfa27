use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

/// Values a post needs to build absolute links.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Site {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Base of every blog link, e.g. `https://example.com/blog`
    pub url: String,
    /// Prefix for site-relative image paths, e.g. `https://example.com`
    pub site_url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Paths {
    pub metadata_file: PathBuf,
    pub content_dir: PathBuf,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Defaults {
    pub page_size: u32,
    pub sidebar_size: Option<usize>,
    /// Tags an author is allowed to pick when adding a post
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize, Debug)]
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

#[derive(Deserialize, Debug)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub log: Option<Log>,
}

const DEFAULT_SIDEBAR_SIZE: usize = 5;

impl Defaults {
    pub fn sidebar_size(&self) -> usize {
        self.sidebar_size.unwrap_or(DEFAULT_SIDEBAR_SIZE)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not find the executable directory"))?;
    let rest = path.strip_prefix("${exe_dir}")
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.defaults.page_size == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "defaults.page_size has to be greater than 0"));
    }

    // Links are always joined with a '/', so a trailing one would double it
    cfg.site.url = cfg.site.url.trim_end_matches('/').to_string();
    cfg.site.site_url = cfg.site.site_url.trim_end_matches('/').to_string();

    cfg.paths = Paths {
        metadata_file: parse_path(cfg.paths.metadata_file)?,
        content_dir: parse_path(cfg.paths.content_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
