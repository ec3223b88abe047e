use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::definitions::{DefinitionTable, ReferenceDefinition};
use crate::options::ParseOptions;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub underscore_emphasis: Option<bool>,
    #[serde(default)]
    pub references: BTreeMap<String, ReferenceDefinition>,
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        let defaults = ParseOptions::default();
        ParseOptions {
            underscore_emphasis: self
                .underscore_emphasis
                .unwrap_or(defaults.underscore_emphasis),
            ..defaults
        }
    }

    pub fn definitions(&self) -> DefinitionTable {
        self.references
            .iter()
            .map(|(label, definition)| (label, definition.clone()))
            .collect()
    }
}

const CANDIDATE_NAMES: &[&str] = &[".inlinemark.toml", "inlinemark.toml"];

pub fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    let s = fs::read_to_string(path)?;
    parse_config_str(&s, path)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("inlinemark").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("inlinemark")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .inlinemark.toml, inlinemark.toml
/// 3) XDG: $XDG_CONFIG_HOME/inlinemark/config.toml or ~/.config/inlinemark/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Skipping config {}: {e}", p.display()),
        }
    }

    if let Some(p) = xdg_config_path() {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Skipping config {}: {e}", p.display()),
        }
    }

    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::ReferenceDefinitions;

    #[test]
    fn parses_references_table() {
        let toml = r#"
underscore-emphasis = false

[references]
Home = { destination = "https://example.com", title = "Example" }
docs = { destination = "/docs" }
"#;
        let cfg = parse_config_str(toml, Path::new("inlinemark.toml")).unwrap();
        assert_eq!(cfg.underscore_emphasis, Some(false));
        assert!(!cfg.parse_options().underscore_emphasis);

        let table = cfg.definitions();
        assert_eq!(table.len(), 2);
        let home = table.lookup("home").unwrap();
        assert_eq!(home.destination, "https://example.com");
        assert_eq!(home.title.as_deref(), Some("Example"));
        assert_eq!(table.lookup("DOCS").unwrap().title, None);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config_str("", Path::new("inlinemark.toml")).unwrap();
        assert!(cfg.parse_options().underscore_emphasis);
        assert!(cfg.definitions().is_empty());
    }

    #[test]
    fn invalid_config_reports_path() {
        let err = parse_config_str("references = 3", Path::new("bad.toml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let missing = Path::new("/nonexistent/inlinemark/config.toml");
        assert!(load(Some(missing), Path::new(".")).is_err());
    }
}
