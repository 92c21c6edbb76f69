use std::path::PathBuf;

use url::Url;

use crate::calendar::layout::ViewMode;

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    pub api: Api,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub calendar: Calendar,
    #[serde(default)]
    pub log: Log,
}

#[derive(serde::Deserialize)]
pub struct Api {
    pub base_url: Url,
    pub token_file: Option<PathBuf>,
    pub token: Option<String>,
}

impl core::fmt::Debug for Api {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.base_url)
            .field("token_file", &self.token_file)
            .field("token", &"<hidden>")
            .finish()
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Session {
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Calendar {
    #[serde(default)]
    pub default_view: ViewMode,
    /// Seconds between background reloads
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            default_view: ViewMode::default(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: log::LevelFilter,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub fn init(path: PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
    let string = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&string)?;

    if let Some(file) = &config.api.token_file {
        let token = std::fs::read_to_string(file)?;

        config.api.token = Some(token.trim().to_owned());
    }

    Ok(config)
}

const fn default_refresh_interval() -> u64 {
    600
}

const fn default_log_level() -> log::LevelFilter {
    log::LevelFilter::Info
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let file = write("[api]\nbase_url = \"https://calendar.example.org/\"\n");

        let config = init(file.path().to_path_buf()).unwrap();

        assert_eq!(config.api.base_url.as_str(), "https://calendar.example.org/");
        assert_eq!(config.api.token, None);
        assert_eq!(config.session.path, None);
        assert_eq!(config.calendar.default_view, ViewMode::Month);
        assert_eq!(config.calendar.refresh_interval, 600);
        assert_eq!(config.log.level, log::LevelFilter::Info);
    }

    #[test]
    fn token_file_overrides_token() {
        let token = write("from-file\n");
        let file = write(&format!(
            "[api]\nbase_url = \"http://localhost:8080\"\ntoken = \"inline\"\ntoken_file = \"{}\"\n\n[calendar]\ndefault_view = \"week\"\nrefresh_interval = 30\n\n[log]\nlevel = \"debug\"\n",
            token.path().display()
        ));

        let config = init(file.path().to_path_buf()).unwrap();

        assert_eq!(config.api.token.as_deref(), Some("from-file"));
        assert_eq!(config.calendar.default_view, ViewMode::Week);
        assert_eq!(config.calendar.refresh_interval, 30);
        assert_eq!(config.log.level, log::LevelFilter::Debug);
        assert!(!format!("{:?}", config.api).contains("inline"));
    }

    #[test]
    fn unknown_views_are_rejected() {
        let file = write("[api]\nbase_url = \"http://localhost\"\n[calendar]\ndefault_view = \"quarter\"\n");

        assert!(init(file.path().to_path_buf()).is_err());
    }
}
