use std::{fs, path::PathBuf};

use common::prelude::{PagePath, Wiki, WikiConfig};
use common::store::FsPageStore;
use common::wiki::{WikiError, DEFAULT_FRONT_PAGE};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "wikitree";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const PAGES_DIR_NAME: &str = "pages";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the page tree lives (defaults to <wikitree dir>/pages)
    #[serde(default)]
    pub pages_dir: Option<PathBuf>,
    /// Reserved entry page that can never be renamed or moved
    #[serde(default = "default_front_page")]
    pub front_page: String,
    /// Default log directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write daily-rolling logs here when set
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_front_page() -> String {
    DEFAULT_FRONT_PAGE.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pages_dir: None,
            front_page: default_front_page(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn wiki_config(&self) -> WikiConfig {
        WikiConfig {
            front_page: self.front_page.clone(),
        }
    }

    /// Parsed log level, falling back to `warn` on garbage
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the wikitree directory (~/.wikitree)
    pub wikitree_dir: PathBuf,
    /// Path to the page tree
    pub pages_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the wikitree directory path (custom or default ~/.wikitree)
    pub fn wikitree_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    fn pages_path(wikitree_dir: &std::path::Path, config: &AppConfig) -> PathBuf {
        config
            .pages_dir
            .clone()
            .unwrap_or_else(|| wikitree_dir.join(PAGES_DIR_NAME))
    }

    /// Initialize a new wikitree state directory, seeding the front page
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let wikitree_dir = Self::wikitree_dir(custom_path)?;

        if wikitree_dir.join(CONFIG_FILE_NAME).exists() {
            return Err(StateError::AlreadyInitialized);
        }

        // reject a bad front page before anything hits the disk
        let config = config.unwrap_or_default();
        let front_page = PagePath::from_names([config.front_page.clone()])?;

        fs::create_dir_all(&wikitree_dir)?;

        let config_path = wikitree_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        let pages_path = Self::pages_path(&wikitree_dir, &config);
        let state = Self {
            wikitree_dir,
            pages_path,
            config_path,
            config,
        };

        let wiki = state.wiki()?;
        if !wiki.exists(&front_page)? {
            wiki.add(&front_page, "")?;
        }

        Ok(state)
    }

    /// Load existing state from the wikitree directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let wikitree_dir = Self::wikitree_dir(custom_path)?;

        if !wikitree_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = wikitree_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;
        PagePath::from_names([config.front_page.clone()])?;

        let pages_path = Self::pages_path(&wikitree_dir, &config);
        if !pages_path.is_dir() {
            return Err(StateError::MissingFile(pages_path.display().to_string()));
        }

        Ok(Self {
            wikitree_dir,
            pages_path,
            config_path,
            config,
        })
    }

    /// Open the page tree this state points at
    pub fn wiki(&self) -> Result<Wiki<FsPageStore>, StateError> {
        Ok(Wiki::open(&self.pages_path, self.config.wiki_config())?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("wikitree directory not initialized. Run 'wikitree init' first")]
    NotInitialized,

    #[error("wikitree directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid front page name: {0}")]
    FrontPage(#[from] common::page::PathError),

    #[error("wiki error: {0}")]
    Wiki(#[from] WikiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
