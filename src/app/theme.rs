use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::Result;

pub const THEME_KEY: &str = "newsaura-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Durable string key-value storage for UI preferences.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// `preferences.toml` in the config dir; a flat table of strings.
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable preferences at {:?}: {}", path, e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Error reading preferences at {:?}: {}", path, e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

/// In-memory store, for tests and for running without a writable config dir.
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// Whether the terminal environment asks for a dark scheme.
///
/// `NEWSAURA_COLOR_SCHEME` wins; otherwise the background slot of
/// `COLORFGBG` ("fg;bg") is checked, where 0-6 and 8 are dark colours.
pub fn environment_prefers_dark() -> bool {
    prefers_dark_from(
        std::env::var("NEWSAURA_COLOR_SCHEME").ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    )
}

fn prefers_dark_from(scheme: Option<&str>, colorfgbg: Option<&str>) -> bool {
    if let Some(theme) = scheme.and_then(Theme::parse) {
        return theme == Theme::Dark;
    }
    colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .map(|bg| bg <= 6 || bg == 8)
        .unwrap_or(true)
}

/// Current theme plus the store it is persisted in.
pub struct ThemeState {
    theme: Theme,
    store: Box<dyn PreferenceStore>,
}

impl ThemeState {
    /// Stored preference first, then the environment.
    pub fn load(store: Box<dyn PreferenceStore>, env_prefers_dark: bool) -> Self {
        let theme = store
            .get(THEME_KEY)
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or(if env_prefers_dark { Theme::Dark } else { Theme::Light });
        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn toggle(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        tracing::info!("Theme switched to {}", self.theme.as_str());
        self.store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    pub fn stored(&self) -> Option<String> {
        self.store.get(THEME_KEY)
    }
}
