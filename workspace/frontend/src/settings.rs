use analytics::DEFAULT_ANALYTICS_ENDPOINT;
use log::Level;
use web_sys::window;

const ENDPOINT_KEY: &str = "analytics_endpoint";
const LOG_LEVEL_KEY: &str = "analytics_log_level";

/// Global dashboard settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Path of the analytics endpoint, relative to the page origin
    pub analytics_endpoint: String,

    /// Default log level for the dashboard
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            analytics_endpoint: DEFAULT_ANALYTICS_ENDPOINT.to_string(),
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from the window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(endpoint)) = storage.get_item(ENDPOINT_KEY) {
                if !endpoint.trim().is_empty() {
                    settings.analytics_endpoint = endpoint.trim().to_string();
                }
            }

            if let Ok(Some(level)) = storage.get_item(LOG_LEVEL_KEY) {
                settings.log_level = parse_level(&level).unwrap_or(settings.log_level);
            }
        }

        settings
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
