//! Application configuration. API credentials, endpoints, storage paths.
//!
//! Resolved once at startup by [`AppConfig::load`]; components receive the
//! explicit [`ChatConfig`] / [`GeocodeConfig`] structs derived from it.

use serde::Deserialize;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Output ceiling of the flash models; avoids MAX_TOKENS truncation.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

pub const DEFAULT_LOCATIONIQ_URL: &str = "https://us1.locationiq.com/v1/search.php";
pub const DEFAULT_REVERSE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Listen address for the HTTP server. Read from TRIP_PLANNER_BIND_ADDR.
    #[serde(default)]
    pub bind_addr: Option<String>,

    /// Directory holding `locations.json`. Read from TRIP_PLANNER_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Chat (Gemini) Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Gemini API key. Read from GEMINI_API_KEY.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Model identifier override. Read from GEMINI_MODEL.
    #[serde(default)]
    pub gemini_model: Option<String>,

    /// API base URL override (tests, proxies). Read from TRIP_PLANNER_GEMINI_API_BASE.
    #[serde(default)]
    pub gemini_api_base: Option<String>,

    /// Attach the google_search grounding tool. Read from TRIP_PLANNER_SEARCH_GROUNDING.
    #[serde(default)]
    pub search_grounding: Option<bool>,

    /// Retry once with the alternate model spelling on 404. Read from TRIP_PLANNER_MODEL_FALLBACK.
    #[serde(default)]
    pub model_fallback: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Geocoding Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// LocationIQ key for forward geocoding. Read from LOCATIONIQ_KEY.
    #[serde(default)]
    pub locationiq_key: Option<String>,

    /// Google Maps key for reverse geocoding. Read from GOOGLE_MAPS_API_KEY.
    #[serde(default)]
    pub google_maps_api_key: Option<String>,
}

/// Everything the chat proxy needs. A missing `api_key` is a valid state; the
/// proxy reports it per request without touching the network.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub search_grounding: bool,
    pub model_fallback: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            search_grounding: true,
            model_fallback: false,
        }
    }
}

/// Keys and endpoints for the geocoding adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeConfig {
    pub locationiq_key: Option<String>,
    pub locationiq_url: String,
    pub google_maps_api_key: Option<String>,
    pub reverse_geocode_url: String,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            locationiq_key: None,
            locationiq_url: DEFAULT_LOCATIONIQ_URL.to_string(),
            google_maps_api_key: None,
            reverse_geocode_url: DEFAULT_REVERSE_GEOCODE_URL.to_string(),
        }
    }
}

/// Non-empty env var or None.
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TRIP_PLANNER"));
        if let Ok(path) = std::env::var("TRIP_PLANNER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Provider keys keep their conventional names (no TRIP_PLANNER_ prefix)
        if let Some(key) = env_nonempty("GEMINI_API_KEY") {
            cfg.gemini_api_key = Some(key);
        }
        if let Some(model) = env_nonempty("GEMINI_MODEL") {
            cfg.gemini_model = Some(model);
        }
        if let Some(key) = env_nonempty("LOCATIONIQ_KEY") {
            cfg.locationiq_key = Some(key);
        }
        if let Some(key) = env_nonempty("GOOGLE_MAPS_API_KEY") {
            cfg.google_maps_api_key = Some(key);
        }
        Ok(cfg)
    }

    pub fn bind_addr_or_default(&self) -> String {
        self.bind_addr
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
    }

    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns true if the chat proxy has an API key.
    pub fn is_chat_configured(&self) -> bool {
        self.chat_config().api_key.is_some()
    }

    pub fn chat_config(&self) -> ChatConfig {
        let defaults = ChatConfig::default();
        ChatConfig {
            api_key: self
                .gemini_api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
            model: self
                .gemini_model
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.model),
            api_base: self
                .gemini_api_base
                .clone()
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            search_grounding: self.search_grounding.unwrap_or(defaults.search_grounding),
            model_fallback: self.model_fallback.unwrap_or(defaults.model_fallback),
            ..defaults
        }
    }

    pub fn geocode_config(&self) -> GeocodeConfig {
        GeocodeConfig {
            locationiq_key: self.locationiq_key.clone().filter(|k| !k.trim().is_empty()),
            google_maps_api_key: self
                .google_maps_api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
            ..GeocodeConfig::default()
        }
    }
}
