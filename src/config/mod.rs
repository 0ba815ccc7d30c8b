use dirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const BACKEND_URL_ENV: &str = "RELAY_BACKEND_URL";
pub const POKEAPI_URL_ENV: &str = "RELAY_POKEAPI_URL";

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub pokeapi: PokeApiConfig,
    pub preferences: PreferencesConfig,
}

/// The CSV / weather server the `get`, `stats` and `weather` commands talk to.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Request timeout. Unset means requests may hang indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct PokeApiConfig {
    pub base_url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct PreferencesConfig {
    pub verbose: bool,
    pub color: bool,
    /// Print accessible labels instead of styled output.
    pub accessible: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3232/".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2/pokemon/".to_string(),
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
            accessible: false,
        }
    }
}

impl Config {
    /// Apply overrides from a variable lookup, normally `std::env::var`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            self.backend.base_url = url;
        }
        if let Some(url) = lookup(POKEAPI_URL_ENV) {
            self.pokeapi.base_url = url;
        }
    }
}

pub struct ConfigManager;

impl ConfigManager {
    pub fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir()
            .ok_or("Could not find config directory")?
            .join("relay");

        fs::create_dir_all(&config_dir)?;
        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file (defaults when absent) and apply environment overrides.
    pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        Self::save_to(config, &Self::config_path()?)
    }

    pub fn save_to(config: &Config, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let toml_string = toml::to_string_pretty(config)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    pub fn init_config() -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            println!("Configuration file already exists at: {}", config_path.display());
            return Ok(());
        }

        Self::save_to(&Config::default(), &config_path)?;

        println!("✅ Configuration initialized at: {}", config_path.display());
        println!("📝 Point the REPL at your CSV/weather server with:");
        println!("   relay config set backend.base_url http://localhost:3232/");

        Ok(())
    }

    /// Update one dotted key in `config`. Values are parsed to the field's type.
    pub fn set_value(config: &mut Config, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        match key {
            "backend.base_url" => config.backend.base_url = value.to_string(),
            "backend.timeout_secs" => {
                config.backend.timeout_secs = match value {
                    "" | "none" => None,
                    secs => Some(secs.parse()?),
                }
            }
            "pokeapi.base_url" => config.pokeapi.base_url = value.to_string(),
            "preferences.verbose" => config.preferences.verbose = value.parse()?,
            "preferences.color" => config.preferences.color = value.parse()?,
            "preferences.accessible" => config.preferences.accessible = value.parse()?,
            _ => return Err(format!("Unknown config key: {}", key).into()),
        }
        Ok(())
    }

    pub fn set_config_value(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;

        Self::set_value(&mut config, key, value)?;

        Self::save_to(&config, &config_path)?;
        println!("✅ Updated {}: {}", key, value);
        Ok(())
    }

    /// Both service URLs must be absolute http(s) URLs.
    pub fn check(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        for (key, url) in [
            ("backend.base_url", &config.backend.base_url),
            ("pokeapi.base_url", &config.pokeapi.base_url),
        ] {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| format!("{} '{}' is not a valid URL: {}", key, url, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!("{} '{}' must use http or https", key, url).into());
            }
        }
        Ok(())
    }

    pub fn validate_config() -> Result<(), Box<dyn std::error::Error>> {
        let config = Self::load_config()?;

        match Self::check(&config) {
            Ok(()) => {
                println!("✅ Configuration is valid");
                println!("🔧 Backend: {}", config.backend.base_url);
                println!("🔧 PokeAPI: {}", config.pokeapi.base_url);
                Ok(())
            }
            Err(e) => {
                println!("❌ {}", e);
                println!("💡 Fix it with: relay config set <key> <url>");
                Err(e)
            }
        }
    }
}
