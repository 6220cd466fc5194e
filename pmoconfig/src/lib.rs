//! # PMOTube Configuration Module
//!
//! This module provides configuration management for PMOTube, including:
//! - Loading configuration from YAML files
//! - Merging with embedded default configuration
//! - Environment variable overrides
//! - Type-safe getters and setters for configuration values
//! - Thread-safe singleton access pattern
//!
//! ## Usage
//!
//! ```no_run
//! use pmoconfig::get_config;
//!
//! // Get the global configuration
//! let config = get_config();
//!
//! // Access configuration values
//! let level = config.get_log_min_level()?;
//!
//! // Update configuration values
//! config.set_log_min_level("DEBUG".to_string())?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Domain specific accessors (YouTube credentials, synchronisation plan) are
//! provided by extension traits in the crates that own those concerns.

use anyhow::{anyhow, Result};
use dirs::home_dir;
use lazy_static::lazy_static;
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::{debug, info};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("pmotube.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> =
        Arc::new(Config::load_config("").expect("Failed to load PMOTube configuration"));
}

const ENV_CONFIG_DIR: &str = "PMOTUBE_CONFIG";
const ENV_PREFIX: &str = "PMOTUBE_CONFIG__";

/// Historical environment variable names, mapped onto their configuration path.
///
/// These are applied before the `PMOTUBE_CONFIG__` overrides, so the prefixed
/// form wins when both are set.
const ENV_ALIASES: &[(&str, &[&str])] = &[
    ("TARGET_PLAYLIST_ID", &["sync", "target_playlist"]),
    ("SOURCE_PLAYLIST_IDS", &["sync", "source_playlists"]),
    ("YOUTUBE_OAUTH_CLIENT_ID", &["accounts", "youtube", "client_id"]),
    (
        "YOUTUBE_OAUTH_CLIENT_SECRET",
        &["accounts", "youtube", "client_secret"],
    ),
    (
        "YOUTUBE_OAUTH_REFRESH_TOKEN",
        &["accounts", "youtube", "refresh_token"],
    ),
];

// Default values for configuration
const DEFAULT_LOG_MIN_LEVEL: &str = "INFO";

/// Macro to generate getter/setter for bool values with default
macro_rules! impl_bool_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> Result<bool> {
            match self.get_value($path) {
                Ok(Value::Bool(b)) => Ok(b),
                _ => Ok($default),
            }
        }

        pub fn $setter(&self, value: bool) -> Result<()> {
            self.set_value($path, Value::Bool(value))
        }
    };
}

/// Macro to generate getter/setter for string list values
macro_rules! impl_string_list_config {
    ($getter:ident, $setter:ident, $path:expr) => {
        pub fn $getter(&self) -> Result<Vec<String>> {
            match self.get_value($path) {
                Ok(value) => Ok(Self::string_list(&value)),
                Err(_) => Ok(Vec::new()),
            }
        }

        pub fn $setter(&self, values: &[String]) -> Result<()> {
            let seq = values.iter().cloned().map(Value::String).collect();
            self.set_value($path, Value::Sequence(seq))
        }
    };
}

/// Configuration manager for PMOTube
///
/// Two YAML trees are kept side by side:
/// - the *file* layer (defaults merged with `config.yaml`), which is what
///   [`Config::save`] writes back;
/// - the *effective* layer, which additionally carries environment overrides.
///
/// Environment overrides are never persisted, so credentials passed through the
/// environment do not end up in `config.yaml`.
///
/// # Examples
///
/// ```no_run
/// use pmoconfig::get_config;
///
/// let config = get_config();
/// println!("Log level: {}", config.get_log_min_level()?);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct Config {
    config_dir: String,
    path: String,
    file_data: Mutex<Value>,
    data: Mutex<Value>,
}

// Implémentation manuelle de Clone
impl Clone for Config {
    fn clone(&self) -> Self {
        let file_data = self.file_data.lock().unwrap().clone();
        let data = self.data.lock().unwrap().clone();
        Self {
            config_dir: self.config_dir.clone(),
            path: self.path.clone(),
            file_data: Mutex::new(file_data),
            data: Mutex::new(data),
        }
    }
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> String {
        // 1. Try provided directory
        if !directory.is_empty() {
            return directory.to_string();
        }

        // 2. Try environment variable
        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var=ENV_CONFIG_DIR, path=%env_path, "Trying to load config from env");
            return env_path;
        }

        // 3. Try current directory
        if Path::new(".pmotube").exists() {
            return ".pmotube".to_string();
        }

        // 4. Try home directory
        if let Some(home) = home_dir() {
            let home_config = home.join(".pmotube");
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        // Default fallback
        ".pmotube".to_string()
    }

    /// Validates and prepares a config directory
    fn validate_config_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        if !path.is_dir() {
            return Err(anyhow!(
                "Config path {} is not a directory",
                path.display()
            ));
        }

        // Test read permission
        fs::read_dir(path)?;

        Ok(())
    }

    /// Determines and validates the configuration directory
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory` parameter if not empty
    /// 2. The `PMOTUBE_CONFIG` environment variable
    /// 3. `.pmotube` in the current directory
    /// 4. `.pmotube` in the user's home directory
    ///
    /// The directory is created if it doesn't exist.
    pub fn config_dir(directory: &str) -> Result<String> {
        let dir_path = Self::find_config_dir(directory);
        Self::validate_config_dir(Path::new(&dir_path))?;
        Ok(dir_path)
    }

    /// Loads the configuration from the specified directory
    ///
    /// This method:
    /// 1. Determines the configuration directory
    /// 2. Loads the default embedded configuration
    /// 3. Merges it with the external config.yaml file if present
    /// 4. Writes a config.yaml template if none exists yet
    /// 5. Applies environment variable overrides (effective layer only)
    ///
    /// # Arguments
    ///
    /// * `directory` - The directory containing the config.yaml file, or empty to use defaults
    pub fn load_config(directory: &str) -> Result<Self> {
        let vars: Vec<(String, String)> = env::vars().collect();
        Self::load_config_with_env(directory, vars)
    }

    /// Same as [`Config::load_config`] with an explicit environment
    pub fn load_config_with_env<I>(directory: &str, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config_dir = Self::config_dir(directory)?;
        info!(config_dir=%config_dir, "Using config directory");

        let config_file_path = Path::new(&config_dir).join("config.yaml");
        let path = config_file_path.to_string_lossy().to_string();

        let mut file_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        let file_exists = match fs::read(&path) {
            Ok(yaml_data) => {
                info!(config_file=%path, "Loaded config file");
                let external_value: Value = serde_yaml::from_slice(&yaml_data)?;
                merge_yaml(&mut file_value, &Self::lower_keys_value(external_value));
                true
            }
            Err(_) => {
                info!(config_file=%path, "Config file not found, using default embedded config");
                false
            }
        };
        let file_value = Self::lower_keys_value(file_value);

        let mut effective = file_value.clone();
        Self::apply_env_overrides(&mut effective, vars);

        let config = Config {
            config_dir,
            path,
            file_data: Mutex::new(file_value),
            data: Mutex::new(effective),
        };

        if !file_exists {
            config.save()?;
        }
        Ok(config)
    }

    /// Returns the directory this configuration was loaded from
    pub fn directory(&self) -> &str {
        &self.config_dir
    }

    /// Saves the file layer of the configuration to the config.yaml file
    pub fn save(&self) -> Result<()> {
        let data = self.file_data.lock().unwrap();
        let yaml = serde_yaml::to_string(&*data)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Sets a configuration value at the specified path and saves it
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["sync", "dry_run"]`)
    /// * `value` - The YAML value to set
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        {
            let mut data = self.data.lock().unwrap();
            Self::set_value_internal(&mut data, path, value.clone())?;
        }
        {
            let mut file_data = self.file_data.lock().unwrap();
            Self::set_value_internal(&mut file_data, path, value)?;
        }
        self.save()
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key = path[0].to_lowercase();
            let key_value = Value::String(key.clone());
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    /// Gets a configuration value at the specified path
    ///
    /// Returns an error if the path doesn't exist.
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data.lock().unwrap();
        Self::get_value_internal(&data, path)
    }

    fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
        let mut current = data;
        for (i, key) in path.iter().enumerate() {
            if let Value::Mapping(map) = current {
                let key = key.to_lowercase();

                if let Some(next) = map.get(&Value::String(key)) {
                    current = next;
                } else {
                    return Err(anyhow!("Path {} does not exist", path[..=i].join(".")));
                }
            } else {
                return Err(anyhow!("Path {} is not a Config", path[..i].join(".")));
            }
        }
        Ok(current.clone())
    }

    /// Gets a non-empty string value, `None` when unset, empty or not a string
    pub fn get_string(&self, path: &[&str]) -> Option<String> {
        match self.get_value(path) {
            Ok(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Ok(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Sets a string value
    pub fn set_string(&self, path: &[&str], value: &str) -> Result<()> {
        self.set_value(path, Value::String(value.to_string()))
    }

    /// Interprets a YAML value as a list of strings
    ///
    /// A single string is read as a one-element list, so
    /// `SOURCE_PLAYLIST_IDS=PL123` behaves like `SOURCE_PLAYLIST_IDS=["PL123"]`.
    fn string_list(value: &Value) -> Vec<String> {
        match value {
            Value::Sequence(seq) => seq
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Value::String(s) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        }
    }

    fn apply_env_overrides<I>(config: &mut Value, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        for (name, path) in ENV_ALIASES {
            if let Some((_, value)) = vars.iter().find(|(key, _)| key == name) {
                debug!(env_var = name, "Applying configuration alias");
                let _ = Self::set_value_internal(config, path, Self::convert_env_value(value));
            }
        }

        for (key, value) in &vars {
            if key.starts_with(ENV_PREFIX) {
                let key_path = key
                    .trim_start_matches(ENV_PREFIX)
                    .split("__")
                    .collect::<Vec<_>>();
                let yaml_value = Self::convert_env_value(value);
                let _ = Self::set_value_internal(config, &key_path, yaml_value);
            }
        }
    }

    fn convert_env_value(value: &str) -> Value {
        if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
            return parsed;
        }
        Value::String(value.to_string())
    }

    fn lower_keys_value(value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut new_map = Mapping::new();
                for (k, v) in map {
                    if let Value::String(s) = k {
                        let new_key = Value::String(s.to_lowercase());
                        let new_val = Self::lower_keys_value(v);
                        new_map.insert(new_key, new_val);
                    } else {
                        new_map.insert(k, Self::lower_keys_value(v));
                    }
                }
                Value::Mapping(new_map)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Self::lower_keys_value).collect())
            }
            _ => value,
        }
    }

    impl_bool_config!(
        get_sync_dry_run,
        set_sync_dry_run,
        &["sync", "dry_run"],
        false
    );

    impl_string_list_config!(
        get_sync_source_playlists,
        set_sync_source_playlists,
        &["sync", "source_playlists"]
    );

    impl_string_list_config!(
        get_sync_unavailable_markers,
        set_sync_unavailable_markers,
        &["sync", "unavailable_markers"]
    );

    /// Récupère le niveau de log minimum depuis la configuration
    pub fn get_log_min_level(&self) -> Result<String> {
        match self.get_value(&["host", "logger", "min_level"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_LOG_MIN_LEVEL.to_string()),
        }
    }

    /// Définit le niveau de log minimum dans la configuration
    pub fn set_log_min_level(&self, level: String) -> Result<()> {
        self.set_value(&["host", "logger", "min_level"], Value::String(level))
    }
}

/// Returns the global configuration instance
///
/// The instance is lazily loaded on first access, from the directory resolved
/// by [`Config::config_dir`].
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

/// Merges external YAML configuration into default configuration
///
/// - For mappings (objects), it merges keys from external into default
/// - For scalars and sequences, external values replace default values
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(), // pour les scalaires ou séquences, on remplace
    }
}
