//! Launch configuration: the option set of the launcher plus the controller list.
//!
//! A launch profile is a small TOML file:
//!
//! ```toml
//! system = "gamecube"
//! triforce = false
//! features = ["gamepadbuttons"]
//!
//! [options]
//! gamepadbuttons = "reverse_ab"
//! keyboard_layout = 1036
//! input_rumble = true
//!
//! [[controllers]]
//! player = 1
//! technology = "sdl"
//! name = "Xbox Series X Controller"
//! [controllers.inputs]
//! a = { type = "button", id = 1 }
//! ```

use crate::controller::ControllerCapability;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const PROFILE_DIR: &str = "padbind";
pub const PROFILE_FILE: &str = "profile.toml";

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse profile {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// String options and supported features of the running emulator.
///
/// Mirrors the launcher's option store: every value is a string, booleans are
/// spelled in a handful of ways, and unset options behave like empty strings.
/// Profiles may write integers, floats and booleans, they are kept as text.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct SystemOptions {
    #[serde(default, deserialize_with = "scalar_options")]
    options: BTreeMap<String, String>,
    #[serde(default)]
    features: BTreeSet<String>,
}

impl SystemOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.insert(feature.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn is_opt_set(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Value of `key`, or `""` when unset.
    pub fn get(&self, key: &str) -> &str {
        self.options.get(key).map(String::as_str).unwrap_or("")
    }

    /// Value of `key` when it is set and not empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn get_bool(&self, key: &str) -> bool {
        matches!(
            self.get(key).trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "on" | "enabled"
        )
    }

    pub fn is_feature_supported(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

fn scalar_options<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, toml::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(de::Error::custom(format!(
                        "option {} must be a string, number or boolean, got {}",
                        key,
                        other.type_str()
                    )))
                }
            };
            Ok((key, text))
        })
        .collect()
}

/// Everything one configuration pass needs from the outside.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct LaunchProfile {
    /// `gamecube`, `wii`, ...
    pub system: String,
    #[serde(default)]
    pub emulator: String,
    #[serde(default)]
    pub triforce: bool,
    #[serde(flatten)]
    pub options: SystemOptions,
    #[serde(default)]
    pub controllers: Vec<ControllerCapability>,
}

impl LaunchProfile {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        info!("Loading launch profile from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut profile = Self::parse(&content).map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Triforce builds of Dolphin are launched under their own emulator name
        if !profile.triforce && matches!(profile.emulator.as_str(), "triforce" | "dolphin-triforce") {
            debug!("Emulator {} implies triforce", profile.emulator);
            profile.triforce = true;
        }
        Ok(profile)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// `<config dir>/padbind/profile.toml`
pub fn default_profile_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| {
        warn!("Could not determine config directory, using current directory");
        PathBuf::from(".")
    });
    path.push(PROFILE_DIR);
    path.push(PROFILE_FILE);
    path
}
