#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::RendererName;
use crate::domain::services::PanelSide;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

pub const DEFAULT_DIRECTIONS_URL: &str = "https://polaris-backend-mauve.vercel.app/api/directions";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    DirectionsURL,
    GeolocationTimeout,
    Location,
    PanelSide,
    PanelWidth,
    Renderer,
    TravelMode,
    Username,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default_config_path() -> path::PathBuf {
        #[cfg(not(target_os = "macos"))]
        let config_dir = dirs::config_dir().unwrap_or_default();
        #[cfg(target_os = "macos")]
        let config_dir = path::PathBuf::from(env::var("HOME").unwrap_or_default()).join(".config");

        return config_dir.join("polaris/config.toml");
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "traveler".to_string();
            }

            return user;
        }

        if key == ConfigKey::ConfigFile {
            return Config::default_config_path().to_string_lossy().to_string();
        }

        let default_renderer = RendererName::Terminal.to_string();
        let default_panel_side = PanelSide::Right.to_string();

        let res = match key {
            ConfigKey::DirectionsURL => DEFAULT_DIRECTIONS_URL,
            ConfigKey::GeolocationTimeout => "5000",
            ConfigKey::Location => "",
            ConfigKey::PanelSide => &default_panel_side,
            ConfigKey::PanelWidth => "400",
            ConfigKey::Renderer => &default_renderer,
            ConfigKey::TravelMode => "driving",

            // Special
            ConfigKey::ConfigFile => "",
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    pub fn get_number(key: ConfigKey) -> Result<u64> {
        return Config::parse_number(key, &Config::get(key));
    }

    /// Parses a numeric setting, naming the key when the value is unusable.
    pub fn parse_number(key: ConfigKey, val: &str) -> Result<u64> {
        if let Ok(num) = val.trim().parse::<u64>() {
            return Ok(num);
        }

        bail!(format!("Config key '{key}' must be a whole number, got \"{val}\""))
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                let val = match doc.get(&key.to_string()) {
                    Some(val) => val,
                    None => continue,
                };

                // Use clap value parsers to do validation.
                let possible_values = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    .map(|arg| {
                        return arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    })
                    .unwrap_or_default();

                if let Some(val_int) = val.as_integer() {
                    Config::set(key, &val_int.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    if !possible_values.is_empty()
                        && !possible_values.contains(&val_str.to_string())
                    {
                        bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                    }
                    Config::set(key, val_str);
                } else {
                    bail!(format!(
                        "config.toml has an invalid value for key '{key}': expected a string or integer"
                    ));
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            directions_url = Config::get(ConfigKey::DirectionsURL),
            geolocation_timeout = Config::get(ConfigKey::GeolocationTimeout),
            location = Config::get(ConfigKey::Location),
            panel_side = Config::get(ConfigKey::PanelSide),
            panel_width = Config::get(ConfigKey::PanelWidth),
            renderer = Config::get(ConfigKey::Renderer),
            travel_mode = Config::get(ConfigKey::TravelMode),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Name used when greeting you in the chat.\n# username = \"\"".to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
