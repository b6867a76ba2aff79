use crate::error::{HiveOpsError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub beekeeper: BeekeeperConfig,
}

/// The beekeeper whose hives, products and recommendations this install manages.
#[derive(Clone, Deserialize, Serialize)]
pub struct BeekeeperConfig {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

impl std::fmt::Debug for BeekeeperConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeekeeperConfig")
            .field("username", &self.username)
            .field("email", &self.email.as_ref().map(|_| "[REDACTED]"))
            .field("first_name", &self.first_name)
            .finish()
    }
}

impl BeekeeperConfig {
    /// Name used when greeting the beekeeper; falls back to the username.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.username)
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(HiveOpsError::Config(format!(
                "Config file not found at {:?}. Run `hiveops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HiveOpsError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::debug!(path = %config_path.display(), "Configuration loaded");
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HiveOpsError::Config(format!("Failed to parse config: {}", e)))?;

        if config.beekeeper.username.trim().is_empty() {
            return Err(HiveOpsError::Config(
                "beekeeper.username must not be empty".into(),
            ));
        }

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        if default_path.exists() {
            tracing::debug!(path = %default_path.display(), "Using XDG config");
        }
        Ok(default_path)
    }

    /// Default path for writing new config files (~/.config/hiveops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HiveOpsError::Config("Cannot determine config directory".into()))?
            .join("hiveops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to `target`, or the
    /// default path when none is given.
    pub fn setup_interactive(target: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up HiveOps!");
        println!();

        println!("Beekeeper");
        let username: String = Input::new()
            .with_prompt("  Username")
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("Username is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(|e| HiveOpsError::Config(format!("Input error: {}", e)))?;

        let first_name: String = Input::new()
            .with_prompt("  First name (optional)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HiveOpsError::Config(format!("Input error: {}", e)))?;

        let email: String = Input::new()
            .with_prompt("  Email (optional)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HiveOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        let optional = |s: String| {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        };

        let config = Config {
            beekeeper: BeekeeperConfig {
                username: username.trim().to_string(),
                email: optional(email),
                first_name: optional(first_name),
            },
        };

        let config_path = match target {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| HiveOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# HiveOps Configuration\n# Generated by `hiveops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| HiveOpsError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            match std::env::var(var_name) {
                Ok(value) => result = result.replace(placeholder, &value),
                Err(_) => tracing::warn!(var = var_name, "Config references unset variable"),
            }
        }

        Ok(result)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("HIVEOPS_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| HiveOpsError::Config("Cannot determine data directory".into()))?
            .join("hiveops");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("hiveops.db"))
    }
}
