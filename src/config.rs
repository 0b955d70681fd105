use color_eyre::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub worker: WorkerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Completion relay configuration. The relay holds the model key; this
/// side only needs its URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    pub url: String,
}

/// Assistant behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub system_prompt: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        // PERSONALITY: Lumi only talks beauty. Edit the prompt here to
        // retune her scope or tone.
        Self {
            system_prompt: "You are \"Lumi\", a beauty assistant that ONLY answers questions \
                about beauty products, routines, and recommendations (skincare, haircare, \
                makeup, suncare, fragrance). If asked about anything else, politely explain \
                you can only help with beauty topics. Personalize your advice: ask about \
                skin or hair type, concerns, climate, and budget when it helps. Keep answers \
                concise and step-by-step. Never make medical claims."
                .to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker: WorkerConfig {
                url: "https://your-relay.example.workers.dev/".to_string(),
            },
            assistant: AssistantConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from disk or creates default if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            // Create default config file
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Returns the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "lumi")
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.worker.url, config.worker.url);
        assert_eq!(parsed.assistant.system_prompt, config.assistant.system_prompt);
    }

    #[test]
    fn test_missing_assistant_section_uses_default_prompt() {
        let parsed: Config = toml::from_str("[worker]\nurl = \"http://localhost:8787/\"\n").unwrap();
        assert_eq!(parsed.worker.url, "http://localhost:8787/");
        assert!(parsed.assistant.system_prompt.contains("Lumi"));
    }
}
