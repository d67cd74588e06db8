use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub agents: AgentsConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        8000
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Sqlite URL for the conversation log. Empty means "use the default
    /// file under ~/.scout"; the app resolves it at startup.
    #[serde(default)]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: String::new() }
    }
}

impl DatabaseConfig {
    /// Resolve the effective database URL, creating the data directory for
    /// the default file if needed. `SCOUT_DATABASE_URL` wins over the file.
    pub fn resolve(&self) -> anyhow::Result<String> {
        if let Ok(url) = std::env::var("SCOUT_DATABASE_URL") {
            return Ok(url);
        }
        if !self.url.is_empty() {
            return Ok(self.url.clone());
        }

        let data_dir = Config::ensure_config_dir()?;
        let db_path = data_dir.join("conversations.db");
        Ok(format!("sqlite://{}?mode=rwc", db_path.display()))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Default number of results per search call.
    #[serde(default = "SearchConfig::default_num_results")]
    pub num_results: usize,

    /// Request timeout (seconds).
    #[serde(default = "SearchConfig::default_timeout")]
    pub timeout: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_results: Self::default_num_results(),
            timeout: Self::default_timeout(),
        }
    }
}

impl SearchConfig {
    const fn default_num_results() -> usize {
        5
    }

    const fn default_timeout() -> u64 {
        10
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentsConfig {
    pub defaults: AgentDefaults,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentDefaults {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub serpapi: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<Self>(&content)?
        } else {
            Self::from_env_only()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Check that both upstream credentials are present. Called once at
    /// startup; a missing credential is a refusal to start, not a
    /// per-request error.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut missing = Vec::new();
        if self.providers.openai.api_key.is_empty() {
            missing.push("OPENAI_API_KEY");
        }
        if self.providers.serpapi.api_key.is_empty() {
            missing.push("SERP_API_KEY");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Missing required credentials: {}. Set them in {} or in the environment.",
                missing.join(", "),
                Self::config_path().map_or_else(
                    |_| "~/.scout/config.json".to_string(),
                    |p| p.display().to_string()
                )
            )
        }
    }

    fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(".scout");
        Ok(config_dir.join("config.json"))
    }

    fn from_env_only() -> Self {
        Self {
            agents: AgentsConfig {
                defaults: AgentDefaults {
                    model: "gpt-4o-mini".to_string(),
                    max_tokens: 4096,
                    temperature: 0.7,
                    history_limit: Some(20),
                },
            },
            providers: ProvidersConfig {
                openai: ProviderConfig {
                    api_key: String::new(),
                    base_url: None,
                },
                serpapi: ProviderConfig {
                    api_key: String::new(),
                    base_url: None,
                },
            },
            search: SearchConfig::default(),
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.providers.openai.api_key = key;
            }
        }
        if let Ok(key) = std::env::var("SERP_API_KEY") {
            if !key.is_empty() {
                self.providers.serpapi.api_key = key;
            }
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(".scout");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "agents": {
    "defaults": {
      "model": "gpt-4o-mini",
      "max_tokens": 4096,
      "temperature": 0.7,
      "history_limit": 20
    }
  },
  "providers": {
    "openai": {
      "api_key": "your-openai-api-key-here"
    },
    "serpapi": {
      "api_key": "your-serpapi-key-here"
    }
  },
  "search": {
    "num_results": 5,
    "timeout": 10
  },
  "database": {
    "url": ""
  },
  "server": {
    "host": "0.0.0.0",
    "port": 8000
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("   1. Edit the config file and add your OpenAI and SerpAPI keys");
        println!("      (or export OPENAI_API_KEY / SERP_API_KEY instead)");
        println!("   2. Run 'scout serve' to start the HTTP API");
        println!("   3. Or run 'scout chat -m \"your question\"' for a one-shot turn");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let json = r#"{
            "agents": {"defaults": {"model": "gpt-4o-mini", "max_tokens": 1024, "temperature": 0.5}},
            "providers": {"openai": {"api_key": "k1"}, "serpapi": {"api_key": "k2"}}
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.search.num_results, 5);
        assert!(config.database.url.is_empty());
        assert!(config.agents.defaults.history_limit.is_none());
    }

    #[test]
    fn validate_reports_all_missing_credentials() {
        let json = r#"{
            "agents": {"defaults": {"model": "gpt-4o-mini", "max_tokens": 1024, "temperature": 0.5}},
            "providers": {"openai": {"api_key": ""}, "serpapi": {"api_key": ""}}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("OPENAI_API_KEY"));
        assert!(err.contains("SERP_API_KEY"));
    }

    #[test]
    fn validate_accepts_complete_credentials() {
        let json = r#"{
            "agents": {"defaults": {"model": "gpt-4o-mini", "max_tokens": 1024, "temperature": 0.5}},
            "providers": {"openai": {"api_key": "k1"}, "serpapi": {"api_key": "k2"}}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert!(config.validate().is_ok());
    }
}
