use scout_config::Config;

use super::CommandStrategy;

/// Strategy for displaying configuration information: masked credentials,
/// database location, agent defaults, and server binding.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, (): Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== scout Configuration ===\n");

        println!("API Keys:");
        println!("  OpenAI:  {}", mask_key(&config.providers.openai.api_key));
        println!("  SerpAPI: {}", mask_key(&config.providers.serpapi.api_key));
        println!();

        println!("Database:");
        println!("  URL: {}", config.database.resolve()?);
        println!();

        println!("Agent Defaults:");
        println!("  Model: {}", config.agents.defaults.model);
        println!("  Max Tokens: {}", config.agents.defaults.max_tokens);
        println!("  Temperature: {}", config.agents.defaults.temperature);
        if let Some(limit) = config.agents.defaults.history_limit {
            println!("  History Limit: {limit}");
        }
        println!();

        println!("Search:");
        println!("  Results per query: {}", config.search.num_results);
        println!("  Timeout: {}s", config.search.timeout);
        println!();

        println!("Server:");
        println!("  Bind: {}:{}", config.server.host, config.server.port);

        Ok(())
    }
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        "(not set)".to_string()
    } else if key.len() > 8 {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_keys_without_leaking() {
        assert_eq!(mask_key(""), "(not set)");
        assert_eq!(mask_key("short"), "***");

        let masked = mask_key("sk-abcdefghijklmnop");
        assert_eq!(masked, "sk-a...mnop");
        assert!(!masked.contains("bcdefghijkl"));
    }
}
