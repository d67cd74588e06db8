use scout_core::SearchProvider;
use scout_search::SearchKind;

use super::{CommandStrategy, build_search};
use scout_config::Config;

/// Input parameters for the Search command strategy.
#[derive(Debug, Clone)]
pub struct SearchInput {
    /// Search query
    pub query: String,
    /// Number of results to fetch
    pub num_results: usize,
}

/// Strategy for running a direct web search, bypassing the responder.
/// Useful for checking the SerpAPI credential and result quality.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy;

impl CommandStrategy for SearchStrategy {
    type Input = SearchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        config.validate()?;

        let search = build_search(&config, SearchKind::Web)?;
        let results = search.search(&input.query, input.num_results).await?;

        if results.is_empty() {
            println!("No search results found.");
            return Ok(());
        }

        for (i, result) in results.iter().enumerate() {
            println!("{}. {}", i + 1, result.title);
            println!("   {}", result.url);
            if !result.snippet.is_empty() {
                println!("   {}", result.snippet);
            }
            println!();
        }

        Ok(())
    }
}
