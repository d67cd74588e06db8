use scout_config::Config;

use super::CommandStrategy;

/// Strategy for initializing the configuration file.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, (): Self::Input) -> anyhow::Result<()> {
        Config::create_config()
    }
}
