//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`. Shared component bootstrap lives here so every
//! strategy builds the stack the same way: config → store → registry →
//! search → responder → orchestrator.

use scout_config::Config;
use scout_conversation::{AgentProfile, Orchestrator};
use scout_core::{Responder, SearchProvider, SessionStorage};
use scout_providers::OpenAiResponder;
use scout_search::{SearchKind, SerpApiClient};
use scout_server::state::AppState;
use scout_session::{SessionRegistry, SqliteSessionStore};
use std::sync::Arc;
use tracing::info;

mod chat;
mod info;
mod init;
mod search;
mod serve;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use search::{SearchInput, SearchStrategy};
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via an associated type; all
/// calls are monomorphized at compile time.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Shared state every command needs: validated config plus the session
/// registry over the durable store.
pub struct CommonComponents {
    pub config: Config,
    pub registry: Arc<SessionRegistry>,
}

/// Load and validate config, open the store, build the registry.
/// A missing credential fails here, before any request is taken.
pub async fn init_common_components() -> anyhow::Result<CommonComponents> {
    let config = Config::load()?;
    config.validate()?;

    let db_url = config.database.resolve()?;
    info!("Database: {}", db_url);

    let store = SqliteSessionStore::new(&db_url).await?;
    let registry = Arc::new(SessionRegistry::new(
        Arc::new(store) as Arc<dyn SessionStorage>
    ));

    Ok(CommonComponents { config, registry })
}

fn build_search(config: &Config, kind: SearchKind) -> anyhow::Result<Arc<dyn SearchProvider>> {
    let client = SerpApiClient::new(
        config.providers.serpapi.api_key.clone(),
        config.search.timeout,
    )?
    .with_kind(kind);

    Ok(Arc::new(client))
}

/// One orchestrator: profile-specific responder over the shared registry.
fn build_orchestrator(
    config: &Config,
    profile: AgentProfile,
    kind: SearchKind,
    registry: Arc<SessionRegistry>,
) -> anyhow::Result<Arc<Orchestrator>> {
    let search = build_search(config, kind)?;

    let mut responder = OpenAiResponder::new(
        config.providers.openai.api_key.clone(),
        config.agents.defaults.model.clone(),
        profile.instructions.to_string(),
        search,
    )
    .with_num_results(config.search.num_results);

    if let Some(base_url) = &config.providers.openai.base_url {
        responder = responder.with_base_url(base_url.clone());
    }

    Ok(Arc::new(Orchestrator::new(
        profile,
        Arc::new(responder) as Arc<dyn Responder>,
        registry,
    )))
}

/// The full HTTP application state: three orchestrator bindings sharing
/// one registry, plus the plain web search client for `/search`.
pub fn build_app_state(
    config: &Config,
    registry: &Arc<SessionRegistry>,
) -> anyhow::Result<AppState> {
    Ok(AppState::new(
        build_orchestrator(
            config,
            AgentProfile::general(),
            SearchKind::Web,
            registry.clone(),
        )?,
        build_orchestrator(
            config,
            AgentProfile::sports(),
            SearchKind::Sports,
            registry.clone(),
        )?,
        build_orchestrator(
            config,
            AgentProfile::finance(),
            SearchKind::Finance,
            registry.clone(),
        )?,
        build_search(config, SearchKind::Web)?,
    ))
}
