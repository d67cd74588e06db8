use scout_conversation::AgentProfile;
use scout_search::SearchKind;
use tracing::info;

use super::{CommandStrategy, build_orchestrator, init_common_components};

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// The message to send
    pub message: String,
    /// Conversation to continue (new one if omitted)
    pub thread: Option<String>,
    /// Agent specialization name
    pub agent: String,
}

/// Strategy for executing one chat turn from the command line.
///
/// Resuming a thread replays its durable history into the responder, so a
/// follow-up `-t <id>` behaves exactly like the HTTP surface.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

fn profile_for(agent: &str) -> anyhow::Result<(AgentProfile, SearchKind)> {
    match agent {
        "general" => Ok((AgentProfile::general(), SearchKind::Web)),
        "sports" => Ok((AgentProfile::sports(), SearchKind::Sports)),
        "finance" => Ok((AgentProfile::finance(), SearchKind::Finance)),
        other => anyhow::bail!("Unknown agent: {other} (expected general, sports, or finance)"),
    }
}

impl CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let (profile, kind) = profile_for(&input.agent)?;
        let common = init_common_components().await?;

        let orchestrator =
            build_orchestrator(&common.config, profile, kind, common.registry.clone())?;

        info!("Running chat turn (agent: {})", input.agent);
        let turn = orchestrator.chat(input.thread, &input.message).await?;

        println!("{}", turn.answer.summary);
        if !turn.answer.sources.is_empty() {
            println!();
            println!("Explore more:");
            for source in &turn.answer.sources {
                println!("  - {} <{}>", source.title, source.url);
            }
        }
        println!();
        println!("(thread: {})", turn.conversation_id);

        Ok(())
    }
}
