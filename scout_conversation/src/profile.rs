use crate::prompts;

/// Static description of one agent specialization: the prompt the
/// responder is built with and the canned overview prompt for its landing
/// page. The specializations differ in nothing else.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub name: &'static str,
    pub instructions: &'static str,
    pub summary_prompt: &'static str,
}

impl AgentProfile {
    #[must_use]
    pub const fn general() -> Self {
        Self {
            name: "scout",
            instructions: prompts::GENERAL_INSTRUCTIONS,
            summary_prompt: prompts::GENERAL_SUMMARY_PROMPT,
        }
    }

    #[must_use]
    pub const fn sports() -> Self {
        Self {
            name: "scout-sports",
            instructions: prompts::SPORTS_INSTRUCTIONS,
            summary_prompt: prompts::SPORTS_SUMMARY_PROMPT,
        }
    }

    #[must_use]
    pub const fn finance() -> Self {
        Self {
            name: "scout-finance",
            instructions: prompts::FINANCE_INSTRUCTIONS,
            summary_prompt: prompts::FINANCE_SUMMARY_PROMPT,
        }
    }
}
