//! MessageRouter: classify a chat message, dispatch it to a response generator,
//! and always come back with a non-empty assistant turn.
//!
//! Flow:
//! 1. Reject messages shorter than `MIN_MESSAGE_CHARS` with a rephrase prompt.
//! 2. Classify: keyword tier first, one inference call only if no keyword matches.
//! 3. Dispatch on intent (résumé, salary, jobs, plan, menu).
//! 4. Inference failures become a local fallback. A panic is caught by the chat
//!    handler and answered with `UNAVAILABLE`.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db;
use crate::llm_client::prompts::{reply_prompt, CLASSIFY_PROMPT_TEMPLATE, HISTORY_WINDOW};
use crate::llm_client::{GenerationParams, LlmError, TextGenerator};
use crate::mentor::intent::Intent;
use crate::mentor::keywords::NormalizedMessage;
use crate::mentor::responses::{
    local_fallback, render_jobs, render_plan, render_resume, render_salary, SalaryDetail,
    HELP_MENU, REPHRASE_PROMPT,
};
use crate::mentor::stacks::{StackCatalog, TechStack};
use crate::models::chat::{ConversationTurn, Role};
use crate::models::job::JobListing;

pub const MIN_MESSAGE_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct RouterOptions {
    pub salary_detail: SalaryDetail,
    /// Answer OTHER with a generated reply instead of the static menu.
    pub generative_replies: bool,
}

pub struct MessageRouter {
    generator: Arc<dyn TextGenerator>,
    db: SqlitePool,
    catalog: StackCatalog,
    options: RouterOptions,
}

impl MessageRouter {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        db: SqlitePool,
        catalog: StackCatalog,
        options: RouterOptions,
    ) -> Self {
        Self {
            generator,
            db,
            catalog,
            options,
        }
    }

    pub fn catalog(&self) -> &StackCatalog {
        &self.catalog
    }

    /// Answers one user turn. Never fails: every path ends in an assistant turn
    /// with non-empty content. `history` is only read, and only for generated replies.
    pub async fn respond(&self, message: &str, history: &[ConversationTurn]) -> ConversationTurn {
        if message.trim().chars().count() < MIN_MESSAGE_CHARS {
            debug!("Rejecting message shorter than {MIN_MESSAGE_CHARS} chars");
            return ConversationTurn::assistant(REPHRASE_PROMPT);
        }

        let message = NormalizedMessage::new(message);

        let content = match self.route(&message, history).await {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => {
                warn!("Dispatch produced an empty answer, using local fallback");
                local_fallback(&message).to_string()
            }
            Err(e) => {
                warn!("Inference call failed ({e}), using local fallback");
                local_fallback(&message).to_string()
            }
        };

        ConversationTurn::assistant(content)
    }

    /// Two-tier classification. `Err` only when the keyword tier missed and the
    /// inference call itself failed; an unrecognized answer is `Intent::Other`.
    pub async fn classify(&self, message: &NormalizedMessage) -> Result<Intent, LlmError> {
        if let Some(intent) = Intent::from_keywords(message) {
            debug!("Keyword tier classified message as {}", intent.label());
            return Ok(intent);
        }

        let prompt = CLASSIFY_PROMPT_TEMPLATE.replace("{message}", message.original());
        let answer = self
            .generator
            .generate(&prompt, GenerationParams::CLASSIFY)
            .await?;
        let intent = Intent::from_label(&answer);
        debug!("Model tier classified message as {} (raw: {answer:?})", intent.label());
        Ok(intent)
    }

    async fn route(
        &self,
        message: &NormalizedMessage,
        history: &[ConversationTurn],
    ) -> Result<String, LlmError> {
        let intent = self.classify(message).await?;
        let stack = self.catalog.detect(message);
        info!(intent = intent.label(), stack = %stack.name, "Routing message");

        let content = match intent {
            Intent::Resume => render_resume(stack),
            Intent::Salary => render_salary(stack, self.options.salary_detail),
            Intent::Jobs => {
                let jobs = self.find_jobs(stack).await;
                render_jobs(stack, &jobs)
            }
            Intent::Plan => render_plan(stack),
            Intent::Other if self.options.generative_replies => {
                let reply = self.generate_reply(message, history).await?;
                if reply.trim().is_empty() {
                    HELP_MENU.to_string()
                } else {
                    reply
                }
            }
            Intent::Other => HELP_MENU.to_string(),
        };

        Ok(content)
    }

    /// Store failures are recoverable here: they read as "no listings".
    async fn find_jobs(&self, stack: &TechStack) -> Vec<JobListing> {
        match db::search_jobs(&self.db, &stack.skills).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Job listing query failed for stack {}: {e}", stack.name);
                Vec::new()
            }
        }
    }

    async fn generate_reply(
        &self,
        message: &NormalizedMessage,
        history: &[ConversationTurn],
    ) -> Result<String, LlmError> {
        let prompt = reply_prompt(&format_history(history), message.original());
        self.generator.generate(&prompt, GenerationParams::REPLY).await
    }
}

fn format_history(history: &[ConversationTurn]) -> String {
    if history.is_empty() {
        return "(sem mensagens anteriores)".to_string();
    }
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|turn| {
            let speaker = match turn.role {
                Role::User => "Usuário",
                Role::Assistant => "Mentor",
            };
            format!("{speaker}: {}", turn.content.trim())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
