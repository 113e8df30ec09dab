//! Resume text generation: the collaborator that turns structured form input
//! into the flat resume text the render pipeline consumes.
//!
//! The model call sits behind [`ResumeWriter`]; `AppState` holds it as
//! `Option<Arc<dyn ResumeWriter>>`, `None` when no API key is configured.

pub mod form;
pub mod handlers;
pub mod prompts;
pub mod templates;

use async_trait::async_trait;

use crate::llm_client::LlmError;

/// Produces resume text for a fully built prompt.
#[async_trait]
pub trait ResumeWriter: Send + Sync {
    async fn write_resume(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}
