//! Interactive questions asked while naming.

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};

/// Source of answers for values the engine could not derive.
pub trait Prompter: Send + Sync {
    /// Ask for a free-form value. `None` means no answer is available.
    fn ask(&self, question: &str) -> Result<Option<String>>;

    /// Ask a yes/no question.
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Asks on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .context("prompt failed")?;
        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .context("prompt failed")
    }
}

/// Never asks: missing values stay missing and confirmations pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn ask(&self, question: &str) -> Result<Option<String>> {
        tracing::debug!(question, "prompts disabled, leaving value unset");
        Ok(None)
    }

    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}
