use anyhow::{Context, Result};
use chatmodels_llm::{ChatClient, ChatOptions, ChatRequest, ChatResponse, Message};
use std::io::Write;

/// Hosted model every run talks to
pub const MODEL: &str = "gpt-4";
/// Sampling temperature, passed through unvalidated
pub const TEMPERATURE: f64 = 1.8;
/// Cap on generated tokens
pub const MAX_TOKENS: u32 = 20;
/// The one prompt this program ever sends
pub const PROMPT: &str = "generate a poem on formula1";

/// Sends the fixed prompt once and writes the reply verbatim.
pub struct PromptRunner<C> {
    client: C,
}

impl<C: ChatClient> PromptRunner<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The request issued on every run
    pub fn request() -> ChatRequest {
        ChatRequest::new(MODEL, vec![Message::human(PROMPT)]).with_options(
            ChatOptions::new()
                .temperature(TEMPERATURE)
                .max_tokens(MAX_TOKENS),
        )
    }

    /// Issue the single request. Errors are returned as-is, never retried.
    pub async fn invoke(&self) -> Result<ChatResponse> {
        tracing::info!(
            model = MODEL,
            temperature = TEMPERATURE,
            max_tokens = MAX_TOKENS,
            "invoking chat model"
        );

        let response = self.client.chat(Self::request()).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total_tokens,
                finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
                "chat model responded"
            );
        }

        Ok(response)
    }

    /// Invoke and write the response text plus a newline to `out`.
    ///
    /// Nothing is written unless the request succeeds.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let response = self.invoke().await?;

        writeln!(out, "{}", response.text()).context("Failed to write response")?;
        out.flush().context("Failed to flush output")?;
        Ok(())
    }
}
