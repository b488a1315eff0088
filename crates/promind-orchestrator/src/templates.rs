//! Instruction templates for the evaluator and optimizer agents
//!
//! Both templates are compiled once at startup with handlebars in strict
//! mode; a render failure is a programming error surfaced immediately rather
//! than a degraded prompt.

use crate::Result;
use anyhow::Context;
use handlebars::Handlebars;
use serde_json::json;

/// Template asking the evaluator for a bare 1-10 integer
const EVALUATE_TEMPLATE: &str = "\
You are a strict quality evaluator for AI agent responses.

--- SYSTEM PROMPT ---
{{system_prompt}}

--- USER INPUT ---
{{user_input}}

--- AGENT RESPONSE ---
{{response}}

Rate how well the response satisfies the system prompt and the user input.
Respond with a single integer from 1 (worst) to 10 (best).
Respond with the number only. No explanation, no punctuation.";

/// Template asking the optimizer for a replacement system prompt
const REWRITE_TEMPLATE: &str = "\
You are an expert prompt engineer.
Your job is to improve the SYSTEM PROMPT used by an AI agent.

--- Agent context ---
Agent name: {{agent_name}}
Agent goal: {{agent_goal}}

--- Original SYSTEM PROMPT (v{{version}}) ---
{{system_prompt}}

--- USER INPUT ---
{{user_input}}

--- AGENT RESPONSE ---
{{response}}

--- EFFECTIVENESS SCORE ---
{{score}}

Rewrite the system prompt to improve its clarity, precision, and effectiveness.
Keep the same intent, but make it more actionable and useful for the model.
Return only the improved prompt. Do not add explanations or formatting.";

/// Compiled evaluator and optimizer instruction templates
#[derive(Debug)]
pub struct PromptTemplates {
    handlebars: Handlebars<'static>,
}

impl PromptTemplates {
    /// Compile the built-in templates
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string("evaluate", EVALUATE_TEMPLATE)
            .context("Failed to compile evaluate template")?;
        handlebars
            .register_template_string("rewrite", REWRITE_TEMPLATE)
            .context("Failed to compile rewrite template")?;

        Ok(Self { handlebars })
    }

    /// Render the evaluation instruction for one (prompt, input, response) triple
    pub fn render_evaluate(
        &self,
        system_prompt: &str,
        user_input: &str,
        response: &str,
    ) -> Result<String> {
        self.handlebars
            .render(
                "evaluate",
                &json!({
                    "system_prompt": system_prompt,
                    "user_input": user_input,
                    "response": response,
                }),
            )
            .context("Failed to render evaluate template")
    }

    /// Render the rewrite instruction for an under-performing prompt
    #[allow(clippy::too_many_arguments)]
    pub fn render_rewrite(
        &self,
        agent_name: &str,
        agent_goal: &str,
        version: i64,
        system_prompt: &str,
        user_input: &str,
        response: &str,
        score: u8,
    ) -> Result<String> {
        self.handlebars
            .render(
                "rewrite",
                &json!({
                    "agent_name": agent_name,
                    "agent_goal": agent_goal,
                    "version": version,
                    "system_prompt": system_prompt,
                    "user_input": user_input,
                    "response": response,
                    "score": score,
                }),
            )
            .context("Failed to render rewrite template")
    }
}
