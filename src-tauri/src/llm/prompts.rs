//! Path-generation prompts: new paths for a query, and follow-up paths
//! after a partial execution.
//!
//! These prompts are the contract between Stratify and the model: both ask
//! for the same `{"paths": [{"name", "steps"}]}` JSON shape that
//! `paths::parse_paths` reads back.

use super::types::ContinuationContext;

pub const PATHS_MAX_TOKENS: u32 = 2048;
pub const CONTINUATION_MAX_TOKENS: u32 = 768;

/// How much of the previous answer is quoted back in a continuation prompt.
pub const LAST_RESPONSE_EXCERPT_CHARS: usize = 500;

/// Prompt asking for four distinct approaches to `query`.
pub fn build_paths_prompt(query: &str) -> String {
    format!(
        r#"You are a strategic thinking assistant. For the following query: "{query}"

Generate 4 different thinking approaches/paths to solve this. For each path, provide:
1. A clear approach name (2-4 words)
2. Exactly 3 specific thinking steps for that approach
3. Each step should be a concrete action or analysis

Respond ONLY with valid JSON:
{{
  "paths": [
    {{
      "name": "Approach Name",
      "steps": ["Step 1 description", "Step 2 description", "Step 3 description"]
    }}
  ]
}}

Make the paths genuinely different approaches, not just variations. Think like a consultant presenting multiple strategies."#
    )
}

/// Prompt asking for four approaches that continue an ongoing conversation.
///
/// The previous answer is cut to `LAST_RESPONSE_EXCERPT_CHARS` characters
/// and always followed by `...`, truncated or not.
pub fn build_continuation_prompt(ctx: &ContinuationContext) -> String {
    let excerpt = truncate_chars(&ctx.last_response, LAST_RESPONSE_EXCERPT_CHARS);
    format!(
        r#"Based on this conversation context:

Original Question: "{original}"
Last Approach Used: "{path}" (executed {steps} steps)
Latest Response (truncated): "{excerpt}..."

Generate 4 NEW thinking approaches that logically continue from where we left off. These should:
1. Build on the insights already gained
2. Offer different perspectives or deeper exploration
3. Represent the next logical steps in the thinking process
4. Propose alternative directions to explore

For each path, provide:
  - "name": 2-4 word approach name
  - "steps": exactly 3 specific next thinking steps

Respond ONLY with valid JSON in this shape:
{{
  "paths": [
    {{
      "name": "Approach Name",
      "steps": ["Step 1", "Step 2", "Step 3"]
    }}
  ]
}}"#,
        original = ctx.original_query,
        path = ctx.last_path_name,
        steps = ctx.last_steps_executed,
    )
}

/// The first `max_chars` characters of `text` (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
