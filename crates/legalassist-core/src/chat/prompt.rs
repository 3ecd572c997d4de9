//! Prompt text and reply parsing for the legal information assistant.
//!
//! The model is asked to answer with a single JSON object:
//! ```text
//! { "content": "...", "category": "contracts", "sources": ["...", "..."] }
//! ```
//! [`parse_reply`] turns that text back into a [`GeneratedReply`].

use serde::Deserialize;

use legalassist_types::category::Category;

use super::generator::{GeneratedReply, GenerationError};

/// Category recorded when the model omits one.
pub const DEFAULT_REPLY_CATEGORY: &str = "general";

/// System prompt establishing the assistant's role and answer format.
pub const SYSTEM_PROMPT: &str = "\
You are LegalAssist AI, a helpful legal information assistant.
You provide general legal information and explanations, but cannot give specific legal advice.
Always clarify that users should consult with a qualified attorney for specific legal matters.

When answering, follow these guidelines:
1. Provide accurate legal information based on general legal principles
2. Include relevant legal concepts and terminology
3. Note jurisdictional variations where appropriate
4. Cite general legal sources when possible
5. Categorize your response by legal domain (contracts, family, employment, property, ip, criminal, immigration, personal_injury, tax, bankruptcy)
6. Structure complex responses with bullet points and sections
7. Always include a disclaimer about not being a substitute for actual legal advice

Respond with JSON in this format:
{
  \"content\": \"Your helpful response here with appropriate formatting\",
  \"category\": \"Legal category (contracts, family, employment, property, ip, criminal, etc.)\",
  \"sources\": [\"Source 1\", \"Source 2\"]
}";

/// Extra system instruction narrowing the answer to one area of law.
pub fn category_hint(category: Category) -> String {
    format!(
        "The user is specifically interested in {} law. Focus your response on this area.",
        category.label()
    )
}

#[derive(Debug, Deserialize)]
struct RawReply {
    content: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    sources: Option<Vec<String>>,
}

/// Parse the model's completion text into a reply.
///
/// Accepts the JSON object bare or wrapped in a Markdown code fence.
pub fn parse_reply(text: &str) -> Result<GeneratedReply, GenerationError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(GenerationError::Malformed("empty response".to_string()));
    }

    let raw: RawReply = serde_json::from_str(body)
        .map_err(|e| GenerationError::Malformed(format!("invalid reply JSON: {e}")))?;

    if raw.content.trim().is_empty() {
        return Err(GenerationError::Malformed("reply content is empty".to_string()));
    }

    let category = raw
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_REPLY_CATEGORY.to_string());

    Ok(GeneratedReply {
        content: raw.content,
        category,
        sources: raw.sources.unwrap_or_default(),
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => return "",
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
