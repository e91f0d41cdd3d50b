//! Prompt templates for every model-backed transform.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing a transform's behaviour (e.g.
//!    tightening the claim-extraction rules) requires editing exactly one
//!    place.
//!
//! 2. **Testability** — unit tests can inspect the assembled prompts
//!    directly without spinning up a real model, making prompt regressions
//!    easy to catch.
//!
//! Each transform's expected response shape (a JSON schema, a bare label,
//! free text) is stated inside its prompt; the recovery step in
//! [`crate::repair`] handles models that decorate the response anyway.

use crate::template::DOCUMENT_TYPE_LABELS;

/// Ask the model to extract one verifiable claim from a text chunk.
///
/// The response schema is `{"fact": string|null}`; `null` means the chunk
/// carries no verifiable claim.
pub fn claim_extraction_prompt(chunk_text: &str) -> String {
    format!(
        r#"You are a fact-checking assistant.
Given the following text chunk, identify statements that can be verified objectively as true or false.
Do NOT include subjective opinions, marketing phrases, or vague descriptions.
Only extract statements that claim measurable, factual, or historical information.
If no verifiable fact or claim is present, return null.
Return your answer strictly in JSON format with the following schema:
{{
"fact": "<a verifiable fact or claim from the text, or null if none found>"
}}
Text chunk:
"""{chunk_text}""""#
    )
}

/// Ask the model for a verdict on a claim, given web search results.
pub fn claim_verdict_prompt(claim: &str, search_results: &str) -> String {
    format!(
        r#"Fact-check the following statement: "{claim}"
Based on this search result: "{search_results}"
Return a short summary indicating:
- True/False
- Corrected information if False
- Provide reference link(s)"#
    )
}

/// Ask the model to find spelling, grammar, and punctuation mistakes in a
/// text chunk.
///
/// The response schema is `{"mistake", "type", "correction"}` with every
/// field independently nullable; `mistake` and `correction` may each be a
/// single string or a list of strings.
pub fn grammar_prompt(chunk_text: &str) -> String {
    format!(
        r#"You are a grammar correction and spelling proofreading assistant.
Given the following text, identify **all spelling, grammar, and punctuation mistakes**.

Requirements:
1. Return ONLY a JSON object with the following fields:
{{
    "mistake": "<the mistake found, as a string or list of strings, or null if none>",
    "type": "<type of mistake: spelling, grammar, punctuation, or null>",
    "correction": "<the correction for each mistake, as string or list of strings, or null>"
}}
2. Do NOT include any explanations, notes, or extra text outside JSON.
3. If no mistakes are found, all fields should be null.

Text:
"""{chunk_text}""""#
    )
}

/// Ask the model to classify the document into one of the known types.
///
/// The model answers with a bare label; [`crate::template::DocumentType::parse`]
/// normalises it and falls back to the default on anything unrecognised.
pub fn classify_prompt(doc_text: &str) -> String {
    let labels = DOCUMENT_TYPE_LABELS
        .iter()
        .map(|l| format!("'{l}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"You are an expert document classifier.
Classify the following document into one of: {labels}.
Respond with the label only.
Document Text:
"""{doc_text}""""#
    )
}

/// Ask the model to produce a structured outline of the document.
pub fn outline_prompt(doc_text: &str) -> String {
    format!(
        r#"You are an expert document designer.
Analyze the following text and generate a structured outline in JSON format:
- sections: list of sections
- each section has 'heading', 'subheadings' (each with 'heading' and 'bullets'), and 'bullets' for key points or takeaways

Document Text:
"""{doc_text}"""
Only return **valid JSON**, no extra text."#
    )
}

/// Ask the model for a gap analysis: expected vs present vs missing
/// sections, plus draft text for what is missing.
pub fn gap_analysis_prompt(doc_text: &str) -> String {
    format!(
        r#"You are an AI document assistant.
Analyze the document below and respond in **valid JSON only** with the following keys:
- doc_type: (string) type of document (e.g., report, proposal, resume)
- expected_sections: (list of strings) ideal sections for this doc type
- present_sections: (list of strings) sections already found
- missing_sections: (list of strings) sections not present
- expanded_bullets: (list of strings) bullet points rewritten as full paragraphs
- drafts_for_missing: (dict) keys = missing section names, values = draft text

Document Content:
{doc_text}"#
    )
}

/// Ask the model to pull key facts, fields, and insights out of the
/// document as a bullet list (free text, no schema).
pub fn key_points_prompt(doc_text: &str) -> String {
    format!(
        r#"You are an expert information extractor.
Your task is to carefully read the following document text and extract:
- Key facts (with context)
- Important fields, numbers, names, dates, definitions, or rules
- Main points and insights
- Relevant quotes or excerpts
- Key takeaways
- Action items (if any)

The document may be a technical document, SOP or policy, notes, a
presentation, or any other kind of unstructured content.

Document Text:
"""{doc_text}"""

Now provide the extracted information in a **clear bullet point list**.
If something is unclear, make a note of it instead of guessing."#
    )
}

/// Summarise one chunk (the map half of map-reduce summarisation).
pub fn summarize_chunk_prompt(chunk_text: &str) -> String {
    format!(
        r#"Write a concise summary of the following text. Keep every
important fact, name, and number; drop filler.

Text:
"""{chunk_text}"""

CONCISE SUMMARY:"#
    )
}

/// Combine partial chunk summaries into one document summary (the reduce
/// half of map-reduce summarisation).
pub fn summarize_combine_prompt(partial_summaries: &str) -> String {
    format!(
        r#"The following are partial summaries of consecutive sections of
one document. Combine them into a single coherent summary of the whole
document. Do not repeat yourself.

Partial summaries:
"""{partial_summaries}"""

COMBINED SUMMARY:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_prompt_embeds_chunk_and_schema() {
        let p = claim_extraction_prompt("The tower is 300m tall.");
        assert!(p.contains("The tower is 300m tall."));
        assert!(p.contains("\"fact\""));
    }

    #[test]
    fn grammar_prompt_names_all_three_fields() {
        let p = grammar_prompt("Ths is wrong.");
        for field in ["\"mistake\"", "\"type\"", "\"correction\""] {
            assert!(p.contains(field), "missing {field}");
        }
    }

    #[test]
    fn classify_prompt_lists_every_label() {
        let p = classify_prompt("Quarterly results…");
        for label in DOCUMENT_TYPE_LABELS {
            assert!(p.contains(label), "missing {label}");
        }
    }

    #[test]
    fn verdict_prompt_embeds_claim_and_evidence() {
        let p = claim_verdict_prompt("Water boils at 100C", "search says yes");
        assert!(p.contains("Water boils at 100C"));
        assert!(p.contains("search says yes"));
    }
}
