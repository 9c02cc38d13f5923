// Prompt assembly module
// Renders ranked documents as numbered context blocks and wraps them in the assistant prompt


use crate::store::{Evidence, RetrievedDocument};

const PREAMBLE: &str = "You are a helpful healthcare assistant providing information based on medical knowledge.
Answer the user's health question using the information from the retrieved documents below.";

const GUIDELINES: &str = r#"Guidelines:
1. If the retrieved information doesn't contain a direct answer, say "I don't have enough information to answer this question confidently."
2. Be concise and focused on addressing the main concern.
3. Present symptoms, possible causes, and general treatments if available in the retrieved information.
4. Always include a medical disclaimer reminding the user to consult a healthcare professional.
5. If information comes from web sources, acknowledge this and cite the sources."#;

/// Render one context block, numbered from 1
#[inline]
pub fn format_block(number: usize, document: &RetrievedDocument) -> String {
    let header = format!("[Document {}] Relevance: {:.2}", number, document.score);
    match &document.evidence {
        Evidence::Local {
            question, answer, ..
        } => format!("{} Source: Database\nQ: {}\nA: {}", header, question, answer),
        Evidence::Web {
            title,
            snippet,
            url,
            ..
        } => format!(
            "{} Source: Web - {}\nTitle: {}\nContent: {}",
            header, url, title, snippet
        ),
    }
}

/// Render all documents in their given order, separated by blank lines
#[inline]
pub fn format_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, document)| format_block(i + 1, document))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the full generation prompt for `query`
#[inline]
pub fn build_prompt(query: &str, documents: &[RetrievedDocument]) -> String {
    format!(
        "{}\n\nRetrieved Documents:\n{}\n\nUser Question: {}\n\n{}\n\nResponse:",
        PREAMBLE,
        format_context(documents),
        query,
        GUIDELINES
    )
}
