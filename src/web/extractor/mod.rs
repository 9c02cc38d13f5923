#[cfg(test)]
mod tests;

use scraper::{Html, Selector};
use tracing::debug;
use url::{Url, form_urlencoded};

use super::SearchHit;

/// Elements whose text never belongs to the readable page content
const STRIPPED_ELEMENTS: &str = "script, style, nav, footer, header";

const TRUNCATION_MARKER: &str = "...";

/// Extract readable text from an HTML page.
///
/// Non-content elements are dropped, every text node becomes its own line,
/// lines are trimmed and split on runs of double spaces, and empty pieces are
/// removed. Text longer than `max_chars` is cut and suffixed with `...`.
pub fn extract_page_text(html: &str, max_chars: usize) -> String {
    let mut document = Html::parse_document(html);
    let stripped = Selector::parse(STRIPPED_ELEMENTS).expect("valid selector");
    remove_elements(&mut document, &stripped);

    let raw = document.root_element().text().collect::<Vec<_>>().join("\n");
    let text = clean_text(&raw);

    debug!("Extracted {} chars of page text", text.chars().count());
    truncate_chars(&text, max_chars)
}

/// Collapse page text into one trimmed phrase per line
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            let mut truncated = text.get(..byte_index).unwrap_or(text).to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => text.to_string(),
    }
}

/// Parse a DuckDuckGo HTML results page into ranked hits
pub fn parse_duckduckgo_results(html: &str, num_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let result_selector = Selector::parse(".result").expect("valid selector");
    let title_selector = Selector::parse(".result__a").expect("valid selector");
    let snippet_selector = Selector::parse(".result__snippet").expect("valid selector");

    document
        .select(&result_selector)
        .take(num_results)
        .map(|result| {
            let title_elem = result.select(&title_selector).next();
            let title = title_elem
                .map(|e| e.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            let snippet = result
                .select(&snippet_selector)
                .next()
                .map(|e| e.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            let url = title_elem
                .and_then(|e| e.value().attr("href"))
                .map(decode_redirect_url)
                .unwrap_or_default();

            SearchHit {
                title,
                snippet,
                url,
            }
        })
        .collect()
}

/// DuckDuckGo wraps result links as `/l/?uddg=<target>`; return the target.
///
/// The target is percent-decoded only, so a literal `+` stays a `+`.
#[inline]
pub fn decode_redirect_url(href: &str) -> String {
    if !href.starts_with('/') {
        return href.to_string();
    }

    let target = Url::parse("https://duckduckgo.com")
        .and_then(|base| base.join(href))
        .ok()
        .and_then(|url| {
            // form decoding maps '+' to a space
            let query = url.query()?.replace('+', "%2B");
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        });

    target.unwrap_or_else(|| href.to_string())
}

fn remove_elements(document: &mut Html, selector: &Selector) {
    let node_ids: Vec<_> = document.select(selector).map(|element| element.id()).collect();

    for node_id in node_ids {
        if let Some(mut node) = document.tree.get_mut(node_id) {
            node.detach();
        }
    }
}
