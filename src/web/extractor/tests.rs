use super::*;

#[test]
fn strips_non_content_elements() {
    let html = r#"
        <html>
            <head>
                <title>Fever Guide</title>
                <style>body { color: red; }</style>
                <script>var tracking = true;</script>
            </head>
            <body>
                <header>Site Header</header>
                <nav><a href="/">Home</a></nav>
                <main>
                    <h1>Fever</h1>
                    <p>A fever is a temporary rise in body temperature.</p>
                </main>
                <footer>Copyright</footer>
            </body>
        </html>
    "#;

    let text = extract_page_text(html, 8000);

    assert_eq!(
        text,
        "Fever Guide\nFever\nA fever is a temporary rise in body temperature."
    );
    assert!(!text.contains("tracking"));
    assert!(!text.contains("Site Header"));
    assert!(!text.contains("Home"));
    assert!(!text.contains("Copyright"));
}

#[test]
fn splits_double_spaced_phrases() {
    let raw = "  Symptoms  Causes  \n\n\t Treatment options \n   ";
    assert_eq!(clean_text(raw), "Symptoms\nCauses\nTreatment options");
}

#[test]
fn empty_page_yields_empty_text() {
    let text = extract_page_text("<html><body><script>x()</script></body></html>", 8000);
    assert!(text.is_empty());
}

#[test]
fn truncates_long_text_with_marker() {
    let text = "a".repeat(8005);
    let truncated = truncate_chars(&text, 8000);
    assert_eq!(truncated.chars().count(), 8003);
    assert!(truncated.ends_with("..."));

    let exact = "b".repeat(8000);
    assert_eq!(truncate_chars(&exact, 8000), exact);
}

#[test]
fn truncation_respects_char_boundaries() {
    let text = "héllo wörld";
    assert_eq!(truncate_chars(text, 2), "hé...");
    assert_eq!(truncate_chars(text, 50), text);
}

#[test]
fn long_pages_are_truncated() {
    let paragraph = "Hydration helps. ".repeat(1000);
    let html = format!("<html><body><p>{}</p></body></html>", paragraph);
    let text = extract_page_text(&html, 8000);
    assert_eq!(text.chars().count(), 8003);
    assert!(text.ends_with("..."));
}

#[test]
fn parses_duckduckgo_results() {
    let html = r#"
        <html><body>
            <div class="result">
                <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Ffever%3Fa%3D1&amp;rut=abc">
                    Fever: Causes and Treatment
                </a>
                <a class="result__snippet">Fever is usually caused by infection.</a>
            </div>
            <div class="result">
                <a class="result__a" href="https://health.example.org/cold">Common Cold</a>
                <div class="result__snippet">Rest and fluids.</div>
            </div>
            <div class="result">
                <a class="result__a" href="https://third.example.org/">Third</a>
            </div>
        </body></html>
    "#;

    let hits = parse_duckduckgo_results(html, 2);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Fever: Causes and Treatment");
    assert_eq!(hits[0].snippet, "Fever is usually caused by infection.");
    assert_eq!(hits[0].url, "https://example.com/fever?a=1");
    assert_eq!(hits[1].title, "Common Cold");
    assert_eq!(hits[1].url, "https://health.example.org/cold");

    let all = parse_duckduckgo_results(html, 10);
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].snippet, "");
}

#[test]
fn decodes_redirect_urls() {
    assert_eq!(
        decode_redirect_url("/l/?kh=-1&uddg=https%3A%2F%2Fwww.nhs.uk%2Fconditions%2Ffever%2F"),
        "https://www.nhs.uk/conditions/fever/"
    );
    assert_eq!(
        decode_redirect_url("https://direct.example.com/page"),
        "https://direct.example.com/page"
    );
    assert_eq!(decode_redirect_url("/relative/no-target"), "/relative/no-target");
}

#[test]
fn redirect_targets_keep_literal_plus_signs() {
    assert_eq!(
        decode_redirect_url("/l/?uddg=https%3A%2F%2Fexample.com%2Fa+b%3Fq%3Dc%2Bd&rut=x"),
        "https://example.com/a+b?q=c+d"
    );
    assert_eq!(
        decode_redirect_url("/l/?uddg=https%3A%2F%2Fexample.com%2Fa%20b"),
        "https://example.com/a b"
    );
}
