use super::*;

#[test]
fn content_is_question_then_answer() {
    let doc = NewDocument::new("fever causes", "viral infection");
    assert_eq!(doc.content(), "Question: fever causes\nAnswer: viral infection");
}

#[test]
fn push_assigns_sequential_ids() {
    let mut store = DocumentStore::new();
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 0);

    let first = store.push(NewDocument::new("q1", "a1"));
    let second = store.push(NewDocument::new("q2", "a2").with_url("http://x"));

    assert_eq!(first, 0);
    assert_eq!(second, 1);
    assert_eq!(store.len(), 2);

    let last = store.last().expect("store should have a last document");
    assert_eq!(last.id, 1);
    assert_eq!(last.question, "q2");
    assert_eq!(last.content, "Question: q2\nAnswer: a2");
    assert_eq!(last.url.as_deref(), Some("http://x"));
}

#[test]
fn find_by_source_matches_question_and_url() {
    let mut store = DocumentStore::new();
    store.push(NewDocument::new("fever", "Fever. snippet").with_url("http://a"));
    store.push(NewDocument::new("cough", "Cough. snippet").with_url("http://a"));

    let found = store
        .find_by_source("cough", "http://a")
        .expect("document should be found");
    assert_eq!(found.id, 1);
    assert!(store.find_by_source("fever", "http://b").is_none());
    assert!(store.find_by_source("headache", "http://a").is_none());
}

#[test]
fn retrieved_document_source_and_url() {
    let mut store = DocumentStore::new();
    store.push(NewDocument::new("q", "a"));
    let local = RetrievedDocument::local(store.get(0).expect("document 0 exists"), 0.75);
    assert_eq!(local.source(), Source::Local);
    assert_eq!(local.id, DocumentId::Local(0));
    assert_eq!(local.url(), None);

    let web = RetrievedDocument {
        id: DocumentId::Web("web_0".to_string()),
        score: 1.0,
        evidence: Evidence::Web {
            title: "Fever".to_string(),
            snippet: "...".to_string(),
            url: "http://x".to_string(),
            content: "page".to_string(),
        },
    };
    assert_eq!(web.source(), Source::Web);
    assert_eq!(web.url(), Some("http://x"));
    assert_eq!(web.id.to_string(), "web_0");
    assert_eq!(Source::Local.to_string(), "local_database");
}
