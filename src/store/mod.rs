// Document store module
// Holds the ordered question/answer documents that back the vector index

#[cfg(test)]
mod tests;

use std::fmt;

/// A document held by the store. Its `id` equals its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: usize,
    pub question: String,
    pub answer: String,
    /// The exact text that was embedded for this document
    pub content: String,
    pub url: Option<String>,
}

/// Insertion request for the store; the id and content are derived on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub question: String,
    pub answer: String,
    pub url: Option<String>,
}

impl NewDocument {
    #[inline]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            url: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Text used for embedding this document
    #[inline]
    pub fn content(&self) -> String {
        format_content(&self.question, &self.answer)
    }
}

#[inline]
pub fn format_content(question: &str, answer: &str) -> String {
    format!("Question: {}\nAnswer: {}", question, answer)
}

/// Append-only, ordered collection of documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&Document> {
        self.documents.get(id)
    }

    #[inline]
    pub fn last(&self) -> Option<&Document> {
        self.documents.last()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// The id the next inserted document will receive
    #[inline]
    pub fn next_id(&self) -> usize {
        self.documents.len()
    }

    /// Find a document by its question and source URL
    #[inline]
    pub fn find_by_source(&self, question: &str, url: &str) -> Option<&Document> {
        self.documents
            .iter()
            .find(|doc| doc.question == question && doc.url.as_deref() == Some(url))
    }

    /// Only the vector index may grow the store, so that both sides stay aligned.
    pub(crate) fn push(&mut self, document: NewDocument) -> usize {
        let id = self.next_id();
        let content = document.content();
        self.documents.push(Document {
            id,
            question: document.question,
            answer: document.answer,
            content,
            url: document.url,
        });
        id
    }
}

impl<'a> IntoIterator for &'a DocumentStore {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Identifier of a retrieved document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentId {
    /// Position in the local document store
    Local(usize),
    /// Synthetic id of a web hit, e.g. `web_0`
    Web(String),
}

impl fmt::Display for DocumentId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(id) => write!(f, "{}", id),
            Self::Web(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Local,
    Web,
}

impl fmt::Display for Source {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local_database"),
            Self::Web => f.write_str("web"),
        }
    }
}

/// Source-specific payload of a retrieved document
#[derive(Debug, Clone, PartialEq)]
pub enum Evidence {
    Local {
        question: String,
        answer: String,
        url: Option<String>,
    },
    Web {
        title: String,
        snippet: String,
        url: String,
        /// Full page text fetched from `url`
        content: String,
    },
}

/// A candidate document for the generation context
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedDocument {
    pub id: DocumentId,
    pub score: f32,
    pub evidence: Evidence,
}

impl RetrievedDocument {
    #[inline]
    pub fn local(document: &Document, score: f32) -> Self {
        Self {
            id: DocumentId::Local(document.id),
            score,
            evidence: Evidence::Local {
                question: document.question.clone(),
                answer: document.answer.clone(),
                url: document.url.clone(),
            },
        }
    }

    #[inline]
    pub fn source(&self) -> Source {
        match self.evidence {
            Evidence::Local { .. } => Source::Local,
            Evidence::Web { .. } => Source::Web,
        }
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        match &self.evidence {
            Evidence::Local { url, .. } => url.as_deref(),
            Evidence::Web { url, .. } => Some(url),
        }
    }
}
