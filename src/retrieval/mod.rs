// Retrieval module
// Confidence-gated local search with web augmentation

pub mod augmenter;
pub mod orchestrator;

pub use augmenter::{Augmentation, InsertionEvent, WebAugmenter, WebOutcome};
pub use orchestrator::{Retrieval, RetrievalOrchestrator, needs_web_search};
