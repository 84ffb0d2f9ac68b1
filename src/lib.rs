/// This crate is a Document Similarity Search Engine using term-frequency vectors.
pub mod config;
pub mod error;
pub mod service;
pub mod vectorizer;

/// Document Searcher
/// The top-level struct of the search core. It ranks a caller-supplied set of
/// candidate documents against a query text by cosine similarity of their
/// term-frequency vectors.
///
/// It holds no documents of its own; every search receives the full candidate
/// list. Internally, it holds:
/// - A tokenizer
/// - The search settings (parallel threshold, vector caching)
/// - An optional vector cache keyed by document key
///
/// `DocumentSearcher<K, T, C>` has the following generic parameters:
/// - `K`: Document key type (e.g., String, &str, usize)
/// - `T`: Tokenizer type (e.g., WordTokenizer)
/// - `C`: Vector comparison type (e.g., DefaultCompare)
///
/// # Thread Safety
/// `search` takes `&self`. Candidates are scored in parallel with rayon once
/// their number reaches the configured threshold; results are identical to
/// sequential scoring.
pub use vectorizer::DocumentSearcher;

/// Search helpers
/// `search` ranks candidates with a default `DocumentSearcher`.
/// `similarity` compares two raw texts directly.
pub use vectorizer::{search, similarity};

/// Candidate Trait
/// Anything that exposes a key and an optional text content can be ranked.
/// Implemented for `(key, text)` tuples, for references to candidates and for
/// the service layer's `Document`.
pub use vectorizer::Candidate;

/// Term Frequency structure
/// A struct for counting term occurrences within one text.
/// It manages:
/// - The count of occurrences of each term, in first-seen order
/// - The total number of terms in the text
///
/// Used as the vector compared by cosine similarity.
///
/// # Serialization
/// Supported.
pub use vectorizer::term::{vectorize, TermFrequency};

/// Tokenizer
/// `WordTokenizer` lowercases text, strips every character that is neither a
/// word character nor whitespace, and splits on whitespace runs.
/// Implement `Tokenizer` to plug in a different term splitter.
pub use vectorizer::tokenizer::{tokenize, Tokenizer, WordTokenizer};

/// Vector Comparison Trait
/// Defines dot product and cosine similarity over term vectors.
/// `DefaultCompare` is the textbook implementation, clamped to `[0, 1]` and
/// returning 0 when either vector is empty.
pub use vectorizer::compute::compare::{Compare, DefaultCompare};

/// Search Hits and Hit Entry structures
/// Data structures for managing search results.
/// - `Hits`: holds a list of search results and provides features such as sorting by score
/// - `HitEntry`: represents a single result entry, containing the document key and score
/// - `MatchLevel`: coarse high/medium/low bucket of a score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits, MatchLevel};

/// Vector Cache
/// Keeps document vectors between searches. An entry is rebuilt whenever the
/// content stored under its key changes.
///
/// # Thread Safety
/// Implemented using DashMap, shared by parallel scoring.
pub use vectorizer::cache::VectorCache;

/// Configuration, loadable from JSON
pub use config::{Config, SearchConfig, ServiceConfig};

/// Error type and result alias of this crate
pub use error::{DocMatchError, Result};

/// Scan Service
/// Account, upload, scan and admin operations around the searcher.
/// A scan costs one credit and only ranks the caller's own documents.
pub use service::ScanService;

/// Service data types
pub use service::{
    account::Account,
    analytics::{ScanRecord, UsageAnalytics},
    credit::{CreditRequest, Decision, RequestStatus},
    store::{Document, DocumentStore, MemoryStore},
};
