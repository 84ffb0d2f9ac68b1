use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vectorizer::Candidate;

/// An uploaded plain-text document
///
/// Content is never edited in place; a new upload gets a new id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Original file name
    pub name: String,
    pub content: String,
    pub owner_id: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// New document with a fresh id, uploaded now
    pub fn new(owner_id: &str, name: &str, content: String) -> Self {
        Document {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            content,
            owner_id: owner_id.to_string(),
            uploaded_at: Utc::now(),
        }
    }
}

impl Candidate for Document {
    type Key = String;

    #[inline]
    fn key(&self) -> &String {
        &self.id
    }

    #[inline]
    fn content(&self) -> Option<&str> {
        Some(&self.content)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Where documents live
///
/// Implementations decide persistence. Listing order must be stable
/// (upload order) since search ties fall back to it.
pub trait DocumentStore {
    fn insert(&mut self, doc: Document);
    fn remove(&mut self, id: &str) -> Option<Document>;
    fn get(&self, id: &str) -> Option<&Document>;
    /// Documents of one owner, in upload order
    fn by_owner(&self, owner_id: &str) -> Vec<&Document>;
    fn len(&self) -> usize;
}

/// In-process store, kept in upload order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(with = "indexmap::map::serde_seq")]
    documents: IndexMap<String, Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&mut self, doc: Document) {
        self.documents.insert(doc.id.clone(), doc);
    }

    fn remove(&mut self, id: &str) -> Option<Document> {
        // shift_remove keeps the remaining upload order intact
        self.documents.shift_remove(id)
    }

    fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    fn by_owner(&self, owner_id: &str) -> Vec<&Document> {
        self.documents
            .values()
            .filter(|doc| doc.owner_id == owner_id)
            .collect()
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}
