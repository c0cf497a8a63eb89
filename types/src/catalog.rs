use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error as ThisError;

use crate::CardId;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum CatalogError {
    #[error("card id must not be empty (seq={seq})")]
    EmptyId { seq: usize },
    #[error("duplicate card id: {0}")]
    DuplicateId(CardId),
}

/// One obtainable card. Immutable after catalog load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CardId,
    pub title: String,
    pub description: String,
}

/// The fixed universe of obtainable cards.
///
/// Entry order is the configuration-file order and is held invariant for the
/// lifetime of the process: collection reports and browse cursors enumerate
/// entries by their sequence number, never by map iteration order.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<CardId, usize>,
}

impl Catalog {
    /// Build a catalog from entries in definition order.
    ///
    /// Ids must be unique and non-empty. An empty entry list is allowed here;
    /// emptiness is a startup-time condition checked by the process boot.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (seq, entry) in entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(CatalogError::EmptyId { seq });
            }
            if by_id.insert(entry.id.clone(), seq).is_some() {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries, by_id })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in definition order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, card_id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(card_id).map(|seq| &self.entries[*seq])
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.by_id.contains_key(card_id)
    }

    /// Sequence number of a card in definition order.
    pub fn seq_of(&self, card_id: &str) -> Option<usize> {
        self.by_id.get(card_id).copied()
    }
}
