use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{CardError, Result};
use crate::repository::{CardRepository, InMemoryCardRepository};
use crate::types::{CardId, CardRecord, NewCard};

const STORE_VERSION: u32 = 1;

/// on-disk layout of the card store
#[derive(Debug, Serialize, Deserialize)]
struct CardStore {
    version: u32,
    cards: Vec<CardRecord>,
}

/// card repository persisted as a single json document
///
/// The file is read once on open and rewritten after every mutation. A missing
/// file is treated as an empty store.
#[derive(Debug)]
pub struct JsonFileCardRepository {
    path: PathBuf,
    cards: InMemoryCardRepository,
}

impl JsonFileCardRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!(path = %path.display(), "card store not found, starting empty");
            return Ok(Self {
                path,
                cards: InMemoryCardRepository::new(),
            });
        }

        let raw = std::fs::read_to_string(&path)?;
        let store: CardStore = serde_json::from_str(&raw)?;
        if store.version != STORE_VERSION {
            return Err(CardError::Storage {
                message: format!(
                    "unsupported store version {} in {}",
                    store.version,
                    path.display()
                ),
            });
        }

        debug!(path = %path.display(), cards = store.cards.len(), "card store loaded");
        Ok(Self {
            path,
            cards: InMemoryCardRepository::from_records(store.cards)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn save(&self) -> Result<()> {
        let store = CardStore {
            version: STORE_VERSION,
            cards: self.cards.list_cards()?,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        // stage next to the store, then swap it in with a rename
        let staging = self.staging_path();
        std::fs::write(&staging, serde_json::to_string_pretty(&store)?)?;
        std::fs::rename(&staging, &self.path)?;

        debug!(path = %self.path.display(), cards = store.cards.len(), "card store saved");
        Ok(())
    }
}

impl CardRepository for JsonFileCardRepository {
    fn list_cards(&self) -> Result<Vec<CardRecord>> {
        self.cards.list_cards()
    }

    fn get_card(&self, id: CardId) -> Result<CardRecord> {
        self.cards.get_card(id)
    }

    fn create_card(&mut self, card: NewCard) -> Result<CardRecord> {
        let record = self.cards.create_card(card)?;
        self.save()?;
        Ok(record)
    }

    fn update_card(&mut self, id: CardId, card: NewCard) -> Result<CardRecord> {
        let record = self.cards.update_card(id, card)?;
        self.save()?;
        Ok(record)
    }

    fn delete_card(&mut self, id: CardId) -> Result<CardRecord> {
        let record = self.cards.delete_card(id)?;
        self.save()?;
        Ok(record)
    }
}
