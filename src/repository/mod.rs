pub mod json_file;
pub mod memory;

use crate::errors::Result;
use crate::types::{CardId, CardRecord, NewCard};

pub use json_file::JsonFileCardRepository;
pub use memory::InMemoryCardRepository;

/// storage for card records
///
/// `list_cards` returns a full snapshot ordered by name; the cycle views rely on
/// that order to break ties.
pub trait CardRepository {
    fn list_cards(&self) -> Result<Vec<CardRecord>>;

    fn get_card(&self, id: CardId) -> Result<CardRecord>;

    /// validate and store a new card, assigning its id
    fn create_card(&mut self, card: NewCard) -> Result<CardRecord>;

    /// replace every editable field of an existing card
    fn update_card(&mut self, id: CardId, card: NewCard) -> Result<CardRecord>;

    fn delete_card(&mut self, id: CardId) -> Result<CardRecord>;
}

/// name order used by every repository snapshot
pub(crate) fn sort_by_name(cards: &mut [CardRecord]) {
    cards.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
}
