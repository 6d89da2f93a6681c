use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::errors::{CardError, Result};
use crate::repository::{sort_by_name, CardRepository};
use crate::types::{CardId, CardRecord, NewCard};

/// card repository held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCardRepository {
    cards: HashMap<CardId, CardRecord>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// load existing records as-is, e.g. from a file snapshot
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Result<Self> {
        let mut cards = HashMap::new();
        for card in records {
            if let Some(previous) = cards.insert(card.id, card) {
                return Err(CardError::Storage {
                    message: format!("duplicate card id {} ({})", previous.id, previous.name),
                });
            }
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardRepository for InMemoryCardRepository {
    fn list_cards(&self) -> Result<Vec<CardRecord>> {
        let mut cards: Vec<CardRecord> = self.cards.values().cloned().collect();
        sort_by_name(&mut cards);
        Ok(cards)
    }

    fn get_card(&self, id: CardId) -> Result<CardRecord> {
        self.cards
            .get(&id)
            .cloned()
            .ok_or(CardError::CardNotFound { id })
    }

    fn create_card(&mut self, card: NewCard) -> Result<CardRecord> {
        let record = card.validate_new()?.into_record(Uuid::new_v4());
        self.cards.insert(record.id, record.clone());

        info!(id = %record.id, name = %record.name, "card created");
        Ok(record)
    }

    fn update_card(&mut self, id: CardId, card: NewCard) -> Result<CardRecord> {
        let card = card.validate()?;
        let slot = self
            .cards
            .get_mut(&id)
            .ok_or(CardError::CardNotFound { id })?;

        *slot = card.into_record(id);

        info!(id = %id, name = %slot.name, "card updated");
        Ok(slot.clone())
    }

    fn delete_card(&mut self, id: CardId) -> Result<CardRecord> {
        let removed = self
            .cards
            .remove(&id)
            .ok_or(CardError::CardNotFound { id })?;

        info!(id = %id, name = %removed.name, "card deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;

    fn new_card(name: &str) -> NewCard {
        NewCard::new(name, Money::from_major(25_000), 15, 5)
    }

    #[test]
    fn test_create_and_list_sorted_by_name() {
        let mut repo = InMemoryCardRepository::new();
        repo.create_card(new_card("Santander")).unwrap();
        repo.create_card(new_card("amex")).unwrap();
        repo.create_card(new_card("BBVA")).unwrap();

        let names: Vec<String> = repo.list_cards().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["amex", "BBVA", "Santander"]);
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut repo = InMemoryCardRepository::new();
        let a = repo.create_card(new_card("Same")).unwrap();
        let b = repo.create_card(new_card("Same")).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let mut repo = InMemoryCardRepository::new();

        let result = repo.create_card(NewCard::new("", Money::from_major(100), 1, 1));
        assert!(matches!(result, Err(CardError::InvalidCardName)));

        let result = repo.create_card(NewCard::new("Card", Money::from_major(100), 1, 32));
        assert!(matches!(result, Err(CardError::InvalidCycleAnchor { .. })));

        assert!(repo.is_empty());
    }

    #[test]
    fn test_from_records_rejects_duplicate_ids() {
        let first = new_card("First").into_record(Uuid::new_v4());
        let mut second = new_card("Second").into_record(Uuid::new_v4());

        let repo = InMemoryCardRepository::from_records(vec![first.clone(), second.clone()]).unwrap();
        assert_eq!(repo.len(), 2);

        second.id = first.id;
        let result = InMemoryCardRepository::from_records(vec![first, second]);
        assert!(matches!(result, Err(CardError::Storage { .. })));
    }

    #[test]
    fn test_update_keeps_id() {
        let mut repo = InMemoryCardRepository::new();
        let created = repo.create_card(new_card("Old Name")).unwrap();

        let updated = repo
            .update_card(created.id, NewCard::new("New Name", Money::from_major(30_000), 20, 10))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.closing_day, 20);
        assert_eq!(repo.get_card(created.id).unwrap(), updated);
    }

    #[test]
    fn test_limit_rules_differ_for_create_and_edit() {
        let mut repo = InMemoryCardRepository::new();

        let result = repo.create_card(NewCard::new("Frozen", Money::ZERO, 10, 20));
        assert!(matches!(result, Err(CardError::InvalidCreditLimit { .. })));

        let created = repo.create_card(new_card("Frozen")).unwrap();
        let updated = repo
            .update_card(created.id, NewCard::new("Frozen", Money::ZERO, 10, 20))
            .unwrap();
        assert_eq!(updated.credit_limit, Money::ZERO);

        let result = repo.update_card(created.id, NewCard::new("Frozen", Money::from_major(-5), 10, 20));
        assert!(matches!(result, Err(CardError::InvalidCreditLimit { .. })));
    }

    #[test]
    fn test_update_and_delete_unknown_card() {
        let mut repo = InMemoryCardRepository::new();
        let missing = Uuid::new_v4();

        assert!(matches!(
            repo.update_card(missing, new_card("Ghost")),
            Err(CardError::CardNotFound { .. })
        ));
        assert!(matches!(repo.delete_card(missing), Err(CardError::CardNotFound { .. })));
        assert!(matches!(repo.get_card(missing), Err(CardError::CardNotFound { .. })));
    }

    #[test]
    fn test_delete_removes_card() {
        let mut repo = InMemoryCardRepository::new();
        let keep = repo.create_card(new_card("Keep")).unwrap();
        let gone = repo.create_card(new_card("Gone")).unwrap();

        let removed = repo.delete_card(gone.id).unwrap();
        assert_eq!(removed.name, "Gone");

        let remaining = repo.list_cards().unwrap();
        assert_eq!(remaining, vec![keep]);
    }
}
