use crate::model::card::CardModel;

/// Decides which cached views go stale after each kind of mutation.
/// Command services ask this policy for the key set and hand it to
/// [`CacheStore::delete_from_cache`](crate::cache::CacheStore).
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheInvalidationPolicy;

impl CacheInvalidationPolicy {
    pub fn card_key(card_id: i32) -> String {
        format!("cards:find_by_id:{card_id}")
    }

    pub fn user_cards_pattern(user_id: i32) -> String {
        format!("cards:find_by_user:{user_id}:*")
    }

    pub fn card_transfers_pattern(card_id: i32) -> String {
        format!("transfers:find_by_card:{card_id}:*")
    }

    pub fn user_transfers_pattern(user_id: i32) -> String {
        format!("transfers:find_by_user:{user_id}:*")
    }

    pub fn after_card_created(&self, user_id: i32) -> Vec<String> {
        vec![Self::user_cards_pattern(user_id)]
    }

    /// Status changes and deletion stale both the single-card view and the
    /// owner's card list.
    pub fn after_card_mutated(&self, card_id: i32, user_id: i32) -> Vec<String> {
        vec![Self::card_key(card_id), Self::user_cards_pattern(user_id)]
    }

    /// A committed transfer stales both card views, both owners' card
    /// lists, and every transfer history view touching either card.
    /// Transfer rows themselves are immutable, so `find_by_id` entries for
    /// transfers are never invalidated.
    pub fn after_transfer(&self, from: &CardModel, to: &CardModel) -> Vec<String> {
        let mut keys = vec![
            Self::card_key(from.card_id),
            Self::card_key(to.card_id),
            Self::card_transfers_pattern(from.card_id),
            Self::card_transfers_pattern(to.card_id),
        ];

        let mut owners = vec![from.user_id, to.user_id];
        owners.sort_unstable();
        owners.dedup();
        for user_id in owners {
            keys.push(Self::user_cards_pattern(user_id));
            keys.push(Self::user_transfers_pattern(user_id));
        }

        keys
    }

    pub fn after_user_mutated(&self, user_id: i32) -> Vec<String> {
        vec![
            format!("users:find_by_id:{user_id}"),
            "users:find_all:*".to_string(),
        ]
    }
}
