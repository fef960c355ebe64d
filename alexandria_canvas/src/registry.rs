// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card registry: the arena of live cards, kept in registration order.

use crate::card::Card;

/// Identifier for a registered card.
///
/// This is a small, copyable handle that stays stable while the card is
/// registered and becomes stale when it is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `CardId` for that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `CardId`.
///
/// Stale ids never alias a different live card because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CardId(u32, u32);

impl CardId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    card: Option<Card>,
}

/// Arena of registered cards.
///
/// [`insert`](Self::insert) and [`remove`](Self::remove) are the only
/// structural mutators. Iteration follows registration order, which is also the
/// order used to break ties when resolving which handle lies under the pointer.
#[derive(Debug, Default)]
pub struct CardRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<CardId>,
}

impl CardRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a card and returns its id.
    pub fn insert(&mut self, card: Card) -> CardId {
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.card = Some(card);
            CardId(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                card: Some(card),
            });
            CardId(idx, 1)
        };
        self.order.push(id);
        id
    }

    /// Removes a card, returning it if `id` was live.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        let card = slot.card.take()?;
        self.free.push(id.0);
        self.order.retain(|&o| o != id);
        Some(card)
    }

    /// Returns true if `id` refers to a live card.
    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    /// Borrows a live card.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.card.as_ref())
    }

    /// Mutably borrows a live card.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.card.as_mut())
    }

    /// Number of live cards.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no card is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in registration order.
    pub fn ids(&self) -> &[CardId] {
        &self.order
    }

    /// Cards in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.get(id).map(|card| (id, card)))
    }
}
