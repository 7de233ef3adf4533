//! Normalized collections keyed by id, updated through a pure reducer.
//!
//! The conference wizard edits lists of tickets, pricing phases, and policies.
//! Each list is a [`Collection`] and every edit is a [`CollectionAction`]
//! applied with [`Collection::reduce`], which consumes the old collection and
//! returns the new one.

use std::collections::HashMap;

use crate::error::{RescheduleError, Result};

/// Anything stored in a [`Collection`] exposes a stable id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for crate::session::Session {
    fn key(&self) -> &str {
        &self.id
    }
}

/// One edit to a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionAction<T> {
    Add(T),
    /// Replace the item with the same id.
    Update(T),
    Remove(String),
    /// Move the item to position `to` (clamped to the last position).
    Move { id: String, to: usize },
}

/// Insertion-ordered items, unique by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    order: Vec<String>,
    items: HashMap<String, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }
}

impl<T: Keyed> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from items in order.
    ///
    /// # Errors
    /// Returns `RescheduleError::DuplicateId` if two items share an id.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Result<Self> {
        items
            .into_iter()
            .try_fold(Self::new(), |acc, item| acc.reduce(CollectionAction::Add(item)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Items in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Apply one action.
    ///
    /// # Errors
    /// `DuplicateId` when adding an id that exists; `UnknownId` when updating,
    /// removing, or moving an id that does not.
    pub fn reduce(mut self, action: CollectionAction<T>) -> Result<Self> {
        match action {
            CollectionAction::Add(item) => {
                let id = item.key().to_string();
                if self.items.contains_key(&id) {
                    return Err(RescheduleError::DuplicateId(id));
                }
                self.order.push(id.clone());
                self.items.insert(id, item);
            }
            CollectionAction::Update(item) => {
                let id = item.key().to_string();
                match self.items.get_mut(&id) {
                    Some(slot) => *slot = item,
                    None => return Err(RescheduleError::UnknownId(id)),
                }
            }
            CollectionAction::Remove(id) => {
                if self.items.remove(&id).is_none() {
                    return Err(RescheduleError::UnknownId(id));
                }
                self.order.retain(|existing| existing != &id);
            }
            CollectionAction::Move { id, to } => {
                let Some(from) = self.order.iter().position(|existing| existing == &id) else {
                    return Err(RescheduleError::UnknownId(id));
                };
                let moved = self.order.remove(from);
                let to = to.min(self.order.len());
                self.order.insert(to, moved);
            }
        }
        Ok(self)
    }
}
