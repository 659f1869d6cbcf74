#![allow(dead_code)]

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::domain::item::TodoItem;
use crate::domain::now_utc_rfc3339;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    ItemAdded,
    ItemUpdated,
    ItemRemoved,
    CollectionReplaced,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::ItemAdded => "item_added",
            ChangeKind::ItemUpdated => "item_updated",
            ChangeKind::ItemRemoved => "item_removed",
            ChangeKind::CollectionReplaced => "collection_replaced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub item_id: Option<String>,
    pub occurred_at: String,
}

/// Exclusive owner of the in-memory collection. Mutations go through this
/// type and fan a `ChangeEvent` out to subscribers; no UI binding is
/// assumed on the other end of the channel.
#[derive(Default)]
pub struct TodoBook {
    items: Vec<TodoItem>,
    listeners: Vec<Sender<ChangeEvent>>,
}

impl TodoBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            listeners: Vec::new(),
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (sender, receiver) = channel();
        self.listeners.push(sender);
        receiver
    }

    /// The add path: replaces in place when the id already exists, appends
    /// otherwise. Existing items never move.
    pub fn upsert(&mut self, item: TodoItem) -> bool {
        let item_id = item.id.clone();
        let replaced = match self.position(&item.id) {
            Some(index) => {
                self.items[index] = item;
                true
            }
            None => {
                self.items.push(item);
                false
            }
        };

        let kind = if replaced {
            ChangeKind::ItemUpdated
        } else {
            ChangeKind::ItemAdded
        };
        self.emit(kind, Some(item_id));
        replaced
    }

    /// Replaces the item with a matching id in place. Unknown ids are a
    /// no-op and return false; the collection is left untouched.
    pub fn update(&mut self, item: TodoItem) -> bool {
        let Some(index) = self.position(&item.id) else {
            return false;
        };

        let item_id = item.id.clone();
        self.items[index] = item;
        self.emit(ChangeKind::ItemUpdated, Some(item_id));
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<TodoItem> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.emit(ChangeKind::ItemRemoved, Some(removed.id.clone()));
        Some(removed)
    }

    pub fn replace_all(&mut self, items: Vec<TodoItem>) {
        self.items = items;
        self.emit(ChangeKind::CollectionReplaced, None);
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn emit(&mut self, kind: ChangeKind, item_id: Option<String>) {
        let event = ChangeEvent {
            kind,
            item_id,
            occurred_at: now_utc_rfc3339(),
        };
        self.listeners
            .retain(|listener| listener.send(event.clone()).is_ok());
    }
}
