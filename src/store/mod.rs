//! The in-memory item list shared by all request handlers.

use parking_lot::Mutex;

/// One tracked inventory entry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
    pub unit_cost: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32, unit_cost: f64) -> Item {
        Item {
            name: name.into(),
            quantity,
            unit_cost,
        }
    }

    pub fn total_cost(&self) -> f64 {
        f64::from(self.quantity) * self.unit_cost
    }
}

/// Owner of the item list. The lock is taken for the minimum scope needed
/// to copy or mutate the list, never across I/O.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Mutex<Vec<Item>>,
}

impl ItemStore {
    pub fn new() -> ItemStore {
        ItemStore::default()
    }

    /// Ordered copy of the current list, for rendering and export.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.lock().clone()
    }

    pub fn append(&self, item: Item) {
        self.items.lock().push(item);
    }

    /// Overwrites the item at `index`; false when the index is out of range.
    pub fn replace(&self, index: usize, item: Item) -> bool {
        let mut items = self.items.lock();
        match items.get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<Item> {
        self.items.lock().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_get() {
        let store = ItemStore::new();
        store.append(Item::new("Cemento", 3, 12.5));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0), Some(Item::new("Cemento", 3, 12.5)));
        assert_eq!(store.get(1), None);
    }

    #[test]
    fn test_replace_in_range() {
        let store = ItemStore::new();
        store.append(Item::new("Arena", 1, 5.0));
        assert!(store.replace(0, Item::new("Grava", 2, 7.0)));
        assert_eq!(store.get(0), Some(Item::new("Grava", 2, 7.0)));
    }

    #[test]
    fn test_replace_out_of_range() {
        let store = ItemStore::new();
        assert!(!store.replace(0, Item::new("Grava", 2, 7.0)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let store = ItemStore::new();
        store.append(Item::new("a", 1, 1.0));
        store.append(Item::new("b", 1, 1.0));
        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].name, "a");
        assert_eq!(snapshot[1].name, "b");
    }

    #[test]
    fn test_total_cost() {
        let item = Item::new("Varilla", 4, 2.25);
        assert!((item.total_cost() - 9.0).abs() < f64::EPSILON);
    }
}
