use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Identifier-keyed memoization table.
///
/// Lives as long as the owning analyzer; nothing is written to disk. A bounded
/// table evicts its oldest entry first; an unbounded one never evicts.
pub struct MemoTable<V> {
    capacity: Option<usize>,
    inner: Mutex<MemoInner<V>>,
}

struct MemoInner<V> {
    entries: HashMap<String, V>,
    order: VecDeque<String>,
}

impl<V: Clone> MemoTable<V> {
    pub fn new(capacity: usize) -> Self {
        Self::with_capacity(Some(capacity))
    }

    pub fn unbounded() -> Self {
        Self::with_capacity(None)
    }

    fn with_capacity(capacity: Option<usize>) -> Self {
        MemoTable {
            capacity,
            inner: Mutex::new(MemoInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.get(key).cloned()
    }

    /// Stores `value` under `key`. Re-inserting an existing key replaces the
    /// value in place.
    pub fn insert(&self, key: &str, value: V) {
        if self.capacity == Some(0) {
            return;
        }

        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.entries.insert(key.to_string(), value).is_some() {
            return;
        }

        let Some(capacity) = self.capacity else { return };
        inner.order.push_back(key.to_string());
        while inner.order.len() > capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_returns_values() {
        let table = MemoTable::new(4);
        table.insert("EUW1_1", 1);
        assert_eq!(table.get("EUW1_1"), Some(1));
        assert_eq!(table.get("EUW1_2"), None);
    }

    #[test]
    fn evicts_oldest_entry_beyond_capacity() {
        let table = MemoTable::new(2);
        table.insert("a", 1);
        table.insert("b", 2);
        table.insert("c", 3);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a"), None);
        assert_eq!(table.get("b"), Some(2));
        assert_eq!(table.get("c"), Some(3));
    }

    #[test]
    fn duplicate_insert_keeps_single_slot() {
        let table = MemoTable::new(2);
        table.insert("a", 1);
        table.insert("a", 1);
        table.insert("b", 2);
        assert_eq!(table.get("a"), Some(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unbounded_table_keeps_every_entry() {
        let table = MemoTable::unbounded();
        for n in 0..5000 {
            table.insert(&format!("EUW1_{}", n), n);
        }
        assert_eq!(table.len(), 5000);
        assert_eq!(table.get("EUW1_0"), Some(0));
    }

    #[test]
    fn zero_capacity_disables_memoization() {
        let table = MemoTable::new(0);
        table.insert("a", 1);
        assert_eq!(table.get("a"), None);
    }
}
