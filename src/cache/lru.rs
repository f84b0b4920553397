//! LRU Tracker Module
//!
//! Recency-ordered map backing both the item-bounded [`LruSet`] and the
//! byte-bounded [`CredentialsCache`].
//!
//! [`LruSet`]: crate::cache::LruSet
//! [`CredentialsCache`]: crate::cache::CredentialsCache

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Sentinel index for "no node".
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction with O(1) promote and evict.
///
/// Nodes live in a slab (`slots`) and are chained into a doubly linked list
/// by index:
/// - `head` = Most recently used
/// - `tail` = Least recently used
///
/// Freed slots are recycled through `free`. `index` maps each key to its slot.
#[derive(Debug)]
pub struct LruTracker<K, V = ()> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    index: HashMap<K, usize>,
    head: usize,
    tail: usize,
}

impl<K, V> Default for LruTracker<K, V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: NIL,
            tail: NIL,
        }
    }
}

impl<K, V> LruTracker<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tracker with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
            head: NIL,
            tail: NIL,
        }
    }

    // == Insert ==
    /// Inserts a key as most recently used.
    ///
    /// If the key already exists its value is replaced, it moves to the
    /// front, and the previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.index.get(&key) {
            self.move_to_front(idx);
            let node = self.node_mut(idx);
            return Some(std::mem::replace(&mut node.value, value));
        }

        let node = Node {
            key: key.clone(),
            value,
            prev: NIL,
            next: NIL,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.index.insert(key, idx);
        self.link_front(idx);
        None
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    ///
    /// Returns false if the key is not tracked.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&idx) = self.index.get(key) else {
            return false;
        };
        self.move_to_front(idx);
        true
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Remove ==
    /// Removes a key from the tracker, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        self.unlink(idx);
        let node = self.release(idx);
        Some(node.value)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used entry.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<(K, V)> {
        if self.tail == NIL {
            return None;
        }
        let idx = self.tail;
        self.unlink(idx);
        let node = self.release(idx);
        self.index.remove(&node.key);
        Some((node.key, node.value))
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Linked List Plumbing ==
    fn node(&self, idx: usize) -> &Node<K, V> {
        self.slots[idx]
            .as_ref()
            .expect("linked slot must be occupied")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.slots[idx]
            .as_mut()
            .expect("linked slot must be occupied")
    }

    fn release(&mut self, idx: usize) -> Node<K, V> {
        let node = self.slots[idx]
            .take()
            .expect("released slot must be occupied");
        self.free.push(idx);
        node
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.link_front(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };
        if prev == NIL {
            self.head = next;
        } else {
            self.node_mut(prev).next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.node_mut(next).prev = prev;
        }
    }

    fn link_front(&mut self, idx: usize) {
        let head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = NIL;
            node.next = head;
        }
        if head == NIL {
            self.tail = idx;
        } else {
            self.node_mut(head).prev = idx;
        }
        self.head = idx;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    /// Keys from most to least recently used.
    fn order<K, V>(lru: &LruTracker<K, V>) -> Vec<&K>
    where
        K: Eq + Hash + Clone,
    {
        let mut keys = Vec::new();
        let mut cursor = lru.head;
        while cursor != NIL {
            let node = lru.node(cursor);
            keys.push(&node.key);
            cursor = node.next;
        }
        keys
    }

    fn keys(lru: &LruTracker<String>) -> Vec<&str> {
        order(lru).into_iter().map(String::as_str).collect()
    }

    fn oldest<K, V>(lru: &LruTracker<K, V>) -> Option<&K>
    where
        K: Eq + Hash + Clone,
    {
        order(lru).last().copied()
    }

    fn tracker(keys: &[&str]) -> LruTracker<String> {
        let mut lru = LruTracker::new();
        for key in keys {
            lru.insert(key.to_string(), ());
        }
        lru
    }

    #[test]
    fn test_lru_new() {
        let lru: LruTracker<String> = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(oldest(&lru), None);
    }

    #[test]
    fn test_lru_insert_new_keys() {
        let lru = tracker(&["key1", "key2", "key3"]);

        assert_eq!(lru.len(), 3);
        // key1 is oldest (added first)
        assert_eq!(oldest(&lru).map(String::as_str), Some("key1"));
        assert_eq!(keys(&lru), vec!["key3", "key2", "key1"]);
    }

    #[test]
    fn test_lru_insert_existing_key_replaces_value() {
        let mut lru: LruTracker<&str, u32> = LruTracker::new();

        assert_eq!(lru.insert("a", 1), None);
        assert_eq!(lru.insert("b", 2), None);
        assert_eq!(lru.insert("a", 10), Some(1));

        assert_eq!(lru.len(), 2);
        assert_eq!(order(&lru), vec![&"a", &"b"]);
        assert_eq!(lru.remove("a"), Some(10));
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = tracker(&["key1", "key2", "key3"]);

        // Touch key1 again - should move to front
        assert!(lru.touch("key1"));

        assert_eq!(lru.len(), 3);
        assert_eq!(oldest(&lru).map(String::as_str), Some("key2"));
        assert_eq!(keys(&lru), vec!["key1", "key3", "key2"]);
    }

    #[test]
    fn test_lru_touch_missing_key() {
        let mut lru = tracker(&["key1"]);
        assert!(!lru.touch("nonexistent"));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_contains_does_not_promote() {
        let lru = tracker(&["a", "b"]);
        assert!(lru.contains("a"));
        assert_eq!(oldest(&lru).map(String::as_str), Some("a"));
    }

    #[test]
    fn test_lru_touch_head_is_noop() {
        let mut lru = tracker(&["a", "b"]);
        assert!(lru.touch("b"));
        assert_eq!(keys(&lru), vec!["b", "a"]);
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut lru = tracker(&["key1", "key2", "key3"]);

        let evicted = lru.evict_oldest();
        assert_eq!(evicted, Some(("key1".to_string(), ())));
        assert_eq!(lru.len(), 2);

        let evicted = lru.evict_oldest();
        assert_eq!(evicted, Some(("key2".to_string(), ())));
        assert_eq!(lru.len(), 1);
        assert!(!lru.contains("key2"));
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru: LruTracker<String> = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = tracker(&["key1", "key2", "key3"]);

        assert_eq!(lru.remove("key2"), Some(()));

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains("key2"));
        assert!(lru.contains("key1"));
        assert!(lru.contains("key3"));
        assert_eq!(keys(&lru), vec!["key3", "key1"]);
    }

    #[test]
    fn test_lru_remove_head_and_tail() {
        let mut lru = tracker(&["a", "b", "c"]);

        lru.remove("c");
        lru.remove("a");

        assert_eq!(keys(&lru), vec!["b"]);
        assert_eq!(oldest(&lru).map(String::as_str), Some("b"));

        lru.remove("b");
        assert!(lru.is_empty());
        assert_eq!(oldest(&lru), None);
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove_nonexistent_key() {
        let mut lru = tracker(&["key1", "key2"]);

        // Remove a key that doesn't exist - should not panic or affect existing keys
        assert_eq!(lru.remove("nonexistent"), None);

        assert_eq!(lru.len(), 2);
        assert!(lru.contains("key1"));
        assert!(lru.contains("key2"));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = tracker(&["a", "b", "c"]);

        lru.touch("a");
        lru.touch("c");
        lru.touch("b");

        // front=[b, c, a]=back
        assert_eq!(lru.evict_oldest().map(|(k, _)| k), Some("a".to_string()));
        assert_eq!(lru.evict_oldest().map(|(k, _)| k), Some("c".to_string()));
        assert_eq!(lru.evict_oldest().map(|(k, _)| k), Some("b".to_string()));
    }

    #[test]
    fn test_lru_slots_are_recycled() {
        let mut lru: LruTracker<u32> = LruTracker::with_capacity(2);

        for i in 0..100 {
            lru.insert(i, ());
            if lru.len() > 2 {
                lru.evict_oldest();
            }
        }

        assert_eq!(lru.len(), 2);
        assert!(lru.slots.len() <= 3);
        assert_eq!(order(&lru), vec![&99, &98]);
    }
}
