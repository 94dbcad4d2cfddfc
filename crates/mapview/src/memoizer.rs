use parking_lot::Mutex;
use std::{
    collections::HashMap,
    fmt,
    hash::Hash,
    sync::{Arc, OnceLock},
};
use tracing::debug;

/// Thread-safe lazily evaluated cache.
///
/// For every key the value function runs at most once. Callers asking for a
/// key whose value is being computed block until it is published, then all of
/// them observe a clone of the same value. Computations for different keys
/// run concurrently: the table lock is only held long enough to find or
/// create the key's slot.
///
/// Published values are never replaced or evicted. Values are handed out by
/// clone, so `V` is usually an `Arc` or a `Result` of one.
///
/// The value function must not request its own key from the same memoizer.
pub struct Memoizer<K, V> {
    slots: Mutex<HashMap<K, Arc<OnceLock<V>>>>,
}

impl<K, V> Memoizer<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the value for `key`, computing it with `f` if no value has been
    /// published yet.
    pub fn get_or_compute(&self, key: &K, f: impl FnOnce(&K) -> V) -> V {
        let slot = self.slot(key);

        if let Some(value) = slot.get() {
            return value.clone();
        }

        slot.get_or_init(|| {
            debug!(?key, "memoizer miss; computing");
            f(key)
        })
        .clone()
    }

    /// Returns the value for `key` if one has been published.
    pub fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.lock().get(key).cloned()?;
        slot.get().cloned()
    }

    /// Number of keys with a published value.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &K) -> Arc<OnceLock<V>> {
        let mut slots = self.slots.lock();

        if let Some(slot) = slots.get(key) {
            return slot.clone();
        }

        let slot = Arc::new(OnceLock::new());
        slots.insert(key.clone(), slot.clone());
        slot
    }
}

impl<K, V> Default for Memoizer<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Memoizer<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Memoizer")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}
