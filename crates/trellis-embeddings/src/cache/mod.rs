//! L1 in-memory cache using moka.

use std::time::Duration;

use moka::sync::Cache;

/// Idle entries are dropped after an hour.
const TIME_TO_IDLE: Duration = Duration::from_secs(3600);

/// In-memory query-embedding cache.
///
/// Keys are blake3 hashes of `model_name` + text, so vectors from different
/// model versions never collide.
pub struct L1MemoryCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1MemoryCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(TIME_TO_IDLE)
            .build();
        Self { cache }
    }

    /// Cache key for `text` embedded by `model_name`.
    pub fn key(model_name: &str, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(model_name.as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    /// Approximate entry count (moka applies writes lazily).
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
