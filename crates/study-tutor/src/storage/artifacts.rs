//! Generated-artifact cache with material-based invalidation
//!
//! Memoizes study notes by a composite key over (material, subject, level,
//! focus). Deleting a material cascades here and drops every artifact
//! generated from it, including ones whose computation is still in flight.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::Result;
use crate::types::NotesResponse;

/// One cached notes artifact
#[derive(Debug, Clone)]
pub struct CachedNotes {
    /// The generation result as returned to the caller
    pub response: NotesResponse,
    /// Material the notes were generated from
    pub material_id: Uuid,
    /// When this was cached
    pub cached_at: DateTime<Utc>,
    /// Number of cache hits
    pub hit_count: u32,
}

/// Cache of generated artifacts keyed by (material, subject, level, focus)
pub struct ArtifactCache {
    entries: DashMap<String, CachedNotes>,
    /// Reverse index: material -> artifact keys generated from it
    index: DashMap<Uuid, HashSet<String>>,
    /// Per-key gates so one computation runs per key at a time
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            index: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    /// Composite cache key; an absent subject maps to a fixed placeholder
    /// so all four parts are always present
    pub fn notes_key(
        material_id: &Uuid,
        subject: Option<&str>,
        level: &str,
        focus: &str,
    ) -> String {
        format!(
            "{}_{}_{}_{}",
            material_id,
            subject.unwrap_or("none"),
            level,
            focus
        )
    }

    /// Return the cached artifact for `key`, or run `compute` and cache
    /// its result
    ///
    /// At most one computation runs per key at a time; a second caller
    /// with the same key waits and then reads the first caller's result.
    /// Failed computations are not cached. If the material is invalidated
    /// while a computation is in flight the result is returned to the
    /// caller but not retained.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        material_id: Uuid,
        compute: F,
    ) -> Result<NotesResponse>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<NotesResponse>>,
    {
        let gate = self
            .in_flight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = gate.lock().await;

        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.hit_count += 1;
            tracing::debug!("Artifact cache hit: {} (hits: {})", key, entry.hit_count);
            return Ok(entry.response.clone());
        }

        // Register the key before computing so a concurrent invalidation
        // can signal us to discard the result
        self.index
            .entry(material_id)
            .or_default()
            .insert(key.to_string());

        let response = match compute().await {
            Ok(response) => response,
            Err(e) => {
                if let Some(mut keys) = self.index.get_mut(&material_id) {
                    keys.remove(key);
                }
                return Err(e);
            }
        };

        let still_live = self
            .index
            .get(&material_id)
            .map(|keys| keys.contains(key))
            .unwrap_or(false);
        if still_live {
            self.entries.insert(
                key.to_string(),
                CachedNotes {
                    response: response.clone(),
                    material_id,
                    cached_at: Utc::now(),
                    hit_count: 0,
                },
            );
            tracing::debug!("Cached artifact: {}", key);
        } else {
            tracing::debug!("Discarding artifact computed for invalidated material: {}", key);
        }

        Ok(response)
    }

    /// Drop every artifact generated from a material
    ///
    /// Called when the material is deleted.
    pub fn invalidate_material(&self, material_id: &Uuid) -> usize {
        let keys: Vec<String> = match self.index.remove(material_id) {
            Some((_, keys)) => keys.into_iter().collect(),
            None => return 0,
        };

        let mut invalidated = 0;
        for key in &keys {
            if self.entries.remove(key).is_some() {
                invalidated += 1;
            }
            self.in_flight.remove(key);
        }

        if invalidated > 0 {
            tracing::info!(
                "Invalidated {} cached artifacts for material {}",
                invalidated,
                material_id
            );
        }
        invalidated
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.entries.clear();
        self.index.clear();
        self.in_flight.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let total_hits = self.entries.iter().map(|e| e.hit_count).sum();
        CacheStats {
            entries: self.entries.len(),
            total_hits,
        }
    }
}

impl Default for ArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub total_hits: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::NotesMetadata;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_notes(text: &str) -> NotesResponse {
        NotesResponse {
            success: true,
            notes: text.to_string(),
            metadata: NotesMetadata {
                subject: None,
                level: "intermediate".to_string(),
                focus: "concept-oriented".to_string(),
                word_count: text.split_whitespace().count(),
            },
        }
    }

    #[tokio::test]
    async fn test_get_or_compute_memoizes() {
        let cache = ArtifactCache::new();
        let material_id = Uuid::new_v4();
        let key = ArtifactCache::notes_key(&material_id, None, "intermediate", "concept-oriented");
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_compute(&key, material_id, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample_notes("# Notes"))
            })
            .await
            .unwrap();
        let second = cache
            .get_or_compute(&key, material_id, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample_notes("# Different"))
            })
            .await
            .unwrap();

        // Second call is a hit; the compute closure ran exactly once
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.notes, second.notes);
        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.total_hits, 1);
    }

    #[tokio::test]
    async fn test_failed_compute_is_not_cached() {
        let cache = ArtifactCache::new();
        let material_id = Uuid::new_v4();
        let key = ArtifactCache::notes_key(&material_id, Some("Physics"), "beginner", "exam-oriented");
        let calls = AtomicUsize::new(0);

        let err = cache
            .get_or_compute(&key, material_id, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<NotesResponse, _>(Error::llm("backend unavailable"))
            })
            .await;
        assert!(err.is_err());
        assert_eq!(cache.stats().entries, 0);

        let ok = cache
            .get_or_compute(&key, material_id, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample_notes("recovered"))
            })
            .await
            .unwrap();
        assert_eq!(ok.notes, "recovered");
        // Failure did not poison the key; compute ran again
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_material_cascades() {
        let cache = ArtifactCache::new();
        let material = Uuid::new_v4();
        let other = Uuid::new_v4();

        for level in ["beginner", "advanced"] {
            let key = ArtifactCache::notes_key(&material, None, level, "concept-oriented");
            cache
                .get_or_compute(&key, material, || async { Ok(sample_notes(level)) })
                .await
                .unwrap();
        }
        let other_key = ArtifactCache::notes_key(&other, None, "beginner", "concept-oriented");
        cache
            .get_or_compute(&other_key, other, || async { Ok(sample_notes("kept")) })
            .await
            .unwrap();

        assert_eq!(cache.invalidate_material(&material), 2);
        assert_eq!(cache.stats().entries, 1);
        // Unrelated material untouched
        let kept = cache
            .get_or_compute(&other_key, other, || async { Ok(sample_notes("recomputed")) })
            .await
            .unwrap();
        assert_eq!(kept.notes, "kept");
    }

    #[tokio::test]
    async fn test_concurrent_calls_compute_once() {
        let cache = Arc::new(ArtifactCache::new());
        let material_id = Uuid::new_v4();
        let key = ArtifactCache::notes_key(&material_id, None, "intermediate", "concept-oriented");
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..2 {
            let cache = cache.clone();
            let key = key.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute(&key, material_id, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                        Ok(sample_notes("once"))
                    })
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().notes, "once");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mid_flight_invalidation_discards_result() {
        let cache = Arc::new(ArtifactCache::new());
        let material_id = Uuid::new_v4();
        let key = ArtifactCache::notes_key(&material_id, None, "intermediate", "concept-oriented");

        let gate = Arc::new(tokio::sync::Notify::new());
        let task = {
            let cache = cache.clone();
            let key = key.clone();
            let gate = gate.clone();
            tokio::spawn(async move {
                cache
                    .get_or_compute(&key, material_id, || async move {
                        gate.notified().await;
                        Ok(sample_notes("stale"))
                    })
                    .await
            })
        };

        // Let the task reach its compute, then delete the material under it
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        cache.invalidate_material(&material_id);
        gate.notify_one();

        // Caller still gets the response, but nothing is retained
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.notes, "stale");
        assert_eq!(cache.stats().entries, 0);
    }
}
