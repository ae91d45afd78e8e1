use crate::config::RedisPool;
use chrono::Duration;
use deadpool_redis::redis::cmd;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

/// Best-effort read-through cache over redis. Every failure degrades to a
/// miss or a no-op: cached views are acceleration only, never the source
/// of truth. Balance reads that feed transfer validation always come from
/// the store.
pub struct CacheStore {
    pool: RedisPool,
}

impl CacheStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    pub async fn get_from_cache<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = match self.pool.get_conn().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("redis unavailable, treating {key} as cache miss: {e:?}");
                return None;
            }
        };

        let raw: Option<String> = match cmd("GET").arg(key).query_async(&mut conn).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to read cache key {key}: {e:?}");
                return None;
            }
        };

        let raw = raw?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("failed to deserialize cache key {key}: {e:?}");
                None
            }
        }
    }

    pub async fn set_to_cache<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to serialize value for cache key {key}: {e:?}");
                return;
            }
        };

        let mut conn = match self.pool.get_conn().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("redis unavailable, skipping cache write for {key}: {e:?}");
                return;
            }
        };

        let seconds = ttl.num_seconds().max(1);
        if let Err(e) = cmd("SET")
            .arg(key)
            .arg(payload)
            .arg("EX")
            .arg(seconds)
            .query_async::<()>(&mut conn)
            .await
        {
            warn!("failed to write cache key {key}: {e:?}");
        } else {
            debug!("cached {key} for {seconds}s");
        }
    }

    /// Deletes a key, or every matching key when the argument contains a
    /// `*` wildcard.
    pub async fn delete_from_cache(&self, key: &str) {
        let mut conn = match self.pool.get_conn().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("redis unavailable, skipping invalidation of {key}: {e:?}");
                return;
            }
        };

        if key.contains('*') {
            let keys: Vec<String> = match cmd("KEYS").arg(key).query_async(&mut conn).await {
                Ok(keys) => keys,
                Err(e) => {
                    warn!("failed to expand cache pattern {key}: {e:?}");
                    return;
                }
            };

            if keys.is_empty() {
                return;
            }

            let mut del = cmd("DEL");
            for k in &keys {
                del.arg(k);
            }
            if let Err(e) = del.query_async::<()>(&mut conn).await {
                warn!("failed to invalidate cache pattern {key}: {e:?}");
            }
        } else if let Err(e) = cmd("DEL").arg(key).query_async::<()>(&mut conn).await {
            warn!("failed to invalidate cache key {key}: {e:?}");
        }
    }
}
