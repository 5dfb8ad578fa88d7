use std::sync::Arc;

use anyhow::Context;
use backend_domain::ports::{KeyValueStore, PLAYERS_KEY};
use backend_domain::PlayerRecord;
use tokio::sync::Mutex;

/// The player collection as one stored value.
///
/// Every write goes through [`PlayerStore::modify`]: one read, the caller's change, one write,
/// all under a single lock.
pub struct PlayerStore {
    store: Arc<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl PlayerStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    pub async fn load(&self) -> anyhow::Result<Vec<PlayerRecord>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// `change` returns its result and whether the collection was touched.
    /// An untouched collection is not written back.
    pub async fn modify<T, F>(&self, change: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut Vec<PlayerRecord>) -> (T, bool),
    {
        let _guard = self.lock.lock().await;
        let mut players = self.read().await?;
        let (result, dirty) = change(&mut players);
        if dirty {
            let value = serde_json::to_value(&players).context("encode player collection")?;
            self.store
                .set(PLAYERS_KEY, value)
                .await
                .context("write player collection")?;
        }
        Ok(result)
    }

    async fn read(&self) -> anyhow::Result<Vec<PlayerRecord>> {
        match self.store.get(PLAYERS_KEY).await? {
            Some(value) => serde_json::from_value(value).context("decode player collection"),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_player, MemoryKv};
    use serde_json::json;

    #[tokio::test]
    async fn absent_collection_loads_empty() {
        let players = PlayerStore::new(Arc::new(MemoryKv::default()));
        assert!(players.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clean_modify_skips_the_write() {
        let kv = Arc::new(MemoryKv::default());
        let players = PlayerStore::new(kv.clone());
        let seen = players.modify(|list| (list.len(), false)).await.unwrap();
        assert_eq!(seen, 0);
        assert_eq!(kv.writes(), 0);
    }

    #[tokio::test]
    async fn dirty_modify_persists_whole_collection() {
        let kv = Arc::new(MemoryKv::default());
        let players = PlayerStore::new(kv.clone());
        players
            .modify(|list| {
                list.push(sample_player("a", 100));
                list.push(sample_player("b", 200));
                ((), true)
            })
            .await
            .unwrap();
        assert_eq!(kv.writes(), 1);
        let stored = players.load().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].current_value, 200);
    }

    #[tokio::test]
    async fn corrupt_collection_is_an_error_and_untouched() {
        let kv = Arc::new(MemoryKv::default());
        kv.set(PLAYERS_KEY, json!({"not": "a list"})).await.unwrap();
        let players = PlayerStore::new(kv.clone());
        assert!(players.load().await.is_err());
        assert!(players.modify(|_| ((), true)).await.is_err());
        assert_eq!(kv.get(PLAYERS_KEY).await.unwrap(), Some(json!({"not": "a list"})));
    }

    #[tokio::test]
    async fn reads_legacy_field_names() {
        let kv = Arc::new(MemoryKv::default());
        kv.set(
            PLAYERS_KEY,
            json!([{
                "id": "player_1700000000000_abcdefghi",
                "email": "old@example.com",
                "nickname": "Oldtimer",
                "region": "asia",
                "focusRightNow": 1500,
                "createdAt": "2024-11-02T10:00:00.000Z"
            }]),
        )
        .await
        .unwrap();
        let players = PlayerStore::new(kv).load().await.unwrap();
        assert_eq!(players[0].current_value, 1500);
        assert_eq!(players[0].nickname, "Oldtimer");
    }
}
