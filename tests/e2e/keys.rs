//! E2E tests for key operations, logical databases and reconnection
//!
//! Run with: REDIS_TEST_HOST=127.0.0.1 cargo test -- --ignored keys

#[cfg(test)]
mod tests {
    use crate::common::{cleanup, live_settings, live_store};
    use redis_facade::{RedisSettings, RedisStore};

    #[tokio::test]
    #[ignore]
    async fn test_key_lifecycle() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("lifecycle").await;

        store.set("k", "v", None).await.unwrap();
        assert!(store.exists("k").await.unwrap());
        assert_eq!(store.key_type("k").await.unwrap(), "string");
        assert_eq!(store.key_type("absent").await.unwrap(), "none");

        assert!(store.expire("k", 100).await.unwrap());
        assert!(store.ttl("k").await.unwrap() > 0);
        assert!(store.persist("k").await.unwrap());
        assert_eq!(store.ttl("k").await.unwrap(), -1);
        assert!(!store.expire("absent", 10).await.unwrap());
        assert_eq!(store.ttl("absent").await.unwrap(), -2);

        store.rename("k", "k2").await.unwrap();
        assert!(!store.exists("k").await.unwrap());
        assert_eq!(store.get("k2").await.unwrap().as_deref(), Some("v"));

        assert!(store.delete("k2").await.unwrap());
        assert!(!store.delete("k2").await.unwrap());

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_scan_stays_in_namespace() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("scan").await;
        let neighbour = live_store("scan-neighbour").await;

        let keys: Vec<String> = (0..250).map(|i| format!("item:{:03}", i)).collect();
        let pairs: Vec<(String, String)> =
            keys.iter().map(|k| (k.clone(), "x".to_string())).collect();
        store.mset(&pairs, None).await.unwrap();
        store.set("other", "y", None).await.unwrap();
        neighbour.set("item:999", "z", None).await.unwrap();

        let found = store.keys("item:*").await.unwrap();
        assert_eq!(found, keys);

        let everything = store.keys("*").await.unwrap();
        assert_eq!(everything.len(), 251);

        assert_eq!(store.delete_many(&keys).await.unwrap(), 250);
        assert_eq!(store.keys("item:*").await.unwrap(), Vec::<String>::new());

        cleanup(&store).await;
        cleanup(&neighbour).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_scan_treats_prefix_literally() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let base = live_settings("glob");
        let bracketed = RedisStore::connect(&RedisSettings {
            key_prefix: format!("{}app[1]:", base.key_prefix),
            ..base.clone()
        })
        .await
        .unwrap();
        let lookalike = RedisStore::connect(&RedisSettings {
            key_prefix: format!("{}app1:", base.key_prefix),
            ..base
        })
        .await
        .unwrap();

        bracketed.set("mine", "1", None).await.unwrap();
        lookalike.set("theirs", "2", None).await.unwrap();

        assert_eq!(bracketed.keys("*").await.unwrap(), vec!["mine"]);
        assert_eq!(lookalike.keys("*").await.unwrap(), vec!["theirs"]);

        cleanup(&bracketed).await;
        cleanup(&lookalike).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_with_database_is_isolated() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("databases").await;
        let other = store.with_database(1).unwrap();
        assert_eq!(other.settings().database, 1);
        assert_eq!(other.prefix(), store.prefix());

        store.set("shared-name", "db0", None).await.unwrap();
        other.set("shared-name", "db1", None).await.unwrap();

        assert_eq!(
            store.get("shared-name").await.unwrap().as_deref(),
            Some("db0")
        );
        assert_eq!(
            other.get("shared-name").await.unwrap().as_deref(),
            Some("db1")
        );

        cleanup(&other).await;
        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_reconnects_after_server_kills_client() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = RedisStore::connect(&live_settings("reconnect")).await.unwrap();
        let killer = live_store("reconnect-killer").await;

        store.set("survives", "yes", None).await.unwrap();

        let mut victim = store.get_connection().await.unwrap();
        let id: i64 = redis::cmd("CLIENT")
            .arg("ID")
            .query_async(&mut victim)
            .await
            .unwrap();

        let mut conn = killer.get_connection().await.unwrap();
        let killed: i64 = redis::cmd("CLIENT")
            .arg("KILL")
            .arg("ID")
            .arg(id)
            .query_async(&mut conn)
            .await
            .unwrap();
        assert_eq!(killed, 1);
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        // The first call after the kill may observe the dropped socket
        let _ = store.get("survives").await;
        assert_eq!(
            store.get("survives").await.unwrap().as_deref(),
            Some("yes")
        );
        assert!(store.stats().connects >= 2);

        cleanup(&store).await;
        killer.close().await;
    }
}
