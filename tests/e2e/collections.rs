//! E2E tests for lists, hashes and sorted sets
//!
//! Run with: REDIS_TEST_HOST=127.0.0.1 cargo test -- --ignored collections

#[cfg(test)]
mod tests {
    use crate::common::{Order, cleanup, live_store};
    use std::collections::HashMap;

    #[tokio::test]
    #[ignore]
    async fn test_list_operations() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("lists").await;

        assert_eq!(store.list_right_push("queue", "b").await.unwrap(), 1);
        assert_eq!(store.list_right_push("queue", "c").await.unwrap(), 2);
        assert_eq!(store.list_left_push("queue", "a").await.unwrap(), 3);
        assert_eq!(
            store.list_range("queue", 0, -1).await.unwrap(),
            vec!["a", "b", "c"]
        );

        store.list_right_push("queue", "b").await.unwrap();
        assert_eq!(store.list_remove("queue", 0, "b").await.unwrap(), 2);
        assert_eq!(store.list_length("queue").await.unwrap(), 2);

        store.list_trim("queue", 0, 0).await.unwrap();
        assert_eq!(store.list_range("queue", 0, -1).await.unwrap(), vec!["a"]);

        assert_eq!(
            store.list_left_pop("queue").await.unwrap().as_deref(),
            Some("a")
        );
        assert_eq!(store.list_right_pop("queue").await.unwrap(), None);

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_list_json() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("list-json").await;

        store
            .list_right_push_json("orders", &Order::sample(1))
            .await
            .unwrap();
        store
            .list_left_push_json("orders", &Order::sample(0))
            .await
            .unwrap();

        let all: Vec<Order> = store.list_range_json("orders", 0, -1).await.unwrap();
        assert_eq!(all, vec![Order::sample(0), Order::sample(1)]);

        let last: Option<Order> = store.list_right_pop_json("orders").await.unwrap();
        assert_eq!(last, Some(Order::sample(1)));
        let first: Option<Order> = store.list_left_pop_json("orders").await.unwrap();
        assert_eq!(first, Some(Order::sample(0)));
        let none: Option<Order> = store.list_left_pop_json("orders").await.unwrap();
        assert_eq!(none, None);

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_hash_operations() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("hashes").await;

        assert!(store.hash_set("user:1", "name", "ada").await.unwrap());
        assert!(!store.hash_set("user:1", "name", "ada l.").await.unwrap());
        store
            .hash_set_multiple("user:1", &[("lang", "en"), ("tz", "UTC")])
            .await
            .unwrap();

        assert_eq!(
            store.hash_get("user:1", "name").await.unwrap().as_deref(),
            Some("ada l.")
        );
        assert_eq!(store.hash_get("user:1", "nope").await.unwrap(), None);
        assert!(store.hash_exists("user:1", "tz").await.unwrap());
        assert_eq!(store.hash_length("user:1").await.unwrap(), 3);

        let mut fields = store.hash_keys("user:1").await.unwrap();
        fields.sort();
        assert_eq!(fields, vec!["lang", "name", "tz"]);
        assert_eq!(store.hash_values("user:1").await.unwrap().len(), 3);

        let all = store.hash_get_all("user:1").await.unwrap();
        assert_eq!(all.get("lang").map(String::as_str), Some("en"));

        assert!(store.hash_delete("user:1", "tz").await.unwrap());
        assert!(!store.hash_delete("user:1", "tz").await.unwrap());

        assert_eq!(store.hash_increment("user:1", "logins", 2).await.unwrap(), 2);
        assert_eq!(store.hash_increment("user:1", "logins", 3).await.unwrap(), 5);

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_hash_json() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("hash-json").await;

        store
            .hash_set_json("orders", "first", &Order::sample(1))
            .await
            .unwrap();
        store
            .hash_set_json("orders", "second", &Order::sample(2))
            .await
            .unwrap();

        let first: Option<Order> = store.hash_get_json("orders", "first").await.unwrap();
        assert_eq!(first, Some(Order::sample(1)));

        let all: HashMap<String, Order> = store.hash_get_all_json("orders").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["second"], Order::sample(2));

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_sorted_set_operations() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("zsets").await;

        assert!(store.sorted_set_add("board", "carol", 30.0).await.unwrap());
        assert!(store.sorted_set_add("board", "alice", 10.0).await.unwrap());
        assert!(store.sorted_set_add("board", "bob", 20.0).await.unwrap());
        assert!(!store.sorted_set_add("board", "bob", 25.0).await.unwrap());

        assert_eq!(
            store.sorted_set_range("board", 0, -1).await.unwrap(),
            vec!["alice", "bob", "carol"]
        );
        assert_eq!(
            store.sorted_set_range_with_scores("board", 0, 0).await.unwrap(),
            vec![("alice".to_string(), 10.0)]
        );
        assert_eq!(
            store
                .sorted_set_range_by_score("board", 20.0, 30.0)
                .await
                .unwrap(),
            vec!["bob", "carol"]
        );

        assert_eq!(
            store.sorted_set_score("board", "bob").await.unwrap(),
            Some(25.0)
        );
        assert_eq!(store.sorted_set_score("board", "dave").await.unwrap(), None);
        assert_eq!(
            store.sorted_set_increment("board", "alice", 100.0).await.unwrap(),
            110.0
        );
        assert_eq!(store.sorted_set_rank("board", "alice").await.unwrap(), Some(2));
        assert_eq!(store.sorted_set_rank("board", "dave").await.unwrap(), None);

        assert!(store.sorted_set_remove("board", "carol").await.unwrap());
        assert_eq!(store.sorted_set_length("board").await.unwrap(), 2);

        cleanup(&store).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_sorted_set_json() {
        crate::skip_without_env!("REDIS_TEST_HOST");
        let store = live_store("zset-json").await;

        store
            .sorted_set_add_json("recent", &Order::sample(2), 2.0)
            .await
            .unwrap();
        store
            .sorted_set_add_json("recent", &Order::sample(1), 1.0)
            .await
            .unwrap();

        let ordered: Vec<Order> = store.sorted_set_range_json("recent", 0, -1).await.unwrap();
        assert_eq!(ordered, vec![Order::sample(1), Order::sample(2)]);

        cleanup(&store).await;
    }
}
