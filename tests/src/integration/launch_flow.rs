//! # Verified Launch Flow
//!
//! End-to-end: signed payload in, verified identity and persisted profile
//! out, with every terminal rejection mapped to its caller-visible class.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use miniapp_auth::adapters::memory::InMemoryProfileStore;
    use miniapp_auth::{
        AuthConfig, AuthError, ErrorClass, LaunchAuthApi, LaunchAuthService, Profile,
        ProfileStore, SecretToken, StoreError, UserIdentity, ValidationError,
    };

    use crate::support::{build_payload, payload_aged, TEST_TOKEN};

    fn live_service(
        store: Arc<InMemoryProfileStore>,
    ) -> LaunchAuthService<Arc<InMemoryProfileStore>> {
        LaunchAuthService::new(AuthConfig::live(SecretToken::new(TEST_TOKEN)), store)
    }

    #[tokio::test]
    async fn test_signed_launch_round_trip() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = live_service(Arc::clone(&store));

        let payload = payload_aged(
            TEST_TOKEN,
            r#"{"id":42,"first_name":"Ada","username":"ada","is_premium":true}"#,
            0,
        );
        let launch = service.authenticate(&payload).await.unwrap();

        assert!(!launch.bypass);
        assert_eq!(launch.user.id, 42);
        assert!(launch.profile.is_premium);

        let row = store.get(42).await.expect("profile row persisted");
        assert_eq!(row, launch.profile);
    }

    #[tokio::test]
    async fn test_repeated_launches_converge_to_one_row() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = live_service(Arc::clone(&store));

        let first = payload_aged(TEST_TOKEN, r#"{"id":7,"username":"before"}"#, 0);
        let second = payload_aged(TEST_TOKEN, r#"{"id":7,"username":"after"}"#, 0);
        service.authenticate(&first).await.unwrap();
        service.authenticate(&second).await.unwrap();

        assert_eq!(store.len().await, 1);
        let row = store.get(7).await.unwrap();
        assert_eq!(row.username.as_deref(), Some("after"));
    }

    #[tokio::test]
    async fn test_field_order_does_not_matter_on_the_wire() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = live_service(Arc::clone(&store));

        let pairs_forward = payload_aged(TEST_TOKEN, r#"{"id":5,"first_name":"E"}"#, 10);
        // Reassemble the same payload with its pairs reversed
        let reversed = pairs_forward
            .split('&')
            .rev()
            .collect::<Vec<_>>()
            .join("&");

        assert!(service.authenticate(&reversed).await.is_ok());
    }

    #[tokio::test]
    async fn test_unrecognized_fields_verify_and_surface_as_extras() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = live_service(Arc::clone(&store));

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            .to_string();
        let payload = build_payload(
            TEST_TOKEN,
            &[
                ("auth_date", now.as_str()),
                ("user", r#"{"id":3,"first_name":"C"}"#),
                ("chat_type", "private"),
                ("signature", "opaque-newer-field"),
            ],
        );

        let launch = service.authenticate(&payload).await.unwrap();
        let context = launch.context.unwrap();
        assert_eq!(context.chat_type.as_deref(), Some("private"));
        assert_eq!(
            context.extras.get("signature").map(String::as_str),
            Some("opaque-newer-field")
        );
    }

    #[tokio::test]
    async fn test_stale_launch_is_unauthorized() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = live_service(Arc::clone(&store));

        let err = service
            .authenticate(&payload_aged(TEST_TOKEN, r#"{"id":1}"#, 3601))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Stale { .. }));
        assert_eq!(err.class(), ErrorClass::Unauthorized);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_foreign_bot_signature_is_unauthorized() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = live_service(Arc::clone(&store));

        let foreign = payload_aged("999999:OTHER-BOT", r#"{"id":1}"#, 0);
        let err = service.authenticate(&foreign).await.unwrap_err();

        assert_eq!(err, AuthError::InvalidSignature);
        assert_eq!(err.class(), ErrorClass::Unauthorized);
    }

    #[tokio::test]
    async fn test_missing_hash_is_a_client_error() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = live_service(Arc::clone(&store));

        let err = service
            .authenticate("auth_date=1700000000&query_id=AAAA")
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::Validation(ValidationError::MissingHash));
        assert_eq!(err.class(), ErrorClass::ClientError);
    }

    #[tokio::test]
    async fn test_store_outage_is_a_server_error() {
        struct OutageStore;

        #[async_trait::async_trait]
        impl ProfileStore for OutageStore {
            async fn upsert(&self, _identity: &UserIdentity) -> Result<Profile, StoreError> {
                Err(StoreError::UpsertFailed {
                    cause: "connection refused".to_string(),
                })
            }
        }

        let service = LaunchAuthService::new(
            AuthConfig::live(SecretToken::new(TEST_TOKEN)),
            OutageStore,
        );

        let err = service
            .authenticate(&payload_aged(TEST_TOKEN, r#"{"id":1}"#, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Upsert(_)));
        assert_eq!(err.class(), ErrorClass::ServerError);
    }

    #[tokio::test]
    async fn test_concurrent_launches_for_same_identity_leave_one_row() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = Arc::new(live_service(Arc::clone(&store)));

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = Arc::clone(&service);
            let user_json = format!(r#"{{"id":11,"username":"racer{i}"}}"#);
            handles.push(tokio::spawn(async move {
                let payload = payload_aged(TEST_TOKEN, &user_json, 0);
                service.authenticate(&payload).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // Whichever upsert landed last, there is exactly one row
        assert_eq!(store.len().await, 1);
        assert!(store.get(11).await.unwrap().username.is_some());
    }
}
