//! # Development Bypass Flow
//!
//! The bypass substitutes a fixed identity and skips verification, but the
//! upsert step still runs so development sees the same persistence behavior
//! as production.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use miniapp_auth::adapters::memory::InMemoryProfileStore;
    use miniapp_auth::{AuthConfig, LaunchAuthApi, LaunchAuthService, UserIdentity};

    fn dev_identity() -> UserIdentity {
        UserIdentity::from_json(
            r#"{"id":999,"first_name":"Dev","username":"devbox","is_premium":false}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_bypass_persists_profile_without_any_secret() {
        // No token exists anywhere in this configuration
        let store = Arc::new(InMemoryProfileStore::new());
        let service =
            LaunchAuthService::new(AuthConfig::dev_bypass(dev_identity()), Arc::clone(&store));

        let launch = service.authenticate("").await.unwrap();

        assert!(launch.bypass);
        assert!(launch.context.is_none());
        assert_eq!(launch.user.id, 999);
        assert_eq!(store.get(999).await.unwrap().username.as_deref(), Some("devbox"));
    }

    #[tokio::test]
    async fn test_bypass_ignores_whatever_payload_arrives() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service =
            LaunchAuthService::new(AuthConfig::dev_bypass(dev_identity()), Arc::clone(&store));

        // Unsigned garbage, a stale payload, anything: the fixed identity wins
        for payload in ["not-a-payload", "hash=00", "auth_date=1&hash=zz"] {
            let launch = service.authenticate(payload).await.unwrap();
            assert_eq!(launch.profile.id, 999);
        }

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_bypass_upserts_converge_like_the_verified_path() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service =
            LaunchAuthService::new(AuthConfig::dev_bypass(dev_identity()), Arc::clone(&store));

        service.authenticate("").await.unwrap();
        let first_updated = store.get(999).await.unwrap().updated_at;
        service.authenticate("").await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.get(999).await.unwrap().updated_at >= first_updated);
    }
}
