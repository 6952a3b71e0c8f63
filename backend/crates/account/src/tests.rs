//! Router-level tests for the account crate
//! Drives the composed router against the in-memory store.

#[cfg(test)]
mod support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use kernel::lang::LanguageConfig;
    use platform::password::{ClearTextPassword, HashingParams};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::AccountConfig;
    use crate::application::credential::SessionCodec;
    use crate::domain::entity::user::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::role::Role;
    use crate::infra::memory::MemoryStore;
    use crate::presentation::router::account_router_generic;

    pub const PASSWORD: &str = "Abcdef12";

    pub struct TestApp {
        pub router: Router,
        pub store: MemoryStore,
        /// Same secret as the router's codec
        pub codec: SessionCodec,
    }

    pub fn app() -> TestApp {
        let config = AccountConfig::development();
        let store = MemoryStore::new();
        let codec = SessionCodec::new(&config.token).unwrap();
        let router_codec = SessionCodec::new(&config.token).unwrap();
        let router = account_router_generic(
            store.clone(),
            router_codec,
            config,
            LanguageConfig::default(),
        );

        TestApp {
            router,
            store,
            codec,
        }
    }

    /// Insert a user directly into the store
    pub async fn seed_user(store: &MemoryStore, username: &str, roles: &[Role]) -> User {
        let password = ClearTextPassword::new(PASSWORD.to_string())
            .unwrap()
            .hash(&HashingParams::minimal(), None)
            .unwrap();
        let mut user = User::new(
            "Test User".into(),
            username.into(),
            format!("{username}@example.com"),
            password,
        );
        for role in roles {
            user.grant(*role);
        }
        store.create_user(&user).await.unwrap();
        user
    }

    pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
        router.clone().oneshot(request).await.unwrap()
    }

    pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    pub async fn body_json(response: Response<Body>) -> Value {
        let bytes = body_bytes(response).await;
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod account_tests {
    use axum::http::StatusCode;
    use kernel::lang::locales::{EN_US, PT_BR};
    use serde_json::json;

    use super::support::*;
    use crate::domain::repository::UserRepository;

    fn sign_up_body() -> serde_json::Value {
        json!({
            "name": "Alice",
            "username": "alice",
            "email": "a@b.com",
            "password": PASSWORD,
        })
    }

    #[tokio::test]
    async fn test_sign_up_returns_user_and_token() {
        let app = app();

        let response = send(
            &app.router,
            json_request("POST", "/v1/account", None, sign_up_body()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let user = body["user"].as_object().unwrap();
        assert_eq!(user["email"], "a@b.com");
        assert_eq!(user["username"], "alice");
        assert_eq!(user["bio"], "");
        for hidden in ["id", "password", "enabled", "locked"] {
            assert!(!user.contains_key(hidden), "{hidden} must not be exposed");
        }

        // トークンは本物
        let claims = app.codec.verify(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.sub, "a@b.com");
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_conflicts() {
        let app = app();
        send(
            &app.router,
            json_request("POST", "/v1/account", None, sign_up_body()),
        )
        .await;

        let mut body = sign_up_body();
        body["username"] = json!("alice2");
        let response = send(&app.router, json_request("POST", "/v1/account", None, body)).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["message"], PT_BR.account.email_exist);
        assert_eq!(body["method"], "POST");
        assert_eq!(body["url"], "/v1/account");
    }

    #[tokio::test]
    async fn test_sign_up_validation_order() {
        let app = app();
        let response = send(
            &app.router,
            json_request(
                "POST",
                "/v1/account",
                None,
                json!({"name": "A", "email": "nope", "password": "short"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], PT_BR.account.invalid_name);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_is_401() {
        let app = app();
        seed_user(&app.store, "bob", &[]).await;

        let response = send(
            &app.router,
            json_request(
                "POST",
                "/v1/account/session",
                None,
                json!({"email": "bob@example.com", "password": "Wrongpass1"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], PT_BR.account.unauthorized);
    }

    #[tokio::test]
    async fn test_sign_in_unknown_and_locked() {
        let app = app();

        let response = send(
            &app.router,
            json_request(
                "POST",
                "/v1/account/session",
                None,
                json!({"email": "ghost@example.com", "password": PASSWORD}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], PT_BR.account.not_found);

        let mut user = seed_user(&app.store, "carol", &[]).await;
        user.set_locked(true);
        app.store.update_user(&user).await.unwrap();

        let response = send(
            &app.router,
            json_request(
                "POST",
                "/v1/account/session",
                None,
                json!({"email": "carol@example.com", "password": PASSWORD}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await["message"],
            PT_BR.account.disabled_or_locked
        );
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let app = app();
        seed_user(&app.store, "dave", &[]).await;

        let response = send(
            &app.router,
            json_request(
                "POST",
                "/v1/account/session",
                None,
                json!({"email": "dave@example.com", "password": PASSWORD}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["username"], "dave");
        assert!(body["token"].is_string());
    }

    #[tokio::test]
    async fn test_who_am_i_and_profile_update() {
        let app = app();
        let user = seed_user(&app.store, "erin", &[]).await;
        let token = app.codec.issue(&user).unwrap();

        let response = send(&app.router, empty_request("GET", "/v1/account", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["username"], "erin");

        // 同じ値だけなら 204
        let response = send(
            &app.router,
            json_request(
                "PATCH",
                "/v1/account",
                Some(&token),
                json!({"username": "erin"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(
            &app.router,
            json_request(
                "PATCH",
                "/v1/account",
                Some(&token),
                json!({"bio": "Rustacean"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["bio"], "Rustacean");
        assert!(body["token"].is_string());
    }

    #[tokio::test]
    async fn test_update_email_same_subject_is_204() {
        let app = app();
        let user = seed_user(&app.store, "frank", &[]).await;
        let token = app.codec.issue(&user).unwrap();

        let response = send(
            &app.router,
            json_request(
                "PUT",
                "/v1/account/email",
                Some(&token),
                json!({
                    "email": "frank@example.com",
                    "newEmail": "frank@example.com",
                    "password": PASSWORD,
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            PT_BR.account.new_email_be_different
        );

        let response = send(
            &app.router,
            json_request(
                "PUT",
                "/v1/account/email",
                Some(&token),
                json!({
                    "email": "frank@example.com",
                    "newEmail": "frank.new@example.com",
                    "password": PASSWORD,
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let claims = app.codec.verify(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.sub, "frank.new@example.com");
        assert!(!claims.verified);
    }

    #[tokio::test]
    async fn test_update_password_must_differ() {
        let app = app();
        let user = seed_user(&app.store, "grace", &[]).await;
        let token = app.codec.issue(&user).unwrap();

        let response = send(
            &app.router,
            json_request(
                "PUT",
                "/v1/account/password",
                Some(&token),
                json!({
                    "email": "grace@example.com",
                    "password": PASSWORD,
                    "newPassword": PASSWORD,
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            PT_BR.account.new_password_be_different
        );

        let response = send(
            &app.router,
            json_request(
                "PUT",
                "/v1/account/password",
                Some(&token),
                json!({
                    "email": "grace@example.com",
                    "password": PASSWORD,
                    "newPassword": "Newpass99",
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_en_us_header_localizes_failure() {
        let app = app();
        let mut request = json_request(
            "POST",
            "/v1/account",
            None,
            json!({"name": "A"}),
        );
        request
            .headers_mut()
            .insert("accept-language", "en-US".parse().unwrap());

        let response = send(&app.router, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], EN_US.account.invalid_name);
    }
}

#[cfg(test)]
mod gate_tests {
    use axum::http::{StatusCode, header};
    use chrono::{Duration, Utc};
    use kernel::lang::locales::PT_BR;

    use super::support::*;
    use crate::domain::value_object::role::Role;

    #[tokio::test]
    async fn test_missing_or_wrong_scheme_is_403() {
        let app = app();
        let user = seed_user(&app.store, "henry", &[]).await;
        let token = app.codec.issue(&user).unwrap();

        let response = send(&app.router, empty_request("GET", "/v1/account", None)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["message"], PT_BR.exception.forbidden);

        for value in [format!("Token {token}"), format!("bearer {token}"), token.clone()] {
            let mut request = empty_request("GET", "/v1/account", None);
            request
                .headers_mut()
                .insert(header::AUTHORIZATION, value.parse().unwrap());
            let response = send(&app.router, request).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn test_expired_token_is_403() {
        let app = app();
        let user = seed_user(&app.store, "iris", &[]).await;
        let token = app
            .codec
            .issue_at(&user, Utc::now() - Duration::days(3))
            .unwrap();

        let response = send(&app.router, empty_request("GET", "/v1/account", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["message"], PT_BR.exception.forbidden);
    }

    #[tokio::test]
    async fn test_helper_on_moderator_route_is_401() {
        let app = app();
        let helper = seed_user(&app.store, "jack", &[Role::Helper]).await;
        let token = app.codec.issue(&helper).unwrap();

        let response = send(
            &app.router,
            empty_request("PATCH", "/v1/stacks/rust/disable", Some(&token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["message"],
            PT_BR.account.insufficient_permissions
        );
    }

    #[tokio::test]
    async fn test_authentication_runs_before_authorization() {
        let app = app();
        let response = send(
            &app.router,
            empty_request("PATCH", "/v1/stacks/rust/disable", None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_lock_requires_admin_and_blocks_sign_in() {
        let app = app();
        let moderator = seed_user(&app.store, "kate", &[Role::Moderator]).await;
        let admin = seed_user(&app.store, "leo", &[Role::Admin]).await;
        seed_user(&app.store, "mallory", &[]).await;

        let token = app.codec.issue(&moderator).unwrap();
        let response = send(
            &app.router,
            empty_request("PATCH", "/v1/accounts/mallory/lock", Some(&token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let token = app.codec.issue(&admin).unwrap();
        let response = send(
            &app.router,
            empty_request("PATCH", "/v1/accounts/mallory/lock", Some(&token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(
            &app.router,
            empty_request("PATCH", "/v1/accounts/nobody/lock", Some(&token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[cfg(test)]
mod social_tests {
    use axum::http::StatusCode;
    use kernel::lang::locales::PT_BR;
    use serde_json::json;

    use super::support::*;

    #[tokio::test]
    async fn test_social_lifecycle() {
        let app = app();
        let user = seed_user(&app.store, "nina", &[]).await;
        let token = app.codec.issue(&user).unwrap();

        let link = json!({"identifier": "github", "url": "https://github.com/nina"});

        let response = send(
            &app.router,
            json_request("POST", "/v1/account/social", Some(&token), link.clone()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["identifier"], "github");

        let response = send(
            &app.router,
            json_request("POST", "/v1/account/social", Some(&token), link.clone()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app.router,
            json_request("PATCH", "/v1/account/social", Some(&token), link),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app.router, empty_request("GET", "/v1/account", Some(&token))).await;
        let body = body_json(response).await;
        assert_eq!(body["social"][0]["url"], "https://github.com/nina");

        let delete = json!({"identifier": "github"});
        let response = send(
            &app.router,
            json_request("DELETE", "/v1/account/social", Some(&token), delete.clone()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(
            &app.router,
            json_request("DELETE", "/v1/account/social", Some(&token), delete),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], PT_BR.exception.not_found);
    }

    #[tokio::test]
    async fn test_plain_http_url_rejected() {
        let app = app();
        let user = seed_user(&app.store, "oscar", &[]).await;
        let token = app.codec.issue(&user).unwrap();

        let response = send(
            &app.router,
            json_request(
                "POST",
                "/v1/account/social",
                Some(&token),
                json!({"identifier": "site", "url": "http://example.com"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], PT_BR.invalid_url);
    }
}

#[cfg(test)]
mod stack_tests {
    use axum::http::StatusCode;
    use kernel::lang::locales::PT_BR;
    use serde_json::json;

    use super::support::*;
    use crate::domain::value_object::role::Role;

    fn rust_stack() -> serde_json::Value {
        json!({
            "name": "Rust",
            "description": "Systems programming language",
            "metaDescription": "Rust language",
        })
    }

    #[tokio::test]
    async fn test_stack_lifecycle() {
        let app = app();
        let helper = seed_user(&app.store, "pat", &[Role::Helper]).await;
        let moderator = seed_user(&app.store, "quinn", &[Role::Moderator]).await;
        let helper_token = app.codec.issue(&helper).unwrap();
        let moderator_token = app.codec.issue(&moderator).unwrap();

        let response = send(
            &app.router,
            json_request("POST", "/v1/stacks", Some(&helper_token), rust_stack()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["slug"], "rust");

        let response = send(
            &app.router,
            json_request("POST", "/v1/stacks", Some(&helper_token), rust_stack()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await["message"],
            PT_BR.exception.conflict_entity_already_exists
        );

        let response = send(&app.router, empty_request("GET", "/v1/stacks/Rust", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app.router,
            empty_request("GET", "/v1/stacks?take=abc&skip=xyz", None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

        let response = send(
            &app.router,
            empty_request("PATCH", "/v1/stacks/rust/disable", Some(&moderator_token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // 既に無効
        let response = send(
            &app.router,
            empty_request("PATCH", "/v1/stacks/rust/disable", Some(&moderator_token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app.router, empty_request("GET", "/v1/stacks/rust", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stack_update_unchanged_is_204() {
        let app = app();
        let helper = seed_user(&app.store, "rita", &[Role::Helper]).await;
        let token = app.codec.issue(&helper).unwrap();

        send(
            &app.router,
            json_request("POST", "/v1/stacks", Some(&token), rust_stack()),
        )
        .await;

        let response = send(
            &app.router,
            json_request("PUT", "/v1/stacks/rust", Some(&token), json!({"name": "Rust"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(
            &app.router,
            json_request(
                "PUT",
                "/v1/stacks/rust",
                Some(&token),
                json!({"name": "Rust Lang"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["slug"], "rust-lang");
    }

    #[tokio::test]
    async fn test_stack_meta_description_limit() {
        let app = app();
        let helper = seed_user(&app.store, "tess", &[Role::Helper]).await;
        let token = app.codec.issue(&helper).unwrap();

        let response = send(
            &app.router,
            json_request(
                "POST",
                "/v1/stacks",
                Some(&token),
                json!({"name": "Go", "metaDescription": "g".repeat(161)}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            PT_BR.invalid_custom_field(PT_BR.stack.meta_description_field)
        );

        // 上限ちょうど
        let response = send(
            &app.router,
            json_request(
                "POST",
                "/v1/stacks",
                Some(&token),
                json!({"name": "Go", "metaDescription": "g".repeat(160)}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        // 省略時は空
        let response = send(
            &app.router,
            json_request("POST", "/v1/stacks", Some(&token), json!({"name": "Elixir"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["metaDescription"], "");
    }

    #[tokio::test]
    async fn test_plain_user_cannot_create_stack() {
        let app = app();
        let user = seed_user(&app.store, "sam", &[]).await;
        let token = app.codec.issue(&user).unwrap();

        let response = send(
            &app.router,
            json_request("POST", "/v1/stacks", Some(&token), rust_stack()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[cfg(test)]
mod boundary_tests {
    use axum::http::{StatusCode, header};
    use kernel::id::UserId;
    use kernel::lang::LanguageConfig;
    use kernel::lang::locales::PT_BR;
    use serde_json::Value;

    use super::support::*;
    use crate::application::config::AccountConfig;
    use crate::application::credential::SessionCodec;
    use crate::domain::entity::{social::Social, stack::Stack, user::User};
    use crate::domain::repository::{
        SocialRepository, StackRepository, StoreError, StoreResult, UserRepository,
    };
    use crate::domain::value_object::public_id::PublicId;
    use crate::presentation::router::account_router_generic;

    const LEAKED: &str = "secret detail";

    /// Every call fails with an unclassified store error
    #[derive(Clone)]
    struct BrokenStore;

    fn broken<T>() -> StoreResult<T> {
        Err(StoreError::InvalidRow(LEAKED.into()))
    }

    impl UserRepository for BrokenStore {
        async fn create_user(&self, _: &User) -> StoreResult<()> {
            broken()
        }
        async fn find_by_uid(&self, _: &PublicId) -> StoreResult<Option<User>> {
            broken()
        }
        async fn find_by_email(&self, _: &str) -> StoreResult<Option<User>> {
            broken()
        }
        async fn find_by_username(&self, _: &str) -> StoreResult<Option<User>> {
            broken()
        }
        async fn count_by_username(&self, _: &str) -> StoreResult<u64> {
            broken()
        }
        async fn count_by_email(&self, _: &str) -> StoreResult<u64> {
            broken()
        }
        async fn update_user(&self, _: &User) -> StoreResult<()> {
            broken()
        }
    }

    impl SocialRepository for BrokenStore {
        async fn list_socials(&self, _: &UserId) -> StoreResult<Vec<Social>> {
            broken()
        }
        async fn find_social(&self, _: &UserId, _: &str) -> StoreResult<Option<Social>> {
            broken()
        }
        async fn create_social(&self, _: &Social) -> StoreResult<()> {
            broken()
        }
        async fn update_social(&self, _: &Social) -> StoreResult<()> {
            broken()
        }
        async fn delete_social(&self, _: &UserId, _: &str) -> StoreResult<()> {
            broken()
        }
    }

    impl StackRepository for BrokenStore {
        async fn list_enabled(&self, _: i64, _: i64) -> StoreResult<Vec<Stack>> {
            broken()
        }
        async fn find_by_slug(&self, _: &str) -> StoreResult<Option<Stack>> {
            broken()
        }
        async fn find_by_slug_or_name(&self, _: &str) -> StoreResult<Option<Stack>> {
            broken()
        }
        async fn find_conflicting(&self, _: &str, _: &str) -> StoreResult<Option<Stack>> {
            broken()
        }
        async fn create_stack(&self, _: &Stack) -> StoreResult<()> {
            broken()
        }
        async fn update_stack(&self, _: &Stack) -> StoreResult<()> {
            broken()
        }
        async fn set_stack_enabled(&self, _: &str, _: bool) -> StoreResult<()> {
            broken()
        }
    }

    fn without_timestamp(mut body: Value) -> Value {
        body.as_object_mut().unwrap().remove("timestamp");
        body
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_body() {
        let app = app();
        let response = send(&app.router, empty_request("GET", "/v1/nowhere", None)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], PT_BR.exception.not_found);
        assert_eq!(body["method"], "GET");
        assert_eq!(body["url"], "/v1/nowhere");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_method_is_405_body() {
        let app = app();
        let response = send(&app.router, empty_request("DELETE", "/v1/health", None)).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key(header::ALLOW));
        let body = body_json(response).await;
        assert_eq!(body["message"], PT_BR.exception.method_not_allowed);
    }

    #[tokio::test]
    async fn test_malformed_json_is_classified() {
        let app = app();
        let mut request = empty_request("POST", "/v1/account/session", None);
        request
            .headers_mut()
            .insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        *request.body_mut() = axum::body::Body::from("{not json");

        let response = send(&app.router, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], PT_BR.exception.bad_request);
    }

    #[tokio::test]
    async fn test_unrecognized_language_matches_default() {
        let app = app();

        let plain = send(&app.router, empty_request("GET", "/v1/account", None)).await;
        let plain = without_timestamp(body_json(plain).await);

        let mut request = empty_request("GET", "/v1/account", None);
        request
            .headers_mut()
            .insert("accept-language", "xx-YY".parse().unwrap());
        let unknown = send(&app.router, request).await;
        let unknown = without_timestamp(body_json(unknown).await);

        assert_eq!(plain, unknown);
        assert_eq!(
            serde_json::to_vec(&plain).unwrap(),
            serde_json::to_vec(&unknown).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unclassified_store_failure_is_generic_500() {
        let config = AccountConfig::development();
        let codec = SessionCodec::new(&config.token).unwrap();
        let router = account_router_generic(BrokenStore, codec, config, LanguageConfig::default());

        for uri in ["/v1/stacks", "/v1/stacks/rust"] {
            let response = send(&router, empty_request("GET", uri, None)).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let bytes = body_bytes(response).await;
            assert!(!String::from_utf8_lossy(&bytes).contains(LEAKED));
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["message"], PT_BR.exception.internal_server_error);
            assert_eq!(body["url"], uri);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let response = send(&app.router, empty_request("GET", "/v1/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }
}
