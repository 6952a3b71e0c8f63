//! Account Router

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{MethodRouter, get, patch, post, put},
};
use kernel::lang::LanguageConfig;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

use crate::application::config::AccountConfig;
use crate::application::credential::SessionCodec;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::role::CapabilityTier;
use crate::infra::postgres::PgAccountStore;
use crate::presentation::handlers::{self, AccountState};
use crate::presentation::middleware::{
    authenticate, authorize, failure_boundary, handle_panic, language, not_found,
};

/// 認証ゲートを付けたルート
fn signed_in<S>(route: MethodRouter<S>, codec: &Arc<SessionCodec>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(codec.clone(), authenticate))
}

/// 認証ゲートと権限ゲートを付けたルート（認証が先に実行されます）
fn gated<S>(
    route: MethodRouter<S>,
    tier: CapabilityTier,
    codec: &Arc<SessionCodec>,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    signed_in(route.route_layer(from_fn_with_state(tier, authorize)), codec)
}

/// Create the account router with PostgreSQL repository
pub fn account_router(
    repo: PgAccountStore,
    codec: SessionCodec,
    config: AccountConfig,
    language_config: LanguageConfig,
) -> Router {
    account_router_generic(repo, codec, config, language_config)
}

/// Create a generic account router for any repository implementation
///
/// Every response, including unmatched routes and caught panics, passes
/// through the language resolver and the failure boundary.
pub fn account_router_generic<R>(
    repo: R,
    codec: SessionCodec,
    config: AccountConfig,
    language_config: LanguageConfig,
) -> Router
where
    R: AccountStore,
{
    let codec = Arc::new(codec);
    let state = AccountState {
        repo: Arc::new(repo),
        codec: codec.clone(),
        config: Arc::new(config),
    };

    let account = post(handlers::sign_up::<R>)
        .merge(signed_in(get(handlers::who_am_i::<R>), &codec))
        .merge(signed_in(patch(handlers::update_profile::<R>), &codec));

    let social = signed_in(
        post(handlers::upsert_social::<R>)
            .patch(handlers::patch_social::<R>)
            .delete(handlers::delete_social::<R>),
        &codec,
    );

    let stacks = get(handlers::list_stacks::<R>).merge(gated(
        post(handlers::create_stack::<R>),
        CapabilityTier::Helper,
        &codec,
    ));

    let stack = get(handlers::get_stack::<R>).merge(gated(
        put(handlers::update_stack::<R>),
        CapabilityTier::Helper,
        &codec,
    ));

    Router::new()
        .route("/v1/account", account)
        .route("/v1/account/session", post(handlers::sign_in::<R>))
        .route(
            "/v1/account/email",
            signed_in(put(handlers::update_email::<R>), &codec),
        )
        .route(
            "/v1/account/password",
            signed_in(put(handlers::update_password::<R>), &codec),
        )
        .route("/v1/account/social", social)
        .route("/v1/stacks", stacks)
        .route("/v1/stacks/{slug}", stack)
        .route(
            "/v1/stacks/{slug}/disable",
            gated(
                patch(handlers::disable_stack::<R>),
                CapabilityTier::Moderator,
                &codec,
            ),
        )
        .route(
            "/v1/stacks/{slug}/enable",
            gated(
                patch(handlers::enable_stack::<R>),
                CapabilityTier::Moderator,
                &codec,
            ),
        )
        .route(
            "/v1/accounts/{username}/lock",
            gated(
                patch(handlers::lock_account::<R>),
                CapabilityTier::Admin,
                &codec,
            ),
        )
        .route(
            "/v1/accounts/{username}/unlock",
            gated(
                patch(handlers::unlock_account::<R>),
                CapabilityTier::Admin,
                &codec,
            ),
        )
        .route("/v1/health", get(handlers::health))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(failure_boundary))
        .layer(from_fn_with_state(Arc::new(language_config), language))
}
