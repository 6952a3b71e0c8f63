//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::credential::SessionCodec;
use crate::application::{
    CredentialChangeUseCase, EmailChangeInput, ModerationUseCase, Outcome, PasswordChangeInput,
    ProfileUpdateInput, ProfileUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    SocialInput, SocialPatchInput, SocialUseCase, StackInput, StackUpdateInput, StackUseCase,
    Upserted,
};
use crate::domain::repository::AccountStore;
use crate::error::AccountResult;
use crate::presentation::dto::{
    SessionResponse, SignInRequest, SignUpRequest, SocialDeleteRequest, SocialDto,
    SocialPatchRequest, SocialRequest, StackDto, StackListQuery, StackRequest,
    StackUpdateRequest, TokenResponse, UpdateEmailRequest, UpdatePasswordRequest,
    UpdateProfileRequest, UserDto,
};
use crate::presentation::extract::CurrentUser;

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountState<R>
where
    R: AccountStore,
{
    pub repo: Arc<R>,
    pub codec: Arc<SessionCodec>,
    pub config: Arc<AccountConfig>,
}

/// `Changed` は 200 と本文、`Unchanged` は 204
fn changed_or_no_content<T, B>(outcome: Outcome<T>) -> Response
where
    B: From<T> + serde::Serialize,
{
    match outcome {
        Outcome::Changed(value) => (StatusCode::OK, Json(B::from(value))).into_response(),
        Outcome::Unchanged => StatusCode::NO_CONTENT.into_response(),
    }
}

// ============================================================================
// Account
// ============================================================================

/// POST /v1/account
pub async fn sign_up<R>(
    State(state): State<AccountState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountStore,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.codec.clone(), state.config.clone());

    let input = SignUpInput {
        name: req.name,
        username: req.username,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(output))))
}

/// POST /v1/account/session
pub async fn sign_in<R>(
    State(state): State<AccountState<R>>,
    Json(req): Json<SignInRequest>,
) -> AccountResult<Json<SessionResponse>>
where
    R: AccountStore,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(output.into()))
}

/// GET /v1/account
pub async fn who_am_i<R>(
    State(state): State<AccountState<R>>,
    CurrentUser(claims): CurrentUser,
) -> AccountResult<Json<UserDto>>
where
    R: AccountStore,
{
    let use_case = ProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.codec.clone());
    let view = use_case.who_am_i(&claims).await?;

    Ok(Json(view.into()))
}

/// PATCH /v1/account
pub async fn update_profile<R>(
    State(state): State<AccountState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> AccountResult<Response>
where
    R: AccountStore,
{
    let use_case = ProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.codec.clone());

    let input = ProfileUpdateInput {
        name: req.name,
        username: req.username,
        bio: req.bio,
    };

    let outcome = use_case.update(&claims, input).await?;

    Ok(changed_or_no_content::<_, SessionResponse>(outcome))
}

/// PUT /v1/account/email
pub async fn update_email<R>(
    State(state): State<AccountState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<UpdateEmailRequest>,
) -> AccountResult<Response>
where
    R: AccountStore,
{
    let use_case = CredentialChangeUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let input = EmailChangeInput {
        email: req.email,
        new_email: req.new_email,
        password: req.password,
    };

    let outcome = use_case.change_email(&claims, input).await?;

    Ok(changed_or_no_content::<_, TokenResponse>(outcome))
}

/// PUT /v1/account/password
pub async fn update_password<R>(
    State(state): State<AccountState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<UpdatePasswordRequest>,
) -> AccountResult<Json<SessionResponse>>
where
    R: AccountStore,
{
    let use_case = CredentialChangeUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let input = PasswordChangeInput {
        email: req.email,
        password: req.password,
        new_password: req.new_password,
    };

    let output = use_case.change_password(&claims, input).await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Social links
// ============================================================================

/// POST /v1/account/social
pub async fn upsert_social<R>(
    State(state): State<AccountState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<SocialRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountStore,
{
    let use_case = SocialUseCase::new(state.repo.clone(), state.repo.clone());

    let input = SocialInput {
        identifier: req.identifier,
        url: req.url,
        details: req.details,
    };

    let (status, social) = match use_case.upsert(&claims, input).await? {
        Upserted::Created(social) => (StatusCode::CREATED, social),
        Upserted::Updated(social) => (StatusCode::OK, social),
    };

    Ok((status, Json(SocialDto::from(social))))
}

/// PATCH /v1/account/social
pub async fn patch_social<R>(
    State(state): State<AccountState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<SocialPatchRequest>,
) -> AccountResult<Response>
where
    R: AccountStore,
{
    let use_case = SocialUseCase::new(state.repo.clone(), state.repo.clone());

    let input = SocialPatchInput {
        identifier: req.identifier,
        url: req.url,
        details: req.details,
    };

    let outcome = use_case.patch(&claims, input).await?;

    Ok(changed_or_no_content::<_, SocialDto>(outcome))
}

/// DELETE /v1/account/social
pub async fn delete_social<R>(
    State(state): State<AccountState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<SocialDeleteRequest>,
) -> AccountResult<StatusCode>
where
    R: AccountStore,
{
    let use_case = SocialUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.delete(&claims, &req.identifier).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Stacks
// ============================================================================

/// GET /v1/stacks
pub async fn list_stacks<R>(
    State(state): State<AccountState<R>>,
    Query(query): Query<StackListQuery>,
) -> AccountResult<Json<Vec<StackDto>>>
where
    R: AccountStore,
{
    // 数値でない値は既定値
    let take = query.take.and_then(|v| v.parse::<i64>().ok());
    let skip = query.skip.and_then(|v| v.parse::<i64>().ok());

    let use_case = StackUseCase::new(state.repo.clone());
    let stacks = use_case.list(take, skip).await?;

    Ok(Json(stacks.into_iter().map(StackDto::from).collect()))
}

/// GET /v1/stacks/{slug_or_name}
pub async fn get_stack<R>(
    State(state): State<AccountState<R>>,
    Path(slug_or_name): Path<String>,
) -> AccountResult<Json<StackDto>>
where
    R: AccountStore,
{
    let use_case = StackUseCase::new(state.repo.clone());
    let stack = use_case.get(&slug_or_name).await?;

    Ok(Json(stack.into()))
}

/// POST /v1/stacks
pub async fn create_stack<R>(
    State(state): State<AccountState<R>>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<StackRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountStore,
{
    let use_case = StackUseCase::new(state.repo.clone());

    let input = StackInput {
        name: req.name,
        description: req.description,
        meta_description: req.meta_description,
    };

    let stack = use_case.create(&claims, input).await?;

    Ok((StatusCode::CREATED, Json(StackDto::from(stack))))
}

/// PUT /v1/stacks/{slug}
pub async fn update_stack<R>(
    State(state): State<AccountState<R>>,
    Path(slug): Path<String>,
    Json(req): Json<StackUpdateRequest>,
) -> AccountResult<Response>
where
    R: AccountStore,
{
    let use_case = StackUseCase::new(state.repo.clone());

    let input = StackUpdateInput {
        name: req.name,
        description: req.description,
        meta_description: req.meta_description,
    };

    let outcome = use_case.update(&slug, input).await?;

    Ok(changed_or_no_content::<_, StackDto>(outcome))
}

/// PATCH /v1/stacks/{slug}/disable
pub async fn disable_stack<R>(
    State(state): State<AccountState<R>>,
    Path(slug): Path<String>,
) -> AccountResult<StatusCode>
where
    R: AccountStore,
{
    StackUseCase::new(state.repo.clone())
        .set_enabled(&slug, false)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /v1/stacks/{slug}/enable
pub async fn enable_stack<R>(
    State(state): State<AccountState<R>>,
    Path(slug): Path<String>,
) -> AccountResult<StatusCode>
where
    R: AccountStore,
{
    StackUseCase::new(state.repo.clone())
        .set_enabled(&slug, true)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Administration
// ============================================================================

/// PATCH /v1/accounts/{username}/lock
pub async fn lock_account<R>(
    State(state): State<AccountState<R>>,
    Path(username): Path<String>,
) -> AccountResult<StatusCode>
where
    R: AccountStore,
{
    ModerationUseCase::new(state.repo.clone())
        .set_locked(&username, true)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /v1/accounts/{username}/unlock
pub async fn unlock_account<R>(
    State(state): State<AccountState<R>>,
    Path(username): Path<String>,
) -> AccountResult<StatusCode>
where
    R: AccountStore,
{
    ModerationUseCase::new(state.repo.clone())
        .set_locked(&username, false)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Health
// ============================================================================

/// GET /v1/health
pub async fn health() -> StatusCode {
    StatusCode::OK
}
