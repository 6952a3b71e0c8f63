//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{SocialId, StackId, UserId};
use platform::password::HashedPassword;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::{social::Social, stack::Stack, user::User};
use crate::domain::repository::{
    SocialRepository, StackRepository, StoreError, StoreResult, UserRepository,
};
use crate::domain::value_object::{public_id::PublicId, role::Role};

/// PostgreSQL-backed account store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn replace_authorities(
        tx: &mut Transaction<'_, Postgres>,
        user: &User,
    ) -> StoreResult<()> {
        sqlx::query("DELETE FROM user_authorities WHERE user_id = $1")
            .bind(user.id.as_uuid())
            .execute(&mut **tx)
            .await?;

        for role in &user.authorities {
            sqlx::query("INSERT INTO user_authorities (user_id, descriptor) VALUES ($1, $2)")
                .bind(user.id.as_uuid())
                .bind(role.code())
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    async fn fetch_user(&self, column: UserColumn, value: &str) -> StoreResult<Option<User>> {
        let sql = format!("{USER_SELECT} WHERE u.{} = $1 GROUP BY u.id", column.name());
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn count_users(&self, column: UserColumn, value: &str) -> StoreResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM users WHERE {} = $1", column.name());
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}

/// Columns users are looked up by
#[derive(Clone, Copy)]
enum UserColumn {
    Uid,
    Email,
    Username,
}

impl UserColumn {
    fn name(self) -> &'static str {
        match self {
            UserColumn::Uid => "uid",
            UserColumn::Email => "email",
            UserColumn::Username => "username",
        }
    }
}

const USER_SELECT: &str = r#"
    SELECT
        u.id,
        u.uid,
        u.name,
        u.username,
        u.email,
        u.email_verified,
        u.bio,
        u.password,
        u.enabled,
        u.locked,
        COALESCE(
            array_agg(a.descriptor ORDER BY a.descriptor) FILTER (WHERE a.descriptor IS NOT NULL),
            '{}'
        ) AS authorities,
        u.created_at,
        u.updated_at
    FROM users u
    LEFT JOIN user_authorities a ON a.user_id = u.id
"#;

/// 一意制約違反を識別可能なエラーに変換
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::UniqueViolation(constraint);
        }
    }
    StoreError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountStore {
    async fn create_user(&self, user: &User) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                uid,
                name,
                username,
                email,
                email_verified,
                bio,
                password,
                enabled,
                locked,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.uid.as_str())
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(&user.bio)
        .bind(user.password.as_phc_string())
        .bind(user.enabled)
        .bind(user.locked)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        Self::replace_authorities(&mut tx, user).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn find_by_uid(&self, uid: &PublicId) -> StoreResult<Option<User>> {
        self.fetch_user(UserColumn::Uid, uid.as_str()).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.fetch_user(UserColumn::Email, email).await
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.fetch_user(UserColumn::Username, username).await
    }

    async fn count_by_username(&self, username: &str) -> StoreResult<u64> {
        self.count_users(UserColumn::Username, username).await
    }

    async fn count_by_email(&self, email: &str) -> StoreResult<u64> {
        self.count_users(UserColumn::Email, email).await
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                username = $3,
                email = $4,
                email_verified = $5,
                bio = $6,
                password = $7,
                enabled = $8,
                locked = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(&user.bio)
        .bind(user.password.as_phc_string())
        .bind(user.enabled)
        .bind(user.locked)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?
        .rows_affected();

        if updated == 0 {
            return Err(StoreError::RecordNotFound);
        }

        Self::replace_authorities(&mut tx, user).await?;
        tx.commit().await?;

        Ok(())
    }
}

// ============================================================================
// Social Repository Implementation
// ============================================================================

impl SocialRepository for PgAccountStore {
    async fn list_socials(&self, user_id: &UserId) -> StoreResult<Vec<Social>> {
        let rows = sqlx::query_as::<_, SocialRow>(
            r#"
            SELECT id, user_id, identifier, url, details, created_at, updated_at
            FROM socials
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SocialRow::into_social).collect())
    }

    async fn find_social(
        &self,
        user_id: &UserId,
        identifier: &str,
    ) -> StoreResult<Option<Social>> {
        let row = sqlx::query_as::<_, SocialRow>(
            r#"
            SELECT id, user_id, identifier, url, details, created_at, updated_at
            FROM socials
            WHERE user_id = $1 AND identifier = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SocialRow::into_social))
    }

    async fn create_social(&self, social: &Social) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO socials (id, user_id, identifier, url, details, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(social.id.as_uuid())
        .bind(social.user_id.as_uuid())
        .bind(&social.identifier)
        .bind(&social.url)
        .bind(&social.details)
        .bind(social.created_at)
        .bind(social.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update_social(&self, social: &Social) -> StoreResult<()> {
        let updated = sqlx::query(
            "UPDATE socials SET url = $2, details = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(social.id.as_uuid())
        .bind(&social.url)
        .bind(&social.details)
        .bind(social.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }

    async fn delete_social(&self, user_id: &UserId, identifier: &str) -> StoreResult<()> {
        let deleted = sqlx::query("DELETE FROM socials WHERE user_id = $1 AND identifier = $2")
            .bind(user_id.as_uuid())
            .bind(identifier)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Stack Repository Implementation
// ============================================================================

const STACK_SELECT: &str = r#"
    SELECT
        id,
        name,
        slug,
        description,
        meta_description,
        enabled,
        created_by,
        created_at,
        updated_at
    FROM stacks
"#;

impl StackRepository for PgAccountStore {
    async fn list_enabled(&self, take: i64, skip: i64) -> StoreResult<Vec<Stack>> {
        let sql = format!("{STACK_SELECT} WHERE enabled = TRUE ORDER BY name LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, StackRow>(&sql)
            .bind(take)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(StackRow::into_stack).collect()
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Stack>> {
        let sql = format!("{STACK_SELECT} WHERE slug = $1");
        let row = sqlx::query_as::<_, StackRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(StackRow::into_stack).transpose()
    }

    async fn find_by_slug_or_name(&self, key: &str) -> StoreResult<Option<Stack>> {
        let sql = format!("{STACK_SELECT} WHERE slug = $1 OR name = $1 ORDER BY (slug = $1) DESC LIMIT 1");
        let row = sqlx::query_as::<_, StackRow>(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(StackRow::into_stack).transpose()
    }

    async fn find_conflicting(&self, name: &str, slug: &str) -> StoreResult<Option<Stack>> {
        let sql = format!("{STACK_SELECT} WHERE name = $1 OR slug = $2 ORDER BY (name = $1) DESC LIMIT 1");
        let row = sqlx::query_as::<_, StackRow>(&sql)
            .bind(name)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(StackRow::into_stack).transpose()
    }

    async fn create_stack(&self, stack: &Stack) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stacks (
                id,
                name,
                slug,
                description,
                meta_description,
                enabled,
                created_by,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(stack.id.as_uuid())
        .bind(&stack.name)
        .bind(&stack.slug)
        .bind(&stack.description)
        .bind(&stack.meta_description)
        .bind(stack.enabled)
        .bind(stack.created_by.as_str())
        .bind(stack.created_at)
        .bind(stack.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update_stack(&self, stack: &Stack) -> StoreResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE stacks SET
                name = $2,
                slug = $3,
                description = $4,
                meta_description = $5,
                enabled = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(stack.id.as_uuid())
        .bind(&stack.name)
        .bind(&stack.slug)
        .bind(&stack.description)
        .bind(&stack.meta_description)
        .bind(stack.enabled)
        .bind(stack.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?
        .rows_affected();

        if updated == 0 {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }

    async fn set_stack_enabled(&self, slug: &str, enabled: bool) -> StoreResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE stacks SET enabled = $2, updated_at = $3
            WHERE slug = $1 AND enabled = $4
            "#,
        )
        .bind(slug)
        .bind(enabled)
        .bind(Utc::now())
        .bind(!enabled)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    uid: String,
    name: String,
    username: String,
    email: String,
    email_verified: bool,
    bio: Option<String>,
    password: String,
    enabled: bool,
    locked: bool,
    authorities: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> StoreResult<User> {
        let uid = PublicId::parse_str(&self.uid)
            .map_err(|e| StoreError::InvalidRow(format!("uid: {e}")))?;
        let password = HashedPassword::from_phc_string(self.password)
            .map_err(|e| StoreError::InvalidRow(format!("password: {e}")))?;
        let authorities = self
            .authorities
            .iter()
            .map(|code| {
                Role::from_code(code)
                    .ok_or_else(|| StoreError::InvalidRow(format!("authority: {code}")))
            })
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            uid,
            name: self.name,
            username: self.username,
            email: self.email,
            email_verified: self.email_verified,
            bio: self.bio,
            password,
            enabled: self.enabled,
            locked: self.locked,
            authorities,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SocialRow {
    id: Uuid,
    user_id: Uuid,
    identifier: String,
    url: String,
    details: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SocialRow {
    fn into_social(self) -> Social {
        Social {
            id: SocialId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            identifier: self.identifier,
            url: self.url,
            details: self.details,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StackRow {
    id: Uuid,
    name: String,
    slug: String,
    description: String,
    meta_description: String,
    enabled: bool,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StackRow {
    fn into_stack(self) -> StoreResult<Stack> {
        let created_by = PublicId::parse_str(&self.created_by)
            .map_err(|e| StoreError::InvalidRow(format!("created_by: {e}")))?;

        Ok(Stack {
            id: StackId::from_uuid(self.id),
            name: self.name,
            slug: self.slug,
            description: self.description,
            meta_description: self.meta_description,
            enabled: self.enabled,
            created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
