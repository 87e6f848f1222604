use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::models::subscription::SubscriptionRow;
use crate::models::user::UserRow;

/// Everything needed to mirror a freshly created provider subscription.
pub struct NewSubscription<'a> {
    pub user_id: &'a str,
    pub email: Option<&'a str>,
    pub plan: &'a str,
    pub provider_subscription_id: &'a str,
    pub status: &'a str,
}

/// Records a subscription, creating its user first if absent.
/// Existing users are left untouched. Insert-only: rows are never updated.
pub async fn insert_subscription(
    pool: &SqlitePool,
    new: NewSubscription<'_>,
) -> Result<SubscriptionRow, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let created_user = sqlx::query(
        r#"
        INSERT INTO users (id, email, plan, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(new.user_id)
    .bind(new.email)
    .bind(new.plan)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .rows_affected()
        > 0;

    let row = SubscriptionRow {
        id: Uuid::new_v4().to_string(),
        user_id: new.user_id.to_string(),
        provider_subscription_id: new.provider_subscription_id.to_string(),
        plan: new.plan.to_string(),
        status: new.status.to_string(),
        created_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO subscriptions
            (id, user_id, provider_subscription_id, plan, status, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&row.id)
    .bind(&row.user_id)
    .bind(&row.provider_subscription_id)
    .bind(&row.plan)
    .bind(&row.status)
    .bind(row.created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    if created_user {
        info!("Created user {}", new.user_id);
    }
    info!(
        "Recorded subscription {} ({}) for user {}",
        row.id, row.provider_subscription_id, row.user_id
    );

    Ok(row)
}

/// All mirrored subscriptions for a user, newest first.
pub async fn list_subscriptions_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<SubscriptionRow>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionRow>(
        "SELECT * FROM subscriptions WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_user(pool: &SqlitePool, user_id: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
