//! Notifications repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::notification::{NewNotification, Notification},
};

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: Pool<Postgres>,
}

impl NotificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a notification for one target user
    pub async fn insert(&self, notification: &NewNotification) -> AppResult<Notification> {
        let row = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (target_user_id, title, message, notification_type, event, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(notification.target_user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.notification_type)
        .bind(&notification.event)
        .bind(&notification.metadata)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// List notifications for one user, newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE target_user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Mark one of the user's notifications as read
    pub async fn mark_read(&self, id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND target_user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Notification with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
