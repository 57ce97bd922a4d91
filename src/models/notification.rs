//! Notification model (fire-and-forget messages to staff users)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A notification delivered to one target user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub target_user_id: i32,
    pub title: String,
    pub message: String,
    /// Broad category (e.g. "operations")
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Triggering event tag (e.g. "trip_assigned")
    pub event: String,
    /// Structured payload echoing the triggering entity ids
    pub metadata: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new notification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewNotification {
    pub target_user_id: i32,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub event: String,
    pub metadata: Option<serde_json::Value>,
}
