//! Notifications service

use crate::{error::AppResult, models::notification::Notification, repository::Repository};

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Notifications addressed to one user, newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        self.repository.notifications.list_for_user(user_id).await
    }

    /// Mark one of the user's notifications as read
    pub async fn mark_read(&self, id: i32, user_id: i32) -> AppResult<()> {
        self.repository.notifications.mark_read(id, user_id).await
    }
}
