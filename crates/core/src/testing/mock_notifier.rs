//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::report::Notifier;

/// Mock implementation of the Notifier trait. Records every notification.
/// Clones share state.
#[derive(Debug, Default, Clone)]
pub struct MockNotifier {
    notifications: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded (title, body) pairs.
    pub async fn recorded_notifications(&self) -> Vec<(String, String)> {
        self.notifications.read().await.clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, title: &str, body: &str) {
        self.notifications
            .write()
            .await
            .push((title.to_string(), body.to_string()));
    }
}
