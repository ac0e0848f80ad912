//! Example notification service documenting its errors with errors-plus.
//!
//! The domain error type is both what the handler returns at runtime and what the
//! route documentation lists. Run with `RUST_LOG=debug` to see the merge steps.

use errors_plus::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

// --- Domain types ---

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Notification not found")]
    NotFound { notification_id: String },
    #[error("Access denied to notification")]
    AccessDenied { notification_id: String, user_id: String },
}

impl NotificationError {
    /// Instances used for documentation.
    pub fn documented() -> Vec<Self> {
        vec![
            NotificationError::NotFound {
                notification_id: "example_id".to_string(),
            },
            NotificationError::AccessDenied {
                notification_id: "example_id".to_string(),
                user_id: "user_123".to_string(),
            },
        ]
    }
}

impl ErrorDto for NotificationError {
    fn status_code(&self) -> u16 {
        match self {
            NotificationError::NotFound { .. } => 404,
            NotificationError::AccessDenied { .. } => 403,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn to_example(&self) -> Examples {
        Examples::from([(self.message(), Example::detail(self.message()))])
    }
}

// --- Service implementation ---

pub struct NotificationService {
    notifications: Vec<(String, String)>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            notifications: vec![
                ("1".to_string(), "alice".to_string()),
                ("restricted".to_string(), "bob".to_string()),
            ],
        }
    }

    /// Delete a notification owned by `user_id`.
    pub fn delete_notification(&mut self, notification_id: &str, user_id: &str) -> Result<(), NotificationError> {
        let index = self
            .notifications
            .iter()
            .position(|(id, _)| id == notification_id)
            .ok_or_else(|| NotificationError::NotFound {
                notification_id: notification_id.to_string(),
            })?;

        if self.notifications[index].1 != user_id {
            return Err(NotificationError::AccessDenied {
                notification_id: notification_id.to_string(),
                user_id: user_id.to_string(),
            });
        }

        self.notifications.remove(index);
        Ok(())
    }

    /// Documentation for `DELETE /notifications/{id}`.
    pub fn delete_operation() -> Result<OpenApiOperation, Box<dyn std::error::Error>> {
        let mut errors = Errors::new();
        for error in NotificationError::documented() {
            errors = errors.error(error);
        }
        let responses = errors.unauthorized_401(true).build()?;

        Ok(OpenApiOperation::new("Delete a notification")
            .with_id("delete_notification")
            .with_response("204", json!({"description": "Deleted"}))
            .with_responses(&responses)?)
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut service = NotificationService::new();
    for (id, user) in [("missing", "alice"), ("restricted", "alice"), ("1", "alice")] {
        match service.delete_notification(id, user) {
            Ok(()) => println!("DELETE /notifications/{id} -> 204"),
            Err(err) => println!("DELETE /notifications/{id} -> {} {err}", err.status_code()),
        }
    }

    let operation = NotificationService::delete_operation()?;
    println!("{}", serde_json::to_string_pretty(&operation)?);
    Ok(())
}
