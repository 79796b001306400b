use serde::Serialize;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Destructive,
}

/// A short toast shown to the user after an action completes or fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn letter_generated() -> Self {
        Self::success(
            "Letter Generated",
            "Your resignation letter has been generated successfully!",
        )
    }

    pub fn pdf_downloaded() -> Self {
        Self::success(
            "PDF Downloaded",
            "Your resignation letter has been downloaded successfully!",
        )
    }
}
