use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Performance,
    Resource,
    Improvement,
    Warning,
}

impl FeedbackType {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackType::Performance => "Performance Review",
            FeedbackType::Resource => "Learning Resource",
            FeedbackType::Improvement => "Improvement Suggestion",
            FeedbackType::Warning => "Warning Notice",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedbackForm {
    pub student_id: String,
    pub feedback_type: FeedbackType,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct FeedbackReceipt {
    pub student_id: String,
    pub feedback_type: FeedbackType,
    pub subject: String,
    pub confirmation: String,
    pub sent_at: DateTime<Utc>,
}

/// Validates the form and acknowledges it. Nothing is delivered anywhere.
pub fn send_feedback(form: FeedbackForm) -> Result<FeedbackReceipt> {
    let student_id = form.student_id.trim();
    if student_id.is_empty() || form.subject.trim().is_empty() || form.message.trim().is_empty() {
        return Err(DashboardError::validation("Please fill all required fields"));
    }

    log::info!(
        "feedback ({}) queued for student {}: {}",
        form.feedback_type.label(),
        student_id,
        form.subject.trim()
    );

    Ok(FeedbackReceipt {
        student_id: student_id.to_string(),
        feedback_type: form.feedback_type,
        subject: form.subject.trim().to_string(),
        confirmation: format!("Feedback has been sent to student {}.", student_id),
        sent_at: Utc::now(),
    })
}
