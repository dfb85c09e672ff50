use std::sync::mpsc::Receiver;

use derivative::Derivative;
use eframe::egui::Color32;

use crate::config::ApiConfig;
use crate::upload::{SubmissionReceipt, SubmitError, UploadEvent};
use crate::utils::color::ColorExt;

/// Lifecycle of one submission attempt. `Success` and `Error` are terminal
/// until the user picks a new file or starts a fresh submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct SubmissionState {
    pub status: SubmissionStatus,
    pub percent: u8,
    pub message: String,
    pub receipt: Option<SubmissionReceipt>,
    #[derivative(Debug = "ignore")]
    pub event_receiver: Option<Receiver<UploadEvent>>,
}

impl SubmissionState {
    /// Entered only from a validated submit.
    pub fn begin_upload(&mut self, receiver: Receiver<UploadEvent>) {
        self.status = SubmissionStatus::Uploading;
        self.percent = 0;
        self.receipt = None;
        self.message = "Uploading, creating artwork, and processing image...".to_string();
        self.event_receiver = Some(receiver);
    }

    /// Progress callbacks are best-effort and may arrive out of order; a
    /// stale lower value never moves the bar backwards.
    pub fn apply_progress(&mut self, sent: u64, total: u64) {
        if self.status != SubmissionStatus::Uploading || total == 0 {
            return;
        }
        let percent = ((sent as f64) * 100.0 / (total as f64)).round().min(100.0) as u8;
        if percent >= self.percent {
            self.percent = percent;
        }
    }

    pub fn complete(&mut self, outcome: &Result<SubmissionReceipt, SubmitError>) {
        match outcome {
            Ok(receipt) => {
                self.status = SubmissionStatus::Success;
                self.receipt = Some(receipt.clone());
                self.message = format!(
                    "SUCCESS! Artwork ID: {}, Image ID: {}",
                    receipt.artwork_id, receipt.image_id
                );
            }
            Err(err) => {
                self.status = SubmissionStatus::Error;
                self.receipt = None;
                self.message = err.to_string();
            }
        }
        self.event_receiver = None;
    }

    /// Selecting a new file cancels any stale terminal status from a
    /// previous attempt.
    pub fn reset_for_new_file(&mut self, note: String) {
        self.status = SubmissionStatus::Idle;
        self.percent = 0;
        self.receipt = None;
        self.message = note;
    }

    /// Validation failures report a message without any status transition.
    pub fn set_validation_message(&mut self, message: String) {
        self.message = message;
    }

    pub fn status_color(&self) -> Color32 {
        let hex = match self.status {
            SubmissionStatus::Idle => "#808080",
            SubmissionStatus::Uploading => "#1f6feb",
            SubmissionStatus::Success => "#00b400",
            SubmissionStatus::Error => "#dc3232",
        };
        Color32::from_hex(hex).unwrap_or(Color32::GRAY)
    }

    /// Thumbnail reference for the uploaded image; derived only in `Success`
    /// with a receipt present.
    pub fn thumbnail_url(&self, config: &ApiConfig) -> Option<String> {
        if self.status != SubmissionStatus::Success {
            return None;
        }
        self.receipt
            .as_ref()
            .map(|receipt| config.thumbnail_url(receipt.image_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    UserName,
    Email,
    Password,
}

impl LoginField {
    pub const ALL: [LoginField; 3] = [LoginField::UserName, LoginField::Email, LoginField::Password];

    pub fn label(self) -> &'static str {
        match self {
            LoginField::UserName => "Name",
            LoginField::Email => "Email",
            LoginField::Password => "Password",
        }
    }

    pub fn is_password(self) -> bool {
        matches!(self, LoginField::Password)
    }
}

/// Registration/login form. Captures fields and acknowledges locally; the
/// real authentication flow does not exist yet.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub ack: Option<String>,
}

impl LoginForm {
    pub fn field_mut(&mut self, field: LoginField) -> &mut String {
        match field {
            LoginField::UserName => &mut self.user_name,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn acknowledge(&mut self) {
        self.ack = Some(format!(
            "Received registration for {} <{}>",
            self.user_name, self.email
        ));
    }
}
