use std::path::PathBuf;

use thiserror::Error;

/// Typed keys for the artwork form's text fields. Each key maps to exactly
/// one field, so updates never dispatch on a field-name string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkField {
    Title,
    ArtistId,
    Grade,
    School,
    Description,
}

impl ArtworkField {
    pub const ALL: [ArtworkField; 5] = [
        ArtworkField::Title,
        ArtworkField::ArtistId,
        ArtworkField::Grade,
        ArtworkField::School,
        ArtworkField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ArtworkField::Title => "Title (required)",
            ArtworkField::ArtistId => "Artist ID",
            ArtworkField::Grade => "Grade",
            ArtworkField::School => "School",
            ArtworkField::Description => "Description",
        }
    }

    /// Multipart part name. Fixed contract with the receiving endpoint.
    pub fn part_name(self) -> &'static str {
        match self {
            ArtworkField::Title => "title",
            ArtworkField::ArtistId => "artist_id",
            ArtworkField::Grade => "grade",
            ArtworkField::School => "school",
            ArtworkField::Description => "description",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

impl SelectedImage {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .to_string();
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Some(Self {
            path,
            file_name,
            content_type,
            size,
        })
    }
}

/// In-memory state of the artwork creation form. Accepts every input
/// verbatim; validation happens only when a submission starts.
#[derive(Debug, Clone, Default)]
pub struct ArtworkForm {
    pub title: String,
    pub artist_id: String,
    pub grade: String,
    pub school: String,
    pub description: String,
    pub image: Option<SelectedImage>,
}

impl ArtworkForm {
    pub fn field(&self, field: ArtworkField) -> &str {
        match field {
            ArtworkField::Title => &self.title,
            ArtworkField::ArtistId => &self.artist_id,
            ArtworkField::Grade => &self.grade,
            ArtworkField::School => &self.school,
            ArtworkField::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: ArtworkField) -> &mut String {
        match field {
            ArtworkField::Title => &mut self.title,
            ArtworkField::ArtistId => &mut self.artist_id,
            ArtworkField::Grade => &mut self.grade,
            ArtworkField::School => &mut self.school,
            ArtworkField::Description => &mut self.description,
        }
    }

    pub fn set_field(&mut self, field: ArtworkField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn set_image(&mut self, image: Option<SelectedImage>) {
        self.image = image;
    }

    /// A submission is permitted only with a non-empty title and a selected
    /// image; everything else may stay empty.
    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.title.is_empty() || self.image.is_none() {
            return Err(SubmitError::Validation(
                "Please provide a Title and select an Image.".to_string(),
            ));
        }
        Ok(())
    }

    /// Clears the five text fields and the file reference. Only called after
    /// a successful submission; failures leave the form untouched.
    pub fn clear_after_success(&mut self) {
        self.title.clear();
        self.artist_id.clear();
        self.grade.clear();
        self.school.clear();
        self.description.clear();
        self.image = None;
    }
}

/// Server-assigned identifiers returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub artwork_id: i64,
    pub image_id: i64,
}

/// Messages the upload worker sends back to the UI thread. `Completed` is
/// always the last event of a submission.
#[derive(Debug)]
pub enum UploadEvent {
    Progress { sent: u64, total: u64 },
    Completed(Result<SubmissionReceipt, SubmitError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Missing title/file or an unreadable file; no network activity happened.
    #[error("{0}")]
    Validation(String),
    /// The server answered with a non-2xx status, or with a success status
    /// whose body was missing the artwork/image identifiers.
    #[error("HTTP Error ({status}): {message}")]
    Server { status: u16, message: String },
    /// No response at all. The detail is for the log; users get the generic line.
    #[error("Network Error. Is the API server running?")]
    Network(String),
}
