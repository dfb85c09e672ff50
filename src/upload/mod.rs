mod submitter;
mod types;

pub use submitter::ArtworkSubmitter;
pub use types::{
    ArtworkField, ArtworkForm, SelectedImage, SubmissionReceipt, SubmitError, UploadEvent,
};
