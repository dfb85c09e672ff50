mod state;
mod ui;

use std::sync::mpsc as std_mpsc;

use eframe::egui;
use serde::Deserialize;

pub use state::{LoginField, LoginForm, SubmissionState, SubmissionStatus};

use crate::config::ApiConfig;
use crate::gallery::{self, Artwork};
use crate::upload::{ArtworkForm, ArtworkSubmitter, SelectedImage, UploadEvent};

#[derive(Deserialize)]
struct HelloResponse {
    message: String,
}

pub struct GoArtApp {
    config: ApiConfig,
    form: ArtworkForm,
    login: LoginForm,
    submission: SubmissionState,
    artworks: Vec<Artwork>,
    greeting: Option<String>,
    greeting_receiver: Option<std_mpsc::Receiver<String>>,
}

impl GoArtApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ApiConfig::from_env();
        tracing::info!(base_url = %config.base_url, "starting GO ART client");

        let greeting_receiver = Some(Self::fetch_greeting(config.clone()));

        Self {
            config,
            form: ArtworkForm::default(),
            login: LoginForm::default(),
            submission: SubmissionState::default(),
            artworks: gallery::mock_artworks(),
            greeting: None,
            greeting_receiver,
        }
    }

    /// One GET /api/hello at startup; informational only, never retried.
    fn fetch_greeting(config: ApiConfig) -> std_mpsc::Receiver<String> {
        let (sender, receiver) = std_mpsc::channel();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
            rt.block_on(async {
                let text = match fetch_hello(&config).await {
                    Ok(message) => message,
                    Err(e) => {
                        tracing::warn!("hello probe failed: {e}");
                        format!("Error: {e}")
                    }
                };
                let _ = sender.send(text);
            });
        });

        receiver
    }

    /// Replaces the selected file. Changing the file always resets progress
    /// and cancels any stale terminal status from a previous attempt.
    pub fn select_image(&mut self, image: Option<SelectedImage>) {
        let note = match &image {
            Some(image) => format!("File selected: {}", image.file_name),
            None => String::new(),
        };
        self.form.set_image(image);
        self.submission.reset_for_new_file(note);
    }

    pub fn start_submission(&mut self) {
        // One in-flight submission per form; the submit control is also
        // disabled while uploading.
        if self.submission.status == SubmissionStatus::Uploading {
            return;
        }

        if let Err(e) = self.form.validate() {
            self.submission.set_validation_message(e.to_string());
            return;
        }
        let Some(image) = self.form.image.clone() else {
            return;
        };

        // Read before any transition: an unreadable file means the form
        // never really had one, and no I/O should start.
        let image_bytes = match std::fs::read(&image.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %image.path.display(), "selected file unreadable: {e}");
                self.submission
                    .set_validation_message(format!("Could not read {}: {}", image.file_name, e));
                return;
            }
        };

        tracing::info!(
            title = %self.form.title,
            file = %image.file_name,
            bytes = image_bytes.len(),
            "starting artwork submission"
        );

        let (sender, receiver) = std_mpsc::channel();
        self.submission.begin_upload(receiver);

        let submitter = ArtworkSubmitter::new(self.config.clone());
        let snapshot = self.form.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
            rt.block_on(async {
                let outcome = submitter.submit(&snapshot, image_bytes, &sender).await;
                // Terminal event; always the last one for this submission.
                let _ = sender.send(UploadEvent::Completed(outcome));
            });
        });
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        ctx.request_repaint();

        if let Some(receiver) = &self.greeting_receiver {
            if let Ok(message) = receiver.try_recv() {
                self.greeting = Some(message);
                self.greeting_receiver = None;
            }
        }

        let events: Vec<UploadEvent> = match &self.submission.event_receiver {
            Some(receiver) => receiver.try_iter().collect(),
            None => return,
        };

        for event in events {
            match event {
                UploadEvent::Progress { sent, total } => {
                    self.submission.apply_progress(sent, total);
                }
                UploadEvent::Completed(outcome) => {
                    match &outcome {
                        Ok(receipt) => {
                            tracing::info!(
                                artwork_id = receipt.artwork_id,
                                image_id = receipt.image_id,
                                "artwork submitted"
                            );
                            // Success clears the form; failures keep the
                            // user's input for a retry.
                            self.form.clear_after_success();
                        }
                        Err(e) => tracing::error!("submission failed: {e}"),
                    }
                    self.submission.complete(&outcome);
                }
            }
        }
    }
}

async fn fetch_hello(config: &ApiConfig) -> Result<String, reqwest::Error> {
    let response = reqwest::get(config.hello_url()).await?.error_for_status()?;
    let body: HelloResponse = response.json().await?;
    Ok(body.message)
}

impl eframe::App for GoArtApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
