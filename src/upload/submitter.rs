use std::convert::Infallible;
use std::sync::mpsc::Sender;

use bytes::Bytes;
use futures::stream;
use reqwest::multipart;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::upload::types::{
    ArtworkField, ArtworkForm, SubmissionReceipt, SubmitError, UploadEvent,
};

/// Upload body chunk size; each chunk pulled by the transport publishes one
/// progress event.
const PROGRESS_CHUNK_SIZE: usize = 16 * 1024;

#[derive(Deserialize)]
struct UploadResponse {
    data: Option<UploadResponseData>,
}

#[derive(Deserialize)]
struct UploadResponseData {
    artwork_id: Option<i64>,
    image_id: Option<i64>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    // The endpoint contract names this `Error`; older servers emit `error`.
    #[serde(rename = "Error", alias = "error")]
    error: Option<String>,
}

/// Issues one artwork submission as a single multipart POST and maps the
/// outcome onto the `SubmitError` taxonomy. One instance per submission.
#[derive(Clone)]
pub struct ArtworkSubmitter {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ArtworkSubmitter {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn submit(
        &self,
        form: &ArtworkForm,
        image_bytes: Vec<u8>,
        events: &Sender<UploadEvent>,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let image = form.image.as_ref().ok_or_else(|| {
            SubmitError::Validation("Please provide a Title and select an Image.".to_string())
        })?;

        let total = image_bytes.len() as u64;
        let image_part = multipart::Part::stream_with_length(
            progress_body(image_bytes, events.clone()),
            total,
        )
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)
        .map_err(|e| SubmitError::Validation(format!("Unusable image type: {e}")))?;

        let mut form_data = multipart::Form::new();
        for field in ArtworkField::ALL {
            form_data = form_data.text(field.part_name(), form.field(field).to_string());
        }
        let form_data = form_data.part("image", image_part);

        tracing::debug!(url = %self.config.artworks_url(), bytes = total, "posting artwork");

        let response = self
            .client
            .post(self.config.artworks_url())
            .multipart(form_data)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request rejected")
                        .to_string()
                });
            return Err(SubmitError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<UploadResponse>()
            .await
            .map_err(|e| SubmitError::Server {
                status: status.as_u16(),
                message: format!("unreadable response body: {e}"),
            })?;

        // A success status without both identifiers is not a success.
        let receipt = body
            .data
            .and_then(|data| match (data.artwork_id, data.image_id) {
                (Some(artwork_id), Some(image_id)) => Some(SubmissionReceipt {
                    artwork_id,
                    image_id,
                }),
                _ => None,
            })
            .ok_or_else(|| SubmitError::Server {
                status: status.as_u16(),
                message: "response did not include artwork and image ids".to_string(),
            })?;

        Ok(receipt)
    }
}

/// Wraps the image bytes in a stream that reports cumulative progress as the
/// transport pulls chunks. Events are counted at pull time, so delivery is
/// best-effort and may be sparse.
fn progress_body(image_bytes: Vec<u8>, events: Sender<UploadEvent>) -> reqwest::Body {
    let total = image_bytes.len() as u64;
    let chunks: Vec<Bytes> = image_bytes
        .chunks(PROGRESS_CHUNK_SIZE)
        .map(Bytes::copy_from_slice)
        .collect();

    let mut sent: u64 = 0;
    let stream = stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len() as u64;
        let _ = events.send(UploadEvent::Progress { sent, total });
        Ok::<Bytes, Infallible>(chunk)
    }));

    reqwest::Body::wrap_stream(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::types::SelectedImage;
    use std::path::PathBuf;
    use std::sync::mpsc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const IMAGE_SIZE: usize = 50 * 1024;

    fn birch_form() -> ArtworkForm {
        let mut form = ArtworkForm::default();
        form.set_field(ArtworkField::Title, "Birch Study");
        form.set_field(ArtworkField::ArtistId, "1");
        form.image = Some(SelectedImage {
            path: PathBuf::from("birch.jpg"),
            file_name: "birch.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            size: IMAGE_SIZE as u64,
        });
        form
    }

    fn submitter_for(base_url: String) -> ArtworkSubmitter {
        ArtworkSubmitter::new(ApiConfig { base_url })
    }

    /// True once `buf` holds one complete HTTP request.
    fn request_complete(buf: &[u8]) -> bool {
        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]);
        let body_len = buf.len() - (header_end + 4);

        let content_length = headers.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        });

        match content_length {
            Some(expected) => body_len >= expected,
            None => buf.ends_with(b"0\r\n\r\n"),
        }
    }

    /// Accepts one connection, consumes the whole request, answers with the
    /// canned status/body, and closes.
    async fn one_shot_server(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 8192];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn successful_submission_yields_both_ids() {
        let base = one_shot_server(
            "201 Created",
            serde_json::json!({
                "success": true,
                "message": "Artwork and image created successfully",
                "data": { "artwork_id": 7, "image_id": 42 }
            })
            .to_string(),
        )
        .await;
        let (sender, receiver) = mpsc::channel();

        let receipt = submitter_for(base)
            .submit(&birch_form(), vec![0u8; IMAGE_SIZE], &sender)
            .await
            .unwrap();

        assert_eq!(
            receipt,
            SubmissionReceipt {
                artwork_id: 7,
                image_id: 42
            }
        );

        let mut last_sent = 0;
        let mut saw_progress = false;
        while let Ok(event) = receiver.try_recv() {
            if let UploadEvent::Progress { sent, total } = event {
                saw_progress = true;
                assert!(sent >= last_sent, "progress went backwards");
                assert_eq!(total, IMAGE_SIZE as u64);
                last_sent = sent;
            }
        }
        assert!(saw_progress);
        assert_eq!(last_sent, IMAGE_SIZE as u64);
    }

    #[tokio::test]
    async fn server_rejection_carries_the_body_message() {
        let base = one_shot_server(
            "500 Internal Server Error",
            serde_json::json!({ "Error": "db down" }).to_string(),
        )
        .await;
        let (sender, _receiver) = mpsc::channel();

        let err = submitter_for(base)
            .submit(&birch_form(), vec![0u8; IMAGE_SIZE], &sender)
            .await
            .unwrap_err();

        match err {
            SubmitError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "db down");
            }
            other => panic!("expected a server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lowercase_error_tag_also_parses() {
        let base = one_shot_server(
            "400 Bad Request",
            serde_json::json!({
                "success": false,
                "error": "Title, Artist ID, and valid data are required"
            })
            .to_string(),
        )
        .await;
        let (sender, _receiver) = mpsc::channel();

        let err = submitter_for(base)
            .submit(&birch_form(), vec![0u8; IMAGE_SIZE], &sender)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Artist ID"));
    }

    #[tokio::test]
    async fn success_status_without_image_id_is_an_error() {
        let base = one_shot_server(
            "201 Created",
            serde_json::json!({ "success": true, "data": { "artwork_id": 7 } }).to_string(),
        )
        .await;
        let (sender, _receiver) = mpsc::channel();

        let err = submitter_for(base)
            .submit(&birch_form(), vec![0u8; IMAGE_SIZE], &sender)
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Server { status: 201, .. }));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        // Bind to grab a free port, then drop the listener before submitting.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let (sender, _receiver) = mpsc::channel();
        let err = submitter_for(base)
            .submit(&birch_form(), vec![0u8; IMAGE_SIZE], &sender)
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Network(_)));
        assert_eq!(err.to_string(), "Network Error. Is the API server running?");
    }
}
