#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("GOART_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn artworks_url(&self) -> String {
        format!("{}/api/artworks", self.base_url)
    }

    pub fn hello_url(&self) -> String {
        format!("{}/api/hello", self.base_url)
    }

    /// Retrieval reference for an uploaded image; consumed as a link only.
    pub fn thumbnail_url(&self, image_id: i64) -> String {
        format!("{}/api/artworks/images/{}/thumb", self.base_url, image_id)
    }
}
