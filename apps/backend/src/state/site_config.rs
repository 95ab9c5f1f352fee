use std::env;

/// Public site settings that shape view contexts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Prefix for stored-file references such as team logos.
    pub media_url: String,
}

impl SiteConfig {
    pub fn new(media_url: impl Into<String>) -> Self {
        let mut media_url = media_url.into();
        if !media_url.ends_with('/') {
            media_url.push('/');
        }
        Self { media_url }
    }

    /// Reads `MEDIA_URL`, defaulting to `/media/`.
    pub fn from_env() -> Self {
        match env::var("MEDIA_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Public URL for a stored file path, e.g. `logos/lions.png` -> `/media/logos/lions.png`.
    pub fn media(&self, path: &str) -> String {
        format!("{}{}", self.media_url, path.trim_start_matches('/'))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            media_url: "/media/".to_string(),
        }
    }
}
