use crate::thumbnails::errors::ThumbnailError;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

#[derive(Debug, Deserialize)]
pub struct ThumbnailRequest {
    #[serde(default)]
    pub link: String,
}

impl ThumbnailRequest {
    /// The body has to be a JSON object, derived struct deserialization alone would
    /// also take `["<link>"]`.
    pub fn from_json(body: &[u8]) -> Result<Self, ThumbnailError> {
        let object: Map<String, Value> = serde_json::from_slice(body)?;
        Ok(serde_json::from_value(Value::Object(object))?)
    }

    /// Only absolute `http` and `https` links are worth a fetch.
    pub fn url(&self) -> Result<Url, ThumbnailError> {
        if self.link.trim().is_empty() {
            return Err(ThumbnailError::MissingLink);
        }
        match Url::parse(self.link.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
            _ => Err(ThumbnailError::InvalidLink {
                link: self.link.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_link_is_missing() {
        let request = ThumbnailRequest::from_json(br#"{"other": 1}"#).unwrap();

        assert!(matches!(request.url(), Err(ThumbnailError::MissingLink)));
    }

    #[test]
    fn test_blank_link_is_missing() {
        let request = ThumbnailRequest::from_json(br#"{"link": "   "}"#).unwrap();

        assert!(matches!(request.url(), Err(ThumbnailError::MissingLink)));
    }

    #[test]
    fn test_relative_link_is_invalid() {
        let request = ThumbnailRequest::from_json(br#"{"link": "/images/cat.png"}"#).unwrap();

        assert!(matches!(
            request.url(),
            Err(ThumbnailError::InvalidLink { .. })
        ));
    }

    #[test]
    fn test_https_link_is_accepted() {
        let request =
            ThumbnailRequest::from_json(br#"{"link": "https://example.com/cat.png"}"#).unwrap();

        assert_eq!(
            request.url().unwrap().as_str(),
            "https://example.com/cat.png"
        );
    }

    #[test]
    fn test_array_body_is_malformed() {
        let result = ThumbnailRequest::from_json(br#"["https://example.com/cat.png"]"#);

        assert!(matches!(result, Err(ThumbnailError::MalformedBody(_))));
    }

    #[test]
    fn test_non_string_link_is_malformed() {
        let result = ThumbnailRequest::from_json(br#"{"link": ["https://example.com"]}"#);

        assert!(matches!(result, Err(ThumbnailError::MalformedBody(_))));
    }
}
