use crate::cigar_tree::CigarTree;
use crate::publish::{Acknowledgement, PublishError, Publisher};
use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Base address of the history store when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/history";

/// [Publisher] posting to `<base>/<family-id>` over HTTP.
///
/// Uses a blocking [reqwest] client with its default timeout.
///
/// # Example
/// ```
/// use cigartree::publish::HttpPublisher;
///
/// let publisher = HttpPublisher::new("http://store.example/history/");
/// assert_eq!(
///     publisher.endpoint("PF00001 v2").unwrap().as_str(),
///     "http://store.example/history/PF00001%20v2"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HttpPublisher {
    base_url: String,
    client: Client,
}

impl HttpPublisher {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpPublisher {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Replaces the HTTP client, e.g. to set a timeout or proxy.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Address for `family_id`: the base with the id appended as one
    /// percent-encoded path segment. A trailing `/` on the base is dropped.
    pub fn endpoint(&self, family_id: &str) -> Result<Url, PublishError> {
        let invalid = || PublishError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push(family_id);
        Ok(url)
    }
}

impl Default for HttpPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Publisher for HttpPublisher {
    fn submit(&self, family_id: &str, tree: &CigarTree) -> Result<Acknowledgement, PublishError> {
        let url = self.endpoint(family_id)?;
        debug!(%url, leaves = tree.num_leaves(), "submitting cigar tree");

        let response = self.client.post(url.clone()).json(tree).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let text = response.text()?;
        info!(%url, status = status.as_u16(), "published cigar tree");
        Ok(decode_acknowledgement(&text))
    }
}

/// Decodes a success body: empty is `None`, non-JSON text is kept as a string.
fn decode_acknowledgement(body: &str) -> Acknowledgement {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, "acknowledgement is not JSON, keeping it as text");
            Some(Value::String(body.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let publisher = HttpPublisher::new("http://localhost:8080/history");
        assert_eq!(publisher.endpoint("fam1").unwrap().as_str(), "http://localhost:8080/history/fam1");
    }

    #[test]
    fn test_endpoint_encodes_slash() {
        let publisher = HttpPublisher::default();
        assert_eq!(publisher.endpoint("a/b").unwrap().as_str(), "http://localhost:8080/history/a%2Fb");
    }

    #[test]
    fn test_endpoint_invalid_base() {
        let publisher = HttpPublisher::new("not a url");
        assert!(matches!(publisher.endpoint("fam1"), Err(PublishError::InvalidUrl(_))));
    }

    #[test]
    fn test_decode_acknowledgement() {
        assert_eq!(decode_acknowledgement(""), None);
        assert_eq!(decode_acknowledgement("{\"ok\":true}"), Some(json!({"ok": true})));
        assert_eq!(decode_acknowledgement("stored"), Some(json!("stored")));
    }
}
