use sha2::{Digest, Sha256};

/// A rendered bootstrap document plus its content hash.
///
/// The hash is the hex SHA-256 of the body, used to detect whether a
/// re-upload would change anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub body: String,
    pub content_hash: String,
}

impl RenderedTemplate {
    pub fn new(body: String) -> Self {
        let digest = Sha256::digest(body.as_bytes());
        let content_hash = digest.iter().map(|b| format!("{b:02x}")).collect();
        Self { body, content_hash }
    }
}
