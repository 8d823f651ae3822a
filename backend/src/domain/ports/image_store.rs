//! Port for the image codec collaborator.
//!
//! A recipe image arrives as a base64 data URL. The store decodes it,
//! persists the bytes, and hands back a retrievable URL. The recipe
//! validator only checks the payload's presence; malformed payloads are
//! rejected here, at write time.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by image store adapters.
    pub enum ImageStoreError {
        /// The payload is not a decodable image data URL.
        InvalidPayload => "image payload rejected: {message}",
        /// The decoded bytes could not be persisted.
        Io => "image store failed: {message}",
    }
}

/// A persisted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// URL under which the stored bytes can be retrieved.
    pub url: String,
}

/// Port for decoding and persisting recipe images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Decode a base64 data URL and persist the bytes.
    async fn store(&self, data_url: &str) -> Result<StoredImage, ImageStoreError>;
}

/// Fixture implementation for tests that do not exercise image storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureImageStore;

#[async_trait]
impl ImageStore for FixtureImageStore {
    async fn store(&self, _data_url: &str) -> Result<StoredImage, ImageStoreError> {
        Ok(StoredImage {
            url: "/media/recipes/fixture.png".to_owned(),
        })
    }
}
