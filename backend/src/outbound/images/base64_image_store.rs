//! Filesystem-backed image store decoding base64 data URLs.
//!
//! Payloads arrive as `data:image/<subtype>;base64,<payload>`. The adapter
//! decodes the payload, names the file after the SHA-256 digest of its
//! bytes so repeated uploads of the same image collapse into one file, and
//! writes through a `cap-std` directory handle so nothing outside the
//! media root is reachable.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cap_std::{ambient_authority, fs::Dir};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ports::{ImageStore, ImageStoreError, StoredImage};

/// Subdirectory below the media root that holds recipe images.
const RECIPES_DIR: &str = "recipes";
/// Public URL prefix under which the media root is served.
const MEDIA_URL_PREFIX: &str = "/media";

/// Media types accepted for recipe images, with their file extensions.
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Image store writing decoded payloads below a sandboxed media root.
pub struct Base64ImageStore {
    media_root: Dir,
}

impl Base64ImageStore {
    /// Open the media root, creating the recipes subdirectory if needed.
    pub fn open(media_root: &std::path::Path) -> Result<Self, ImageStoreError> {
        std::fs::create_dir_all(media_root.join(RECIPES_DIR))
            .map_err(|err| ImageStoreError::io(err.to_string()))?;
        let media_root = Dir::open_ambient_dir(media_root, ambient_authority())
            .map_err(|err| ImageStoreError::io(err.to_string()))?;
        Ok(Self { media_root })
    }
}

/// Split a data URL into its media type and decoded bytes.
fn decode_data_url(data_url: &str) -> Result<(&'static str, Vec<u8>), ImageStoreError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| ImageStoreError::invalid_payload("expected a data URL"))?;
    let (media_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| ImageStoreError::invalid_payload("expected a base64 data URL"))?;

    let extension = ACCEPTED_TYPES
        .iter()
        .find(|(accepted, _)| *accepted == media_type)
        .map(|(_, extension)| *extension)
        .ok_or_else(|| {
            ImageStoreError::invalid_payload(format!("unsupported media type {media_type}"))
        })?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|err| ImageStoreError::invalid_payload(format!("invalid base64: {err}")))?;
    if bytes.is_empty() {
        return Err(ImageStoreError::invalid_payload("empty image payload"));
    }

    Ok((extension, bytes))
}

#[async_trait]
impl ImageStore for Base64ImageStore {
    async fn store(&self, data_url: &str) -> Result<StoredImage, ImageStoreError> {
        let (extension, bytes) = decode_data_url(data_url)?;

        let digest = hex::encode(Sha256::digest(&bytes));
        let file_name = format!("{digest}.{extension}");
        let relative = format!("{RECIPES_DIR}/{file_name}");

        self.media_root
            .write(&relative, &bytes)
            .map_err(|err| ImageStoreError::io(err.to_string()))?;
        debug!(file = %relative, bytes = bytes.len(), "stored recipe image");

        Ok(StoredImage {
            url: format!("{MEDIA_URL_PREFIX}/{relative}"),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for data URL decoding and filesystem writes.
    use super::*;
    use rstest::rstest;

    // 1x1 transparent PNG.
    const PNG_PAYLOAD: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn store() -> (tempfile::TempDir, Base64ImageStore) {
        let root = tempfile::tempdir().expect("temp media root");
        let store = Base64ImageStore::open(root.path()).expect("media root opens");
        (root, store)
    }

    #[rstest]
    #[tokio::test]
    async fn stores_png_under_content_addressed_name() {
        let (root, store) = store();
        let data_url = format!("data:image/png;base64,{PNG_PAYLOAD}");

        let stored = store.store(&data_url).await.expect("image stores");

        assert!(stored.url.starts_with("/media/recipes/"));
        assert!(stored.url.ends_with(".png"));
        let relative = stored.url.trim_start_matches("/media/");
        assert!(root.path().join(relative).exists());
    }

    #[rstest]
    #[tokio::test]
    async fn same_bytes_map_to_same_url() {
        let (_root, store) = store();
        let data_url = format!("data:image/png;base64,{PNG_PAYLOAD}");

        let first = store.store(&data_url).await.expect("first store");
        let second = store.store(&data_url).await.expect("second store");

        assert_eq!(first.url, second.url);
    }

    #[rstest]
    #[case("not-a-data-url")]
    #[case("data:image/png;base64,@@@not-base64@@@")]
    #[case("data:text/plain;base64,aGVsbG8=")]
    #[case("data:image/png;base64,")]
    #[tokio::test]
    async fn rejects_malformed_payloads(#[case] data_url: &str) {
        let (_root, store) = store();

        let err = store
            .store(data_url)
            .await
            .expect_err("malformed payload must fail");

        assert!(matches!(err, ImageStoreError::InvalidPayload { .. }));
    }
}
