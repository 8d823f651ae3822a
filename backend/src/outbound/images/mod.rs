//! Image codec adapters.

mod base64_image_store;

pub use base64_image_store::Base64ImageStore;
