//! Object storage abstraction.
//!
//! [`ObjectStore`] is the capability the report pipeline is handed instead of
//! a process-wide storage client: fetch one object, store one object.
//! [`S3ObjectStore`] implements it against AWS S3.

mod s3;

pub use s3::S3ObjectStore;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches the full content of `key` in `container`.
    async fn fetch(&self, container: &str, key: &str) -> Result<Bytes>;

    /// Stores `body` at `key` in `container`, overwriting any existing object.
    async fn store(&self, container: &str, key: &str, body: Vec<u8>) -> Result<()>;
}
