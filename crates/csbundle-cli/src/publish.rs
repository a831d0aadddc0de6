//! Object-store publishing.
//!
//! A single blocking PutObject of the finished archive. The async S3 client
//! is driven by a one-shot current-thread runtime; credentials and region
//! come from the ambient AWS environment.

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use std::path::PathBuf;

use crate::error::PublishError;

/// Remote-bucket target configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    /// Bucket name.
    pub bucket: String,
    /// Fixed key prefix; the object key is `{prefix}/{filename}`.
    pub key_prefix: String,
    /// Attach a public-read canned ACL to the object.
    pub public: bool,
}

impl PublishTarget {
    /// Computes the object key for an archive filename.
    pub fn key_for(&self, filename: &str) -> String {
        format!("{}/{}", self.key_prefix.trim_end_matches('/'), filename)
    }
}

/// The archive bytes to upload: already materialized on disk, or still in
/// memory.
#[derive(Debug)]
pub enum ArchivePayload {
    /// Archive file on disk.
    File(PathBuf),
    /// Archive held fully in memory.
    Buffer(Vec<u8>),
}

/// Uploads the archive under `{prefix}/{filename}` and returns the object
/// key. No multipart handling, no retry; any error fails the run.
pub fn publish(
    target: &PublishTarget,
    filename: &str,
    payload: ArchivePayload,
) -> Result<String, PublishError> {
    let key = target.key_for(filename);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(PublishError::Runtime)?;

    runtime.block_on(async {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let client = aws_sdk_s3::Client::new(&config);

        let body = match payload {
            ArchivePayload::File(path) => {
                ByteStream::from_path(&path)
                    .await
                    .map_err(|err| PublishError::Payload {
                        path: path.clone(),
                        message: DisplayErrorContext(&err).to_string(),
                    })?
            }
            ArchivePayload::Buffer(bytes) => ByteStream::from(bytes),
        };

        let mut request = client
            .put_object()
            .bucket(&target.bucket)
            .key(&key)
            .body(body);
        if target.public {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }
        request.send().await.map_err(|err| PublishError::Upload {
            bucket: target.bucket.clone(),
            key: key.clone(),
            message: DisplayErrorContext(&err).to_string(),
        })?;

        Ok(key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_for_joins_prefix() {
        let target = PublishTarget {
            bucket: "releases".to_string(),
            key_prefix: "bundles".to_string(),
            public: false,
        };
        assert_eq!(target.key_for("code-server.tar.gz"), "bundles/code-server.tar.gz");
    }

    #[test]
    fn test_key_for_strips_trailing_slash() {
        let target = PublishTarget {
            bucket: "releases".to_string(),
            key_prefix: "bundles/".to_string(),
            public: true,
        };
        assert_eq!(target.key_for("a.tar.gz"), "bundles/a.tar.gz");
    }
}
