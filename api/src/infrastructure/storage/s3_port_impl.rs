use std::path::Path;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, error::SdkError};
use tokio::io::AsyncReadExt;

use crate::application::ports::storage_port::StoragePort;
use crate::bootstrap::config::Config;
use crate::infrastructure::storage::{normalize_prefix, object_key, prefixed_key};

const CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Content storage in an S3-compatible bucket. `STORAGE_ROOT` becomes the key prefix.
pub struct S3StoragePort {
    client: Client,
    bucket: String,
    root_prefix: String,
}

impl S3StoragePort {
    pub async fn new(cfg: &Config) -> anyhow::Result<Self> {
        let bucket = cfg
            .s3_bucket
            .clone()
            .context("S3_BUCKET must be set for the s3 storage backend")?;
        let client = client_for(cfg).await;
        ensure_bucket(&client, &bucket).await?;
        Ok(Self::with_client(client, bucket, &cfg.storage_root))
    }

    /// Wraps an existing client without touching the bucket.
    pub fn with_client(client: Client, bucket: impl Into<String>, storage_root: &str) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            root_prefix: normalize_prefix(Path::new(storage_root)),
        }
    }

    fn full_key(&self, key: &str) -> anyhow::Result<String> {
        let relative = object_key(key)?;
        Ok(prefixed_key(&self.root_prefix, &relative))
    }

    async fn object_exists(&self, key: &str) -> anyhow::Result<bool> {
        use aws_sdk_s3::operation::head_object::HeadObjectError;

        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => match err {
                SdkError::ServiceError(service_err) => {
                    let head_err: &HeadObjectError = service_err.err();
                    if head_err.is_not_found() {
                        Ok(false)
                    } else {
                        Err(anyhow!("head_object error for {}: {}", key, head_err))
                    }
                }
                other => Err(anyhow!("head_object failed for {}: {}", key, other)),
            },
        }
    }
}

#[async_trait]
impl StoragePort for S3StoragePort {
    async fn has(&self, key: &str) -> anyhow::Result<bool> {
        let key = self.full_key(key)?;
        self.object_exists(&key).await
    }

    async fn read(&self, key: &str) -> anyhow::Result<String> {
        let key = self.full_key(key)?;
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .with_context(|| format!("failed to get object {key}"))?;
        let mut reader = object.body.into_async_read();
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        String::from_utf8(data).with_context(|| format!("object {key} is not valid UTF-8"))
    }

    async fn put(&self, key: &str, content: &str) -> anyhow::Result<()> {
        let key = self.full_key(key)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(CONTENT_TYPE)
            .body(ByteStream::from(content.as_bytes().to_vec()))
            .send()
            .await
            .with_context(|| format!("failed to upload object {key}"))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<bool> {
        let key = self.full_key(key)?;
        // DeleteObject succeeds for absent keys, so existence is checked first
        if !self.object_exists(&key).await? {
            return Ok(false);
        }
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .with_context(|| format!("failed to delete object {key}"))?;
        Ok(true)
    }
}

async fn client_for(cfg: &Config) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &cfg.s3_region {
        loader = loader.region(Region::new(region.clone()));
    }
    let shared = loader.load().await;

    let mut conf =
        aws_sdk_s3::config::Builder::from(&shared).force_path_style(cfg.s3_use_path_style);
    if let (Some(access), Some(secret)) = (&cfg.s3_access_key, &cfg.s3_secret_key) {
        conf = conf.credentials_provider(Credentials::new(
            access.clone(),
            secret.clone(),
            None,
            None,
            "link-api-static",
        ));
    }
    if let Some(endpoint) = &cfg.s3_endpoint {
        conf = conf.endpoint_url(endpoint.clone());
    }
    Client::from_conf(conf.build())
}

async fn ensure_bucket(client: &Client, bucket: &str) -> anyhow::Result<()> {
    match client.head_bucket().bucket(bucket).send().await {
        Ok(_) => return Ok(()),
        Err(SdkError::ServiceError(service_err)) => {
            if !matches!(service_err.err(), HeadBucketError::NotFound(_)) {
                return Err(anyhow!(service_err.err().to_string()));
            }
        }
        Err(err) => return Err(anyhow!(err.to_string())),
    }

    match client.create_bucket().bucket(bucket).send().await {
        Ok(_) => Ok(()),
        Err(SdkError::ServiceError(service_err)) => match service_err.err() {
            CreateBucketError::BucketAlreadyOwnedByYou(_) => Ok(()),
            CreateBucketError::BucketAlreadyExists(_) => Ok(()),
            other => Err(anyhow!(other.to_string())),
        },
        Err(err) => Err(anyhow!(err.to_string())),
    }
}
