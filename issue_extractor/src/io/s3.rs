use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use secrecy::ExposeSecret;
use serde_json::Value;
use shared_utils::config::ObjectStoreConfig;
use snafu::ResultExt;
use tracing::{info, warn};

use crate::io::sink::{ConversionSnafu, RawStore, ReadSnafu, SinkError, WriteSnafu};
use crate::models::batch::BatchDate;

/// Raw document store backed by an S3-compatible object store (MinIO in
/// development).
pub struct S3RawStore {
    client: Client,
    bucket: String,
}

impl S3RawStore {
    pub fn new(config: &ObjectStoreConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.expose_secret(),
            None,
            None,
            "configured",
        );

        // Path-style addressing: MinIO does not serve virtual-hosted buckets.
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint_url.as_str())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Key of the raw document for a batch date.
    pub fn object_key(date: BatchDate) -> String {
        format!("entity=issues/dt={date}/raw_data.json")
    }

    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| format!("{}", DisplayErrorContext(e)))
    }

    async fn create_bucket(&self) -> Result<(), String> {
        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| format!("{}", DisplayErrorContext(e)))
    }
}

#[async_trait]
impl RawStore for S3RawStore {
    async fn write(&self, date: BatchDate, records: &[Value]) -> Result<String, SinkError> {
        let key = Self::object_key(date);
        let body = serde_json::to_vec(records).context(ConversionSnafu)?;

        if let Err(message) = self.put_object(&key, body.clone()).await {
            // First write on a fresh environment: the bucket may not exist
            // yet. Create it once and retry the upload a single time.
            warn!(%message, bucket = %self.bucket, "upload failed, creating bucket and retrying");
            self.create_bucket()
                .await
                .map_err(|message| WriteSnafu { message }.build())?;
            self.put_object(&key, body)
                .await
                .map_err(|message| WriteSnafu { message }.build())?;
        }

        info!(count = records.len(), bucket = %self.bucket, %key, "raw document uploaded");
        Ok(key)
    }

    async fn read(&self, date: BatchDate) -> Result<Option<Vec<Value>>, SinkError> {
        let key = Self::object_key(date);

        match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(output) => {
                let bytes = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| ReadSnafu { message: e.to_string() }.build())?
                    .into_bytes();
                let records: Vec<Value> = serde_json::from_slice(&bytes).context(ConversionSnafu)?;
                Ok(Some(records))
            }
            Err(err) if err.as_service_error().is_some_and(|e| e.is_no_such_key()) => Ok(None),
            Err(err) => ReadSnafu {
                message: format!("{}", DisplayErrorContext(err)),
            }
            .fail(),
        }
    }
}
