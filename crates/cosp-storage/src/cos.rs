use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};

use crate::provider::{ListPage, ListRequest, ObjectStore, RemoteObject};

/// Tencent COS provider, driven over the S3-compatible API.
///
/// Also works against MinIO, Garage, Ceph RGW and any other service
/// implementing the S3 API, via a custom endpoint.
pub struct CosObjectStore {
    client: Client,
    bucket: String,
    bucket_url: String,
}

/// Options for creating a COS provider.
pub struct CosOptions<'a> {
    /// Bucket name including the appid suffix, e.g. `pics-1250000000`.
    pub bucket: &'a str,
    pub region: &'a str,
    /// S3 API endpoint, e.g. `https://cos.ap-beijing.myqcloud.com`.
    pub endpoint_url: &'a str,
    /// Force path-style addressing (`http://host/bucket/key` instead of
    /// `http://bucket.host/key`). Most S3-compatible servers require this.
    pub path_style: bool,
    /// Explicit access key. If None, uses env/profile credentials.
    pub access_key: Option<&'a str>,
    /// Explicit secret key. If None, uses env/profile credentials.
    pub secret_key: Option<&'a str>,
    /// Public bucket URL used when printing object links.
    pub bucket_url: &'a str,
}

impl CosObjectStore {
    pub async fn with_options(opts: CosOptions<'_>) -> anyhow::Result<Self> {
        let mut config_loader =
            aws_config::from_env().region(aws_config::Region::new(opts.region.to_string()));

        // If explicit credentials are provided, inject them
        if let (Some(ak), Some(sk)) = (opts.access_key, opts.secret_key) {
            let creds = aws_sdk_s3::config::Credentials::new(ak, sk, None, None, "cosp-config");
            config_loader = config_loader.credentials_provider(creds);
        }

        let sdk_config = config_loader.load().await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config)
            .endpoint_url(opts.endpoint_url);

        if opts.path_style {
            s3_config_builder = s3_config_builder.force_path_style(true);
        }

        let client = Client::from_conf(s3_config_builder.build());

        Ok(Self {
            client,
            bucket: opts.bucket.to_string(),
            bucket_url: opts.bucket_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for CosObjectStore {
    async fn list(&self, req: &ListRequest) -> anyhow::Result<ListPage> {
        // The marker-based ListObjects call, not V2: COS pagination cursors
        // are raw object keys, which is exactly what the local ordinal index
        // stores and resolves.
        let resp = self
            .client
            .list_objects()
            .bucket(&self.bucket)
            .max_keys(req.max_keys)
            .set_prefix(req.prefix.clone())
            .set_marker(req.marker.clone())
            .send()
            .await?;

        let objects = resp
            .contents()
            .iter()
            .filter_map(|obj| {
                Some(RemoteObject {
                    key: obj.key()?.to_string(),
                    size: obj.size().unwrap_or(0).max(0) as u64,
                    last_modified: obj.last_modified().and_then(to_chrono),
                })
            })
            .collect();

        Ok(ListPage {
            objects,
            is_truncated: resp.is_truncated().unwrap_or(false),
        })
    }

    async fn put(&self, key: &str, data: &[u8]) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.bucket_url, key)
    }
}

fn to_chrono(dt: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}
