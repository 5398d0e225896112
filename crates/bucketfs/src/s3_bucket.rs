// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! [`BucketClient`] for S3 and S3-compatible stores.
//!
//! Keys travel to and from the service unchanged, so a marker such as
//! `Reports/` lists back with its trailing separator.

use crate::config::StoreConfig;
use crate::error::{Error, Operation, Result};
use crate::store::{BucketClient, ListPage, ObjectEntry};
use async_trait::async_trait;
use bytes::Bytes;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use url::Url;

const DEFAULT_REGION: &str = "us-east-1";

pub struct S3Bucket {
    bucket: Box<Bucket>,
    page_size: usize,
}

impl S3Bucket {
    /// Opens `s3://<bucket>` with the region, keys and endpoint in `config`.
    ///
    /// A custom endpoint switches to path-style addressing. Every request
    /// carries the canned `public-read` ACL header.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let url = Url::parse(&config.url)
            .map_err(|e| Error::config(format!("invalid url {}: {e}", config.url)))?;
        let name = url
            .host_str()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::config(format!("missing bucket name in {}", config.url)))?;

        let region_name = if config.region.is_empty() {
            DEFAULT_REGION
        } else {
            config.region.as_str()
        };
        let region = if config.endpoint.is_empty() {
            region_name
                .parse::<Region>()
                .map_err(|e| Error::config(format!("invalid region {region_name}: {e}")))?
        } else {
            Region::Custom {
                region: region_name.to_string(),
                endpoint: config.endpoint.clone(),
            }
        };

        let credentials = Credentials::new(
            non_empty(&config.access_key),
            non_empty(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| Error::config(format!("S3 credentials: {e}")))?;

        let mut bucket = Bucket::new(name, region, credentials)
            .map_err(|e| Error::config(format!("cannot open bucket {name}: {e}")))?;
        if !config.endpoint.is_empty() {
            bucket = bucket.with_path_style();
        }
        bucket.add_header("x-amz-acl", "public-read");

        diagnostics::debug!("opened S3 bucket {name}", name: name);
        Ok(Self {
            bucket: Box::new(bucket),
            page_size: config.page_size.max(1),
        })
    }

    pub fn name(&self) -> String {
        self.bucket.name()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn store_error(operation: Operation, object_key: &str, err: S3Error) -> Error {
    match err {
        S3Error::HttpFailWithBody(404, _) => Error::not_found(object_key),
        other => Error::store(operation, object_key, other),
    }
}

#[async_trait]
impl BucketClient for S3Bucket {
    async fn list_objects(&self, prefix: &str, continuation: Option<&str>) -> Result<ListPage> {
        let (result, _) = self
            .bucket
            .list_page(
                prefix.to_string(),
                None,
                continuation.map(str::to_string),
                None,
                Some(self.page_size),
            )
            .await
            .map_err(|e| Error::store(Operation::List, prefix, e))?;

        Ok(ListPage {
            objects: result
                .contents
                .into_iter()
                .map(|object| ObjectEntry {
                    key: object.key,
                    size: object.size,
                })
                .collect(),
            next_continuation: result.next_continuation_token,
            is_truncated: result.is_truncated,
        })
    }

    async fn get_object(&self, object_key: &str) -> Result<Bytes> {
        let response = self
            .bucket
            .get_object(object_key)
            .await
            .map_err(|e| store_error(Operation::Get, object_key, e))?;
        Ok(Bytes::from(response.bytes().to_vec()))
    }

    async fn put_object(&self, object_key: &str, body: Bytes, content_type: &str) -> Result<()> {
        _ = self
            .bucket
            .put_object_with_content_type(object_key, &body, content_type)
            .await
            .map_err(|e| store_error(Operation::Put, object_key, e))?;
        Ok(())
    }

    async fn delete_object(&self, object_key: &str) -> Result<()> {
        match self.bucket.delete_object(object_key).await {
            Ok(_) => Ok(()),
            Err(e) => match store_error(Operation::Delete, object_key, e) {
                Error::NotFound(_) => Ok(()),
                other => Err(other),
            },
        }
    }

    async fn copy_object(&self, source_key: &str, dest_key: &str) -> Result<()> {
        _ = self
            .bucket
            .copy_object_internal(source_key, dest_key)
            .await
            .map_err(|e| store_error(Operation::Copy, source_key, e))?;
        Ok(())
    }

    async fn set_public_read(&self, object_key: &str) -> Result<()> {
        // The ACL header rides on the put or copy that wrote the object;
        // here we only confirm it is there to be read.
        let (_, status) = self
            .bucket
            .head_object(object_key)
            .await
            .map_err(|e| store_error(Operation::SetAcl, object_key, e))?;
        if status == 404 {
            return Err(Error::not_found(object_key));
        }
        Ok(())
    }
}
