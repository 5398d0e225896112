// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::object_store_bucket::ObjectStoreBucket;
use crate::s3_bucket::S3Bucket;
use crate::store::BucketClient;
use std::sync::Arc;

/// Opens the bucket named by `config.url`: `s3://` goes to S3 with raw
/// keys, `file://` and `memory://` go through `object_store`.
pub fn open_bucket(config: &StoreConfig) -> Result<Arc<dyn BucketClient>> {
    let scheme = config
        .url
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .ok_or_else(|| Error::config(format!("invalid url {}", config.url)))?;

    match scheme {
        "s3" => Ok(Arc::new(S3Bucket::from_config(config)?)),
        _ => Ok(Arc::new(ObjectStoreBucket::from_config(config)?)),
    }
}
