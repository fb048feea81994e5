use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use time::OffsetDateTime;

#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> anyhow::Result<()>;
    async fn delete_object(&self, key: &str) -> anyhow::Result<()>;
}

/// Stores uploads as plain files in one directory.
#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub async fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("create upload dir {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        anyhow::ensure!(
            !key.is_empty() && !key.contains(['/', '\\']) && key != "." && key != "..",
            "invalid object key {key:?}"
        );
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl StorageClient for LocalStorage {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        tracing::debug!(key, content_type, size = body.len(), "stored upload");
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("remove {}", path.display()))?;
        Ok(())
    }
}

/// `<unix millis>-<random>-<sanitized original name>`.
pub fn unique_filename(original: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}-{}", millis, suffix, sanitize_filename(original))
}

fn sanitize_filename(original: &str) -> String {
    lazy_static! {
        static ref UNSAFE_RE: Regex = Regex::new(r"[^A-Za-z0-9._-]").unwrap();
    }
    // drop any directory part the client sent
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned = UNSAFE_RE.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
