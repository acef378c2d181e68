//! The sync pipeline: manifest, snapshots, fetch, decode, normalize.

use crate::Pouet;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use pouet_dump::models::{DumpKind, DumpSet, Manifest};
use serde::de::DeserializeOwned;
use tracing::instrument;

/// One decoded dump, and the snapshot to keep when it was freshly fetched.
struct Loaded<T> {
    records: Vec<T>,
    snapshot: Option<(String, Vec<u8>)>,
}

impl Pouet {
    /// Fetch the manifest from the configured URL.
    pub async fn fetch_manifest(&self) -> Result<Manifest> {
        pouet_remote::fetch_manifest(self.transport.as_ref(), &self.manifest_url).await.map_err(ErrorKind::network)
    }

    /// Fetch the manifest and synchronize the four dumps it points at.
    pub async fn get_latest(&self) -> Result<DumpSet> {
        let manifest = self.fetch_manifest().await?;
        self.sync(&manifest).await
    }

    /// Decode the four dumps of `manifest` concurrently and normalize them.
    ///
    /// The first failure aborts the whole run and the dumps that already
    /// succeeded are discarded. Snapshots of freshly fetched dumps are only
    /// written once all four decoded.
    #[instrument(skip_all, fields(date = %manifest.date, cache = self.cache))]
    pub async fn sync(&self, manifest: &Manifest) -> Result<DumpSet> {
        let (prods, groups, parties, boards) = futures::try_join!(
            self.load(manifest, DumpKind::Prods),
            self.load(manifest, DumpKind::Groups),
            self.load(manifest, DumpKind::Parties),
            self.load(manifest, DumpKind::Boards),
        )?;
        let snapshots = [&prods.snapshot, &groups.snapshot, &parties.snapshot, &boards.snapshot];
        for (key, json) in snapshots.into_iter().flatten() {
            self.snapshots.put(key, json).await.map_err(ErrorKind::snapshot)?;
            tracing::debug!(key = %key, store = self.snapshots.name(), "stored snapshot");
        }
        let set = DumpSet::new(prods.records, groups.records, parties.records, boards.records);
        tracing::info!(
            prods = set.prods.len(),
            groups = set.groups.len(),
            parties = set.parties.len(),
            boards = set.boards.len(),
            platforms = set.platforms.len(),
            users = set.users.len(),
            "synchronized dumps"
        );
        Ok(set)
    }

    #[instrument(skip(self, manifest), fields(date = %manifest.date))]
    async fn load<T>(&self, manifest: &Manifest, kind: DumpKind) -> Result<Loaded<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let key = kind.snapshot_key(&manifest.date);
        if self.cache {
            let cached = self.snapshots.get(&key).await.map_err(ErrorKind::snapshot)?;
            if let Some(json) = cached {
                match blocking(move || pouet_dump::parse::<T>(&json)).await {
                    Ok(records) => {
                        tracing::info!(%kind, key = %key, "using snapshot");
                        return Ok(Loaded { records, snapshot: None });
                    },
                    Err(err) => tracing::warn!(%kind, key = %key, error = %err, "unreadable snapshot, fetching again"),
                }
            }
        }
        let body = pouet_remote::fetch_dump(self.transport.as_ref(), manifest, kind).await.map_err(ErrorKind::network)?;
        let (json, records) = blocking(move || pouet_dump::decode::<T>(&body)).await?;
        Ok(Loaded {
            records,
            snapshot: Some((key, json)),
        })
    }
}

/// Run a decoding step off the async runtime.
async fn blocking<R, F>(task: F) -> Result<R>
where
    F: FnOnce() -> pouet_dump::error::Result<R> + Send + 'static,
    R: Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result.map_err(ErrorKind::data),
        Err(err) => Err::<R, _>(err).or_raise(|| ErrorKind::Data("decoding task failed".to_string())),
    }
}
