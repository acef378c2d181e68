use crate::error::{ErrorKind, Result};
use crate::transport::Transport;
use exn::ResultExt;
use pouet_dump::models::{DumpKind, Manifest};
use tracing::instrument;

/// Retrieve and parse the manifest describing the current dumps.
///
/// A body that is not a manifest is reported as [`ErrorKind::Manifest`], with
/// the parse failure attached as its child.
#[instrument(skip(transport))]
pub async fn fetch_manifest(transport: &dyn Transport, url: &str) -> Result<Manifest> {
    let body = transport.get(url).await?;
    let manifest = Manifest::from_slice(&body).or_raise(|| ErrorKind::Manifest)?;
    tracing::info!(date = %manifest.date, "fetched manifest");
    Ok(manifest)
}

/// Retrieve the raw (still compressed) payload of one dump.
#[instrument(skip(transport, manifest), fields(date = %manifest.date))]
pub async fn fetch_dump(transport: &dyn Transport, manifest: &Manifest, kind: DumpKind) -> Result<Vec<u8>> {
    let link = manifest.link(kind);
    let body = transport.get(&link.url).await?;
    if let Some(expected) = link.size_in_bytes
        && expected != body.len() as u64
    {
        tracing::warn!(%kind, expected, received = body.len(), "dump size differs from manifest");
    }
    Ok(body)
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    const MANIFEST: &str = r#"{
        "latest": {
            "prods": {"url": "https://example.invalid/prods.gz", "size_in_bytes": 3},
            "groups": {"url": "https://example.invalid/groups.gz"},
            "parties": {"url": "https://example.invalid/parties.gz"},
            "boards": {"url": "https://example.invalid/boards.gz"}
        },
        "date": "20240105"
    }"#;

    #[tokio::test]
    async fn test_fetch_manifest_and_dump() {
        let transport = MockTransport::default()
            .with_route("manifest", MANIFEST)
            .with_route("https://example.invalid/prods.gz", b"abc".to_vec());
        let manifest = fetch_manifest(&transport, "manifest").await.unwrap();
        assert_eq!(manifest.date.to_string(), "20240105");
        let body = fetch_dump(&transport, &manifest, DumpKind::Prods).await.unwrap();
        assert_eq!(body, b"abc");
    }

    #[tokio::test]
    async fn test_fetch_manifest_shape_failure() {
        let transport = MockTransport::default().with_route("manifest", "{}");
        let err = fetch_manifest(&transport, "manifest").await.unwrap_err();
        assert_eq!(*err, ErrorKind::Manifest);
    }

    #[tokio::test]
    async fn test_fetch_manifest_status() {
        let transport = MockTransport::default().with_status("manifest", 400, "bad request");
        let err = fetch_manifest(&transport, "manifest").await.unwrap_err();
        assert_eq!(*err, ErrorKind::Status(400));
    }
}
