//! Decompression and parsing of dump payloads.

use crate::error::{ErrorKind, Result};
use crate::models::Dump;
use exn::ResultExt;
use flate2::read::MultiGzDecoder;
use serde::de::DeserializeOwned;
use std::io::Read;
use tracing::instrument;

/// Gunzip a fetched dump payload.
#[instrument(skip(bytes), fields(compressed_size = bytes.len()))]
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.is_empty() {
        exn::bail!(ErrorKind::UndefinedData);
    }
    let mut output = Vec::new();
    if let Err(err) = MultiGzDecoder::new(bytes).read_to_end(&mut output) {
        let reason = err.to_string();
        return Err(err).or_raise(|| ErrorKind::Decompression(reason));
    }
    tracing::debug!(decompressed_size = output.len(), "decompressed dump");
    Ok(output)
}

/// Parse a decompressed `{ "data": [...] }` document into typed records.
///
/// A single malformed record rejects the whole document.
#[instrument(skip(json), fields(json_size = json.len(), records))]
pub fn parse<T: DeserializeOwned>(json: &[u8]) -> Result<Vec<T>> {
    let dump: Dump<T> = match serde_json::from_slice(json) {
        Ok(dump) => dump,
        Err(err) => {
            let reason = err.to_string();
            return Err(err).or_raise(|| ErrorKind::InvalidDocument(reason));
        },
    };
    tracing::Span::current().record("records", dump.data.len());
    Ok(dump.data)
}

/// Decompress then parse. Returns the decompressed document alongside the
/// records so the caller can keep it as a snapshot.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<(Vec<u8>, Vec<T>)> {
    let json = decompress(bytes)?;
    let records = parse(&json)?;
    Ok((json, records))
}
