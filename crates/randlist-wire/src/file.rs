//! File-backed sinks and sources.
//!
//! Each helper opens its file, runs the codec over a buffered handle, and
//! drops the handle before returning, on success and on error alike.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use randlist_core::List;

use crate::format::{decode_with_limits, encode, DecodeLimits, WireError};

/// Encode `list` into the file at `path`, creating or truncating it.
pub fn save_to_path(list: &List, path: impl AsRef<Path>) -> Result<(), WireError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WireError::SinkUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    encode(list, &mut writer)?;
    writer.flush()?;

    debug!(path = %path.display(), nodes = list.count(), "saved list");
    Ok(())
}

/// Decode a list from the file at `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<List, WireError> {
    load_from_path_with_limits(path, &DecodeLimits::UNLIMITED)
}

/// Decode a list from the file at `path`, applying `limits`.
pub fn load_from_path_with_limits(
    path: impl AsRef<Path>,
    limits: &DecodeLimits,
) -> Result<List, WireError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| WireError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let list = decode_with_limits(&mut BufReader::new(file), limits)?;
    debug!(path = %path.display(), nodes = list.count(), "loaded list");
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.bin");

        let mut list: List = ["one", "two"].into_iter().collect();
        list.set_rand(0, 1);
        save_to_path(&list, &path).unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn missing_source_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        let err = load_from_path(&path).unwrap_err();
        match err {
            WireError::SourceUnavailable { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sink_in_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("list.bin");

        let err = save_to_path(&List::new(), &path).unwrap_err();
        assert!(matches!(err, WireError::SinkUnavailable { .. }));
        assert!(err.to_string().contains("for writing"));
    }

    #[test]
    fn limits_apply_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.bin");
        let list: List = ["a", "b", "c"].into_iter().collect();
        save_to_path(&list, &path).unwrap();

        let limits = DecodeLimits {
            max_nodes: Some(2),
            max_payload_len: None,
        };
        assert!(matches!(
            load_from_path_with_limits(&path, &limits),
            Err(WireError::LimitExceeded { .. })
        ));
    }
}
