//! `randlist pack` — encode a TOML list description.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use randlist_wire::{hash_hex, list_digest, save_to_path};

use crate::description::ListDescription;

/// Build the list described in `input` and encode it into `output`.
pub fn run(input: &Path, output: &Path) -> Result<()> {
    let description = ListDescription::load(input)?;
    let list = description.build();

    save_to_path(&list, output).with_context(|| format!("writing {}", output.display()))?;
    let digest = list_digest(&list).context("hashing encoded list")?;
    info!(input = %input.display(), output = %output.display(), nodes = list.count(), "packed list");

    println!(
        "Packed {} node(s) into {} (sha256 {})",
        list.count(),
        output.display(),
        hash_hex(&digest)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_writes_decodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("list.toml");
        let output = dir.path().join("list.rlst");
        std::fs::write(
            &input,
            "[[node]]\ndata = \"a\"\nrand = 1\n\n[[node]]\ndata = \"b\"\n",
        )
        .unwrap();

        run(&input, &output).unwrap();

        let list = randlist_wire::load_from_path(&output).unwrap();
        assert_eq!(list.count(), 2);
        assert_eq!(list.rand_index(0), Some(1));
    }

    #[test]
    fn pack_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("nope.toml"), &dir.path().join("out.rlst")).unwrap_err();
        assert!(format!("{err:#}").contains("reading"));
    }
}
