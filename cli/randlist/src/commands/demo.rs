//! `randlist demo` — round-trip a sample list through a file.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use tracing::info;

use randlist_core::List;
use randlist_wire::{load_from_path, save_to_path};

use crate::view;

/// Payloads of the sample list.
const PAYLOADS: [&str; 5] = ["Node1", "Node2", "Node3", "Node4", "Node5"];

/// `rand` position of each sample node.
const RAND: [usize; 5] = [2, 4, 0, 3, 1];

/// Build the five-node sample list.
pub fn sample_list() -> List {
    let mut list: List = PAYLOADS.into_iter().collect();
    for (index, target) in RAND.into_iter().enumerate() {
        list.set_rand(index, target);
    }
    list
}

/// Default location of the demo file.
pub fn default_output() -> PathBuf {
    std::env::temp_dir().join("randlist-demo.rlst")
}

/// Save the sample list to `output`, load it back, and print the result.
pub fn run(output: Option<&Path>) -> Result<()> {
    let output = output.map(Path::to_path_buf).unwrap_or_else(default_output);
    let loaded = round_trip(&output)?;

    println!("Round-tripped {} node(s) through {}", loaded.count(), output.display());
    print!("{}", view::render_nodes(&loaded));
    Ok(())
}

pub(crate) fn round_trip(output: &Path) -> Result<List> {
    let list = sample_list();
    save_to_path(&list, output).with_context(|| format!("writing {}", output.display()))?;
    let loaded =
        load_from_path(output).with_context(|| format!("reading {}", output.display()))?;

    ensure!(
        loaded == list,
        "decoded list differs from the original ({} vs {} node(s))",
        loaded.count(),
        list.count()
    );
    info!(path = %output.display(), nodes = loaded.count(), "demo round trip ok");
    Ok(loaded)
}
