//! `randlist inspect` — decode a file and render it.

use std::path::Path;

use anyhow::{bail, Context, Result};

use randlist_wire::{list_digest, load_from_path_with_limits, DecodeLimits};

use crate::config::RandlistConfig;
use crate::description::ListDescription;
use crate::view;

/// Decode `input` and print it in the requested `export` format.
///
/// `export` falls back to the configured default, then to `text`.
pub fn run(input: &Path, export: Option<&str>, config: Option<&RandlistConfig>) -> Result<()> {
    print!("{}", render(input, export, config)?);
    Ok(())
}

pub(crate) fn render(
    input: &Path,
    export: Option<&str>,
    config: Option<&RandlistConfig>,
) -> Result<String> {
    let export = export
        .or_else(|| config.and_then(RandlistConfig::default_export))
        .unwrap_or("text");
    let limits = config
        .map(RandlistConfig::decode_limits)
        .unwrap_or(DecodeLimits::UNLIMITED);

    let list = load_from_path_with_limits(input, &limits)
        .with_context(|| format!("decoding {}", input.display()))?;
    let digest = list_digest(&list).context("hashing decoded list")?;

    match export {
        "text" => Ok(view::render_text(&list, &digest)),
        "json" => Ok(view::render_json(&list, &digest)? + "\n"),
        "toml" => toml::to_string(&ListDescription::from_list(&list)?)
            .context("serializing list description"),
        other => bail!("unknown export format '{other}' (expected text, json or toml)"),
    }
}
