//! `randlist.toml` configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use randlist_wire::DecodeLimits;

/// File name searched for by [`RandlistConfig::find_and_load`].
pub const CONFIG_FILE: &str = "randlist.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandlistConfig {
    /// Bounds applied when decoding files.
    #[serde(default)]
    pub decode: DecodeConfig,
    /// Defaults for `randlist inspect`.
    #[serde(default)]
    pub inspect: InspectConfig,
}

/// Decode limits section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Largest accepted node count.
    #[serde(default)]
    pub max_nodes: Option<u32>,
    /// Largest accepted payload length in bytes.
    #[serde(default)]
    pub max_payload_len: Option<u32>,
}

/// Inspect defaults section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Output format (text, json, toml).
    #[serde(default)]
    pub export: Option<String>,
}

impl RandlistConfig {
    /// Search upward from `start_dir` for a `randlist.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let Some(dir) = start_dir
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE).is_file())
        else {
            return Ok(None);
        };

        let path = dir.join(CONFIG_FILE);
        let config = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?
            .parse::<RandlistConfig>()
            .with_context(|| format!("in {}", path.display()))?;
        Ok(Some((config, dir.to_path_buf())))
    }

    /// Decode limits described by the `[decode]` section.
    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_nodes: self.decode.max_nodes,
            max_payload_len: self.decode.max_payload_len,
        }
    }

    /// Default export format for `randlist inspect`.
    pub fn default_export(&self) -> Option<&str> {
        self.inspect.export.as_deref()
    }
}

impl FromStr for RandlistConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing randlist.toml")
    }
}
