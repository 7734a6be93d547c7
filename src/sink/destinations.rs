// src/sink/destinations.rs

use crate::error::{LoaderError, Result};
use crate::payer::Payer;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs::File, path::Path};
use tracing::debug;

/// Payer → fully-qualified destination table.
///
/// Loaded maps are validated so every payer has a non-empty destination.
/// Maps built with [`DestinationMap::from_entries`] are not, which is how
/// tests exercise the sink's unknown-payer path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationMap(BTreeMap<Payer, String>);

impl Default for DestinationMap {
    fn default() -> Self {
        Self::from_entries([
            (Payer::Anthem, "SNOWFLAKE.RAW.ANTHEM_TABLE"),
            (Payer::Cigna, "SNOWFLAKE.RAW.CIGNA_TABLE"),
            (Payer::Manual, "SNOWFLAKE.RAW.GENERIC_CLAIMS_TABLE"),
        ])
    }
}

impl DestinationMap {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Payer, S)>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(|(p, s)| (p, s.into())).collect())
    }

    /// Parse a YAML mapping such as `anthem: SNOWFLAKE.RAW.ANTHEM_TABLE`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let map: Self = serde_yaml::from_str(yaml)
            .map_err(|e| LoaderError::Config(format!("invalid destination mapping: {}", e)))?;
        map.validate()?;
        Ok(map)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            LoaderError::Config(format!("cannot open destination mapping {:?}: {}", path, e))
        })?;
        let map: Self = serde_yaml::from_reader(file).map_err(|e| {
            LoaderError::Config(format!("invalid destination mapping {:?}: {}", path, e))
        })?;
        map.validate()?;
        debug!(path = %path.display(), entries = map.0.len(), "loaded destination mapping");
        Ok(map)
    }

    /// Every payer must map to a non-empty destination.
    pub fn validate(&self) -> Result<()> {
        for payer in Payer::ALL {
            match self.0.get(&payer) {
                Some(dest) if !dest.trim().is_empty() => {}
                Some(_) => {
                    return Err(LoaderError::Config(format!(
                        "empty destination for payer `{}`",
                        payer
                    )))
                }
                None => {
                    return Err(LoaderError::Config(format!(
                        "no destination for payer `{}`",
                        payer
                    )))
                }
            }
        }
        Ok(())
    }

    pub fn resolve(&self, payer: Payer) -> Result<&str> {
        self.0
            .get(&payer)
            .map(String::as_str)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| LoaderError::UnknownPayer(payer.to_string()))
    }

    /// Resolve a payer given by name.
    pub fn resolve_name(&self, payer: &str) -> Result<&str> {
        self.resolve(payer.parse()?)
    }
}
