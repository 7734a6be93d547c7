// src/payer.rs

use crate::error::LoaderError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The claims-paying entity a run is loading data for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    Anthem,
    Cigna,
    Manual,
}

impl Payer {
    pub const ALL: [Payer; 3] = [Payer::Anthem, Payer::Cigna, Payer::Manual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Payer::Anthem => "anthem",
            Payer::Cigna => "cigna",
            Payer::Manual => "manual",
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Payer {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Payer::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| LoaderError::UnknownPayer(s.to_string()))
    }
}
