//! Construction settings for [`Factor`](crate::factor::Factor)
//!
//! Settings can be built in code with the `with_*` setters or loaded from a
//! TOML document such as:
//!
//! ```toml
//! method = "hash1"
//! sort_levels = true
//! save_keys = false
//! verbose = true
//! ```
//!
//! Keys that are left out keep their default value.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Strategy used to find the distinct values of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashMethod {
    /// Let the library choose (currently `Hash1`)
    #[default]
    Auto,
    /// Sort a permutation of the observations and dedupe adjacent runs
    Hash0,
    /// Hash map keyed by value, remapped to sorted order afterwards
    Hash1,
    /// Ordered map keyed by value
    Hash2,
}

impl HashMethod {
    /// All labels accepted by [`HashMethod::from_str`]
    pub const LABELS: [&'static str; 4] = ["auto", "hash0", "hash1", "hash2"];

    /// The label of this method
    pub fn label(&self) -> &'static str {
        match self {
            HashMethod::Auto => "auto",
            HashMethod::Hash0 => "hash0",
            HashMethod::Hash1 => "hash1",
            HashMethod::Hash2 => "hash2",
        }
    }

    /// The concrete strategy `Auto` stands for
    pub fn resolve(self) -> HashMethod {
        match self {
            HashMethod::Auto => HashMethod::Hash1,
            other => other,
        }
    }
}

impl fmt::Display for HashMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HashMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(HashMethod::Auto),
            "hash0" => Ok(HashMethod::Hash0),
            "hash1" => Ok(HashMethod::Hash1),
            "hash2" => Ok(HashMethod::Hash2),
            _ => Err(Error::InvalidMethod {
                name: s.to_string(),
                supported: HashMethod::LABELS.join(", "),
            }),
        }
    }
}

/// Configuration for building a factor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorConfig {
    /// Distinct-value strategy
    pub method: HashMethod,
    /// Order levels by the natural ordering of the values
    pub sort_levels: bool,
    /// Keep the distinct values after construction
    pub save_keys: bool,
    /// Log a summary line once the factor is built
    pub verbose: bool,
}

impl Default for FactorConfig {
    fn default() -> Self {
        FactorConfig {
            method: HashMethod::Auto,
            sort_levels: true,
            save_keys: true,
            verbose: false,
        }
    }
}

impl FactorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hashing method
    pub fn with_method(mut self, method: HashMethod) -> Self {
        self.method = method;
        self
    }

    /// Set whether levels are sorted
    pub fn with_sort_levels(mut self, sort_levels: bool) -> Self {
        self.sort_levels = sort_levels;
        self
    }

    /// Set whether the distinct values are retained
    pub fn with_save_keys(mut self, save_keys: bool) -> Self {
        self.save_keys = save_keys;
        self
    }

    /// Set verbose logging
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}
