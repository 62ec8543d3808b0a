//! Stemcell value object - the base image releases are compiled against

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating system and version of a stemcell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stemcell {
    pub os: String,
    pub version: String,
}

impl Stemcell {
    pub fn new(os: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Stemcell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.version)
    }
}
