//! Release identity value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name and version of a release, independent of the stemcell it is compiled for
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReleaseId {
    pub name: String,
    pub version: String,
}

impl ReleaseId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Displays as the `name/version` slug the director uses
impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}
