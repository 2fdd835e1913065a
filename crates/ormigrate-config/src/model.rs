use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for migration discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationsConfig {
    /// Directory to discover migrations from. When unset, the directory of
    /// the source file that created the registry is used.
    pub directory: Option<PathBuf>,
}
