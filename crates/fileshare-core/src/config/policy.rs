//! Operation policy configuration.

use serde::{Deserialize, Serialize};

/// Switches that allow or refuse whole classes of operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Whether link-type directories may be created and filled.
    #[serde(default = "default_true")]
    pub link_dir_add: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            link_dir_add: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
