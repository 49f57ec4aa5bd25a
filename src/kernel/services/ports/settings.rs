use serde::{Deserialize, Serialize};

use super::config::SessionConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session: SessionConfig,
}
