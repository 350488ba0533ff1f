use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Settings that control the tool, loaded once per invocation.
///
/// Every field has a default, so an empty configuration is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// File name searched for while ascending from the active document.
    pub target_file: String,
    /// Where to search instead when the active document's directory is gone.
    pub fallback_dir: Option<PathBuf>,
    /// How long a status notice stays visible, in milliseconds.
    pub notice_ms: u64,
    /// Program and leading arguments used to reveal the file.
    pub reveal_command: Option<Vec<String>>,
    /// Program and leading arguments used to open the file for editing.
    pub open_command: Option<Vec<String>>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            target_file: "wp-config.php".to_string(),
            fallback_dir: None,
            notice_ms: 2000,
            reveal_command: None,
            open_command: None,
        }
    }
}

impl ToolSettings {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}
