use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot move tab {from} to {to}: only {len} tabs are open")]
    ReorderOutOfRange { from: usize, to: usize, len: usize },

    #[error("cannot determine settings directory")]
    NoSettingsDir,

    #[error("malformed settings file {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed action on line {line}: {source}")]
    Action {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
