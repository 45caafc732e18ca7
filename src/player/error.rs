use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlayerError {
    #[error("track {index} is out of range for a sequence of {len}")]
    TrackOutOfRange { index: usize, len: usize },

    #[error("seek position {0} is outside 0..=1")]
    InvalidSeek(f64),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not open audio output: {0}")]
    Output(String),

    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("no source loaded")]
    NothingLoaded,

    #[error("seek failed: {0}")]
    Seek(String),

    #[error("engine thread is gone")]
    Disconnected,
}
