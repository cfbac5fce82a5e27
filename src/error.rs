//! Error types for reeler.

/// Result type alias for reeler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for reeler.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input media file does not exist or is not a regular file.
    #[error("input file does not exist: {path}")]
    InputNotFound {
        /// Path that failed to resolve.
        path: std::path::PathBuf,
    },

    /// Destination directory already contains files.
    #[error("output directory '{path}' is not empty")]
    OutputNotEmpty {
        /// Path to the non-empty directory.
        path: std::path::PathBuf,
    },

    /// Failed to create the destination directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreate {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// ffmpeg binary was not found on PATH.
    #[error("ffmpeg not found on PATH (install ffmpeg to extract clips)")]
    FfmpegNotFound,

    /// ffmpeg exited with a non-zero status.
    #[error("ffmpeg exited with status code {code}")]
    FfmpegFailed {
        /// Exit code, -1 if terminated by a signal.
        code: i32,
    },

    /// ffmpeg did not finish within the allotted time.
    #[error("ffmpeg timed out after {secs}s")]
    FfmpegTimeout {
        /// Timeout that was exceeded, in seconds.
        secs: u64,
    },

    /// Producing the intermediate audio track failed.
    #[error("failed to produce audio track from '{path}': {reason}")]
    DecodeFailed {
        /// Path to the source media file.
        path: std::path::PathBuf,
        /// Description of the decode failure.
        reason: String,
    },

    /// Failed to open the intermediate audio track.
    #[error("failed to open audio track '{path}'")]
    TrackOpen {
        /// Path to the WAV file.
        path: std::path::PathBuf,
        /// Underlying decode error.
        #[source]
        source: hound::Error,
    },

    /// Failed reading samples mid-stream from the intermediate track.
    #[error("failed to read audio samples")]
    TrackRead {
        /// Underlying decode error.
        #[source]
        source: hound::Error,
    },

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write the results dump.
    #[error("failed to write results file '{path}'")]
    ResultsWrite {
        /// Path to the results file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
