// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error types.
//!
//! [`Error`] is what public operations return. Playback failures carry a
//! [`VideoError`] so callers can tell an unopenable file from a failed seek
//! without parsing strings.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Video Error: {0}")]
    Video(#[from] VideoError),
}

/// Specific error types for video playback issues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoError {
    /// The container format could not be recognised.
    #[error("Unsupported video format")]
    UnsupportedFormat,

    /// No decoder is available for the stream's codec.
    #[error("Unsupported video codec: {0}")]
    UnsupportedCodec(String),

    /// File appears corrupted or has invalid data.
    #[error("Video file is corrupted")]
    CorruptedFile,

    /// File exists but contains no video stream.
    #[error("No video stream found")]
    NoVideoStream,

    /// Decoding or conversion failed during playback.
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),

    /// The container refused the seek request.
    #[error("Seek failed: {0}")]
    SeekFailed(String),

    /// Audio output could not be opened or configured.
    #[error("Audio unavailable: {0}")]
    AudioUnavailable(String),

    /// An operation needed an open session and none was live.
    #[error("No media is open")]
    NotOpen,

    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    IoError(String),

    /// Generic error with raw message.
    #[error("{0}")]
    Other(String),
}

impl VideoError {
    /// Classifies a raw decoder or demuxer message into a specific variant.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // Codec errors first, they often contain "not found" too
        if msg_lower.contains("codec") || msg_lower.contains("decoder") {
            if let Some(codec) = Self::extract_codec_name(&msg_lower) {
                return VideoError::UnsupportedCodec(codec);
            } else if msg_lower.contains("not found") || msg_lower.contains("unsupported") {
                return VideoError::DecodingFailed(msg.to_string());
            }
        }

        if msg_lower.contains("no such file")
            || (msg_lower.contains("not found") && !msg_lower.contains("decoder"))
            || msg_lower.contains("permission denied")
            || msg_lower.contains("i/o error")
        {
            return VideoError::IoError(msg.to_string());
        }

        if msg_lower.contains("no video stream") || msg_lower.contains("no video track") {
            return VideoError::NoVideoStream;
        }

        if msg_lower.contains("invalid data found") {
            return VideoError::UnsupportedFormat;
        }

        if msg_lower.contains("corrupt")
            || msg_lower.contains("invalid")
            || msg_lower.contains("malformed")
        {
            return VideoError::CorruptedFile;
        }

        if msg_lower.contains("seek") {
            return VideoError::SeekFailed(msg.to_string());
        }

        if msg_lower.contains("packet")
            || msg_lower.contains("scaling")
            || msg_lower.contains("resampl")
            || msg_lower.contains("decode")
            || msg_lower.contains("unsupported")
        {
            return VideoError::DecodingFailed(msg.to_string());
        }

        VideoError::Other(msg.to_string())
    }

    fn extract_codec_name(msg: &str) -> Option<String> {
        let codecs = [
            "h264", "hevc", "h265", "vp8", "vp9", "av1", "mpeg4", "mpeg2", "aac", "opus",
        ];
        codecs
            .iter()
            .find(|codec| msg.contains(*codec))
            .map(|codec| codec.to_uppercase())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
