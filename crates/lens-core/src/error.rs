use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the chat-lens acquisition layer.
///
/// The parser and aggregator themselves are total over any input and never
/// fail; only reading the transcript off disk can go wrong.
#[derive(Error, Debug)]
pub enum LensError {
    /// The upload is neither a `.txt` transcript nor a `.zip` archive.
    #[error("Unsupported file type: {0}. Expected a .txt transcript or a .zip archive containing one")]
    UnsupportedFileType(String),

    /// The archive holds no `.txt` member at all.
    #[error("No .txt file found in the archive {0}")]
    NoTextMember(PathBuf),

    /// The archive holds more than one `.txt` member.
    #[error("Archive {path} contains {count} .txt files; expected exactly one")]
    AmbiguousTextMember { path: PathBuf, count: usize },

    /// An archive member could not be decoded or read as text.
    #[error("Failed to extract transcript text: {0}")]
    TextExtraction(String),

    /// The transcript file or member was empty.
    #[error("Transcript {0} is empty")]
    EmptyTranscript(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the chat-lens crates.
pub type Result<T> = std::result::Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unsupported_file_type() {
        let err = LensError::UnsupportedFileType("chat.pdf".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Unsupported file type"));
        assert!(msg.contains("chat.pdf"));
    }

    #[test]
    fn test_error_display_no_text_member() {
        let err = LensError::NoTextMember(PathBuf::from("/tmp/export.zip"));
        assert_eq!(
            err.to_string(),
            "No .txt file found in the archive /tmp/export.zip"
        );
    }

    #[test]
    fn test_error_display_ambiguous_text_member() {
        let err = LensError::AmbiguousTextMember {
            path: PathBuf::from("/tmp/export.zip"),
            count: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("3 .txt files"));
        assert!(msg.contains("/tmp/export.zip"));
    }

    #[test]
    fn test_error_display_text_extraction() {
        let err = LensError::TextExtraction("member is not valid UTF-8".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to extract transcript text: member is not valid UTF-8"
        );
    }

    #[test]
    fn test_error_display_empty_transcript() {
        let err = LensError::EmptyTranscript(PathBuf::from("chat.txt"));
        assert_eq!(err.to_string(), "Transcript chat.txt is empty");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = LensError::FileRead {
            path: PathBuf::from("/some/chat.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/chat.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LensError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
