//! Transcript acquisition: pull raw text out of an uploaded file.
//!
//! A chat export arrives either as a bare `.txt` transcript or as a `.zip`
//! archive that must contain exactly one `.txt` member. Everything else is
//! an error; the analysis core itself only ever sees the extracted string.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use lens_core::{LensError, Result};
use tracing::debug;
use zip::ZipArchive;

/// Load the transcript text from `path`.
///
/// * `.txt` files are read directly.
/// * `.zip` archives must contain exactly one `.txt` member; zero members
///   or more than one is an error, as is a member that cannot be read as
///   UTF-8 text.
/// * Any other extension is rejected.
pub fn load_transcript(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("txt") => read_text_file(path),
        Some("zip") => read_zip_archive(path),
        _ => Err(LensError::UnsupportedFileType(path.display().to_string())),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_text_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|source| LensError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(LensError::EmptyTranscript(path.to_path_buf()));
    }
    Ok(text)
}

fn read_zip_archive(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|source| LensError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| LensError::TextExtraction(e.to_string()))?;

    let txt_members: Vec<String> = archive
        .file_names()
        .filter(|name| name.ends_with(".txt"))
        .map(String::from)
        .collect();

    let member_name = match txt_members.as_slice() {
        [] => return Err(LensError::NoTextMember(path.to_path_buf())),
        [single] => single.clone(),
        many => {
            return Err(LensError::AmbiguousTextMember {
                path: path.to_path_buf(),
                count: many.len(),
            })
        }
    };

    debug!("extracting \"{}\" from {}", member_name, path.display());

    let mut member = archive
        .by_name(&member_name)
        .map_err(|e| LensError::TextExtraction(e.to_string()))?;
    let mut text = String::new();
    member
        .read_to_string(&mut text)
        .map_err(|e| LensError::TextExtraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(LensError::EmptyTranscript(path.to_path_buf()));
    }
    Ok(text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::CompressionMethod;

    fn write_txt(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    fn write_zip(dir: &Path, name: &str, members: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (member_name, content) in members {
            writer.start_file(*member_name, options).unwrap();
            write!(writer, "{}", content).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    // ── Plain .txt ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_plain_txt() {
        let dir = TempDir::new().unwrap();
        let path = write_txt(dir.path(), "chat.txt", "[01/01/24, 10.00.00] Alice: hi");
        let text = load_transcript(&path).unwrap();
        assert_eq!(text, "[01/01/24, 10.00.00] Alice: hi");
    }

    #[test]
    fn test_empty_txt_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_txt(dir.path(), "chat.txt", "");
        let err = load_transcript(&path).unwrap_err();
        assert!(matches!(err, LensError::EmptyTranscript(_)));
    }

    #[test]
    fn test_missing_txt_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_transcript(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, LensError::FileRead { .. }));
    }

    // ── Extension gate ────────────────────────────────────────────────────────

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_txt(dir.path(), "chat.pdf", "whatever");
        let err = load_transcript(&path).unwrap_err();
        assert!(matches!(err, LensError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_no_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_txt(dir.path(), "chat", "whatever");
        let err = load_transcript(&path).unwrap_err();
        assert!(matches!(err, LensError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = write_txt(dir.path(), "chat.TXT", "[01/01/24, 10.00.00] Alice: hi");
        assert!(load_transcript(&path).is_ok());
    }

    // ── Archives ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_zip_with_single_txt_member() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            dir.path(),
            "export.zip",
            &[("_chat.txt", "[01/01/24, 10.00.00] Alice: hi")],
        );
        let text = load_transcript(&path).unwrap();
        assert_eq!(text, "[01/01/24, 10.00.00] Alice: hi");
    }

    #[test]
    fn test_zip_without_txt_member() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "export.zip", &[("photo.jpg", "not text")]);
        let err = load_transcript(&path).unwrap_err();
        assert!(matches!(err, LensError::NoTextMember(_)));
    }

    #[test]
    fn test_zip_with_two_txt_members_is_ambiguous() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            dir.path(),
            "export.zip",
            &[("a.txt", "first"), ("b.txt", "second")],
        );
        let err = load_transcript(&path).unwrap_err();
        assert!(matches!(
            err,
            LensError::AmbiguousTextMember { count: 2, .. }
        ));
    }

    #[test]
    fn test_zip_with_empty_txt_member() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "export.zip", &[("_chat.txt", "  \n ")]);
        let err = load_transcript(&path).unwrap_err();
        assert!(matches!(err, LensError::EmptyTranscript(_)));
    }

    #[test]
    fn test_not_actually_a_zip() {
        let dir = TempDir::new().unwrap();
        let path = write_txt(dir.path(), "fake.zip", "this is not an archive");
        let err = load_transcript(&path).unwrap_err();
        assert!(matches!(err, LensError::TextExtraction(_)));
    }
}
