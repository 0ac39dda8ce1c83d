//! File attachments for multipart requests.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::AttachmentError;

/// Content type used when none is given.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type of [`Attachment::pdf`].
pub const PDF: &str = "application/pdf";

/// Where attachment bytes come from.
///
/// `Text` is ambiguous on purpose: callers often receive a document as
/// either a path or base64 text and cannot tell which.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Bytes used as-is
    Bytes(Vec<u8>),
    /// File read from disk
    Path(PathBuf),
    /// Path of an existing file, base64 text, or raw content, in that order
    Text(String),
}

impl From<Vec<u8>> for FileSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for FileSource {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<String> for FileSource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FileSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A typed file payload for a multipart field.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// MIME type sent with the part
    pub content_type: String,
    /// File name sent with the part
    pub filename: Option<String>,
    /// File contents
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Attachment {
    /// Wraps raw bytes. The content type defaults to `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::InvalidContentType`] if `content_type` is
    /// not of the form `type/subtype`.
    pub fn from_bytes(
        contents: impl Into<Vec<u8>>,
        content_type: Option<&str>,
        filename: Option<&str>,
    ) -> Result<Self, AttachmentError> {
        let content_type = match content_type.map(str::trim) {
            Some(ct) if !ct.is_empty() => validate_content_type(ct)?,
            _ => OCTET_STREAM.to_string(),
        };

        Ok(Self {
            content_type,
            filename: filename.map(ToString::to_string),
            bytes: contents.into(),
        })
    }

    /// Builds an `application/pdf` attachment from any [`FileSource`].
    ///
    /// Text sources are resolved leniently: an existing file path is read,
    /// otherwise the text is base64-decoded with newlines removed, and text
    /// that is not valid base64 is taken as the document itself.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::Read`] if a path source cannot be read.
    pub fn pdf(source: impl Into<FileSource>, filename: Option<&str>) -> Result<Self, AttachmentError> {
        let bytes = resolve(source.into())?;
        Ok(Self {
            content_type: PDF.to_string(),
            filename: filename.map(ToString::to_string),
            bytes,
        })
    }

    /// Returns the size of the contents in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the attachment has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn resolve(source: FileSource) -> Result<Vec<u8>, AttachmentError> {
    match source {
        FileSource::Bytes(bytes) => Ok(bytes),
        FileSource::Path(path) => read_file(&path),
        FileSource::Text(text) => {
            // Strings containing NUL can never name a file.
            let names_file = !text.contains('\0') && Path::new(&text).is_file();
            if names_file {
                return read_file(Path::new(&text));
            }
            Ok(decode_base64_lenient(&text))
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, AttachmentError> {
    std::fs::read(path).map_err(|source| AttachmentError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn decode_base64_lenient(text: &str) -> Vec<u8> {
    let compact: String = text.chars().filter(|&c| c != '\n').collect();
    STANDARD
        .decode(compact.as_bytes())
        .unwrap_or_else(|_| text.as_bytes().to_vec())
}

fn validate_content_type(content_type: &str) -> Result<String, AttachmentError> {
    let valid = content_type
        .split_once('/')
        .is_some_and(|(kind, subtype)| !kind.is_empty() && !subtype.is_empty())
        && http::HeaderValue::from_str(content_type).is_ok();

    if valid {
        Ok(content_type.to_string())
    } else {
        Err(AttachmentError::InvalidContentType(content_type.to_string()))
    }
}
