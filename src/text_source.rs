/*!
 * Source text loading.
 *
 * A run reads its text either from a plain-text file or from a PDF. PDF
 * pages are extracted in order with lopdf and joined with a newline after
 * every page that produced text.
 */

use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::errors::ExtractionError;
use crate::file_utils::{FileManager, FileType};

/// Where a document's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A plain-text file
    PlainText,
    /// A PDF with the given number of pages
    Pdf { pages: usize },
}

/// The full source text of one run
#[derive(Debug, Clone)]
pub struct RawDocument {
    text: String,
    kind: SourceKind,
    path: PathBuf,
}

impl RawDocument {
    pub fn new(text: String, kind: SourceKind, path: PathBuf) -> Self {
        Self { text, kind, path }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of characters (not bytes) in the document
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// An input file the pipeline can read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Plain-text file
    PlainText(PathBuf),
    /// PDF document
    Pdf(PathBuf),
}

impl TextSource {
    /// Classify an input path by extension, falling back to its header bytes
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExtractionError::NotFound(path.display().to_string()));
        }

        let file_type = FileManager::detect_file_type(path).map_err(|e| ExtractionError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        match file_type {
            FileType::Pdf => Ok(Self::Pdf(path.to_path_buf())),
            FileType::Text => Ok(Self::PlainText(path.to_path_buf())),
            FileType::Unknown => Err(ExtractionError::Unreadable {
                path: path.display().to_string(),
                message: "not a PDF or plain-text file".to_string(),
            }),
        }
    }

    /// Pick the input when none was named: the first PDF in `dir`, else the
    /// plain-text default file
    pub fn discover<P: AsRef<Path>>(dir: P, text_fallback: &str) -> Result<Self, ExtractionError> {
        let dir = dir.as_ref();
        let pdfs = FileManager::find_files(dir, "pdf").map_err(|e| ExtractionError::Unreadable {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        if let Some(first) = pdfs.into_iter().next() {
            info!("Found PDF file: {:?}", first);
            return Ok(Self::Pdf(first));
        }

        let fallback = dir.join(text_fallback);
        if fallback.is_file() {
            info!("No PDF found, using text file: {:?}", fallback);
            return Ok(Self::PlainText(fallback));
        }

        Err(ExtractionError::NotFound(format!(
            "No PDF files found in {} and no {} present",
            dir.display(),
            text_fallback
        )))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::PlainText(path) | Self::Pdf(path) => path,
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, Self::Pdf(_))
    }

    /// Read the source into a `RawDocument`
    pub fn load(&self) -> Result<RawDocument, ExtractionError> {
        let path = self.path();
        let path_str = path.display().to_string();

        if !path.is_file() {
            return Err(ExtractionError::NotFound(path_str));
        }

        let bytes = FileManager::read_bytes(path).map_err(|e| ExtractionError::Unreadable {
            path: path_str.clone(),
            message: format!("{:#}", e),
        })?;

        let (text, kind) = match self {
            Self::PlainText(_) => (decode_text(&bytes), SourceKind::PlainText),
            Self::Pdf(_) => {
                let (text, pages) = extract_pdf_text(&bytes).map_err(|message| ExtractionError::Pdf {
                    path: path_str.clone(),
                    message,
                })?;
                (text, SourceKind::Pdf { pages })
            }
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument(path_str));
        }

        Ok(RawDocument::new(text, kind, path.to_path_buf()))
    }
}

/// Decode file bytes as UTF-8, dropping a BOM and replacing invalid sequences
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Extract the text of every page in order. Returns the text and page count.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<(String, usize), String> {
    let document = lopdf::Document::load_mem(bytes).map_err(|e| e.to_string())?;
    let pages = document.get_pages();
    let total_pages = pages.len();
    info!("Found {} pages", total_pages);

    let mut text = String::new();
    for (position, page_number) in pages.keys().enumerate() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) if !page_text.trim().is_empty() => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Ok(_) => debug!("Page {} has no extractable text", page_number),
            Err(e) => warn!("Failed to extract text from page {}: {}", page_number, e),
        }
        debug!("Extracted text from page {}/{}", position + 1, total_pages);
    }

    Ok((text, total_pages))
}
