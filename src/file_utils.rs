use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Leading bytes of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with a specific extension directly inside a directory,
    /// sorted by file name
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a whole file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Create (truncate) a file for streaming output
    pub fn create_file<P: AsRef<Path>>(path: P) -> Result<fs::File> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))
    }

    /// Place `file_name` next to the input file
    pub fn sibling_path<P: AsRef<Path>>(input_file: P, file_name: &str) -> PathBuf {
        input_file
            .as_ref()
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(file_name)
    }

    /// Detect whether a file is a PDF or plain text
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            match ext.to_string_lossy().to_lowercase().as_str() {
                "pdf" => return Ok(FileType::Pdf),
                "txt" | "text" | "md" => return Ok(FileType::Text),
                _ => {}
            }
        }

        // Fall back to sniffing the header
        let mut header = [0u8; 5];
        let mut file = fs::File::open(path)
            .with_context(|| format!("Failed to open file: {:?}", path))?;
        let read = file.read(&mut header)?;
        if &header[..read] == PDF_MAGIC {
            return Ok(FileType::Pdf);
        }

        // Binary content almost always carries NUL bytes, text never does
        let mut sample = header[..read].to_vec();
        file.take(4096).read_to_end(&mut sample)?;
        if !sample.contains(&0) {
            return Ok(FileType::Text);
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing the input file types the pipeline understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Plain text
    Text,
    /// Unknown file type
    Unknown,
}
