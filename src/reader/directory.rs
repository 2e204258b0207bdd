//! Local directory document source
//!
//! Loads every text-like file in a directory as a [`Document`]. HTML files
//! go through the same visible-text extraction as unmatched web pages.

use crate::document::{Document, Metadata};
use crate::error::Result;
use crate::extraction::ContentExtractor;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Metadata key holding the file name
pub const FILE_NAME_KEY: &str = "file_name";
/// Metadata key holding the file path
pub const FILE_PATH_KEY: &str = "file_path";

const TEXT_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];
const HTML_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// Reads documents from files under a directory
#[derive(Debug, Clone)]
pub struct DirectoryReader {
    dir: PathBuf,
    recursive: bool,
}

impl DirectoryReader {
    /// Reader for the top level of `dir`
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            recursive: false,
        }
    }

    /// Descend into subdirectories
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Load every supported file, ordered by path.
    ///
    /// Unsupported extensions are skipped. A missing directory or a file that
    /// is not UTF-8 fails the whole call.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load_data(&self) -> Result<Vec<Document>> {
        let mut files = Vec::new();
        collect_files(&self.dir, self.recursive, &mut files)?;
        files.sort();

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let Some(kind) = FileKind::of(&path) else {
                continue;
            };
            documents.push(load_file(&path, kind)?);
        }

        info!("Loaded {} document(s) from {}", documents.len(), self.dir.display());
        Ok(documents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Text,
    Html,
}

impl FileKind {
    fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Some(FileKind::Text)
        } else if HTML_EXTENSIONS.contains(&ext.as_str()) {
            Some(FileKind::Html)
        } else {
            None
        }
    }
}

fn collect_files(dir: &Path, recursive: bool, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                collect_files(&path, recursive, out)?;
            }
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn load_file(path: &Path, kind: FileKind) -> Result<Document> {
    let raw = fs::read(path)?;
    let content = String::from_utf8(raw).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not valid UTF-8: {}", path.display(), e.utf8_error()),
        )
    })?;

    let text = match kind {
        FileKind::Text => content,
        FileKind::Html => ContentExtractor::visible_text(&ContentExtractor::parse(&content)),
    };

    let mut metadata = Metadata::new();
    if let Some(name) = path.file_name() {
        metadata.insert(FILE_NAME_KEY.to_string(), name.to_string_lossy().into_owned());
    }
    metadata.insert(FILE_PATH_KEY.to_string(), path.display().to_string());

    debug!("Loaded {} ({} chars)", path.display(), text.len());
    Ok(Document::new(text, metadata))
}
