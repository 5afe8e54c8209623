//! Local storage for employee photos
//!
//! Photos arrive inline as base64 image data URIs. [`PhotoStorage`] writes
//! the decoded bytes into the uploads directory and hands back the filename
//! that gets persisted on the employee record. Values that are not image
//! data URIs pass through untouched.

use std::{
    io,
    path::{Component, Path, PathBuf},
    sync::OnceLock,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

/// Photo storage errors
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid image data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Invalid photo filename: {0}")]
    InvalidFilename(String),

    #[error("Uploads I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UploadError {
    fn io(path: &Path, source: io::Error) -> Self {
        UploadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The pieces of an image data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataUri<'a> {
    pub mime: &'a str,
    pub payload: &'a str,
}

/// Split `data:image/<subtype>;base64,<payload>` into its parts
pub fn parse_image_data_uri(value: &str) -> Option<ImageDataUri<'_>> {
    static DATA_URI_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DATA_URI_REGEX.get_or_init(|| {
        Regex::new(r"^data:(image/[A-Za-z0-9.+-]+);base64,(.+)$")
            .expect("Failed to compile data URI regex")
    });

    let captures = regex.captures(value)?;
    Some(ImageDataUri {
        mime: captures.get(1)?.as_str(),
        payload: captures.get(2)?.as_str(),
    })
}

pub fn is_image_data_uri(value: &str) -> bool {
    parse_image_data_uri(value).is_some()
}

/// Filename for a photo uploaded for `first_name` at `at`
///
/// Path separators in the name are replaced so the result stays a single
/// path component.
pub fn photo_filename(first_name: &str, at: DateTime<Utc>) -> String {
    let stem: String = first_name
        .to_lowercase()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();

    format!("{}_{}.jpg", stem, at.timestamp_millis())
}

/// Uploads directory holding employee photos
#[derive(Debug, Clone)]
pub struct PhotoStorage {
    root: PathBuf,
}

impl PhotoStorage {
    /// Create the uploads directory if needed and bind storage to it
    pub async fn init(dir: impl AsRef<Path>) -> Result<Self, UploadError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| UploadError::io(dir, e))?;

        let root = tokio::fs::canonicalize(dir)
            .await
            .map_err(|e| UploadError::io(dir, e))?;

        info!("Uploads directory ready at {}", root.display());
        Ok(Self { root })
    }

    /// Canonical path of the uploads directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `value` under `filename` when it is an image data URI
    ///
    /// Returns the filename to persist, or `value` unchanged when it is not
    /// an image data URI.
    pub async fn save(&self, value: &str, filename: &str) -> Result<String, UploadError> {
        let Some(data_uri) = parse_image_data_uri(value) else {
            return Ok(value.to_string());
        };

        let bytes = STANDARD.decode(data_uri.payload)?;
        let path = self.path_for(filename)?;

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| UploadError::io(&path, e))?;

        info!(
            "Stored {} photo {} ({} bytes)",
            data_uri.mime,
            filename,
            bytes.len()
        );
        Ok(filename.to_string())
    }

    /// Delete a stored photo
    ///
    /// Only files that exist and resolve inside the uploads directory are
    /// removed. Returns whether a file was deleted.
    pub async fn remove(&self, filename: &str) -> Result<bool, UploadError> {
        let candidate = self.root.join(filename);
        let resolved = match tokio::fs::canonicalize(&candidate).await {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(UploadError::io(&candidate, e)),
        };

        if !resolved.starts_with(&self.root) || resolved == self.root {
            warn!(
                "Refusing to delete {} outside the uploads directory",
                resolved.display()
            );
            return Ok(false);
        }

        let metadata = tokio::fs::metadata(&resolved)
            .await
            .map_err(|e| UploadError::io(&resolved, e))?;
        if !metadata.is_file() {
            return Ok(false);
        }

        tokio::fs::remove_file(&resolved)
            .await
            .map_err(|e| UploadError::io(&resolved, e))?;

        Ok(true)
    }

    /// Names of the files currently in the uploads directory, sorted
    pub async fn list(&self) -> Result<Vec<String>, UploadError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| UploadError::io(&self.root, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| UploadError::io(&self.root, e))?
        {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }

        files.sort();
        Ok(files)
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, UploadError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(UploadError::InvalidFilename(filename.to_string())),
        }
    }
}
