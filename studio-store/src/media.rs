//! Local storage for images uploaded from the admin panel.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;

pub const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "svg"];

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Unknown media folder: {0}")]
    UnknownFolder(String),
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("Empty upload")]
    Empty,
    #[error("Failed to store file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Logos,
    Characters,
    Backgrounds,
}

impl MediaFolder {
    pub fn parse(value: &str) -> Result<Self, MediaError> {
        match value {
            "logos" => Ok(MediaFolder::Logos),
            "characters" => Ok(MediaFolder::Characters),
            "backgrounds" => Ok(MediaFolder::Backgrounds),
            other => Err(MediaError::UnknownFolder(other.to_string())),
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            MediaFolder::Logos => "logos",
            MediaFolder::Characters => "characters",
            MediaFolder::Backgrounds => "backgrounds",
        }
    }

    fn file_prefix(&self) -> &'static str {
        match self {
            MediaFolder::Logos => "",
            MediaFolder::Characters => "character_",
            MediaFolder::Backgrounds => "bg_",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    public_prefix: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an upload and return the public URL it is served from.
    pub async fn save(&self, folder: MediaFolder, original_name: &str, bytes: &[u8]) -> Result<String, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::Empty);
        }

        let ext = extension_of(original_name)?;

        let dir = self.root.join(folder.dir_name());
        tokio::fs::create_dir_all(&dir).await?;

        // Names are millisecond stamps; on a clash take the next free one.
        let mut stamp = Utc::now().timestamp_millis();
        let (file_name, mut file) = loop {
            let name = format!("{}{}.{}", folder.file_prefix(), stamp, ext);
            match OpenOptions::new().write(true).create_new(true).open(dir.join(&name)).await {
                Ok(file) => break (name, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
                Err(e) => return Err(e.into()),
            }
        };
        file.write_all(bytes).await?;
        file.flush().await?;

        let url = format!("{}/{}/{}", self.public_prefix, folder.dir_name(), file_name);
        info!("Stored upload {} ({} bytes)", url, bytes.len());
        Ok(url)
    }
}

fn extension_of(name: &str) -> Result<String, MediaError> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| MediaError::UnsupportedType(name.to_string()))?;

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(MediaError::UnsupportedType(ext))
    }
}
