use std::fmt;
use std::path::Path;

use uuid::Uuid;

/// Name under which an upload is kept in the upload directory.
///
/// Always a fresh UUID v4, followed by the original file's extension when
/// that extension is plain ASCII alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredFileName(String);

impl StoredFileName {
    pub fn generate(original_filename: &str) -> Self {
        let id = Uuid::new_v4();
        match safe_extension(original_filename) {
            Some(ext) => Self(format!("{}.{}", id, ext)),
            None => Self(id.to_string()),
        }
    }

    pub fn from_raw(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.0).extension().and_then(|e| e.to_str())
    }
}

impl fmt::Display for StoredFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn safe_extension(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
}
