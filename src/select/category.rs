//! File extensions and coarse file categories

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse category of an uploaded file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileCategory {
    Images,
    Videos,
    Documents,
    Spreadsheets,
    Archives,
    Code,
    Data,
    Audio,
    Other,
}

static EXTENSIONS: Lazy<HashMap<&'static str, FileCategory>> = Lazy::new(|| {
    let table: [(FileCategory, &[&str]); 8] = [
        (
            FileCategory::Images,
            &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "ico"],
        ),
        (
            FileCategory::Videos,
            &["mp4", "avi", "mov", "wmv", "flv", "mkv", "webm"],
        ),
        (
            FileCategory::Documents,
            &["pdf", "doc", "docx", "txt", "rtf", "odt"],
        ),
        (FileCategory::Spreadsheets, &["xls", "xlsx", "csv", "ods"]),
        (FileCategory::Archives, &["zip", "rar", "7z", "tar", "gz"]),
        (
            FileCategory::Code,
            &[
                "js", "ts", "jsx", "tsx", "py", "java", "cpp", "c", "cs", "php", "rb", "go",
            ],
        ),
        (FileCategory::Data, &["json", "xml", "yaml", "yml", "sql"]),
        (FileCategory::Audio, &["mp3", "wav", "ogg", "flac", "aac"]),
    ];

    table
        .iter()
        .flat_map(|(category, exts)| exts.iter().map(move |ext| (*ext, *category)))
        .collect()
});

impl FileCategory {
    /// Look up the category of a lowercase extension
    pub fn from_extension(extension: &str) -> Self {
        EXTENSIONS
            .get(extension)
            .copied()
            .unwrap_or(FileCategory::Other)
    }

    /// Category of a file name
    pub fn of_filename(filename: &str) -> Self {
        Self::from_extension(&file_extension(filename))
    }

    /// Binary media whose metadata goes to the relational store
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            FileCategory::Images | FileCategory::Videos | FileCategory::Audio
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Images => "Images",
            FileCategory::Videos => "Videos",
            FileCategory::Documents => "Documents",
            FileCategory::Spreadsheets => "Spreadsheets",
            FileCategory::Archives => "Archives",
            FileCategory::Code => "Code",
            FileCategory::Data => "Data",
            FileCategory::Audio => "Audio",
            FileCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase extension after the last `.` of a file name
///
/// Names without a dot, or whose only dot is the leading one, have no
/// extension.
pub fn file_extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(0) | None => String::new(),
        Some(index) => filename[index + 1..].to_lowercase(),
    }
}

/// Format a byte count with 1024-based units (`1536` → `"1.5 KB"`)
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let rounded = (size * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}
