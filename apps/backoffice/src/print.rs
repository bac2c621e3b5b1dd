//! Writing printable documents to disk and handing them to the browser.
//!
//! The browser's print dialog is the print path: the rendered HTML carries
//! the auto-print script when enabled, so opening the file is enough.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

const PRINT_DIR: &str = "nubras-print";

/// Reduces a document number to a safe file-name fragment.
pub fn file_stem(kind: &str, number: &str) -> String {
    let cleaned: String = number
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        kind.to_string()
    } else {
        format!("{kind}-{cleaned}")
    }
}

/// Writes `html` to `out`, or under the temp directory when `out` is `None`.
pub fn write_document(out: Option<&Path>, kind: &str, number: &str, html: &str) -> Result<PathBuf> {
    let path = match out {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = std::env::temp_dir().join(PRINT_DIR);
            fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
            dir.join(format!("{}.html", file_stem(kind, number)))
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "Printable document written");
    Ok(path)
}

/// Opens the document in the default browser. A failure is not fatal: the
/// file is already on disk and its path is reported instead.
pub fn open_document(path: &Path) -> bool {
    match webbrowser::open(&path.to_string_lossy()) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not open browser");
            false
        }
    }
}

/// Writes, optionally opens, and reports where the document went.
pub fn deliver(out: Option<&Path>, open: bool, kind: &str, number: &str, html: &str) -> Result<PathBuf> {
    let path = write_document(out, kind, number, html)?;
    if open && open_document(&path) {
        println!("Opened {} {} for printing ({})", kind, number, path.display());
    } else {
        println!("Saved {} {} to {}", kind, number, path.display());
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_is_sanitized() {
        assert_eq!(file_stem("invoice", "SO-1042"), "invoice-SO-1042");
        assert_eq!(file_stem("quotation", "Q/2024/07"), "quotation-Q_2024_07");
        assert_eq!(file_stem("invoice", "../../etc"), "invoice-etc");
        assert_eq!(file_stem("invoice", "///"), "invoice");
    }

    #[test]
    fn test_write_document_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out.html");

        let written = write_document(Some(&target), "invoice", "SO-1", "<html></html>").unwrap();
        assert_eq!(written, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "<html></html>");
    }

    #[test]
    fn test_deliver_without_opening() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("q.html");

        let written = deliver(Some(&target), false, "quotation", "Q-7", "<p>q</p>").unwrap();
        assert!(written.exists());
    }
}
