//! Catalog loading.
//!
//! The catalog file is a JSON *array* of cards; the array order is the
//! collection order for the lifetime of the process. Some upstream tooling
//! emits files with a UTF-8 BOM, so the loader strips one before parsing.

use std::fs;
use std::path::Path;

use anyhow::Context;
use carddrop_types::{Catalog, CatalogEntry};

/// Load and validate the catalog from a JSON array file.
///
/// Emptiness is not rejected here; the process boot decides whether an empty
/// catalog is fatal (it is for anything that serves draws).
pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read catalog file {}", path.display()))?;
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    let entries: Vec<CatalogEntry> = serde_json::from_str(raw)
        .with_context(|| format!("parse catalog file {}", path.display()))?;
    let catalog = Catalog::new(entries).context("validate catalog")?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_entries_in_file_order() {
        let file = write_catalog(
            r#"[
                {"id": "sunset", "title": "Sunset", "description": "Over the sea"},
                {"id": "cat", "title": "Sleeping Cat", "description": "On a windowsill"}
            ]"#,
        );
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].id, "sunset");
        assert_eq!(catalog.entries()[1].id, "cat");
    }

    #[test]
    fn tolerates_a_utf8_bom() {
        let file = write_catalog("\u{feff}[{\"id\": \"a\", \"title\": \"A\", \"description\": \"\"}]");
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let file = write_catalog(
            r#"[
                {"id": "a", "title": "A", "description": ""},
                {"id": "a", "title": "A again", "description": ""}
            ]"#,
        );
        assert!(load_catalog(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_catalog(Path::new("/nonexistent/catalog.json")).is_err());
    }
}
