//! JSON persistence for imported article records.
//!
//! Records are stored as pretty-printed JSON, one file per article. Every
//! extracted field round-trips; empty defaults are omitted on the wire.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::types::Article;

/// Regex for slug generation - matches non-word characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Regex for slug generation - matches whitespace and dashes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_SPACE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

/// File name for a saved article record.
///
/// Articles with a PMCID are named after it; otherwise a slug of the first
/// title is used, falling back to "article".
#[must_use]
pub fn output_file_name(article: &Article) -> String {
    if !article.pmc.is_empty() {
        return format!("PMC{}.json", article.pmc);
    }

    let slug = article.titles.first().map(|t| to_slug(t)).unwrap_or_default();
    if slug.is_empty() {
        "article.json".to_string()
    } else {
        format!("{slug}.json")
    }
}

/// Generate a file-name-friendly slug from a title.
fn to_slug(title: &str) -> String {
    let text = title.to_lowercase();
    let text = SLUG_NON_WORD.replace_all(&text, "");
    let text = SLUG_SPACE_DASH.replace_all(&text, "_");
    text.trim_matches('_').to_string()
}

/// Save an article record as JSON.
///
/// # Arguments
/// * `article` - The record to save
/// * `output_dir` - Target directory (default: current directory)
///
/// # Returns
/// Path of the written file.
pub fn save_json(article: &Article, output_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = output_dir.unwrap_or_else(|| Path::new("."));
    let path = dir.join(output_file_name(article));

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, article)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(path)
}

/// Load an article record from a JSON file.
pub fn load_json(path: &Path) -> Result<Article> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let article = serde_json::from_reader(reader)?;
    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_file_name_prefers_pmcid() {
        let article = Article {
            pmc: "3592458".to_string(),
            titles: vec!["Some title".to_string()],
            ..Article::default()
        };
        assert_eq!(output_file_name(&article), "PMC3592458.json");
    }

    #[test]
    fn test_output_file_name_falls_back_to_title_slug() {
        let article = Article {
            titles: vec!["A Title (with) - punctuation!".to_string()],
            ..Article::default()
        };
        assert_eq!(output_file_name(&article), "a_title_with_punctuation.json");
    }

    #[test]
    fn test_output_file_name_fallback() {
        assert_eq!(output_file_name(&Article::default()), "article.json");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let article = Article {
            pmc: "123".to_string(),
            doi: "10.1234/x".to_string(),
            volume: "41".to_string(),
            titles: vec!["Round trip".to_string()],
            page_count: Some(7),
            ..Article::default()
        };

        let path = save_json(&article, Some(dir.path())).unwrap();
        assert_eq!(path.file_name().unwrap(), "PMC123.json");

        let loaded = load_json(&path).unwrap();
        assert_eq!(loaded, article);
    }

    #[test]
    fn test_saved_json_omits_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        let article = Article {
            pmc: "123".to_string(),
            ..Article::default()
        };

        let path = save_json(&article, Some(dir.path())).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"pmc\""));
        assert!(!raw.contains("\"journal\""));
        assert!(!raw.contains("\"refs\""));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_json(Path::new("/nonexistent/article.json")).unwrap_err();
        assert!(matches!(err, crate::error::HarvestError::Io(_)));
    }
}
