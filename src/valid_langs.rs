//! The accepted language list shared with the GUI.
//!
//! The file is a single JavaScript assignment holding a JSON array, e.g.
//! `var validLangs = ["de","en","fr"]`, so the GUI can include it directly.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

use crate::fs::atomic_write;

const ASSIGNMENT_PREFIX: &str = "var validLangs = ";

static ASSIGNMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn assignment_regex() -> &'static Regex {
    ASSIGNMENT_REGEX.get_or_init(|| {
        Regex::new(r"(?s)var\s+validLangs\s*=\s*(\[.*?\])\s*;?").expect("valid regex")
    })
}

/// Set of accepted language codes, always iterated in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptedLanguages {
    codes: BTreeSet<String>,
}

impl AcceptedLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Returns false if the code was already present
    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        self.codes.insert(code.into())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Parse the contents of a valid-langs file
    pub fn parse(contents: &str) -> Result<Self> {
        let Some(captures) = assignment_regex().captures(contents) else {
            warn!("No validLangs assignment found, starting from an empty list");
            return Ok(Self::new());
        };

        let codes: Vec<String> = serde_json::from_str(&captures[1])
            .context("Failed to parse validLangs array")?;

        Ok(codes.into_iter().collect())
    }

    /// Render as the file contents, codes sorted lexicographically
    pub fn render(&self) -> Result<String> {
        let array = serde_json::to_string(&self.codes.iter().collect::<Vec<_>>())
            .context("Failed to serialize validLangs")?;
        Ok(format!("{}{}\n", ASSIGNMENT_PREFIX, array))
    }
}

impl FromIterator<String> for AcceptedLanguages {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Load the previously accepted languages
pub fn load(path: &Path) -> Result<AcceptedLanguages> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    AcceptedLanguages::parse(&contents)
        .with_context(|| format!("Invalid accepted language file {}", path.display()))
}

/// Persist the accepted languages, replacing the previous file
pub fn save(path: &Path, langs: &AcceptedLanguages) -> Result<()> {
    atomic_write(path, &langs.render()?)
}
