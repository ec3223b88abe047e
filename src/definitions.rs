use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

const MAX_LABEL_CHARS: usize = 999;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Destination and optional title a reference label resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferenceDefinition {
    pub destination: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl ReferenceDefinition {
    pub fn new(destination: impl Into<String>, title: Option<String>) -> Self {
        Self {
            destination: destination.into(),
            title,
        }
    }
}

/// Read-only lookup of reference definitions by label.
///
/// Implementations receive the raw label text and are responsible for any
/// normalization. A missing label is an ordinary outcome.
pub trait ReferenceDefinitions {
    fn lookup(&self, label: &str) -> Option<&ReferenceDefinition>;
}

/// Case-fold and collapse whitespace so equivalent labels compare equal.
pub fn normalize_label(label: &str) -> String {
    WHITESPACE_RUN.replace_all(label.trim(), " ").to_lowercase()
}

/// A label may be matched only if it is non-blank, at most 999 characters
/// and free of unescaped brackets.
pub fn is_valid_label(label: &str) -> bool {
    if label.trim().is_empty() {
        return false;
    }
    let mut count = 0;
    let mut chars = label.chars();
    while let Some(c) = chars.next() {
        count += 1;
        match c {
            '\\' => {
                if chars.next().is_some() {
                    count += 1;
                }
            }
            '[' | ']' => return false,
            _ => {}
        }
    }
    count <= MAX_LABEL_CHARS
}

/// Definitions keyed by normalized label.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    entries: HashMap<String, ReferenceDefinition>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. As with CommonMark, the first definition of a label
    /// wins; returns `false` if the label was already present.
    pub fn insert(&mut self, label: &str, definition: ReferenceDefinition) -> bool {
        let key = normalize_label(label);
        if self.entries.contains_key(&key) {
            log::debug!("ignoring duplicate reference definition {label:?}");
            return false;
        }
        self.entries.insert(key, definition);
        true
    }

    pub fn remove(&mut self, label: &str) -> Option<ReferenceDefinition> {
        self.entries.remove(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReferenceDefinitions for DefinitionTable {
    fn lookup(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.entries.get(&normalize_label(label))
    }
}

/// Plain maps are expected to hold normalized keys already.
impl ReferenceDefinitions for HashMap<String, ReferenceDefinition> {
    fn lookup(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.get(&normalize_label(label))
    }
}

impl<L: AsRef<str>> FromIterator<(L, ReferenceDefinition)> for DefinitionTable {
    fn from_iter<T: IntoIterator<Item = (L, ReferenceDefinition)>>(iter: T) -> Self {
        let mut table = DefinitionTable::new();
        for (label, definition) in iter {
            table.insert(label.as_ref(), definition);
        }
        table
    }
}
