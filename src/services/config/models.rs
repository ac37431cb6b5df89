use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for one package conversion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConvertOptions {
    /// The `.apkg` file to read.
    pub input: PathBuf,
    /// Directory receiving the media files (and, later, the rendered document).
    pub output: PathBuf,
    /// Replaces the deck name as title; required when cards span several decks.
    pub title: Option<String>,
    /// Replaces the deck description.
    pub description: Option<String>,
    /// Resolve cards on the rayon pool instead of one by one.
    pub parallel: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("out"),
            title: None,
            description: None,
            parallel: false,
        }
    }
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Title override, treating an empty string as absent.
    pub fn title_override(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Description override, treating an empty string as absent.
    pub fn description_override(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}
