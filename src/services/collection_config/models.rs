use crate::types::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model (note type) as stored in `col.models`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ModelKind,
    /// Stylesheet shared by every card of this model.
    pub css: String,
    #[serde(rename = "flds")]
    pub fields: Vec<FieldDef>,
    #[serde(rename = "tmpls")]
    pub templates: Vec<TemplateDef>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ModelKind {
    #[default]
    Standard,
    Cloze,
}

impl From<u8> for ModelKind {
    fn from(value: u8) -> Self {
        match value {
            1 => ModelKind::Cloze,
            _ => ModelKind::Standard,
        }
    }
}

impl From<ModelKind> for u8 {
    fn from(value: ModelKind) -> Self {
        match value {
            ModelKind::Standard => 0,
            ModelKind::Cloze => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ord: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDef {
    #[serde(default)]
    pub name: String,
    pub ord: i64,
    /// Question format.
    pub qfmt: String,
    /// Answer format.
    pub afmt: String,
}

impl Model {
    /// Fields sorted by ordinal.
    pub fn fields_by_ord(&self) -> Vec<&FieldDef> {
        let mut fields: Vec<&FieldDef> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.ord);
        fields
    }

    pub fn template(&self, ord: i64) -> Option<&TemplateDef> {
        self.templates.iter().find(|t| t.ord == ord)
    }
}

/// Model id -> model.
pub type ModelTable = HashMap<i64, Model>;

/// Parse the `col.models` JSON blob.
///
/// Every model must carry `css`, `flds` and `tmpls`; there is no partial
/// fallback because a broken model breaks every card that uses it.
pub fn parse_models(json: &str) -> Result<ModelTable, ConfigError> {
    let raw: HashMap<String, Model> =
        serde_json::from_str(json).map_err(|source| ConfigError::Json {
            blob: "models",
            source,
        })?;

    let mut table = ModelTable::with_capacity(raw.len());
    for (key, model) in raw {
        let id = parse_id("models", &key)?;
        if model.kind == ModelKind::Cloze {
            log::warn!(
                "Model {} ('{}') is a cloze model; its cards past the first will fail template lookup",
                id,
                model.name
            );
        }
        table.insert(id, model);
    }

    log::debug!("Parsed {} models", table.len());
    Ok(table)
}

pub(super) fn parse_id(blob: &'static str, key: &str) -> Result<i64, ConfigError> {
    key.parse::<i64>().map_err(|_| ConfigError::InvalidKey {
        blob,
        key: key.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/models_tests.rs"]
mod tests;
