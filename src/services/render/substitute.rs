//! Literal token substitution for card templates.
//!
//! Only `{{Field}}`, `{{type:Field}}` and `{{FrontSide}}` are understood, and
//! they are replaced as plain strings. Conditional sections and cloze markup
//! pass through untouched.

use crate::services::collection_config::Model;
use crate::types::errors::ResolveError;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Stand-in for the interactive "type the answer" box.
pub const TYPE_ANSWER_INPUT: &str = "<input type='text' placeholder='solution' class='type' />";

pub const FRONT_SIDE_TOKEN: &str = "{{FrontSide}}";

static SOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[sound:([^\]]+)\]").expect("valid sound regex"));

/// Substitute every declared field of `model` into both formats.
///
/// Fields are applied in ordinal order. A field whose ordinal is past the end
/// of `values` is only an error when one of the formats actually uses it.
pub fn substitute_fields(
    model: &Model,
    note_id: i64,
    values: &[&str],
    qfmt: &str,
    afmt: &str,
) -> Result<(String, String), ResolveError> {
    let mut question = qfmt.to_string();
    let mut answer = afmt.to_string();

    for field in model.fields_by_ord() {
        let token = format!("{{{{{}}}}}", field.name);
        match values.get(field.ord) {
            Some(value) => {
                question = question.replace(&token, value);
                answer = answer.replace(&token, value);
            }
            None if question.contains(&token) || answer.contains(&token) => {
                return Err(ResolveError::MissingField {
                    note_id,
                    field: field.name.clone(),
                    ord: field.ord,
                    available: values.len(),
                });
            }
            None => {}
        }

        let type_token = format!("{{{{type:{}}}}}", field.name);
        question = question.replace(&type_token, TYPE_ANSWER_INPUT);
        answer = answer.replace(&type_token, TYPE_ANSWER_INPUT);
    }

    Ok((question, answer))
}

/// Replace `{{FrontSide}}` in the answer with the finished question.
pub fn expand_front_side(answer: &str, question: &str) -> String {
    answer.replace(FRONT_SIDE_TOKEN, question)
}

/// Turn every `[sound:file]` tag into an `<audio>` element.
pub fn rewrite_sound_tags(html: &str) -> String {
    SOUND_RE
        .replace_all(html, |caps: &Captures| audio_element(&caps[1]))
        .into_owned()
}

fn audio_element(file: &str) -> String {
    format!(
        "<audio controls><source src=\"{}\">Your browser does not support the <code>audio</code> element.</audio>",
        escape_attribute(file)
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/substitute_tests.rs"]
mod tests;
