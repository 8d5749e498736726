//! Grid normalisation: splitting the raw identifier text of each slot and
//! flattening slots into one row per appearance.

use crate::loader::Slot;
use regex::Regex;
use std::sync::LazyLock;

/// Pipe, single space, or a hyphen followed by a space.
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|| |- ").expect("separator pattern is valid"));

/// A slot whose identifier text has been split into tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSlot {
    pub diffusion_id: String,
    pub personality_ids: Option<Vec<String>>,
    pub attributes: Vec<(String, Option<String>)>,
}

/// One (slot, identifier) pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    /// Position in the flattened table, starting at 0.
    pub index: usize,
    pub diffusion_id: String,
    /// `None` for slots that named nobody.
    pub personality_id: Option<String>,
    pub attributes: Vec<(String, Option<String>)>,
}

/// Splits raw identifier text on the combined separator pattern.
///
/// Adjacent separators yield empty tokens, as a regex split does.
pub fn split_ids(raw: Option<&str>) -> Option<Vec<String>> {
    raw.map(|text| SEPARATOR.split(text).map(str::to_string).collect())
}

/// Replaces every slot's identifier text with its token sequence.
pub fn split_column(slots: Vec<Slot>) -> Vec<SplitSlot> {
    slots
        .into_iter()
        .map(|slot| SplitSlot {
            personality_ids: split_ids(slot.personality_ids.as_deref()),
            diffusion_id: slot.diffusion_id,
            attributes: slot.attributes,
        })
        .collect()
}

/// Emits one row per token. A null or empty sequence still emits a single
/// row with a null identifier.
pub fn explode_column(slots: &[SplitSlot]) -> Vec<Appearance> {
    let mut out = Vec::with_capacity(slots.len());

    for slot in slots {
        let ids: Vec<Option<&str>> = match &slot.personality_ids {
            Some(ids) if !ids.is_empty() => ids.iter().map(|id| Some(id.as_str())).collect(),
            _ => vec![None],
        };

        for id in ids {
            out.push(Appearance {
                index: out.len(),
                diffusion_id: slot.diffusion_id.clone(),
                personality_id: id.map(str::to_string),
                attributes: slot.attributes.clone(),
            });
        }
    }

    out
}

/// Split then explode.
pub fn normalize(slots: Vec<Slot>) -> Vec<Appearance> {
    explode_column(&split_column(slots))
}
