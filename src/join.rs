//! Inner join of flattened appearances against a gender group.

use crate::classify::{ByGroup, Group, Partition};
use crate::grid::Appearance;
use crate::loader::Personality;
use std::collections::HashMap;

/// An appearance matched to the group member it names.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedAppearance {
    pub appearance: Appearance,
    pub personality: Personality,
}

/// Joins `appearances` to `members` on `personality_id = uuid`.
///
/// Appearances whose identifier is null or matches nobody are dropped.
/// Output follows appearance order.
pub fn join_group(appearances: &[Appearance], members: &[Personality]) -> Vec<JoinedAppearance> {
    let mut by_uuid: HashMap<&str, Vec<&Personality>> = HashMap::with_capacity(members.len());
    for member in members {
        by_uuid.entry(member.uuid.as_str()).or_default().push(member);
    }

    let mut out = Vec::new();
    for appearance in appearances {
        let Some(id) = appearance.personality_id.as_deref() else {
            continue;
        };
        for member in by_uuid.get(id).into_iter().flatten() {
            out.push(JoinedAppearance {
                appearance: appearance.clone(),
                personality: (*member).clone(),
            });
        }
    }
    out
}

/// Joins one station's appearances against every group of `partition`.
pub fn join_station(
    appearances: &[Appearance],
    partition: &Partition,
) -> ByGroup<Vec<JoinedAppearance>> {
    ByGroup::from_fn(|g: Group| join_group(appearances, partition.members(g)))
}

/// A station grid after normalisation, with its three group joins.
#[derive(Debug, Clone)]
pub struct JoinedStation {
    pub name: String,
    pub slot_count: usize,
    pub appearances: Vec<Appearance>,
    pub joined: ByGroup<Vec<JoinedAppearance>>,
}

impl JoinedStation {
    pub fn new(
        name: &str,
        slot_count: usize,
        appearances: Vec<Appearance>,
        partition: &Partition,
    ) -> Self {
        let joined = join_station(&appearances, partition);
        JoinedStation {
            name: name.to_string(),
            slot_count,
            appearances,
            joined,
        }
    }
}
