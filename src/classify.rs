//! Gender classification of personalities.
//!
//! Non-organisation personalities are partitioned into three disjoint groups.
//! Organisations belong to none of them.

use crate::loader::Personality;
use std::fmt;

/// Declared gender, as read from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenderCategory {
    Man,
    Woman,
    OtherDeclared(String),
    Unknown,
}

impl GenderCategory {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => GenderCategory::Unknown,
            Some("man") => GenderCategory::Man,
            Some("woman") => GenderCategory::Woman,
            Some(other) => GenderCategory::OtherDeclared(other.to_string()),
        }
    }

    pub fn group(&self) -> Group {
        match self {
            GenderCategory::Man => Group::Men,
            GenderCategory::Woman => Group::Women,
            GenderCategory::OtherDeclared(_) | GenderCategory::Unknown => Group::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Men,
    Women,
    Other,
}

impl Group {
    pub const ALL: [Group; 3] = [Group::Men, Group::Women, Group::Other];

    pub fn label(self) -> &'static str {
        match self {
            Group::Men => "men",
            Group::Women => "women",
            Group::Other => "other",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ByGroup<T> {
    pub men: T,
    pub women: T,
    pub other: T,
}

impl<T> ByGroup<T> {
    pub fn from_fn(mut f: impl FnMut(Group) -> T) -> Self {
        ByGroup {
            men: f(Group::Men),
            women: f(Group::Women),
            other: f(Group::Other),
        }
    }

    pub fn get(&self, group: Group) -> &T {
        match group {
            Group::Men => &self.men,
            Group::Women => &self.women,
            Group::Other => &self.other,
        }
    }

    pub fn get_mut(&mut self, group: Group) -> &mut T {
        match group {
            Group::Men => &mut self.men,
            Group::Women => &mut self.women,
            Group::Other => &mut self.other,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ByGroup<U> {
        ByGroup {
            men: f(&self.men),
            women: f(&self.women),
            other: f(&self.other),
        }
    }
}

/// The three gender groups of the non-organisation population.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub groups: ByGroup<Vec<Personality>>,
    unknown: usize,
}

impl Partition {
    pub fn members(&self, group: Group) -> &[Personality] {
        self.groups.get(group)
    }

    /// Size of the non-organisation population.
    pub fn population(&self) -> usize {
        Group::ALL.iter().map(|g| self.members(*g).len()).sum()
    }

    /// Members of [`Group::Other`] with no declared gender at all.
    pub fn unknown_count(&self) -> usize {
        self.unknown
    }
}

/// Share of the non-organisation population in each group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportions {
    pub men: f64,
    pub women: f64,
    pub other: f64,
}

/// Partitions `personalities` into Men, Women and Other. Organisations are
/// skipped; people with no declared gender land in Other.
pub fn classify(personalities: &[Personality]) -> Partition {
    let mut partition = Partition::default();

    for person in personalities.iter().filter(|p| !p.is_organisation) {
        let category = GenderCategory::parse(person.gender.as_deref());
        if category == GenderCategory::Unknown {
            partition.unknown += 1;
        }
        partition.groups.get_mut(category.group()).push(person.clone());
    }

    partition
}

/// Returns `None` when the population is empty.
pub fn proportions(partition: &Partition) -> Option<Proportions> {
    let total = partition.population();
    if total == 0 {
        return None;
    }

    let share = |g: Group| partition.members(g).len() as f64 / total as f64;
    Some(Proportions {
        men: share(Group::Men),
        women: share(Group::Women),
        other: share(Group::Other),
    })
}
