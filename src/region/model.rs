//! Region - one census entry and the predicates derived from it

use std::collections::HashSet;
use std::str::FromStr;

use serde::Serialize;

use crate::core::error::{LookoutError, Result};
use crate::region::record::RegionRecord;

/// Raw value the dump uses for "nobody" in the delegate and founder fields
const ABSENT_SENTINEL: &str = "0";

/// Leading characters a spreadsheet would read as the start of a formula
const FORMULA_PREFIXES: [char; 4] = ['=', '+', '-', '@'];

/// Authority flag letter for executive power
const EXECUTIVE_AUTHORITY: char = 'X';

/// A region as listed in the census
///
/// Built from a `RegionRecord`, then enriched once with the password and
/// founderless tags through `RegionTags::apply`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: String,
    /// World Factbook Entry, with any formula-leading character removed
    pub wfe: String,
    pub numnations: u64,
    pub delegate: Option<String>,
    pub founder: Option<String>,
    pub delegate_votes: u64,
    pub embassies: Vec<String>,
    /// Epoch seconds of the region's last major update
    pub update_time: i64,
    pub exec_founder: bool,
    pub exec_delegate: bool,
    founderless: bool,
    passworded: bool,
}

impl Region {
    /// Build a region from its raw census fields.
    ///
    /// `index` is the record's position in the dump, used for error context.
    pub fn from_record(index: usize, record: &RegionRecord) -> Result<Self> {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(LookoutError::malformed(index, "<unnamed>", "missing NAME"));
        }

        Ok(Self {
            name: name.to_string(),
            wfe: sanitize_wfe(&record.factbook),
            numnations: parse_field(index, name, "NUMNATIONS", &record.numnations)?,
            delegate: absent_if_sentinel(&record.delegate),
            founder: absent_if_sentinel(&record.founder),
            delegate_votes: parse_field(index, name, "DELEGATEVOTES", &record.delegate_votes)?,
            embassies: record.embassies.clone(),
            update_time: parse_field(index, name, "LASTUPDATE", &record.last_update)?,
            exec_founder: record.founder_auth.contains(EXECUTIVE_AUTHORITY),
            exec_delegate: record.delegate_auth.contains(EXECUTIVE_AUTHORITY),
            founderless: false,
            passworded: false,
        })
    }

    /// Same region with both externally sourced tags resolved
    pub fn with_tags(self, passworded: bool, founderless: bool) -> Self {
        Self {
            passworded,
            founderless,
            ..self
        }
    }

    pub fn founderless(&self) -> bool {
        self.founderless
    }

    pub fn passworded(&self) -> bool {
        self.passworded
    }

    pub fn no_delegate(&self) -> bool {
        self.delegate.is_none()
    }

    /// Whether the region can be taken.
    ///
    /// It must be passworded, and its founder must not be able to undo the
    /// takeover: either the founder lacks executive authority, the delegate
    /// holds executive authority too, or the region is founderless.
    pub fn valid_target(&self) -> bool {
        (!self.exec_founder || self.exec_delegate || self.founderless) && self.passworded
    }
}

fn absent_if_sentinel(raw: &str) -> Option<String> {
    if raw == ABSENT_SENTINEL {
        None
    } else {
        Some(raw.to_string())
    }
}

fn sanitize_wfe(raw: &str) -> String {
    match raw.strip_prefix(FORMULA_PREFIXES) {
        Some(rest) => rest.to_string(),
        None => raw.to_string(),
    }
}

fn parse_field<T: FromStr>(index: usize, name: &str, tag: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        LookoutError::malformed(index, name, format!("{} {:?} is not valid: {}", tag, raw, e))
    })
}

/// Region names carrying the two externally sourced tags
#[derive(Debug, Clone, Default)]
pub struct RegionTags {
    pub passworded: HashSet<String>,
    pub founderless: HashSet<String>,
}

impl RegionTags {
    pub fn new(passworded: HashSet<String>, founderless: HashSet<String>) -> Self {
        Self {
            passworded,
            founderless,
        }
    }

    /// Resolve both tags on every region by exact name match
    pub fn apply(&self, regions: Vec<Region>) -> Vec<Region> {
        regions
            .into_iter()
            .map(|region| {
                let passworded = self.passworded.contains(&region.name);
                let founderless = self.founderless.contains(&region.name);
                region.with_tags(passworded, founderless)
            })
            .collect()
    }
}
