//! Deprecated entry detectors
//!
//! Each detector makes one pass over the object table. For every stream or
//! dictionary it checks the object's own dictionary and its `/Resources`
//! sub-dictionary, recording the object number on either hit.

use std::collections::BTreeSet;
use std::fmt;

use lopdf::{Dictionary, Document};
use serde::Serialize;

use crate::feature::Feature;
use crate::model::{self, ObjectNumber};

/// Subtypes on which `/Name` counts as deprecated
pub const RESTRICTED_NAME_SUBTYPES: [&[u8]; 5] =
    [b"Type1", b"Type3", b"Image", b"Form", b"TrueType"];

/// Distinct object numbers carrying a feature. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FindingSet(BTreeSet<ObjectNumber>);

impl FindingSet {
    /// `None` when nothing was found
    pub fn from_numbers(numbers: BTreeSet<ObjectNumber>) -> Option<Self> {
        if numbers.is_empty() {
            None
        } else {
            Some(Self(numbers))
        }
    }

    pub fn contains(&self, number: ObjectNumber) -> bool {
        self.0.contains(&number)
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectNumber> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "[{}]", numbers.join(", "))
    }
}

fn has_restricted_subtype(doc: &Document, dict: &Dictionary) -> bool {
    model::subtype(doc, dict).is_some_and(|subtype| RESTRICTED_NAME_SUBTYPES.contains(&subtype))
}

fn carries(doc: &Document, dict: &Dictionary, feature: Feature) -> bool {
    if !dict.has(feature.key()) {
        return false;
    }
    match feature {
        Feature::Name => has_restricted_subtype(doc, dict),
        _ => true,
    }
}

/// Object numbers whose dictionary, or whose `/Resources`, carries
/// `feature`.
pub fn detect(doc: &Document, feature: Feature) -> Option<FindingSet> {
    let mut found = BTreeSet::new();

    for (number, object) in model::objects(doc) {
        let Some(dict) = model::header(object) else {
            continue;
        };
        let own = carries(doc, dict, feature);
        let nested = model::resources(doc, dict).is_some_and(|res| carries(doc, res, feature));
        if own || nested {
            found.insert(number);
        }
    }

    FindingSet::from_numbers(found)
}

pub fn proc_set(doc: &Document) -> Option<FindingSet> {
    detect(doc, Feature::ProcSet)
}

pub fn cid_set(doc: &Document) -> Option<FindingSet> {
    detect(doc, Feature::CidSet)
}

pub fn char_set(doc: &Document) -> Option<FindingSet> {
    detect(doc, Feature::CharSet)
}

/// `/Name` entries, restricted to [`RESTRICTED_NAME_SUBTYPES`]
pub fn name(doc: &Document) -> Option<FindingSet> {
    detect(doc, Feature::Name)
}
