//! Deprecated entry removers
//!
//! ProcSet, CharSet and Name are stripped from the objects a detector
//! reported, both from the object's own dictionary and from its
//! `/Resources`. CIDSet is handled separately: it is removed from every
//! font descriptor reachable from the pages, whatever the detector found.

use lopdf::Document;
use tracing::debug;

use crate::detect::FindingSet;
use crate::error::DeprecatedError;
use crate::feature::Feature;
use crate::model;

/// Strips `feature` from the document and returns how many entries went.
pub fn remove(
    doc: &mut Document,
    feature: Feature,
    findings: &FindingSet,
) -> Result<usize, DeprecatedError> {
    let removed = match feature {
        Feature::CidSet => remove_cid_set(doc)?,
        _ => remove_from_objects(doc, feature, findings),
    };
    debug!("Removed {} {} entries", removed, feature);
    Ok(removed)
}

fn remove_from_objects(doc: &mut Document, feature: Feature, findings: &FindingSet) -> usize {
    findings
        .iter()
        .map(|number| model::strip_key(doc, number, feature.key()))
        .sum()
}

pub fn remove_proc_set(doc: &mut Document, findings: &FindingSet) -> usize {
    remove_from_objects(doc, Feature::ProcSet, findings)
}

pub fn remove_char_set(doc: &mut Document, findings: &FindingSet) -> usize {
    remove_from_objects(doc, Feature::CharSet, findings)
}

pub fn remove_name(doc: &mut Document, findings: &FindingSet) -> usize {
    remove_from_objects(doc, Feature::Name, findings)
}

/// Removes `/CIDSet` from the descriptor of every font used by a page.
///
/// # Errors
///
/// Fails when a page's font cannot be followed to its descriptor.
pub fn remove_cid_set(doc: &mut Document) -> Result<usize, DeprecatedError> {
    let mut removed = 0;
    for path in model::font_descriptors(doc)? {
        if let Some(descriptor) = model::dict_at_mut(doc, &path) {
            if descriptor.remove(Feature::CidSet.key()).is_some() {
                removed += 1;
            }
        }
    }
    Ok(removed)
}
