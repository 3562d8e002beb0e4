//! Object graph helpers on top of lopdf
//!
//! Lookups are total: a missing key, a dangling reference or a value of the
//! wrong kind yields `None` rather than an error. Anything that has to be
//! edited later is addressed by an [`ObjectPath`], so a read-only walk over
//! the graph can collect targets first and mutate them afterwards.

use std::collections::BTreeSet;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use crate::error::DeprecatedError;

/// Object number of an indirect object (generation ignored)
pub type ObjectNumber = u32;

/// Bound on reference chains and page-tree depth
const MAX_HOPS: usize = 64;

/// Fonts every conforming reader ships, which may omit a descriptor
const STANDARD_14_FONTS: [&str; 14] = [
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Symbol",
    "ZapfDingbats",
];

/// Legacy and Windows names readers map onto one of the standard 14.
fn standard_14_alias(base_font: &[u8]) -> Option<&'static str> {
    let canonical = match base_font {
        b"Arial" | b"ArialMT" => "Helvetica",
        b"Arial,Bold" | b"Arial-BoldMT" => "Helvetica-Bold",
        b"Arial,Italic" | b"Arial-ItalicMT" => "Helvetica-Oblique",
        b"Arial,BoldItalic" | b"Arial-BoldItalicMT" => "Helvetica-BoldOblique",
        b"TimesNewRoman" | b"TimesNewRomanPSMT" | b"Times" => "Times-Roman",
        b"TimesNewRoman,Bold" | b"TimesNewRomanPS-BoldMT" | b"Times,Bold" => "Times-Bold",
        b"TimesNewRoman,Italic" | b"TimesNewRomanPS-ItalicMT" | b"Times,Italic" => {
            "Times-Italic"
        }
        b"TimesNewRoman,BoldItalic" | b"TimesNewRomanPS-BoldItalicMT" | b"Times,BoldItalic" => {
            "Times-BoldItalic"
        }
        b"CourierNew" | b"CourierNewPSMT" | b"CourierCourierNew" => "Courier",
        b"CourierNew,Bold" | b"CourierNewPS-BoldMT" => "Courier-Bold",
        b"CourierNew,Italic" | b"CourierNewPS-ItalicMT" => "Courier-Oblique",
        b"CourierNew,BoldItalic" | b"CourierNewPS-BoldItalicMT" => "Courier-BoldOblique",
        b"Symbol,Bold" | b"Symbol,Italic" | b"Symbol,BoldItalic" => "Symbol",
        _ => return None,
    };
    Some(canonical)
}

fn standard_14_name(base_font: &[u8]) -> Option<&'static str> {
    STANDARD_14_FONTS
        .iter()
        .copied()
        .find(|name| name.as_bytes() == base_font)
        .or_else(|| standard_14_alias(base_font))
}

/// One hop from a container to a nested value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathStep {
    Key(Vec<u8>),
    Index(usize),
}

impl PathStep {
    pub fn key(key: &[u8]) -> Self {
        PathStep::Key(key.to_vec())
    }
}

/// Address of a value: an indirect object plus the direct (inline) steps
/// leading into it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectPath {
    pub id: ObjectId,
    pub steps: Vec<PathStep>,
}

impl ObjectPath {
    pub fn root(id: ObjectId) -> Self {
        Self {
            id,
            steps: Vec::new(),
        }
    }

    fn child(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { id: self.id, steps }
    }
}

/// Every indirect object with its number, in object-table order.
pub fn objects(doc: &Document) -> impl Iterator<Item = (ObjectNumber, &Object)> + '_ {
    doc.objects.iter().map(|(id, object)| (id.0, object))
}

/// The dictionary of a dictionary object, or the header of a stream.
pub fn header(object: &Object) -> Option<&Dictionary> {
    match object {
        Object::Dictionary(dict) => Some(dict),
        Object::Stream(stream) => Some(&stream.dict),
        _ => None,
    }
}

pub fn header_mut(object: &mut Object) -> Option<&mut Dictionary> {
    match object {
        Object::Dictionary(dict) => Some(dict),
        Object::Stream(stream) => Some(&mut stream.dict),
        _ => None,
    }
}

/// Follows `id` through reference-to-reference chains. Cycles and
/// dangling references give `None`.
fn follow(doc: &Document, mut id: ObjectId) -> Option<ObjectId> {
    for _ in 0..MAX_HOPS {
        match doc.objects.get(&id)? {
            Object::Reference(next) => id = *next,
            _ => return Some(id),
        }
    }
    None
}

pub fn resolve<'a>(doc: &'a Document, value: &'a Object) -> Option<&'a Object> {
    match value {
        Object::Reference(id) => doc.objects.get(&follow(doc, *id)?),
        other => Some(other),
    }
}

pub fn resolve_dict<'a>(doc: &'a Document, value: &'a Object) -> Option<&'a Dictionary> {
    header(resolve(doc, value)?)
}

/// The `/Resources` sub-dictionary, inline or referenced.
pub fn resources<'a>(doc: &'a Document, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    resolve_dict(doc, dict.get(b"Resources").ok()?)
}

pub fn subtype<'a>(doc: &'a Document, dict: &'a Dictionary) -> Option<&'a [u8]> {
    match resolve(doc, dict.get(b"Subtype").ok()?)? {
        Object::Name(name) => Some(name.as_slice()),
        _ => None,
    }
}

pub fn object_at<'a>(doc: &'a Document, path: &ObjectPath) -> Option<&'a Object> {
    path.steps
        .iter()
        .try_fold(doc.objects.get(&path.id)?, |current, step| match step {
            PathStep::Key(key) => header(current)?.get(key).ok(),
            PathStep::Index(index) => match current {
                Object::Array(items) => items.get(*index),
                _ => None,
            },
        })
}

pub fn object_at_mut<'a>(doc: &'a mut Document, path: &ObjectPath) -> Option<&'a mut Object> {
    path.steps
        .iter()
        .try_fold(doc.objects.get_mut(&path.id)?, |current, step| match step {
            PathStep::Key(key) => header_mut(current)?.get_mut(key).ok(),
            PathStep::Index(index) => match current {
                Object::Array(items) => items.get_mut(*index),
                _ => None,
            },
        })
}

pub fn dict_at<'a>(doc: &'a Document, path: &ObjectPath) -> Option<&'a Dictionary> {
    header(object_at(doc, path)?)
}

pub fn dict_at_mut<'a>(doc: &'a mut Document, path: &ObjectPath) -> Option<&'a mut Dictionary> {
    header_mut(object_at_mut(doc, path)?)
}

/// Path of the value reached by `step` from `parent`. A reference is
/// replaced by the object it points to, so the result is always where the
/// value actually lives.
pub fn locate(doc: &Document, parent: &ObjectPath, step: PathStep) -> Option<ObjectPath> {
    let child = parent.child(step);
    match object_at(doc, &child)? {
        Object::Reference(id) => follow(doc, *id).map(ObjectPath::root),
        _ => Some(child),
    }
}

/// Like [`locate`], but only succeeds when the target is a dictionary.
fn locate_dict(doc: &Document, parent: &ObjectPath, step: PathStep) -> Option<ObjectPath> {
    locate(doc, parent, step).filter(|path| dict_at(doc, path).is_some())
}

/// Removes `key` from every object numbered `number` and from its
/// `/Resources` sub-dictionary. Returns how many entries were removed;
/// absent keys are skipped silently.
pub fn strip_key(doc: &mut Document, number: ObjectNumber, key: &[u8]) -> usize {
    let ids: Vec<ObjectId> = doc
        .objects
        .range((number, 0)..=(number, u16::MAX))
        .map(|(id, _)| *id)
        .collect();

    let mut removed = 0;
    for id in ids {
        let root = ObjectPath::root(id);
        let nested = locate_dict(doc, &root, PathStep::key(b"Resources"));

        for path in std::iter::once(root).chain(nested) {
            if let Some(dict) = dict_at_mut(doc, &path) {
                if dict.remove(key).is_some() {
                    removed += 1;
                }
            }
        }
    }
    removed
}

/// The effective `/Resources` of a page: its own entry, or the nearest
/// ancestor's through `/Parent`.
pub fn page_resources(doc: &Document, page_id: ObjectId) -> Option<ObjectPath> {
    let mut node = page_id;
    for _ in 0..MAX_HOPS {
        let root = ObjectPath::root(node);
        if let Some(path) = locate_dict(doc, &root, PathStep::key(b"Resources")) {
            return Some(path);
        }
        node = match dict_at(doc, &root)?.get(b"Parent").ok()? {
            Object::Reference(parent) => *parent,
            _ => return None,
        };
    }
    None
}

/// Descriptor of a font dictionary. Type0 fonts delegate to their
/// descendant CID font.
fn descriptor_of(doc: &Document, font: &ObjectPath) -> Option<ObjectPath> {
    let dict = dict_at(doc, font)?;
    let described = if matches!(subtype(doc, dict), Some(b"Type0")) {
        let descendants = locate(doc, font, PathStep::key(b"DescendantFonts"))?;
        locate_dict(doc, &descendants, PathStep::Index(0))?
    } else {
        font.clone()
    };
    locate_dict(doc, &described, PathStep::key(b"FontDescriptor"))
}

fn is_standard_14(doc: &Document, font: &ObjectPath) -> bool {
    let base_font = dict_at(doc, font)
        .and_then(|dict| dict.get(b"BaseFont").ok())
        .and_then(|value| resolve(doc, value));
    match base_font {
        Some(Object::Name(name)) => standard_14_name(name).is_some(),
        _ => false,
    }
}

/// Walks page → resources → `/Font` → font → descriptor for every page and
/// returns each distinct descriptor once.
///
/// # Errors
///
/// A font entry that is not a dictionary, or a non-standard font without a
/// descriptor, is a broken graph and aborts the walk.
pub fn font_descriptors(doc: &Document) -> Result<Vec<ObjectPath>, DeprecatedError> {
    let mut seen = BTreeSet::new();
    let mut descriptors = Vec::new();

    for (page, page_id) in doc.get_pages() {
        let Some(resources) = page_resources(doc, page_id) else {
            continue;
        };
        let Some(fonts) = locate_dict(doc, &resources, PathStep::key(b"Font")) else {
            continue;
        };
        let Some(font_dict) = dict_at(doc, &fonts) else {
            continue;
        };

        for (font_name, _) in font_dict.iter() {
            let display_name = String::from_utf8_lossy(font_name).into_owned();
            let font = locate_dict(doc, &fonts, PathStep::Key(font_name.clone())).ok_or_else(|| {
                DeprecatedError::TraversalError(format!(
                    "font /{} on page {} is not a dictionary",
                    display_name, page
                ))
            })?;

            match descriptor_of(doc, &font) {
                Some(descriptor) => {
                    if seen.insert(descriptor.clone()) {
                        descriptors.push(descriptor);
                    }
                }
                None if is_standard_14(doc, &font) => {
                    debug!("Font /{} on page {} is a standard font", display_name, page);
                }
                None => {
                    return Err(DeprecatedError::MissingDescriptor {
                        page,
                        font: display_name,
                    })
                }
            }
        }
    }

    Ok(descriptors)
}
