//! Fixture documents for the batch tests

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

pub fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// Single-page document; `extra` objects are added before the page tree
/// and `resources` goes on the page.
pub fn build_pdf(extra: Vec<Object>, resources: Option<Object>) -> (Document, Vec<ObjectId>) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let extra_ids: Vec<ObjectId> = extra.into_iter().map(|obj| doc.add_object(obj)).collect();

    let content_id = doc.add_object(Stream::new(Dictionary::new(), b"BT ET".to_vec()));
    let mut page = Dictionary::new();
    page.set("Type", name("Page"));
    page.set("Parent", Object::Reference(pages_id));
    page.set("Contents", Object::Reference(content_id));
    if let Some(resources) = resources {
        page.set("Resources", resources);
    }
    let page_id = doc.add_object(page);

    let pages = Dictionary::from_iter(vec![
        ("Type", name("Pages")),
        ("Count", Object::Integer(1)),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", name("Catalog")),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    (doc, extra_ids)
}

pub fn clean_pdf() -> Document {
    let mut font = Dictionary::new();
    font.set("Type", name("Font"));
    font.set("Subtype", name("Type1"));
    font.set("BaseFont", name("Helvetica"));
    let (mut doc, ids) = build_pdf(vec![Object::Dictionary(font)], None);
    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(ids[0]));
    let resources = Dictionary::from_iter(vec![("Font", Object::Dictionary(fonts))]);
    let page_id = doc.page_iter().next().unwrap();
    doc.get_object_mut(page_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Resources", Object::Dictionary(resources));
    doc
}

pub fn proc_set_pdf() -> Document {
    let resources = Dictionary::from_iter(vec![(
        "ProcSet",
        Object::Array(vec![name("PDF"), name("Text")]),
    )]);
    build_pdf(vec![], Some(Object::Dictionary(resources))).0
}

/// A Type1 font program stream carrying both /CharSet and /Name
pub fn char_set_and_name_pdf() -> Document {
    let mut dict = Dictionary::new();
    dict.set("Subtype", name("Type1"));
    dict.set("Name", name("F1"));
    dict.set("CharSet", Object::string_literal("/A/B/C"));
    let stream = Stream::new(dict, b"%!FontType1".to_vec());
    build_pdf(vec![Object::Stream(stream)], None).0
}

pub fn write_pdf(path: &Path, mut doc: Document) {
    doc.save(path).unwrap();
}
