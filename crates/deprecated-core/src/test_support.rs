//! In-memory document builders shared by the unit tests

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

pub(crate) fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// Builds a one-level page tree around whatever objects a test adds.
pub(crate) struct TestPdf {
    pub doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl TestPdf {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    pub fn add(&mut self, object: impl Into<Object>) -> ObjectId {
        self.doc.add_object(object)
    }

    pub fn add_stream(&mut self, dict: Dictionary) -> ObjectId {
        self.doc.add_object(Stream::new(dict, b"q Q".to_vec()))
    }

    /// Adds a page, optionally with its own `/Resources` entry.
    pub fn add_page(&mut self, resources: Option<Object>) -> ObjectId {
        let content_id = self.add_stream(Dictionary::new());
        let mut page = Dictionary::new();
        page.set("Type", name("Page"));
        page.set("Parent", Object::Reference(self.pages_id));
        page.set("Contents", Object::Reference(content_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
        if let Some(resources) = resources {
            page.set("Resources", resources);
        }
        let page_id = self.doc.add_object(page);
        self.kids.push(Object::Reference(page_id));
        page_id
    }

    /// Writes the page tree and catalog. `inherited` lands on the root
    /// `/Pages` node.
    pub fn finish(mut self, inherited: Option<Object>) -> Document {
        let mut pages = Dictionary::new();
        pages.set("Type", name("Pages"));
        pages.set("Count", Object::Integer(self.kids.len() as i64));
        pages.set("Kids", Object::Array(self.kids));
        if let Some(resources) = inherited {
            pages.set("Resources", resources);
        }
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", name("Catalog"));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        self.doc
    }
}

/// A simple font with a descriptor object; returns (font, descriptor).
pub(crate) fn add_font(pdf: &mut TestPdf, subtype: &str, with_cid_set: bool) -> (ObjectId, ObjectId) {
    let mut descriptor = Dictionary::new();
    descriptor.set("Type", name("FontDescriptor"));
    descriptor.set("FontName", name("ABCDEF+Embedded"));
    descriptor.set("Flags", Object::Integer(4));
    if with_cid_set {
        let cid_set = pdf.add_stream(Dictionary::new());
        descriptor.set("CIDSet", Object::Reference(cid_set));
    }
    let descriptor_id = pdf.add(descriptor);

    let mut font = Dictionary::new();
    font.set("Type", name("Font"));
    font.set("Subtype", name(subtype));
    font.set("BaseFont", name("ABCDEF+Embedded"));
    font.set("FontDescriptor", Object::Reference(descriptor_id));
    (pdf.add(font), descriptor_id)
}

/// `<< /Font << /F1 font >> >>`
pub(crate) fn font_resources(fonts: &[(&str, ObjectId)]) -> Dictionary {
    let mut font_dict = Dictionary::new();
    for (key, id) in fonts {
        font_dict.set(*key, Object::Reference(*id));
    }
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(font_dict));
    resources
}
