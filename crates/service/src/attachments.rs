//! Per-session list of attachment metadata. Nothing is uploaded.

use models::{Attachment, FileDescriptor};
use rand::Rng;
use serde::Serialize;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Random base-36 token. Collisions within a session are not checked.
pub fn generate_attachment_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttachmentList {
    items: Vec<Attachment>,
}

impl AttachmentList {
    pub fn new() -> Self { Self::default() }

    /// Append one record per descriptor, in the given order. Returns the new records.
    pub fn add(&mut self, files: Vec<FileDescriptor>) -> Vec<Attachment> {
        let added: Vec<Attachment> = files
            .into_iter()
            .map(|f| Attachment::from_descriptor(generate_attachment_id(), f))
            .collect();
        self.items.extend(added.iter().cloned());
        added
    }

    /// Remove by id; returns whether something was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|a| a.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Attachment] { &self.items }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileDescriptor {
        FileDescriptor { name: name.into(), size: 2048, content_type: "application/pdf".into() }
    }

    #[test]
    fn ids_are_nine_base36_chars() {
        let id = generate_attachment_id();
        assert_eq!(id.len(), 9);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn add_copies_metadata_in_order() {
        let mut list = AttachmentList::new();
        let added = list.add(vec![file("aadhar.pdf"), file("photo.jpg")]);
        assert_eq!(added.len(), 2);
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].name, "aadhar.pdf");
        assert_eq!(list.items()[1].name, "photo.jpg");
        assert_eq!(list.items()[0].size, 2048);
        assert_eq!(list.items()[0].content_type, "application/pdf");
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut list = AttachmentList::new();
        list.add(vec![file("a.pdf"), file("b.pdf"), file("c.pdf")]);
        let snapshot = list.clone();
        assert!(!list.remove("not-an-id"));
        assert_eq!(list, snapshot);
    }

    #[test]
    fn remove_by_id_keeps_others_in_order() {
        let mut list = AttachmentList::new();
        list.add(vec![file("a.pdf"), file("b.pdf"), file("c.pdf")]);
        let middle = list.items()[1].id.clone();
        assert!(list.remove(&middle));
        let names: Vec<_> = list.items().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "c.pdf"]);
    }
}
