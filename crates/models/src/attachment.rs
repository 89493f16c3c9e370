use serde::{Deserialize, Serialize};

/// Client-local metadata of a selected file. No bytes are ever carried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub content_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl Attachment {
    pub fn from_descriptor(id: String, file: FileDescriptor) -> Self {
        Self { id, name: file.name, size: file.size, content_type: file.content_type }
    }
}
