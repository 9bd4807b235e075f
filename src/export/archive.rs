use uuid::Uuid;

/// Archive entry holding the asset model.
pub const MODEL_ENTRY: &str = "model.json";

/// Archive entry holding the fixed metadata document.
pub const METADATA_ENTRY: &str = "dProB_asset_metadata.json";

/// Archive entry holding the asset's unique id.
pub const ASSET_GUID_ENTRY: &str = "asset_guid.txt";

/// Contents of [`METADATA_ENTRY`].
pub const METADATA_JSON: &str = r#"{"Format":"Rails","ProductVersion":"Simulation 2024.2.9"}"#;

/// A named text file destined for the asset archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub contents: String,
}

impl ArchiveEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// The fixed metadata entry.
    #[must_use]
    pub fn metadata() -> Self {
        Self::new(METADATA_ENTRY, METADATA_JSON)
    }

    /// An asset id entry holding a new random UUID.
    #[must_use]
    pub fn asset_guid() -> Self {
        Self::new(ASSET_GUID_ENTRY, Uuid::new_v4().to_string())
    }
}
