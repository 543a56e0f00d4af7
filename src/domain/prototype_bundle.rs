/// One file inside a packaged prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub path: String,
    pub contents: Vec<u8>,
}

/// Immutable packaged prototype: the rendered files plus their archive bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeBundle {
    entries: Vec<BundleEntry>,
    archive: Vec<u8>,
}

impl PrototypeBundle {
    pub const FILE_NAME: &'static str = "prototype.tar.gz";

    pub fn new(entries: Vec<BundleEntry>, archive: Vec<u8>) -> Self {
        Self { entries, archive }
    }

    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    pub fn entry(&self, path: &str) -> Option<&BundleEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn archive(&self) -> &[u8] {
        &self.archive
    }
}
