#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A reward granted by a fully solved hotspot.
    Item,
    /// The kept question sheet of one solved puzzle stage.
    Page,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
}

/// Acquired items in pickup order. Membership is all that gating looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn holds(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Adds the entry unless one with the same id is already held.
    pub fn add(&mut self, entry: InventoryEntry) -> bool {
        if self.holds(&entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
