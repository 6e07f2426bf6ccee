/// Outcome of [`crate::SkipList::insert`].
///
/// An insert never overwrites: on a key conflict the stored value is kept
/// and nothing in the structure changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStatus {
    /// A new node was linked in.
    Inserted,
    /// The key was already present.
    AlreadyExists,
}

/// Outcome of [`crate::SkipList::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    /// The node was unlinked and released.
    Deleted,
    /// No node with that key exists.
    NotFound,
}

impl InsertStatus {
    pub fn is_inserted(self) -> bool {
        self == InsertStatus::Inserted
    }
}

impl DeleteStatus {
    pub fn is_deleted(self) -> bool {
        self == DeleteStatus::Deleted
    }
}
