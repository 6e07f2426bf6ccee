//! # Skipstore
//!
//! An ordered key-value map built on a skip list, guarded by a per-instance
//! read-write lock, with a flat text snapshot for persistence.
//!
//! ## Core idea
//! Keep entries in a sorted linked list, then add sparser "express lanes"
//! above it. Each node picks how many lanes it joins by flipping coins, so
//! a search skips most of the list without any rebalancing step.
//!
//! ```
//! use skipstore::{DeleteStatus, InsertStatus, SkipList};
//!
//! let list = SkipList::new(6);
//! assert_eq!(list.insert(1, "a".to_string()), InsertStatus::Inserted);
//! assert_eq!(list.insert(1, "b".to_string()), InsertStatus::AlreadyExists);
//! assert_eq!(list.get(&1).as_deref(), Some("a"));
//! assert_eq!(list.delete(&1), DeleteStatus::Deleted);
//! assert_eq!(list.size(), 0);
//! ```

pub mod error;
pub mod options;
pub mod persist;
pub mod skiplist;
pub mod types;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use options::Options;
pub use persist::LoadReport;
pub use skiplist::{RawSkipList, SkipList};
pub use types::{DeleteStatus, InsertStatus};
