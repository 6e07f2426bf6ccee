use std::path::PathBuf;

/// Default level ceiling. LevelDB uses 12 as well.
pub const DEFAULT_MAX_LEVEL: usize = 12;

/// Default snapshot location used by `dump()` / `load()`.
pub const DEFAULT_DUMP_PATH: &str = "store/dumpFile";

/// Construction-time configuration for a [`crate::SkipList`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Highest level index a node may reach. Fixed for the lifetime of the list.
    pub max_level: usize,

    /// Snapshot file for `dump()` and `load()` (default: `store/dumpFile`)
    pub dump_path: PathBuf,

    /// Seed for level randomization. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            dump_path: PathBuf::from(DEFAULT_DUMP_PATH),
            seed: None,
        }
    }
}

impl Options {
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn dump_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_path = path.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
