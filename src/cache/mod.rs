// Cache module.
// Key-value store implementations and the timestamped record format stored in them.

pub mod file;
pub mod memory;
pub mod paths;
pub mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{CacheRecord, KvStore, read_record, write_record};
