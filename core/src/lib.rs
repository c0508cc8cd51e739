pub mod banner;
pub mod consent;
pub mod host;
pub mod storage;
pub mod types;

pub use banner::{BannerAction, BannerController, BannerState};
pub use consent::ConsentStore;
pub use host::PageHost;
pub use storage::{KeyValueStore, MemoryStore, RedbStore};
