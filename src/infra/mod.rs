// Infrastructure adapters behind the application ports

pub mod fs_snapshot_store;
pub mod memory_snapshot_source;

pub use fs_snapshot_store::FsSnapshotStore;
pub use memory_snapshot_source::MemorySnapshotSource;
