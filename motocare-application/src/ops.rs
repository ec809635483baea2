pub mod account_locks;
pub mod snapshot_stream_hub;

pub use account_locks::AccountLocks;
pub use snapshot_stream_hub::SnapshotStreamHub;
