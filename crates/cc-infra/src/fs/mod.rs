pub mod file_deleter;
pub mod layout_store;
pub mod storage_receiver;

pub use file_deleter::FsFileDeleter;
pub use layout_store::JsonLayoutStore;
pub use storage_receiver::FsStorageReceiver;
