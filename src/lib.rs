pub mod comment;
pub mod post;
pub mod storage;
pub mod store;


pub use comment::Comment;
pub use post::Post;
pub use storage::{MemoryStorage, SqliteStorage, Storage, StorageError};
pub use store::PostStore;
