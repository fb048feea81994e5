pub mod memory;
pub mod pg;
pub mod repo;
pub mod repo_types;

pub use memory::MemoryUserStore;
pub use pg::PgUserStore;
pub use repo::{StoreError, UserStore};
pub use repo_types::{NewUser, Photo, User};
