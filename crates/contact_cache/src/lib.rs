#![forbid(unsafe_code)]

pub mod session;
pub mod slug;
pub mod store;
pub mod validate;

pub use session::{visible_contacts, FavoriteSet, FilterMode};
pub use slug::slugify;
pub use store::{CacheBackend, CacheError, FileBackend, MemoryBackend, SlugCache};
pub use validate::{check_first_name, ValidationFailure};
