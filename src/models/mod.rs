mod filter;
mod page;
mod user;

pub use filter::UserFilter;
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use user::{User, UserChanges, UserRow};
