pub mod store;
pub mod types;
pub mod validate;

pub use store::PageStore;
pub use types::{Fields, Page, PageSeed, PageSummary, PagesFile};
