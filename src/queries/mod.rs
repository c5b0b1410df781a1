pub mod contact_queries;
pub mod pagination;

pub use pagination::Page;
