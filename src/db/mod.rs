pub mod directory;
pub mod text_format;
pub mod file_store;

pub use directory::ContactDirectory;
pub use file_store::SaveOutcome;
pub use text_format::ContactRecord;
