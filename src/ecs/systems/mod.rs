pub mod celebration;
pub mod matcher;
pub mod occasions;
