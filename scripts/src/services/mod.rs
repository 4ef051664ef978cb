pub mod format;
pub mod layout;
pub mod logger;
pub mod style;
