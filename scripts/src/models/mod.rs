pub mod args;
pub mod draft;
