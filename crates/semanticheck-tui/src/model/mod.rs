pub mod field;
pub mod paste;
