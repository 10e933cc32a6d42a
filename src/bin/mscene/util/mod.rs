pub mod select;
pub mod text;
