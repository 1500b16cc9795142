pub mod json;
pub mod result;
pub mod terminal;
