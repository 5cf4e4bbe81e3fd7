pub mod common;
pub mod drive;
pub mod elements;
pub mod page;
pub mod presentation;
pub mod requests;
pub mod shape;
pub mod sheets;
pub mod text;
pub mod text_element;
pub mod tool_inputs;
