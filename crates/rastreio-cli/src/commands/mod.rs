pub mod batch;
pub mod layout;
pub mod parse;
