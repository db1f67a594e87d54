pub mod document;
pub mod handlers;
pub mod validation;
