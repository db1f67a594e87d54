pub mod avatar;
pub mod handlers;
pub mod validation;
