pub mod jwt;
pub mod path;
pub mod role;
pub mod validate;
