pub mod authority;
pub mod repositories;
