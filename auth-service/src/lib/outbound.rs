pub mod profiles;
pub mod repositories;
