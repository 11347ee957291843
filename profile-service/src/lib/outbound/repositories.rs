pub mod profile;

pub use profile::PostgresProfileRepository;
