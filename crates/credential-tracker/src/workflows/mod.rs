pub mod credentials;
pub mod transcript;
