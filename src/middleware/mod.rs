/// HTTP middleware
pub mod trusted_host;

pub use trusted_host::TrustedHost;
