pub mod types;
pub mod provider;
pub mod digest;
pub mod ecdsa;
pub mod aead;
pub mod kdf;
pub mod signature;

pub use types::*;
pub use provider::*;
pub use signature::*;
