pub mod confirm;
pub mod credentials;

pub use confirm::{AutoConfirm, Confirm};
pub use credentials::{
    CredentialError, CredentialStore, FileCredentialStore, KeyringCredentialStore,
    MemoryCredentialStore,
};
