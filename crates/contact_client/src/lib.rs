#![forbid(unsafe_code)]

pub mod client;
pub mod decode;
pub mod documents;
pub mod error;

pub use client::{
    ContactStore, ContactStoreClient, ContactStoreConfig, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};
pub use error::{RemoteError, RemoteErrorKind};
