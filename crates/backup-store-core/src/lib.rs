//! Backup Store Core Library
//!
//! This crate stores, lists, retrieves, and deletes backup archive files in a
//! remote object store, and mediates access to them via time-limited signed
//! URLs so that large transfers bypass the application server.

pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{Error, Result, StorageError};
pub use store::{
    create_store, BackupFile, BackupStore, RemoteBackupStore,
    DOWNLOAD_URL_EXPIRES_AFTER_SECONDS, UPLOAD_URL_EXPIRES_AFTER_SECONDS,
};
