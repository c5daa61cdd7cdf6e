// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Key-value persistence for challenge diagrams and learner progress.
//!
//! [`KeyValueStore`] is the swappable backend: [`MemoryStore`] for tests and embedding,
//! [`FileStore`] for the CLI. [`DiagramPersistence`] layers the per-lesson diagram entries on
//! top of either one.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod file;
pub mod memory;
pub mod persistence;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use persistence::{DiagramPersistence, DEFAULT_KEY_PREFIX};

/// String values addressed by string keys.
///
/// A missing key is `Ok(None)` on read and `Ok(())` on remove.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("JSON error for key {key}: {source}")]
    Json {
        key: String,
        source: serde_json::Error,
    },
    #[error("invalid storage key {key:?}")]
    InvalidKey { key: String },
    #[error("refusing to follow symlink at {}", path.display())]
    SymlinkRefused { path: PathBuf },
    #[error("storage quota exceeded writing {key} ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

impl WriteDurability {
    pub fn from_durable_flag(durable: bool) -> Self {
        if durable {
            Self::Durable
        } else {
            Self::BestEffort
        }
    }
}
