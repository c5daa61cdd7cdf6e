// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use super::{KeyValueStore, StoreError};
use crate::model::{Diagram, LessonId};

pub const DEFAULT_KEY_PREFIX: &str = "uml-challenge";

/// Per-lesson diagram entries stored as JSON under `<prefix>-<lessonId>`, plus the number of
/// revealed hints under `<prefix>-hints-<lessonId>`.
///
/// [`save`](Self::save), [`load`](Self::load) and [`clear`](Self::clear) never fail: storage
/// problems are logged at debug level and otherwise ignored. The `try_*` variants report them.
#[derive(Debug, Clone)]
pub struct DiagramPersistence<S> {
    store: S,
    key_prefix: String,
}

impl<S: KeyValueStore> DiagramPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key_prefix(store, DEFAULT_KEY_PREFIX)
    }

    pub fn with_key_prefix(store: S, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn key_for(&self, lesson_id: &LessonId) -> String {
        format!("{}-{}", self.key_prefix, lesson_id)
    }

    pub fn hints_key_for(&self, lesson_id: &LessonId) -> String {
        format!("{}-hints-{}", self.key_prefix, lesson_id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn try_save(&mut self, lesson_id: &LessonId, diagram: &Diagram) -> Result<(), StoreError> {
        let key = self.key_for(lesson_id);
        let json = serde_json::to_string(diagram).map_err(|source| StoreError::Json {
            key: key.clone(),
            source,
        })?;
        self.store.put(&key, &json)
    }

    pub fn save(&mut self, lesson_id: &LessonId, diagram: &Diagram) {
        if let Err(err) = self.try_save(lesson_id, diagram) {
            debug!(
                target: "uml_tutor::store",
                lesson_id = %lesson_id,
                error = %err,
                "diagram save failed"
            );
        }
    }

    /// Reads the saved diagram for `lesson_id`.
    ///
    /// `Ok(None)` when nothing is saved. Entries that are not a well-formed diagram (bad JSON,
    /// a missing `classes` or `relationships` field, dangling or duplicate ids) are errors.
    pub fn try_load(&self, lesson_id: &LessonId) -> Result<Option<Diagram>, StoreError> {
        let key = self.key_for(lesson_id);
        let Some(json) = self.store.get(&key)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Json { key, source })
    }

    /// Reads the saved diagram for `lesson_id`, treating anything unusable as absent.
    pub fn load(&self, lesson_id: &LessonId) -> Option<Diagram> {
        match self.try_load(lesson_id) {
            Ok(diagram) => diagram,
            Err(err) => {
                debug!(
                    target: "uml_tutor::store",
                    lesson_id = %lesson_id,
                    error = %err,
                    "saved diagram ignored"
                );
                None
            }
        }
    }

    pub fn try_save_hints_used(
        &mut self,
        lesson_id: &LessonId,
        hints_used: usize,
    ) -> Result<(), StoreError> {
        let key = self.hints_key_for(lesson_id);
        self.store.put(&key, &hints_used.to_string())
    }

    pub fn save_hints_used(&mut self, lesson_id: &LessonId, hints_used: usize) {
        if let Err(err) = self.try_save_hints_used(lesson_id, hints_used) {
            debug!(
                target: "uml_tutor::store",
                lesson_id = %lesson_id,
                error = %err,
                "hint count save failed"
            );
        }
    }

    /// Number of hints revealed so far for `lesson_id`; zero when nothing usable is saved.
    pub fn load_hints_used(&self, lesson_id: &LessonId) -> usize {
        let key = self.hints_key_for(lesson_id);
        match self.store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                debug!(
                    target: "uml_tutor::store",
                    lesson_id = %lesson_id,
                    error = %err,
                    "saved hint count ignored"
                );
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                debug!(
                    target: "uml_tutor::store",
                    lesson_id = %lesson_id,
                    error = %err,
                    "hint count load failed"
                );
                0
            }
        }
    }

    /// Forgets the saved diagram. The hint count is kept.
    pub fn try_clear(&mut self, lesson_id: &LessonId) -> Result<(), StoreError> {
        let key = self.key_for(lesson_id);
        self.store.remove(&key)
    }

    pub fn clear(&mut self, lesson_id: &LessonId) {
        if let Err(err) = self.try_clear(lesson_id) {
            debug!(
                target: "uml_tutor::store",
                lesson_id = %lesson_id,
                error = %err,
                "diagram clear failed"
            );
        }
    }
}
