// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Points and badges earned by completing challenges.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::LessonId;
use crate::store::{KeyValueStore, StoreError};

pub const PROGRESS_KEY: &str = "uml-progress";
pub const CHALLENGE_ACE_THRESHOLD: usize = 3;
pub const POINT_COLLECTOR_THRESHOLD: u32 = 500;

/// Receives challenge completions from the exercise controller.
pub trait CompletionSink {
    fn is_challenge_completed(&self, lesson_id: &LessonId) -> bool;

    /// Records a first completion of `lesson_id` worth `points`.
    fn challenge_completed(&mut self, lesson_id: &LessonId, points: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    ChallengeAce,
    PointCollector,
}

impl Badge {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChallengeAce => "challenge_ace",
            Self::PointCollector => "point_collector",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::ChallengeAce => "Challenge Ace",
            Self::PointCollector => "Point Collector",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressLedger {
    points: u32,
    challenges: BTreeSet<LessonId>,
    badges: Vec<Badge>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn completed_challenges(&self) -> &BTreeSet<LessonId> {
        &self.challenges
    }

    /// Unlocked badges, in unlock order.
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Reads the ledger saved under [`PROGRESS_KEY`]; a missing or unreadable entry starts fresh.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(PROGRESS_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|err| {
                debug!(target: "uml_tutor::progress", error = %err, "saved progress ignored");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(err) => {
                debug!(target: "uml_tutor::progress", error = %err, "progress load failed");
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let json = serde_json::to_string(self).map_err(|source| StoreError::Json {
            key: PROGRESS_KEY.to_owned(),
            source,
        })?;
        store.put(PROGRESS_KEY, &json)
    }

    fn unlock_earned_badges(&mut self) {
        let earned = [
            (Badge::ChallengeAce, self.challenges.len() >= CHALLENGE_ACE_THRESHOLD),
            (Badge::PointCollector, self.points >= POINT_COLLECTOR_THRESHOLD),
        ];
        for (badge, unlocked) in earned {
            if unlocked && !self.badges.contains(&badge) {
                info!(target: "uml_tutor::progress", badge = %badge, "badge unlocked");
                self.badges.push(badge);
            }
        }
    }
}

impl CompletionSink for ProgressLedger {
    fn is_challenge_completed(&self, lesson_id: &LessonId) -> bool {
        self.challenges.contains(lesson_id)
    }

    fn challenge_completed(&mut self, lesson_id: &LessonId, points: u32) {
        if !self.challenges.insert(lesson_id.clone()) {
            return;
        }
        self.points = self.points.saturating_add(points);
        info!(
            target: "uml_tutor::progress",
            lesson_id = %lesson_id,
            points,
            total = self.points,
            "challenge completed"
        );
        self.unlock_earned_badges();
    }
}
