// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! UML Tutor: the guided class-diagram exercise.
//!
//! A lesson's scenario text names the classes the learner must model. The learner edits a
//! [`model::Diagram`] through the pure operations in [`ops`], the [`exercise`] controller keeps
//! the session state, saves after every edit and gates submission on [`readiness`].

pub mod config;
pub mod curriculum;
pub mod exercise;
pub mod layout;
pub mod model;
pub mod ops;
pub mod progress;
pub mod readiness;
pub mod render;
pub mod scenario;
pub mod store;
pub mod telemetry;
