// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The guided diagram exercise for one lesson.
//!
//! [`ExerciseController`] owns the current [`ExerciseSession`] and threads every edit through
//! the pure diagram ops, re-rendering the solution text and persisting the diagram after each
//! one. Nothing here fails loudly: unknown ids and invalid edits leave the diagram unchanged,
//! storage problems are logged, and an under-ready submission only sets the feedback text.

use serde::Deserialize;
use tracing::{debug, info};

use crate::curriculum::Lesson;
use crate::layout::{layout_classes_with, ClassLayout, GridLayoutOptions};
use crate::model::{ClassId, ClassNode, Diagram, RelationshipKind};
use crate::ops::{initialize, split_member_lines, try_apply_op, ClassPatch, DiagramOp, OpRejected};
use crate::progress::CompletionSink;
use crate::readiness::{self, Readiness};
use crate::render::render_solution;
use crate::scenario::required_class_names;
use crate::store::{DiagramPersistence, KeyValueStore};

pub const UNDER_READY_FEEDBACK: &str = "Add at least 3 classes, connect them with a relationship, \
     and include the required classes from the scenario.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExercisePhase {
    #[default]
    Uninitialized,
    Active,
    Submitted,
}

/// Points awarded on the first successful submission of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub clean_points: u32,
    pub hinted_points: u32,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            clean_points: 150,
            hinted_points: 100,
        }
    }
}

impl Rewards {
    pub fn points_for(&self, hints_used: usize) -> u32 {
        if hints_used == 0 {
            self.clean_points
        } else {
            self.hinted_points
        }
    }
}

/// Side-panel edit buffer for the selected class.
///
/// Changes stay here until [`ExerciseController::save_node_edits`] copies them into the diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeEditor {
    pub title: String,
    pub attributes_text: String,
    pub methods_text: String,
}

impl NodeEditor {
    pub fn from_class(class: &ClassNode) -> Self {
        Self {
            title: class.name().to_owned(),
            attributes_text: class.attributes().join("\n"),
            methods_text: class.methods().join("\n"),
        }
    }

    /// An empty title keeps the class's current name.
    pub fn to_patch(&self) -> ClassPatch {
        ClassPatch {
            name: (!self.title.is_empty()).then(|| self.title.clone()),
            attributes: Some(split_member_lines(&self.attributes_text)),
            methods: Some(split_member_lines(&self.methods_text)),
        }
    }
}

/// Pending relationship form. Endpoints are unset only when the diagram has no classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipDraft {
    pub from_id: Option<ClassId>,
    pub to_id: Option<ClassId>,
    pub kind: RelationshipKind,
    pub label: String,
}

impl RelationshipDraft {
    /// First class to second class, or first to first when there is only one.
    pub fn for_diagram(diagram: &Diagram) -> Self {
        let first = diagram.classes().first().map(|class| class.id().clone());
        let second = diagram
            .classes()
            .get(1)
            .map(|class| class.id().clone())
            .or_else(|| first.clone());
        Self {
            from_id: first,
            to_id: second,
            kind: RelationshipKind::default(),
            label: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected(OpRejected),
    NothingSelected,
    Inactive,
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No lesson has been started.
    Inactive,
    NotReady(Readiness),
    /// First successful submission; the completion was reported with these points.
    Completed { points: u32 },
    /// Ready, but the lesson was already completed earlier.
    AlreadyCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSession {
    lesson: Lesson,
    diagram: Diagram,
    solution_text: String,
    hints_used: usize,
    show_reference: bool,
    submitted: bool,
    feedback: String,
    selected_class_id: Option<ClassId>,
    editor: NodeEditor,
    draft: RelationshipDraft,
}

impl ExerciseSession {
    fn new(lesson: Lesson, diagram: Diagram) -> Self {
        let mut session = Self {
            lesson,
            solution_text: render_solution(&diagram),
            diagram,
            hints_used: 0,
            show_reference: false,
            submitted: false,
            feedback: String::new(),
            selected_class_id: None,
            editor: NodeEditor::default(),
            draft: RelationshipDraft::default(),
        };
        session.reset_panels();
        session
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn solution_text(&self) -> &str {
        &self.solution_text
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    pub fn revealed_hints(&self) -> &[String] {
        let hints = self.lesson.challenge().hints();
        &hints[..self.hints_used.min(hints.len())]
    }

    pub fn show_reference(&self) -> bool {
        self.show_reference
    }

    /// The reference solution while it is toggled on.
    pub fn reference_solution(&self) -> Option<&str> {
        self.show_reference.then(|| self.lesson.challenge().solution())
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn selected_class_id(&self) -> Option<&ClassId> {
        self.selected_class_id.as_ref()
    }

    pub fn selected_class(&self) -> Option<&ClassNode> {
        self.selected_class_id
            .as_ref()
            .and_then(|class_id| self.diagram.class(class_id))
    }

    pub fn editor(&self) -> &NodeEditor {
        &self.editor
    }

    pub fn draft(&self) -> &RelationshipDraft {
        &self.draft
    }

    pub fn readiness(&self) -> Readiness {
        readiness::evaluate(&self.diagram, self.lesson.challenge().scenario())
    }

    fn replace_diagram(&mut self, diagram: Diagram) {
        self.solution_text = render_solution(&diagram);
        self.diagram = diagram;
    }

    /// Selects the first class and resets the edit buffer and relationship form to match.
    fn reset_panels(&mut self) {
        let first = self.diagram.first_class();
        self.selected_class_id = first.map(|class| class.id().clone());
        self.editor = first.map(NodeEditor::from_class).unwrap_or_default();
        self.draft = RelationshipDraft::for_diagram(&self.diagram);
    }
}

pub struct ExerciseController<S> {
    persistence: DiagramPersistence<S>,
    rewards: Rewards,
    layout_options: GridLayoutOptions,
    phase: ExercisePhase,
    session: Option<ExerciseSession>,
}

impl<S: KeyValueStore> ExerciseController<S> {
    pub fn new(persistence: DiagramPersistence<S>) -> Self {
        Self {
            persistence,
            rewards: Rewards::default(),
            layout_options: GridLayoutOptions::default(),
            phase: ExercisePhase::Uninitialized,
            session: None,
        }
    }

    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_layout_options(mut self, layout_options: GridLayoutOptions) -> Self {
        self.layout_options = layout_options;
        self
    }

    pub fn phase(&self) -> ExercisePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&ExerciseSession> {
        self.session.as_ref()
    }

    pub fn persistence(&self) -> &DiagramPersistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut DiagramPersistence<S> {
        &mut self.persistence
    }

    pub fn into_persistence(self) -> DiagramPersistence<S> {
        self.persistence
    }

    /// Opens `lesson`, restoring its saved diagram or starting from the scenario template.
    ///
    /// Hints revealed in earlier sessions stay revealed. Submission state and feedback start
    /// fresh.
    pub fn start(&mut self, lesson: &Lesson) -> &ExerciseSession {
        let (diagram, restored) = match self.persistence.load(lesson.id()) {
            Some(diagram) => (diagram, true),
            None => (template_diagram(lesson), false),
        };
        let hints_used = self
            .persistence
            .load_hints_used(lesson.id())
            .min(lesson.challenge().hints().len());
        info!(
            target: "uml_tutor::exercise",
            lesson_id = %lesson.id(),
            restored,
            hints_used,
            classes = diagram.classes().len(),
            relationships = diagram.relationships().len(),
            "exercise started"
        );

        let mut session = ExerciseSession::new(lesson.clone(), diagram);
        session.hints_used = hints_used;
        self.phase = ExercisePhase::Active;
        self.session.insert(session)
    }

    /// Applies `op` to the current diagram and persists the result.
    ///
    /// A rejected op still re-saves the unchanged diagram. Editing a submitted exercise
    /// makes it active again.
    pub fn edit(&mut self, op: DiagramOp) -> EditOutcome {
        let Some(session) = self.session.as_mut() else {
            return EditOutcome::Inactive;
        };

        let outcome = match try_apply_op(&session.diagram, &op) {
            Ok(next) => {
                session.replace_diagram(next);
                EditOutcome::Applied
            }
            Err(reason) => {
                debug!(target: "uml_tutor::exercise", %reason, "edit rejected; diagram unchanged");
                EditOutcome::Rejected(reason)
            }
        };

        self.persistence.save(session.lesson.id(), &session.diagram);
        if self.phase == ExercisePhase::Submitted {
            self.phase = ExercisePhase::Active;
        }
        outcome
    }

    /// Selects a class and loads it into the edit buffer. Unknown ids change nothing.
    pub fn select_class(&mut self, class_id: &ClassId) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(class) = session.diagram.class(class_id) else {
            return false;
        };
        session.editor = NodeEditor::from_class(class);
        session.selected_class_id = Some(class_id.clone());
        true
    }

    pub fn editor_mut(&mut self) -> Option<&mut NodeEditor> {
        self.session.as_mut().map(|session| &mut session.editor)
    }

    /// Copies the edit buffer into the selected class.
    pub fn save_node_edits(&mut self) -> EditOutcome {
        let Some(session) = self.session.as_ref() else {
            return EditOutcome::Inactive;
        };
        let Some(class_id) = session.selected_class().map(|class| class.id().clone()) else {
            return EditOutcome::NothingSelected;
        };
        let patch = session.editor.to_patch();
        self.edit(DiagramOp::UpdateClass { class_id, patch })
    }

    pub fn draft_mut(&mut self) -> Option<&mut RelationshipDraft> {
        self.session.as_mut().map(|session| &mut session.draft)
    }

    /// Adds the drafted relationship; an accepted add clears the draft label.
    pub fn add_relationship_from_draft(&mut self) -> EditOutcome {
        let Some(session) = self.session.as_ref() else {
            return EditOutcome::Inactive;
        };
        let draft = session.draft.clone();
        let (Some(from_id), Some(to_id)) = (draft.from_id, draft.to_id) else {
            return EditOutcome::Rejected(OpRejected::MissingEndpoint);
        };

        let outcome = self.edit(DiagramOp::AddRelationship {
            from_id,
            to_id,
            kind: draft.kind,
            label: draft.label,
        });
        if outcome.is_applied() {
            if let Some(session) = self.session.as_mut() {
                session.draft.label.clear();
            }
        }
        outcome
    }

    /// Reveals the next hint, if any remain, and remembers the count for later sessions.
    pub fn reveal_hint(&mut self) -> Option<&str> {
        let session = self.session.as_mut()?;
        let hints = session.lesson.challenge().hints();
        if session.hints_used >= hints.len() {
            return None;
        }
        session.hints_used += 1;
        self.persistence.save_hints_used(session.lesson.id(), session.hints_used);
        hints.get(session.hints_used - 1).map(String::as_str)
    }

    /// Flips the reference solution panel and returns whether it is now shown.
    pub fn toggle_reference(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.show_reference = !session.show_reference;
        session.show_reference
    }

    pub fn readiness(&self) -> Option<Readiness> {
        self.session.as_ref().map(ExerciseSession::readiness)
    }

    pub fn layout(&self) -> Option<ClassLayout> {
        self.session
            .as_ref()
            .map(|session| layout_classes_with(session.diagram.classes(), &self.layout_options))
    }

    /// Submits the diagram.
    ///
    /// The first ready submission per lesson reports a completion to `sink`; later ones do not.
    pub fn submit(&mut self, sink: &mut dyn CompletionSink) -> SubmitOutcome {
        let Some(session) = self.session.as_mut() else {
            return SubmitOutcome::Inactive;
        };

        let readiness = session.readiness();
        session.submitted = true;
        self.phase = ExercisePhase::Submitted;

        if !readiness.is_ready() {
            session.feedback = UNDER_READY_FEEDBACK.to_owned();
            info!(
                target: "uml_tutor::exercise",
                lesson_id = %session.lesson.id(),
                classes_ok = readiness.classes_ok,
                relationships_ok = readiness.relationships_ok,
                required_ok = readiness.required_ok,
                "submission not ready"
            );
            return SubmitOutcome::NotReady(readiness);
        }

        session.feedback.clear();
        let lesson_id = session.lesson.id();
        if sink.is_challenge_completed(lesson_id) {
            info!(
                target: "uml_tutor::exercise",
                lesson_id = %lesson_id,
                "resubmitted completed challenge"
            );
            return SubmitOutcome::AlreadyCompleted;
        }

        let points = self.rewards.points_for(session.hints_used);
        sink.challenge_completed(lesson_id, points);
        info!(
            target: "uml_tutor::exercise",
            lesson_id = %lesson_id,
            points,
            hints_used = session.hints_used,
            "challenge submitted"
        );
        SubmitOutcome::Completed { points }
    }

    /// Starts the lesson over from its scenario template and forgets the saved diagram.
    ///
    /// Revealed hints stay revealed.
    pub fn clear(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let fresh = template_diagram(session.lesson());
        session.replace_diagram(fresh);
        session.reset_panels();
        session.submitted = false;
        session.feedback.clear();
        self.persistence.clear(session.lesson.id());
        self.phase = ExercisePhase::Active;
        info!(target: "uml_tutor::exercise", lesson_id = %session.lesson.id(), "exercise cleared");
    }
}

/// Fresh diagram with one class per class name required by the lesson scenario.
pub fn template_diagram(lesson: &Lesson) -> Diagram {
    initialize(&required_class_names(lesson.challenge().scenario()))
}
