// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! UML Tutor CLI entrypoint.
//!
//! Every lesson command opens the lesson from the built-in catalog, restores the learner's saved
//! diagram from the data directory, performs one action and exits. Edits are saved as they
//! happen, so a sequence of invocations behaves like one editing session.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use uml_tutor::config::Config;
use uml_tutor::curriculum::{Catalog, Lesson};
use uml_tutor::exercise::{EditOutcome, ExerciseController, ExerciseSession, SubmitOutcome};
use uml_tutor::model::{diagram_json_schema, ClassId, MemberKind, RelationshipId, RelationshipKind};
use uml_tutor::ops::DiagramOp;
use uml_tutor::progress::ProgressLedger;
use uml_tutor::readiness::Readiness;
use uml_tutor::render::render_svg;
use uml_tutor::store::{DiagramPersistence, FileStore, WriteDurability};

/// Guided UML class-diagram exercises
#[derive(Parser, Debug)]
#[command(name = "uml-tutor", version, about = "Guided UML class-diagram exercises")]
struct Cli {
    /// Path to a configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding saved diagrams and progress (overrides `storage.dir`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Flush saved files to stable storage where supported
    #[arg(long, global = true)]
    durable_writes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the challenge lessons
    Lessons,
    /// Show a challenge, the current diagram and its readiness
    Show { lesson: String },
    /// Print the text listing of the current diagram
    Solution { lesson: String },
    /// Print the grid layout of the current diagram as JSON
    Layout { lesson: String },
    /// Render the current diagram as SVG
    Svg {
        lesson: String,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the submission checklist as JSON
    Readiness { lesson: String },
    /// Rename a class (by id or current name)
    Rename {
        lesson: String,
        class: String,
        name: String,
    },
    /// Append an attribute to a class
    AddAttribute {
        lesson: String,
        class: String,
        text: String,
    },
    /// Remove an attribute by position (0-based)
    RemoveAttribute {
        lesson: String,
        class: String,
        index: usize,
    },
    /// Append a method to a class
    AddMethod {
        lesson: String,
        class: String,
        text: String,
    },
    /// Remove a method by position (0-based)
    RemoveMethod {
        lesson: String,
        class: String,
        index: usize,
    },
    /// Connect two classes
    AddRelationship {
        lesson: String,
        from: String,
        to: String,
        /// association, aggregation, composition, inheritance or realization
        #[arg(long, default_value = "association")]
        kind: RelationshipKind,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Remove a relationship by id
    RemoveRelationship { lesson: String, relationship: String },
    /// Replace a class's title and member lists in one step
    EditClass {
        lesson: String,
        class: String,
        /// New title; omitted or empty keeps the current name
        #[arg(long)]
        title: Option<String>,
        /// Attributes, one per line
        #[arg(long)]
        attributes: Option<String>,
        /// Methods, one per line
        #[arg(long)]
        methods: Option<String>,
    },
    /// Reveal hints; revealed hints are remembered and lower the reward
    Hint {
        lesson: String,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Print the reference solution
    Reference { lesson: String },
    /// Submit the current diagram
    Submit { lesson: String },
    /// Discard the saved diagram and start from the scenario template
    Clear { lesson: String },
    /// Print the JSON schema of a saved diagram
    Schema,
}

impl Command {
    fn lesson_id(&self) -> Option<&str> {
        match self {
            Self::Lessons | Self::Schema => None,
            Self::Show { lesson }
            | Self::Solution { lesson }
            | Self::Layout { lesson }
            | Self::Svg { lesson, .. }
            | Self::Readiness { lesson }
            | Self::Rename { lesson, .. }
            | Self::AddAttribute { lesson, .. }
            | Self::RemoveAttribute { lesson, .. }
            | Self::AddMethod { lesson, .. }
            | Self::RemoveMethod { lesson, .. }
            | Self::AddRelationship { lesson, .. }
            | Self::RemoveRelationship { lesson, .. }
            | Self::EditClass { lesson, .. }
            | Self::Hint { lesson, .. }
            | Self::Reference { lesson }
            | Self::Submit { lesson }
            | Self::Clear { lesson } => Some(lesson),
        }
    }
}

type Controller = ExerciseController<FileStore>;

#[derive(Serialize)]
struct ReadinessReport {
    #[serde(flatten)]
    readiness: Readiness,
    ready: bool,
}

fn main() {
    uml_tutor::telemetry::init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("uml-tutor: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let catalog = Catalog::builtin()?;

    match &cli.command {
        Command::Lessons => {
            for lesson in catalog.lessons() {
                println!("{}\t{}\t{}", lesson.id(), lesson.title(), lesson.challenge().title());
            }
            return Ok(());
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&diagram_json_schema())?);
            return Ok(());
        }
        _ => {}
    }

    let lesson_id = cli.command.lesson_id().unwrap_or_default();
    let lesson = catalog
        .lesson(lesson_id)
        .ok_or_else(|| format!("unknown lesson {lesson_id:?} (see `uml-tutor lessons`)"))?
        .clone();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage.dir = dir;
    }
    let durability = if cli.durable_writes {
        WriteDurability::Durable
    } else {
        config.storage.durability()
    };
    let store = FileStore::new(&config.storage.dir).with_durability(durability);
    let mut controller = ExerciseController::new(DiagramPersistence::with_key_prefix(
        store,
        config.storage.key_prefix.clone(),
    ))
    .with_rewards(config.rewards)
    .with_layout_options(config.layout);
    controller.start(&lesson);

    run_lesson_command(&mut controller, &lesson, cli.command)
}

fn run_lesson_command(
    controller: &mut Controller,
    lesson: &Lesson,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Lessons | Command::Schema => {}
        Command::Show { .. } => print_overview(controller),
        Command::Solution { .. } => println!("{}", session_of(controller)?.solution_text()),
        Command::Layout { .. } => {
            let layout = controller.layout().ok_or("no active exercise")?;
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        Command::Svg { output, .. } => {
            let layout = controller.layout().ok_or("no active exercise")?;
            let svg = render_svg(session_of(controller)?.diagram(), &layout)?;
            match output {
                Some(path) => std::fs::write(&path, svg)?,
                None => print!("{svg}"),
            }
        }
        Command::Readiness { .. } => {
            let readiness = controller.readiness().ok_or("no active exercise")?;
            let report = ReadinessReport {
                readiness,
                ready: readiness.is_ready(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Rename { class, name, .. } => {
            let class_id = resolve_class(controller, &class)?;
            apply(controller, DiagramOp::RenameClass { class_id, name });
        }
        Command::AddAttribute { class, text, .. } => {
            add_member(controller, &class, MemberKind::Attribute, text)?;
        }
        Command::AddMethod { class, text, .. } => {
            add_member(controller, &class, MemberKind::Method, text)?;
        }
        Command::RemoveAttribute { class, index, .. } => {
            remove_member(controller, &class, MemberKind::Attribute, index)?;
        }
        Command::RemoveMethod { class, index, .. } => {
            remove_member(controller, &class, MemberKind::Method, index)?;
        }
        Command::AddRelationship {
            from,
            to,
            kind,
            label,
            ..
        } => {
            let from_id = resolve_class(controller, &from)?;
            let to_id = resolve_class(controller, &to)?;
            apply(
                controller,
                DiagramOp::AddRelationship {
                    from_id,
                    to_id,
                    kind,
                    label,
                },
            );
        }
        Command::RemoveRelationship { relationship, .. } => {
            let relationship_id = RelationshipId::new(relationship)?;
            apply(controller, DiagramOp::RemoveRelationship { relationship_id });
        }
        Command::EditClass {
            class,
            title,
            attributes,
            methods,
            ..
        } => {
            let class_id = resolve_class(controller, &class)?;
            controller.select_class(&class_id);
            if let Some(editor) = controller.editor_mut() {
                if let Some(title) = title {
                    editor.title = title;
                }
                if let Some(attributes) = attributes {
                    editor.attributes_text = attributes;
                }
                if let Some(methods) = methods {
                    editor.methods_text = methods;
                }
            }
            let outcome = controller.save_node_edits();
            report_edit(controller, outcome);
        }
        Command::Hint { count, .. } => {
            for _ in 0..count {
                if controller.reveal_hint().is_none() {
                    break;
                }
            }
            let session = session_of(controller)?;
            if session.revealed_hints().is_empty() {
                println!("This challenge has no hints.");
            }
            for (idx, hint) in session.revealed_hints().iter().enumerate() {
                println!("{}. {hint}", idx + 1);
            }
        }
        Command::Reference { .. } => {
            controller.toggle_reference();
            let reference = session_of(controller)?.reference_solution().unwrap_or_default();
            println!("{reference}");
        }
        Command::Submit { .. } => {
            let mut ledger = ProgressLedger::load(controller.persistence().store());
            match controller.submit(&mut ledger) {
                SubmitOutcome::Inactive => return Err("no active exercise".into()),
                SubmitOutcome::NotReady(_) => {
                    println!("{}", session_of(controller)?.feedback());
                }
                SubmitOutcome::Completed { points } => {
                    ledger.save(controller.persistence_mut().store_mut())?;
                    println!("Challenge completed! +{points} points (total {}).", ledger.points());
                    for badge in ledger.badges() {
                        println!("Badge: {}", badge.title());
                    }
                }
                SubmitOutcome::AlreadyCompleted => {
                    println!(
                        "Challenge {} was already completed (total {} points).",
                        lesson.id(),
                        ledger.points()
                    );
                }
            }
        }
        Command::Clear { .. } => {
            controller.clear();
            println!("{}", session_of(controller)?.solution_text());
        }
    }
    Ok(())
}

fn session_of(controller: &Controller) -> Result<&ExerciseSession, Box<dyn Error>> {
    controller.session().ok_or_else(|| "no active exercise".into())
}

fn print_overview(controller: &Controller) {
    let Some(session) = controller.session() else {
        return;
    };
    let challenge = session.lesson().challenge();
    let readiness = session.readiness();
    let mark = |ok: bool| if ok { "x" } else { " " };

    println!("{} ({})", challenge.title(), session.lesson().id());
    println!("{}", challenge.description());
    println!();
    println!("{}", challenge.scenario());
    println!();
    println!("{}", session.solution_text());
    println!();
    println!("[{}] at least 3 classes", mark(readiness.classes_ok));
    println!("[{}] at least 1 relationship", mark(readiness.relationships_ok));
    println!("[{}] required classes from the scenario", mark(readiness.required_ok));
    println!();
    for class in session.diagram().classes() {
        println!("class {}\t{}", class.id(), class.name());
    }
    for relationship in session.diagram().relationships() {
        println!(
            "relationship {}\t{} -> {}",
            relationship.id(),
            relationship.from_id(),
            relationship.to_id()
        );
    }
}

/// Accepts a class id, or the name of a class in the current diagram.
fn resolve_class(controller: &Controller, reference: &str) -> Result<ClassId, Box<dyn Error>> {
    let diagram = session_of(controller)?.diagram();
    if let Some(class) = diagram
        .classes()
        .iter()
        .find(|class| class.id().as_str() == reference)
        .or_else(|| diagram.classes().iter().find(|class| class.name() == reference))
    {
        return Ok(class.id().clone());
    }
    Ok(ClassId::new(reference)?)
}

fn add_member(
    controller: &mut Controller,
    class: &str,
    kind: MemberKind,
    text: String,
) -> Result<(), Box<dyn Error>> {
    let class_id = resolve_class(controller, class)?;
    apply(controller, DiagramOp::AddMember { class_id, kind, text });
    Ok(())
}

fn remove_member(
    controller: &mut Controller,
    class: &str,
    kind: MemberKind,
    index: usize,
) -> Result<(), Box<dyn Error>> {
    let class_id = resolve_class(controller, class)?;
    apply(controller, DiagramOp::RemoveMember { class_id, kind, index });
    Ok(())
}

fn apply(controller: &mut Controller, op: DiagramOp) {
    let outcome = controller.edit(op);
    report_edit(controller, outcome);
}

fn report_edit(controller: &Controller, outcome: EditOutcome) {
    match outcome {
        EditOutcome::Applied => {
            if let Some(session) = controller.session() {
                println!("{}", session.solution_text());
            }
        }
        EditOutcome::Rejected(reason) => eprintln!("uml-tutor: edit ignored: {reason}"),
        EditOutcome::NothingSelected => eprintln!("uml-tutor: no class selected"),
        EditOutcome::Inactive => eprintln!("uml-tutor: no active exercise"),
    }
}
