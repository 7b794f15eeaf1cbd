//! End-to-end command flows through the console

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use tpa_console::command::DELETE_PROMPT;
use tpa_console::prelude::*;
use tpa_console::{CommandKind, ConsoleError, ProgramSummary, RecordingNotifier};
use tpa_model::{ProgramDraft, ProgramId, ProgramStatus, ProgramType};
use tpa_store::{MemoryStorage, ProgramQuery, StoreConfig};
use tpa_test_utils::{ai_basics_draft, draft_named, sample_drafts};

fn console_with(confirmation: impl Confirmation + 'static) -> (Console<MemoryStorage>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let console = Console::open(
        MemoryStorage::new(),
        &StoreConfig::default(),
        notifier.clone(),
        confirmation,
    )
    .unwrap();
    (console, notifier)
}

fn seeded_console() -> (Console<MemoryStorage>, RecordingNotifier) {
    let (mut console, notifier) = console_with(AutoConfirm::yes());
    for draft in sample_drafts() {
        console.dispatch(Command::Add(draft)).unwrap();
    }
    notifier.clear();
    (console, notifier)
}

fn added_id(outcome: CommandOutcome) -> ProgramId {
    match outcome {
        CommandOutcome::Added(record) => record.id().clone(),
        other => panic!("expected Added, got {other:?}"),
    }
}

#[test]
fn add_projects_card() {
    let (mut console, notifier) = console_with(AutoConfirm::yes());
    console.dispatch(Command::Add(ai_basics_draft())).unwrap();

    let view = console.view();
    assert_eq!(view.len(), 1);
    let card = &view.cards()[0];
    assert_eq!(card.name, "AI Basics");
    assert_eq!(card.type_label, "Technical");
    assert_eq!(card.start_date, "10 Jan 2025");
    assert_eq!(card.duration, "4 weeks");
    assert_eq!(card.capacity, "20 participants");
    assert_eq!(card.cost, "₹5,00,000");
    assert_eq!(card.status_label, "Scheduled");
    assert_eq!(card.status_class, "scheduled");

    let last = notifier.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Success);
    assert_eq!(last.message, "Program added successfully!");
}

#[test]
fn invalid_add_notifies_error_and_stores_nothing() {
    let (mut console, notifier) = console_with(AutoConfirm::yes());
    let err = console.dispatch(Command::Add(draft_named("AI"))).unwrap_err();

    assert!(err.store_error().unwrap().is_validation());
    assert!(console.store().is_empty());
    assert!(console.view().is_empty());

    let last = notifier.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(last.message, "Program name must be at least 3 characters long");
}

#[test]
fn every_violation_is_reported_together() {
    let (mut console, notifier) = console_with(AutoConfirm::yes());
    let draft = ProgramDraft::new("AI").with_duration(0);
    console.dispatch(Command::Add(draft)).unwrap_err();

    let message = notifier.last().unwrap().message;
    assert!(message.contains("Program name must be at least 3 characters long"));
    assert!(message.contains("Please select a program type"));
    assert!(message.contains("Duration must be at least 1 week"));
}

#[test]
fn delete_asks_first() {
    let prompts = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&prompts);
    let (mut console, notifier) = console_with(move |prompt: &str| {
        seen.borrow_mut().push(prompt.to_string());
        true
    });
    let id = added_id(console.dispatch(Command::Add(ai_basics_draft())).unwrap());

    let outcome = console.dispatch(Command::Delete { id: id.clone() }).unwrap();
    assert!(matches!(outcome, CommandOutcome::Deleted(ref r) if r.id() == &id));
    assert_eq!(*prompts.borrow(), vec![DELETE_PROMPT.to_string()]);
    assert_eq!(notifier.last().unwrap().message, "Program deleted successfully");
    assert!(console.view().is_empty());
}

#[test]
fn refused_delete_keeps_program() {
    let (mut console, notifier) = console_with(AutoConfirm::no());
    let id = added_id(console.dispatch(Command::Add(ai_basics_draft())).unwrap());

    let outcome = console.dispatch(Command::Delete { id: id.clone() }).unwrap();
    assert_eq!(outcome, CommandOutcome::DeleteCancelled(id));
    assert_eq!(console.store().len(), 1);

    let last = notifier.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Info);
    assert_eq!(last.message, "Deletion cancelled");
}

#[test]
fn delete_unknown_id_is_not_found() {
    let (mut console, notifier) = seeded_console();
    let err = console
        .dispatch(Command::Delete {
            id: ProgramId::new("missing"),
        })
        .unwrap_err();

    assert!(err.store_error().unwrap().is_not_found());
    assert_eq!(console.store().len(), 4);
    assert_eq!(notifier.messages(), vec!["Program not found"]);
}

#[test]
fn load_then_edit() {
    let (mut console, notifier) = console_with(AutoConfirm::yes());
    let id = added_id(console.dispatch(Command::Add(ai_basics_draft())).unwrap());

    let CommandOutcome::Editing { id: editing, draft } =
        console.dispatch(Command::Load { id: id.clone() }).unwrap()
    else {
        panic!("expected Editing");
    };
    assert_eq!(editing, id);
    assert_eq!(draft, ai_basics_draft());
    assert_eq!(notifier.last().unwrap().message, "Edit mode activated");

    let draft = draft.with_duration(6).with_program_cost(0);
    let outcome = console
        .dispatch(Command::Edit {
            id: id.clone(),
            draft,
        })
        .unwrap();
    let CommandOutcome::Updated(record) = outcome else {
        panic!("expected Updated");
    };
    assert_eq!(record.id(), &id);
    assert_eq!(record.duration(), 6);
    assert_eq!(record.program_cost(), 0);
    assert_eq!(record.status(), ProgramStatus::Scheduled);
    assert_eq!(notifier.last().unwrap().message, "Program updated successfully!");
}

#[test]
fn query_and_refresh() {
    let (mut console, notifier) = seeded_console();

    let outcome = console
        .dispatch(Command::Query(ProgramQuery::new().with_search("ai")))
        .unwrap();
    let CommandOutcome::Listed(view) = outcome else {
        panic!("expected Listed");
    };
    let names: Vec<&str> = view.cards().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["AI Basics", "Leadership Training", "Applied AI for Finance"]);
    assert_eq!(console.view(), view);
    assert!(notifier.notifications().is_empty());

    let outcome = console
        .dispatch(Command::Query(
            ProgramQuery::new()
                .with_search("ai")
                .with_type(ProgramType::Leadership),
        ))
        .unwrap();
    let CommandOutcome::Listed(view) = outcome else {
        panic!("expected Listed");
    };
    assert_eq!(view.len(), 1);

    let CommandOutcome::Refreshed(view) = console.dispatch(Command::Refresh).unwrap() else {
        panic!("expected Refreshed");
    };
    assert_eq!(view.len(), 4);
    assert!(console.query().is_unfiltered());
    assert_eq!(notifier.messages(), vec!["Programs list refreshed"]);
}

#[test]
fn empty_query_shows_placeholder() {
    let (mut console, _) = seeded_console();
    let outcome = console
        .dispatch(Command::Query(ProgramQuery::new().with_search("zzz")))
        .unwrap();
    let CommandOutcome::Listed(view) = outcome else {
        panic!("expected Listed");
    };
    assert!(view.is_empty());
    assert_eq!(
        view.to_string(),
        "No programs found. Add your first program using the form above."
    );
}

#[test]
fn status_moves_forward_only() {
    let (mut console, notifier) = console_with(AutoConfirm::yes());
    let id = added_id(console.dispatch(Command::Add(ai_basics_draft())).unwrap());

    console
        .dispatch(Command::SetStatus {
            id: id.clone(),
            status: ProgramStatus::Completed,
        })
        .unwrap();
    assert_eq!(notifier.last().unwrap().message, "Program marked as Completed");

    let err = console
        .dispatch(Command::SetStatus {
            id: id.clone(),
            status: ProgramStatus::Active,
        })
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Store(_)));
    assert_eq!(
        notifier.last().unwrap().message,
        "A completed program cannot be marked as Active"
    );
    assert_eq!(console.store().get(&id).unwrap().status(), ProgramStatus::Completed);
}

#[test]
fn export_and_summary() {
    let (mut console, notifier) = seeded_console();

    let outcome = console
        .dispatch(Command::Export {
            format: ExportFormat::Csv,
            query: ProgramQuery::new().with_type(ProgramType::Technical),
        })
        .unwrap();
    let CommandOutcome::Exported { count, body, .. } = outcome else {
        panic!("expected Exported");
    };
    assert_eq!(count, 2);
    assert_eq!(body.lines().count(), 3);
    assert_eq!(notifier.last().unwrap().message, "Exported 2 programs as CSV");

    let CommandOutcome::Summary(summary) = console.dispatch(Command::Summary).unwrap() else {
        panic!("expected Summary");
    };
    assert_eq!(
        summary,
        ProgramSummary {
            total_programs: 4,
            scheduled: 4,
            active: 0,
            completed: 0,
            total_capacity: 100,
            total_budget: 1_944_567,
        }
    );
}

#[test]
fn custom_handler_replaces_default() {
    fn deny(
        _console: &mut Console<MemoryStorage>,
        command: Command,
    ) -> Result<CommandOutcome, ConsoleError> {
        Err(ConsoleError::UnregisteredCommand(command.kind()))
    }

    let (mut console, _) = seeded_console();
    console.register_handler(CommandKind::Delete, deny);
    let id = console.store().records()[0].id().clone();

    assert!(console.dispatch(Command::Delete { id }).is_err());
    assert_eq!(console.store().len(), 4);
}
