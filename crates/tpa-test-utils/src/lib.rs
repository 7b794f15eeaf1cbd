//! Testing utilities for TPA workspace
//!
//! Shared drafts, stores and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use tpa_model::{Department, ProgramDraft, ProgramType};
use tpa_store::{MemoryStorage, ProgramStore, StoreConfig};

/// The canonical "AI Basics" submission
pub fn ai_basics_draft() -> ProgramDraft {
    ProgramDraft::new("AI Basics")
        .with_type("technical")
        .with_department("IT")
        .with_start_date("2025-01-10")
        .with_duration(4)
        .with_max_participants(20)
        .with_program_cost(500_000)
}

pub fn draft_named(name: &str) -> ProgramDraft {
    ProgramDraft {
        name: name.to_string(),
        ..ai_basics_draft()
    }
}

pub fn memory_store() -> ProgramStore<MemoryStorage> {
    memory_store_with(&StoreConfig::default())
}

/// Empty store whose backend honours `config.quota_bytes`
pub fn memory_store_with(config: &StoreConfig) -> ProgramStore<MemoryStorage> {
    ProgramStore::new(MemoryStorage::from_config(config), config)
}

/// Store holding a mix of types, departments and names
pub fn seeded_store() -> ProgramStore<MemoryStorage> {
    let mut store = memory_store();
    for draft in sample_drafts() {
        store.add(&draft).unwrap();
    }
    store
}

pub fn sample_drafts() -> Vec<ProgramDraft> {
    vec![
        ai_basics_draft(),
        ProgramDraft::new("Leadership Training")
            .with_type("leadership")
            .with_department("Management")
            .with_start_date("2024-03-01")
            .with_duration(6)
            .with_max_participants(25)
            .with_program_cost(150_000),
        ProgramDraft::new("Communication Skills")
            .with_type("soft-skills")
            .with_department("HR")
            .with_start_date("2024-04-15")
            .with_duration(2)
            .with_max_participants(40)
            .with_program_cost(60_000),
        ProgramDraft::new("Applied AI for Finance")
            .with_type("technical")
            .with_department("Finance")
            .with_start_date("2024-05-20")
            .with_duration(8)
            .with_max_participants(15)
            .with_program_cost(1_234_567),
    ]
}

pub fn program_type_strategy() -> impl Strategy<Value = ProgramType> {
    proptest::sample::select(ProgramType::ALL.to_vec())
}

pub fn department_strategy() -> impl Strategy<Value = Department> {
    proptest::sample::select(Department::ALL.to_vec())
}

/// Drafts that always pass validation
pub fn valid_draft_strategy() -> impl Strategy<Value = ProgramDraft> {
    (
        "[A-Za-z]{3}[A-Za-z0-9 ]{0,30}",
        program_type_strategy(),
        department_strategy(),
        (2000i32..2100, 1u32..=12, 1u32..=28),
        1i64..=104,
        1i64..=500,
        0i64..=10_000_000,
    )
        .prop_map(|(name, t, d, (y, m, day), duration, max, cost)| {
            ProgramDraft::new(name)
                .with_type(t.as_str())
                .with_department(d.as_str())
                .with_start_date(format!("{y:04}-{m:02}-{day:02}"))
                .with_duration(duration)
                .with_max_participants(max)
                .with_program_cost(cost)
        })
}
