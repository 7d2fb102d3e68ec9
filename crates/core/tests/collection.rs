//! Behaviour of `RecordCollection` as seen by a record list view:
//! add/update/remove semantics, conjunctive filtering, stats that ignore
//! filters, lookup states and export of the filtered view.

use assert_matches::assert_matches;
use chrono::{NaiveDate, Utc};
use ranch_core::records::breeding::{
    BreedingMethod, BreedingRecord, BreedingStatus, NewBreedingRecord, UpdateBreedingRecord,
};
use ranch_core::{CoreError, ExportFormat, FilterCriteria, Lookup, Record, RecordCollection};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_breeding(mare: &str, status: BreedingStatus) -> NewBreedingRecord {
    NewBreedingRecord {
        mare_name: mare.to_string(),
        stallion_name: "Thunder".to_string(),
        breeding_date: date(2024, 4, 1),
        method: BreedingMethod::FreshAi,
        technician: "Dr. Reyes".to_string(),
        location: "North Barn".to_string(),
        status,
        pregnancy_confirmed: false,
        cost: Some(400.0),
        notes: None,
    }
}

fn seeded(id: &str, mare: &str, status: BreedingStatus) -> BreedingRecord {
    BreedingRecord::from_new(id.to_string(), new_breeding(mare, status), Utc::now())
}

/// `[BR001 Bella completed, BR002 Luna active]`.
fn two_records() -> RecordCollection<BreedingRecord> {
    RecordCollection::with_records([
        seeded("BR001", "Bella", BreedingStatus::Completed),
        seeded("BR002", "Luna", BreedingStatus::Active),
    ])
}

fn ids(view: &[&BreedingRecord]) -> Vec<String> {
    view.iter().map(|r| r.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[test]
fn status_filter_narrows_view_but_not_stats() {
    let mut collection = two_records();
    collection.set_filters(FilterCriteria::new().status([BreedingStatus::Active]));

    assert_eq!(ids(&collection.filtered()), vec!["BR002"]);
    assert_eq!(collection.stats_as_of(date(2024, 6, 1)).total, 2);
}

#[test]
fn search_term_never_changes_stats() {
    let mut collection = two_records();
    let before = collection.stats_as_of(date(2024, 6, 1));
    collection.set_filters(FilterCriteria::new().search("zzz"));
    assert!(collection.filtered().is_empty());
    assert_eq!(collection.stats_as_of(date(2024, 6, 1)), before);
}

#[test]
fn search_is_case_insensitive_substring_over_searchable_fields() {
    let collection = {
        let mut c = two_records();
        c.set_filters(FilterCriteria::new().search("LUN"));
        c
    };
    assert_eq!(ids(&collection.filtered()), vec!["BR002"]);

    let mut by_id = two_records();
    by_id.set_filters(FilterCriteria::new().search("br001"));
    assert_eq!(ids(&by_id.filtered()), vec!["BR001"]);

    let mut by_location = two_records();
    by_location.set_filters(FilterCriteria::new().search("north"));
    assert_eq!(by_location.filtered().len(), 2);
}

#[test]
fn combined_criteria_equal_sequential_filtering() {
    let mut collection = RecordCollection::with_records([
        seeded("BR001", "Bella", BreedingStatus::Completed),
        seeded("BR002", "Luna", BreedingStatus::Active),
        seeded("BR003", "Alma", BreedingStatus::Active),
        seeded("BR004", "Nala", BreedingStatus::Planned),
    ]);

    collection.set_filters(
        FilterCriteria::new()
            .search("a")
            .status([BreedingStatus::Active]),
    );
    let combined = ids(&collection.filtered());

    collection.set_filters(FilterCriteria::new().search("a"));
    let searched: Vec<BreedingRecord> = collection.filtered().into_iter().cloned().collect();
    let sequential: Vec<String> = searched
        .iter()
        .filter(|r| r.status == BreedingStatus::Active)
        .map(|r| r.id.clone())
        .collect();

    assert_eq!(combined, sequential);
    assert_eq!(combined, vec!["BR002", "BR003"]);
}

#[test]
fn set_filters_replaces_previous_criteria_wholesale() {
    let mut collection = two_records();
    collection.set_filters(
        FilterCriteria::new()
            .search("bella")
            .status([BreedingStatus::Completed]),
    );
    assert_eq!(collection.filtered().len(), 1);

    // Only the status is passed now; the old search term must not linger.
    collection.set_filters(FilterCriteria::new().status([
        BreedingStatus::Completed,
        BreedingStatus::Active,
    ]));
    assert_eq!(collection.filtered().len(), 2);
    assert!(collection.filters().search_term.is_none());
}

#[test]
fn date_range_is_inclusive() {
    let mut early = seeded("BR001", "Bella", BreedingStatus::Active);
    early.breeding_date = date(2024, 3, 1);
    let mut late = seeded("BR002", "Luna", BreedingStatus::Active);
    late.breeding_date = date(2024, 3, 31);
    let mut outside = seeded("BR003", "Nova", BreedingStatus::Active);
    outside.breeding_date = date(2024, 4, 1);

    let mut collection = RecordCollection::with_records([early, late, outside]);
    collection.set_filters(FilterCriteria::new().between(Some(date(2024, 3, 1)), Some(date(2024, 3, 31))));
    assert_eq!(ids(&collection.filtered()), vec!["BR001", "BR002"]);
}

#[test]
fn method_allow_list_filters_quality_axis() {
    let mut frozen = seeded("BR001", "Bella", BreedingStatus::Active);
    frozen.method = BreedingMethod::FrozenAi;
    let mut collection =
        RecordCollection::with_records([frozen, seeded("BR002", "Luna", BreedingStatus::Active)]);
    collection.set_filters(FilterCriteria::new().quality([BreedingMethod::FrozenAi]));
    assert_eq!(ids(&collection.filtered()), vec!["BR001"]);

    collection.clear_filters();
    assert_eq!(collection.filtered().len(), 2);
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[test]
fn add_prepends_with_fresh_id_and_verbatim_fields() {
    let mut collection = two_records();
    let input = new_breeding("Nova", BreedingStatus::Planned);

    let added = collection.add(input.clone()).clone();

    assert_eq!(collection.len(), 3);
    assert_eq!(collection.records()[0].id, added.id);
    assert!(!added.id.is_empty());
    assert!(added.id.starts_with("BR-"));
    assert_ne!(added.id, "BR001");
    assert_eq!(added.mare_name, input.mare_name);
    assert_eq!(added.status, BreedingStatus::Planned);
    assert_eq!(added.cost, input.cost);
    assert_eq!(added.created_at, added.updated_at);
}

#[test]
fn consecutive_adds_get_distinct_ids() {
    let mut collection: RecordCollection<BreedingRecord> = RecordCollection::new();
    let a = collection.add(new_breeding("A", BreedingStatus::Planned)).id.clone();
    let b = collection.add(new_breeding("B", BreedingStatus::Planned)).id.clone();
    assert_ne!(a, b);
    assert_eq!(collection.records()[0].id, b);
}

#[test]
fn update_merges_only_patch_fields() {
    let mut collection = two_records();
    let untouched = collection.get("BR002").cloned().unwrap();
    let original = collection.get("BR001").cloned().unwrap();

    let applied = collection.update(
        "BR001",
        UpdateBreedingRecord {
            status: Some(BreedingStatus::Cancelled),
            ..Default::default()
        },
    );

    assert!(applied);
    assert_eq!(collection.len(), 2);
    let updated = collection.get("BR001").unwrap();
    assert_eq!(updated.status, BreedingStatus::Cancelled);
    assert_eq!(updated.mare_name, original.mare_name);
    assert_eq!(updated.cost, original.cost);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(collection.get("BR002").unwrap(), &untouched);
}

#[test]
fn update_of_unknown_id_is_a_silent_no_op() {
    let mut collection = two_records();
    let before = collection.records().to_vec();
    let applied = collection.update(
        "ZZZ",
        UpdateBreedingRecord {
            status: Some(BreedingStatus::Failed),
            ..Default::default()
        },
    );
    assert!(!applied);
    assert_eq!(collection.records(), before.as_slice());
}

#[test]
fn remove_deletes_matching_record() {
    let mut collection = two_records();
    assert!(collection.remove("BR001"));
    assert_eq!(collection.len(), 1);
    assert!(collection.get("BR001").is_none());
}

#[test]
fn remove_of_unknown_id_keeps_collection() {
    let mut collection = two_records();
    assert!(!collection.remove("ZZZ"));
    assert_eq!(collection.len(), 2);
}

#[test]
fn seeding_drops_duplicate_ids() {
    let collection = RecordCollection::with_records([
        seeded("BR001", "Bella", BreedingStatus::Completed),
        seeded("BR001", "Copy", BreedingStatus::Active),
    ]);
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.records()[0].mare_name, "Bella");
}

// ---------------------------------------------------------------------------
// Submission (validated add)
// ---------------------------------------------------------------------------

#[test]
fn submit_reports_per_field_errors_and_adds_nothing() {
    let mut collection = two_records();
    let mut input = new_breeding("", BreedingStatus::Planned);
    input.cost = Some(-1.0);

    let result = collection.submit(input);

    assert_matches!(result, Err(CoreError::InvalidFields { entity: "breeding_record", ref fields })
        if fields.contains_key("mare_name") && fields.contains_key("cost"));
    assert_eq!(collection.len(), 2);
}

#[test]
fn submit_adds_valid_input() {
    let mut collection = two_records();
    let id = collection.submit(new_breeding("Nova", BreedingStatus::Planned)).unwrap();
    assert_eq!(collection.records()[0].id, id);
    assert_eq!(collection.len(), 3);
}

// ---------------------------------------------------------------------------
// Lookup, counts and export
// ---------------------------------------------------------------------------

#[test]
fn lookup_distinguishes_found_and_not_found() {
    let collection = two_records();
    assert_matches!(collection.lookup("BR002"), Lookup::Found(r) if r.mare_name == "Luna");
    assert_matches!(
        collection.lookup("nope"),
        Lookup::NotFound { entity: "breeding_record", ref id } if id == "nope"
    );
    assert_matches!(
        collection.lookup("nope").into_result(),
        Err(CoreError::NotFound { .. })
    );
}

#[test]
fn status_counts_cover_full_collection() {
    let mut collection = two_records();
    collection.set_filters(FilterCriteria::new().status([BreedingStatus::Active]));
    let counts = collection.status_counts();
    assert_eq!(counts.get(&BreedingStatus::Completed), Some(&1));
    assert_eq!(counts.get(&BreedingStatus::Active), Some(&1));
}

#[test]
fn export_serialises_only_the_filtered_view() {
    let mut collection = two_records();
    collection.set_filters(FilterCriteria::new().status([BreedingStatus::Active]));

    let json = collection.export(ExportFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "BR002");
    assert_eq!(rows[0]["status"], "active");
    assert_eq!(rows[0]["method"], "fresh_ai");

    let csv = collection.export(ExportFormat::Csv).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("id,"));
    assert!(lines.next().unwrap().starts_with("BR002,"));
    assert!(lines.next().is_none());
}
