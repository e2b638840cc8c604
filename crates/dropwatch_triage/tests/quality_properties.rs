//! Property tests for classification, partitioning and routing.
//!
//! Datasets are generated as small grids where each cell is either a short
//! value or null, so every status is reachable.

use dropwatch_triage::{classify, partition, route, Dataset, QualityStatus, Row, Stage};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = Option<String>> + Clone {
    prop_oneof![
        1 => Just(None),
        3 => "[a-z0-9]{1,6}".prop_map(Some),
    ]
}

fn grid<S>(
    cells: S,
    widths: std::ops::Range<usize>,
    rows: std::ops::Range<usize>,
) -> impl Strategy<Value = Dataset>
where
    S: Strategy<Value = Option<String>> + Clone,
{
    widths.prop_flat_map(move |width| {
        prop::collection::vec(prop::collection::vec(cells.clone(), width), rows.clone()).prop_map(
            move |rows| {
                let columns = (0..width).map(|i| format!("c{i}")).collect();
                Dataset::new(columns, rows.into_iter().map(Row::new).collect())
            },
        )
    })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    grid(cell(), 0..5, 0..30)
}

fn complete_dataset() -> impl Strategy<Value = Dataset> {
    grid("[a-z0-9]{1,6}".prop_map(Some), 1..5, 1..30)
}

fn all_null_dataset() -> impl Strategy<Value = Dataset> {
    grid(Just(None), 0..5, 0..30)
}

/// Tag every row with its source index in an extra column so order can be checked.
fn with_index(ds: &Dataset) -> Dataset {
    let mut columns = vec!["__idx".to_string()];
    columns.extend(ds.columns().iter().cloned());
    let rows = ds
        .rows()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut cells = vec![Some(i.to_string())];
            cells.extend(r.cells().iter().cloned());
            Row::new(cells)
        })
        .collect();
    Dataset::new(columns, rows)
}

fn indices(ds: &Dataset) -> Vec<usize> {
    ds.rows()
        .iter()
        .map(|r| r.get(0).and_then(|v| v.parse().ok()).unwrap_or(usize::MAX))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn classify_matches_definition(ds in dataset()) {
        let assessment = classify(&ds);
        let any_null = ds.rows().iter().any(Row::has_null);
        let all_null = ds.rows().iter().all(Row::is_all_null);

        let expected = if ds.is_empty() || all_null {
            QualityStatus::Empty
        } else if any_null {
            QualityStatus::Partial
        } else {
            QualityStatus::Complete
        };
        prop_assert_eq!(assessment.status, expected);
        prop_assert_eq!(assessment.total_records, ds.len());
    }

    #[test]
    fn partition_is_a_stable_split(ds in dataset()) {
        let tagged = with_index(&ds);
        let parts = partition(&ds);
        let tagged_parts = partition(&tagged);

        prop_assert_eq!(parts.clean.len() + parts.revised.len(), ds.len());
        prop_assert!(parts.clean.rows().iter().all(|r| !r.has_null() && !r.is_all_null()));
        prop_assert!(parts.revised.rows().iter().all(|r| r.has_null() || r.is_all_null()));

        // The index column is never null, so with at least one real column the
        // tagged split mirrors the plain one
        prop_assume!(!ds.columns().is_empty());
        prop_assert_eq!(tagged_parts.clean.len(), parts.clean.len());
        let clean_idx = indices(&tagged_parts.clean);
        let revised_idx = indices(&tagged_parts.revised);
        prop_assert!(clean_idx.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(revised_idx.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(clean_idx.iter().all(|i| !revised_idx.contains(i)));
    }

    #[test]
    fn partition_of_complete_keeps_everything_clean(ds in complete_dataset()) {
        prop_assert_eq!(classify(&ds).status, QualityStatus::Complete);
        let parts = partition(&ds);
        prop_assert_eq!(&parts.clean, &ds);
        prop_assert!(parts.revised.is_empty());
    }

    #[test]
    fn partition_of_empty_sends_everything_to_revised(ds in all_null_dataset()) {
        prop_assert_eq!(classify(&ds).status, QualityStatus::Empty);
        let parts = partition(&ds);
        prop_assert!(parts.clean.is_empty());
        prop_assert_eq!(&parts.revised, &ds);
    }

    #[test]
    fn empty_status_never_yields_clean_rows(ds in dataset()) {
        let parts = partition(&ds);
        match classify(&ds).status {
            QualityStatus::Empty => {
                prop_assert!(parts.clean.is_empty());
                prop_assert_eq!(parts.revised.len(), ds.len());
            }
            QualityStatus::Partial => prop_assert!(!parts.revised.is_empty()),
            QualityStatus::Complete => prop_assert!(parts.revised.is_empty()),
        }
    }

    #[test]
    fn route_depends_only_on_status(ds in dataset()) {
        let status = classify(&ds).status;
        let stages = route(status);
        match status {
            QualityStatus::Empty => prop_assert_eq!(stages, &[Stage::Watchdog][..]),
            QualityStatus::Partial | QualityStatus::Complete => {
                prop_assert_eq!(stages, &[Stage::Classifier, Stage::Preprocessing][..])
            }
        }
    }
}
