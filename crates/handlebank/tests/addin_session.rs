//! End-to-end scenarios driving the exported function layer the way a host
//! application would: cell calls creating objects, recalculations, cell
//! deletion followed by garbage collection, and error queries.

use handlebank::prelude::*;
use pretty_assertions::assert_eq;

fn cell(function: &str, address: &str) -> CallContext {
    CallContext::cell(function, RangeReference::parse(address).unwrap())
}

#[test]
fn test_builtin_registry() {
    let registry = builtin_functions().unwrap();
    assert_eq!(registry.len(), 10);

    let def = registry.get("hbRetrieveError").unwrap();
    assert_eq!(def.param_codes, "CC#");
    assert_eq!(def.kind, FunctionKind::Worksheet);
    assert_eq!(def.category, "Diagnostics");

    let def = registry.get("hbCollectGarbage").unwrap();
    assert_eq!(def.kind, FunctionKind::Command);
}

#[test]
fn test_create_and_resolve_handle() {
    let mut host = MockHost::new();
    let mut repo = XlRepository::new();
    let ctx = cell("hbExponentialForwardCorrelation", "SHEET1!B2");

    let handle = hb_exponential_forward_correlation(
        &mut repo,
        &mut host,
        &ctx,
        "ECORR",
        vec![0.5, 1.0, 1.5, 2.0],
        0.2,
        0.4,
        1.0,
        vec![],
        false,
    )
    .unwrap();

    assert_eq!(handle, "ECORR#0001");
    let object = repo.retrieve(&handle).unwrap();
    assert_eq!(object.class_name(), "ExponentialForwardCorrelation");

    // The handle and its stub resolve to the same object for its lifetime
    assert_eq!(handle_stub(&handle), "ECORR");
    assert!(repo.retrieve("ECORR").is_ok());
}

#[test]
fn test_recalculation_overwrites() {
    let mut host = MockHost::new();
    let mut repo = XlRepository::new();
    let ctx = cell("hbLinearExponentialCorrelation", "SHEET1!B2");

    let first =
        hb_linear_exponential_correlation(&mut repo, &mut host, &ctx, "CORR", 5, 0.4, 0.1, 2, false)
            .unwrap();
    let second =
        hb_linear_exponential_correlation(&mut repo, &mut host, &ctx, "CORR", 5, 0.6, 0.1, 2, false)
            .unwrap();

    assert_eq!(first, "CORR#0001");
    assert_eq!(second, "CORR#0002");
    assert_eq!(repo.object_count(), 1);
}

#[test]
fn test_failure_is_correlated_with_cell() {
    let mut host = MockHost::new();
    let mut repo = XlRepository::new();
    let ctx = cell("hbExponentialForwardCorrelation", "SHEET1!B3");

    // Empty rate times: the constructor rejects this
    let result = hb_exponential_forward_correlation(
        &mut repo,
        &mut host,
        &ctx,
        "BAD",
        vec![],
        0.2,
        0.4,
        1.0,
        vec![],
        false,
    );
    assert_eq!(result, None);
    assert!(!repo.contains("BAD"));

    // Query by the failing cell, case-insensitively
    let message = hb_retrieve_error(&repo, "sheet1!b3").unwrap();
    assert_eq!(
        message,
        "hbExponentialForwardCorrelation - rate times vector is empty"
    );

    // Disjoint cell with no entry returns the empty string
    assert_eq!(hb_retrieve_error(&repo, "SHEET1!Z9").unwrap(), "");

    // Garbage query returns null and is only logged
    assert_eq!(hb_retrieve_error(&repo, "not a reference"), None);

    // Clearing from the failing cell removes the entry
    hb_clear_error(&mut repo, &ctx);
    assert_eq!(hb_retrieve_error(&repo, "SHEET1!B3").unwrap(), "");
}

#[test]
fn test_conflicting_cell_gets_null_and_message() {
    let mut host = MockHost::new();
    let mut repo = XlRepository::new();

    let first_ctx = cell("hbLinearExponentialCorrelation", "SHEET1!B2");
    hb_linear_exponential_correlation(
        &mut repo, &mut host, &first_ctx, "CORR", 5, 0.4, 0.1, 2, false,
    )
    .unwrap();

    let other_ctx = cell("hbLinearExponentialCorrelation", "SHEET1!C7");
    let result = hb_linear_exponential_correlation(
        &mut repo, &mut host, &other_ctx, "CORR", 5, 0.4, 0.1, 2, false,
    );
    assert_eq!(result, None);

    let message = hb_retrieve_error(&repo, "SHEET1!C7").unwrap();
    assert!(message.contains("already resides in cell SHEET1!B2"));

    // The original registration is untouched
    assert!(repo.contains("CORR"));
    assert_eq!(repo.object_count(), 1);
}

#[test]
fn test_garbage_collection_after_cell_deletion() {
    let mut host = MockHost::new();
    let mut repo = XlRepository::new();

    hb_historical_rates_analysis(
        &mut repo,
        &mut host,
        &cell("hbHistoricalRatesAnalysis", "SHEET1!A1"),
        "STATS",
        vec![vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 5.0]],
        vec!["3M".into(), "6M".into()],
        true, // permanent
    )
    .unwrap();
    hb_linear_exponential_correlation(
        &mut repo,
        &mut host,
        &cell("hbLinearExponentialCorrelation", "SHEET1!B1"),
        "CORR",
        5,
        0.4,
        0.1,
        2,
        false,
    )
    .unwrap();

    // Nothing reclaimed while the ranges are alive
    assert_eq!(hb_collect_garbage(&mut repo, &mut host, false), 0);
    assert_eq!(repo.object_count(), 2);

    assert_eq!(host.name_count(), 2);

    // The user deletes row 1
    host.delete_cells(&RangeReference::parse("SHEET1!A1:Z1").unwrap());

    // Volatile object reclaimed; the permanent one survives and keeps its
    // (invalid, non-empty) range record alive
    assert_eq!(hb_collect_garbage(&mut repo, &mut host, false), 1);
    assert!(repo.contains("STATS"));
    assert!(!repo.contains("CORR"));
    assert_eq!(repo.range_count(), 1);
    assert_eq!(host.name_count(), 1);

    // A full sweep takes the permanent object too
    assert_eq!(hb_collect_garbage(&mut repo, &mut host, true), 1);
    assert_eq!(repo.object_count(), 0);
    assert_eq!(repo.range_count(), 0);
    assert_eq!(host.name_count(), 0);
}

#[test]
fn test_delete_list_and_dump() {
    let mut host = MockHost::new();
    let mut repo = XlRepository::new();

    let handle = hb_time_homogeneous_forward_correlation(
        &mut repo,
        &mut host,
        &cell("hbTimeHomogeneousForwardCorrelation", "SHEET1!A1"),
        "THFC",
        vec![vec![1.0, 0.8], vec![0.8, 1.0]],
        vec![0.5, 1.0, 1.5],
        false,
    )
    .unwrap();

    assert_eq!(hb_list_objects(&repo), vec!["THFC".to_string()]);

    let dump = hb_dump(&repo);
    assert!(dump.contains("objects in repository: 1"));
    assert!(dump.contains("THFC - TimeHomogeneousForwardCorrelation"));
    assert!(dump.contains("calling ranges:"));

    assert!(hb_delete_object(&mut repo, &cell("hbDeleteObject", "SHEET1!A2"), &handle));
    assert!(hb_list_objects(&repo).is_empty());

    // Deleting again fails quietly and correlates the error
    assert!(!hb_delete_object(&mut repo, &cell("hbDeleteObject", "SHEET1!A2"), &handle));
    let message = hb_retrieve_error(&repo, "SHEET1!A2").unwrap();
    assert!(message.contains("No object in repository"));
}
