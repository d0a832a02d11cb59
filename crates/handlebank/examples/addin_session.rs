//! Simulated add-in session: create objects from "cells", break one, query
//! the error, delete a cell and collect garbage, then dump the repository.
//!
//! Run with: cargo run --example addin_session

use handlebank::prelude::*;

fn cell(function: &str, address: &str) -> CallContext {
    CallContext::cell(
        function,
        RangeReference::parse(address).expect("valid address"),
    )
}

fn main() {
    env_logger::init();

    let registry = builtin_functions().expect("builtin registry");
    println!("registered functions:");
    for def in registry.iter() {
        println!(
            "  {} ({}) [{}] - {}",
            def.display_name, def.param_codes, def.category, def.param_names
        );
    }
    println!();

    let mut host = MockHost::new();
    let mut repo = XlRepository::new();

    // SHEET1!B2: =hbExponentialForwardCorrelation("ECORR", ...)
    let handle = hb_exponential_forward_correlation(
        &mut repo,
        &mut host,
        &cell("hbExponentialForwardCorrelation", "SHEET1!B2"),
        "ECORR",
        vec![0.5, 1.0, 1.5, 2.0],
        0.2,
        0.4,
        1.0,
        vec![],
        false,
    )
    .expect("store succeeds");
    println!("SHEET1!B2 -> {}", handle);

    // SHEET1!B3: a formula with a bad argument
    let result = hb_exponential_forward_correlation(
        &mut repo,
        &mut host,
        &cell("hbExponentialForwardCorrelation", "SHEET1!B3"),
        "BAD",
        vec![],
        0.2,
        0.4,
        1.0,
        vec![],
        false,
    );
    println!("SHEET1!B3 -> {:?}", result);
    println!(
        "last error in SHEET1!B3: {}",
        hb_retrieve_error(&repo, "SHEET1!B3").unwrap_or_default()
    );
    println!();

    // The user deletes row 2, then garbage collection runs
    host.delete_cells(&RangeReference::parse("SHEET1!A2:Z2").expect("valid range"));
    let dropped = hb_collect_garbage(&mut repo, &mut host, false);
    println!("garbage collection dropped {} range(s)", dropped);
    println!();

    print!("{}", hb_dump(&repo));
}
