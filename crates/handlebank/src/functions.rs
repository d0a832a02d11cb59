//! The exported worksheet-function layer
//!
//! One Rust function per registered worksheet function. Host environments
//! generally cannot handle uncaught failures, so every function catches at
//! its boundary: the error text is correlated with the calling cell and
//! logged, and the host sees a null return instead of a propagated error.

use std::fmt;
use std::sync::Arc;

use handlebank_models::{
    ExponentialForwardCorrelation, HistoricalRatesAnalysis, LinearExponentialCorrelation,
    TimeHomogeneousForwardCorrelation,
};
use handlebank_xl::{CalcHost, CallContext, FunctionDef, FunctionRegistry, Result, XlRepository};

fn report<T, E: fmt::Display>(
    repo: &mut XlRepository,
    ctx: &CallContext,
    result: std::result::Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            repo.log_error(ctx, &e.to_string(), false);
            None
        }
    }
}

/// Create a linear-exponential correlation model, returning its handle
#[allow(clippy::too_many_arguments)]
pub fn hb_linear_exponential_correlation(
    repo: &mut XlRepository,
    host: &mut dyn CalcHost,
    ctx: &CallContext,
    id: &str,
    size: usize,
    rho: f64,
    beta: f64,
    factors: usize,
    permanent: bool,
) -> Option<String> {
    let model = report(
        repo,
        ctx,
        LinearExponentialCorrelation::new(size, rho, beta, factors),
    )?;
    let model = if permanent { model.permanent() } else { model };
    let stored = repo.store(host, ctx, id, Arc::new(model));
    report(repo, ctx, stored)
}

/// Create an exponential forward correlation structure, returning its handle
#[allow(clippy::too_many_arguments)]
pub fn hb_exponential_forward_correlation(
    repo: &mut XlRepository,
    host: &mut dyn CalcHost,
    ctx: &CallContext,
    id: &str,
    rate_times: Vec<f64>,
    long_term_corr: f64,
    beta: f64,
    gamma: f64,
    times: Vec<f64>,
    permanent: bool,
) -> Option<String> {
    let model = report(
        repo,
        ctx,
        ExponentialForwardCorrelation::new(rate_times, long_term_corr, beta, gamma, times),
    )?;
    let model = if permanent { model.permanent() } else { model };
    let stored = repo.store(host, ctx, id, Arc::new(model));
    report(repo, ctx, stored)
}

/// Wrap a user-supplied forward correlation matrix, returning its handle
pub fn hb_time_homogeneous_forward_correlation(
    repo: &mut XlRepository,
    host: &mut dyn CalcHost,
    ctx: &CallContext,
    id: &str,
    fwd_correlation: Vec<Vec<f64>>,
    rate_times: Vec<f64>,
    permanent: bool,
) -> Option<String> {
    let model = report(
        repo,
        ctx,
        TimeHomogeneousForwardCorrelation::new(fwd_correlation, rate_times),
    )?;
    let model = if permanent { model.permanent() } else { model };
    let stored = repo.store(host, ctx, id, Arc::new(model));
    report(repo, ctx, stored)
}

/// Run statistics over a historical rate series, returning the handle
pub fn hb_historical_rates_analysis(
    repo: &mut XlRepository,
    host: &mut dyn CalcHost,
    ctx: &CallContext,
    id: &str,
    series: Vec<Vec<f64>>,
    labels: Vec<String>,
    permanent: bool,
) -> Option<String> {
    let analysis = report(repo, ctx, HistoricalRatesAnalysis::new(series))?;
    let analysis = if labels.is_empty() {
        analysis
    } else {
        report(repo, ctx, analysis.with_labels(labels))?
    };
    let analysis = if permanent {
        analysis.permanent()
    } else {
        analysis
    };
    let stored = repo.store(host, ctx, id, Arc::new(analysis));
    report(repo, ctx, stored)
}

/// Delete the object behind a handle; true on success
pub fn hb_delete_object(repo: &mut XlRepository, ctx: &CallContext, id: &str) -> bool {
    let removed = repo.remove(id);
    report(repo, ctx, removed).is_some()
}

/// The most recent error message for a range, empty string when none.
/// Returns `None` (a null to the host) when the argument is not a range
/// reference.
pub fn hb_retrieve_error(repo: &XlRepository, range: &str) -> Option<String> {
    match repo.retrieve_error(range) {
        Ok(message) => Some(message),
        Err(e) => {
            log::error!("hbRetrieveError - {}", e);
            None
        }
    }
}

/// Drop any recorded error for the calling cell
pub fn hb_clear_error(repo: &mut XlRepository, ctx: &CallContext) {
    repo.clear_error(ctx);
}

/// Reclaim objects owned by deleted ranges; returns the number of range
/// records dropped
pub fn hb_collect_garbage(
    repo: &mut XlRepository,
    host: &mut dyn CalcHost,
    delete_permanent: bool,
) -> usize {
    repo.collect_garbage(host, delete_permanent)
}

/// All stored object ids, sorted
pub fn hb_list_objects(repo: &XlRepository) -> Vec<String> {
    repo.ids()
}

/// Diagnostic dump of repository contents and tracked ranges
pub fn hb_dump(repo: &XlRepository) -> String {
    let mut out = Vec::new();
    if repo.dump(&mut out).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Registration records for every exported function
pub fn builtin_functions() -> Result<FunctionRegistry> {
    let mut registry = FunctionRegistry::new();

    registry.register(FunctionDef::worksheet(
        "hbLinearExponentialCorrelation",
        "CCNNNL#",
        "id,size,rho,beta,factors,permanent",
        "Correlation",
    ))?;
    registry.register(FunctionDef::worksheet(
        "hbExponentialForwardCorrelation",
        "CCKNNNKL#",
        "id,rateTimes,longTermCorr,beta,gamma,times,permanent",
        "Correlation",
    ))?;
    registry.register(FunctionDef::worksheet(
        "hbTimeHomogeneousForwardCorrelation",
        "CCKKL#",
        "id,fwdCorrelation,rateTimes,permanent",
        "Correlation",
    ))?;
    registry.register(FunctionDef::worksheet(
        "hbHistoricalRatesAnalysis",
        "CCKKL#",
        "id,series,labels,permanent",
        "Statistics",
    ))?;
    registry.register(FunctionDef::worksheet(
        "hbDeleteObject",
        "LC#",
        "id",
        "Utilities",
    ))?;
    registry.register(FunctionDef::worksheet(
        "hbRetrieveError",
        "CC#",
        "range",
        "Diagnostics",
    ))?;
    registry.register(FunctionDef::worksheet(
        "hbClearError",
        "L#",
        "",
        "Diagnostics",
    ))?;
    registry.register(
        FunctionDef::worksheet("hbCollectGarbage", "NL#", "deletePermanent", "Utilities")
            .command(),
    )?;
    registry.register(FunctionDef::worksheet(
        "hbListObjects",
        "K#",
        "",
        "Diagnostics",
    ))?;
    registry.register(FunctionDef::worksheet("hbDump", "C#", "", "Diagnostics"))?;

    Ok(registry)
}
