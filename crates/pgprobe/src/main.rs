//! pgprobe - ad-hoc PostgreSQL connectivity checker.
//!
//! Opens a bounded pooled connection, reports server metadata, enumerates
//! public tables with row counts, optionally exercises a write probe on the
//! `categories` table, and exits 0/1. Only a failure to connect is fatal;
//! everything after the primary path is reported but never flips the result.

mod report;

use std::process::ExitCode;

use chrono::{Local, Locale};
use pgprobe_core::services::diagnostics::{Diagnostics, PROBE_TABLE};
use pgprobe_core::{CheckConfig, CheckError, CheckPool, PooledConnection, RunOutcome};

#[tokio::main]
async fn main() -> ExitCode {
    pgprobe_core::logging::init_logging();

    let config = match CheckConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            report::section("Configuration");
            report::fail(&e);
            return ExitCode::FAILURE;
        }
    };

    report::section("Configuration");
    report::kv("Host", &config.host);
    report::kv("Port", config.port);
    report::kv("Database", &config.database);
    report::kv("User", &config.user);
    report::kv("Password", config.masked_password());

    let pool = match CheckPool::new(&config) {
        Ok(pool) => pool,
        Err(e) => {
            print_failure(&e);
            return RunOutcome::failed(e).exit_code();
        }
    };

    let outcome = run_checks(&pool).await;

    // Runs on every branch above, including the failure path.
    pool.close();

    report::section("Summary");
    if outcome.is_success() {
        report::pass("database connection is ready");
    } else {
        report::fail("connectivity check found problems");
    }

    outcome.exit_code()
}

/// Run the diagnostic sequence against an open pool.
async fn run_checks(pool: &CheckPool) -> RunOutcome {
    report::section("Connectivity");

    // Primary path: one scoped connection for the version and time checks.
    // Released back to the pool on every exit, including the error returns.
    {
        let conn = match pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                print_failure(&e);
                return RunOutcome::failed(e);
            }
        };
        report::pass("connected");

        match Diagnostics::server_version(&conn).await {
            Ok(version) => report::kv("Server version", version),
            Err(e) => {
                print_failure(&e);
                return RunOutcome::failed(e);
            }
        }

        // Same connection as the version query, so any failure here means
        // the connection is broken.
        match Diagnostics::server_time(&conn).await {
            Ok(now) => {
                let local = now.with_timezone(&Local);
                report::kv("Server time", local.format_localized("%c", Locale::th_TH));
            }
            Err(e) => {
                print_failure(&e);
                return RunOutcome::failed(e);
            }
        }
    }

    list_and_probe(pool).await;

    RunOutcome::passed()
}

/// Secondary phase: table enumeration, row counts, and the write probe.
///
/// Failures here are logged and reported but never flip the outcome; the
/// primary path already proved the connection works.
async fn list_and_probe(pool: &CheckPool) {
    report::section("Tables");

    let conn = match pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            report::fail(format!("could not list tables: {e}"));
            tracing::warn!(error = %e, "table enumeration skipped");
            return;
        }
    };

    let tables = match Diagnostics::list_tables(&conn).await {
        Ok(tables) => tables,
        Err(e) => {
            report::fail(format!("could not list tables: {e}"));
            tracing::warn!(error = %e, "table enumeration failed");
            return;
        }
    };

    if tables.is_empty() {
        report::fail("no tables found in the public schema");
        report::hint("run setup-database-schema.sh to create the schema");
        return;
    }

    for summary in Diagnostics::summarize_tables(&conn, &tables).await {
        match summary.row_count {
            Some(rows) => report::pass(format!("{}: {rows} rows", summary.name)),
            None => report::fail(format!(
                "{}: count unavailable ({})",
                summary.name,
                summary.error.as_deref().unwrap_or("unknown error")
            )),
        }
    }

    if tables.iter().any(|t| t.name == PROBE_TABLE) {
        write_probe(&conn).await;
    }
}

/// Insert, select back, and delete the sentinel row.
///
/// Each step is reported on its own line. A failure aborts the remaining
/// probe steps but not the run; a failed delete may leave the sentinel
/// behind, which the next run detects as a conflict and skips over.
async fn write_probe(conn: &PooledConnection) {
    report::section("Write probe (categories)");

    let created = match Diagnostics::insert_sentinel(conn).await {
        Ok(created) => created,
        Err(e) => {
            report::fail(format!("INSERT failed: {e}"));
            tracing::warn!(error = %e, "probe insert failed");
            return;
        }
    };

    if !created {
        report::info("sentinel row already present; skipping select/delete");
        return;
    }
    report::pass("INSERT: sentinel row created");

    let rows = match Diagnostics::select_sentinel(conn).await {
        Ok(rows) => rows,
        Err(e) => {
            report::fail(format!("SELECT failed: {e}"));
            tracing::warn!(error = %e, "probe select failed");
            return;
        }
    };
    report::pass(format!("SELECT: {rows} row(s) returned"));

    match Diagnostics::delete_sentinel(conn).await {
        Ok(_) => report::pass("DELETE: sentinel row removed"),
        Err(e) => {
            report::fail(format!("DELETE failed: {e}"));
            report::info("sentinel row may be left behind");
            tracing::warn!(error = %e, "probe delete failed");
        }
    }
}

/// Print a classified connection failure with its remediation hints.
fn print_failure(err: &CheckError) {
    report::fail(format!("{err} [{}]", err.category()));
    for hint in err.hints() {
        report::hint(hint);
    }
    tracing::error!(category = err.category(), error = %err, "connectivity check failed");
}
