//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_lines_containing_except_files, find_non_export_lines_in_mod_files,
    read_relative,
};

#[test]
fn cli_has_no_direct_infrastructure_imports() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["use crate::infrastructure", "crate::infrastructure::"],
    );

    assert!(
        hits.is_empty(),
        "found direct infrastructure imports in inbound CLI adapters: {hits:#?}"
    );
}

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "diesel::",
            "tracing::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn application_depends_on_ports_not_adapters() {
    let hits = find_lines_containing_except_files(
        "src/application",
        &["crate::adapter", "crate::infrastructure", "diesel::"],
        &[],
    );
    // Unit tests run against the in-memory adapter.
    let hits: Vec<_> = hits
        .into_iter()
        .filter(|(_, _, line)| !line.contains("crate::adapter::outbound::memory::MemoryStore"))
        .collect();

    assert!(
        hits.is_empty(),
        "application layer reaches past its ports: {hits:#?}"
    );
}

#[test]
fn diesel_stays_in_sqlite_adapter() {
    let hits = find_lines_containing_except_files(
        "src",
        &["use diesel", "diesel::"],
        &["src/error.rs"],
    )
    .into_iter()
    .filter(|(path, _, _)| !path.starts_with("src/adapter/outbound/sqlite/"))
    .collect::<Vec<_>>();

    assert!(hits.is_empty(), "diesel used outside the sqlite adapter: {hits:#?}");
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn pool_store_is_the_only_persistence_seam() {
    let source = read_relative("src/application/pool/manager.rs");
    assert!(
        source.contains("impl<S: PoolStore> BettingPool<S>"),
        "BettingPool should be generic over the PoolStore port"
    );
}
