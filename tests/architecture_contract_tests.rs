//! Architecture contract tests.

mod support;

use support::architecture::find_lines_containing;

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "diesel::",
            "axum::",
            "teloxide::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "reqwest::",
            "diesel::",
            "axum::",
            "teloxide::",
        ],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn application_does_not_reach_into_adapters() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::adapter", "crate::infrastructure", "reqwest::", "diesel::", "teloxide::"],
    );

    assert!(
        hits.is_empty(),
        "found adapter imports in application layer: {hits:#?}"
    );
}

#[test]
fn telegram_types_stay_behind_the_feature_gate() {
    let hits = find_lines_containing("src/adapter/inbound/telegram", &["use teloxide"]);

    for (file, _, _) in &hits {
        assert!(
            file.ends_with("bot.rs") || file.ends_with("keyboard.rs"),
            "teloxide used outside the gated modules: {file}"
        );
    }
}
