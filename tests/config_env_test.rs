//! Environment variable overrides for Settings.
//!
//! Kept in its own test binary with a single test: the variables are
//! process-global.

use std::env;

use selecttree::config::Settings;
use selecttree::domain::{Record, RecordKey};

#[test]
fn given_env_overrides_when_load_then_env_wins_over_defaults() {
    env::set_var("SELECTTREE_FIELD__ROOT_LIMIT", "2");
    env::set_var("SELECTTREE_FIELD__DISABLED_OPTIONS", "3,draft,4");
    env::set_var("SELECTTREE_DISPLAY__PLACEHOLDER", "Pick one");

    let settings = Settings::load(None).expect("load settings");

    env::remove_var("SELECTTREE_FIELD__ROOT_LIMIT");
    env::remove_var("SELECTTREE_FIELD__DISABLED_OPTIONS");
    env::remove_var("SELECTTREE_DISPLAY__PLACEHOLDER");

    assert_eq!(settings.field.root_limit, Some(2));
    assert_eq!(
        settings.field.disabled_options,
        vec![
            RecordKey::Int(3),
            RecordKey::Str("draft".into()),
            RecordKey::Int(4)
        ]
    );
    assert_eq!(settings.display.placeholder, "Pick one");

    // Integer records read from JSON must pick up the disabled flag
    let records = vec![
        Record::root(RecordKey::Int(3), "three"),
        Record::root(RecordKey::Int(5), "five"),
    ];
    let tree = settings.field.tree_builder().build(&records).unwrap();
    let flags: Vec<bool> = tree.iter().map(|n| n.disabled).collect();
    assert_eq!(flags, vec![true, false]);
}
