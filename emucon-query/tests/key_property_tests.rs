use emucon_core::cloudwatch::{LogEventsOptions, LogGroupsOptions};
use emucon_query::{InvalidationSet, QueryKey};
use emucon_test_utils::generators::{
    arb_identifier, arb_log_events_options, arb_log_groups_options,
};
use proptest::prelude::*;

#[test]
fn default_options_add_no_segment() {
    let key = QueryKey::new("log-groups").options(&LogGroupsOptions::default());
    assert_eq!(key, QueryKey::new("log-groups"));
}

#[test]
fn missing_fields_match_explicit_none() {
    let sparse = QueryKey::new("log-groups").options(&serde_json::json!({"limit": 5}));
    let full = QueryKey::new("log-groups").options(&serde_json::json!({
        "prefix": null,
        "limit": 5,
    }));
    assert_eq!(sparse, full);
}

proptest! {
    #[test]
    fn equal_options_build_equal_keys(opts in arb_log_groups_options()) {
        let a = QueryKey::new("log-groups").options(&opts);
        let b = QueryKey::new("log-groups").options(&opts.clone());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn field_order_does_not_change_the_key(limit in 1u32..100, prefix in "[a-z/]{1,10}") {
        let a = QueryKey::new("log-groups")
            .options(&serde_json::json!({"limit": limit, "prefix": prefix.clone()}));
        let b = QueryKey::new("log-groups")
            .options(&serde_json::json!({"prefix": prefix, "limit": limit}));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn family_matches_every_descendant(
        name in arb_identifier(),
        opts in arb_log_events_options(),
    ) {
        let family = QueryKey::new("log-events");
        let key = family.clone().segment(name.clone()).options(&opts);

        prop_assert!(key.starts_with(&family));
        prop_assert!(key.starts_with(&family.clone().segment(name)));
        prop_assert!(InvalidationSet::new().with(family).matches(&key));
        prop_assert!(!InvalidationSet::new().with(QueryKey::new("log-groups")).matches(&key));
    }

    #[test]
    fn distinct_identifiers_do_not_share_a_slot(a in arb_identifier(), b in arb_identifier()) {
        prop_assume!(a != b);
        let opts = LogEventsOptions::default();
        let ka = QueryKey::new("log-events").segment(a).options(&opts);
        let kb = QueryKey::new("log-events").segment(b).options(&opts);
        prop_assert_ne!(ka.clone(), kb.clone());
        prop_assert!(!ka.starts_with(&kb));
    }
}
