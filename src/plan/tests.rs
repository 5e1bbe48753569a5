//! Tests for plan compilation and the plan cache.

use std::sync::Arc;
use std::thread;

use super::{PlanCache, RuleExecutionStep, compile_plan};
use crate::config::RuleConfiguration;
use crate::value::TypeDescriptor;

static USER_PROFILE: TypeDescriptor =
    TypeDescriptor::new("UserProfile", &["Age", "Username", "Password"]);

const YAML: &str = r#"
RuleWeaver:
  UserProfile:
    Password:
      - RuleName: MinLength
        RuleParameter: 8
      - RuleName: Regex
        RuleParameter: "[0-9]"
        RuleErrorMessage: Needs number
    Nickname:
      - RuleName: Required
    age:
      - RuleName: MinValue
        RuleParameter: 18
        RuleErrorMessage: "   "
      - RuleParameter: orphan
      - RuleName: "  "
"#;

fn config() -> RuleConfiguration {
    RuleConfiguration::from_yaml(YAML).unwrap()
}

#[test]
fn test_missing_type_section_gives_empty_plan() {
    let plan = compile_plan(&config(), &TypeDescriptor::open("Order"));

    assert_eq!(plan.type_name, "Order");
    assert!(plan.is_empty());
    assert_eq!(plan.step_count(), 0);
}

#[test]
fn test_properties_follow_configuration_order() {
    let plan = compile_plan(&config(), &USER_PROFILE);
    let names: Vec<&str> = plan
        .properties
        .iter()
        .map(|p| p.property_name.as_str())
        .collect();

    assert_eq!(names, vec!["Password", "Age"]);
}

#[test]
fn test_undeclared_properties_are_skipped() {
    let plan = compile_plan(&config(), &USER_PROFILE);
    assert!(plan.property("Nickname").is_none());
}

#[test]
fn test_property_names_resolve_to_declared_spelling() {
    let plan = compile_plan(&config(), &USER_PROFILE);

    assert!(plan.property("age").is_none());
    assert!(plan.property("Age").is_some());
}

#[test]
fn test_entries_without_rule_names_are_dropped() {
    let plan = compile_plan(&config(), &USER_PROFILE);
    let age = plan.property("Age").unwrap();

    assert_eq!(
        age.steps,
        vec![RuleExecutionStep::new(
            "MinValue",
            vec!["18".to_string()],
            Some("   ".to_string())
        )]
    );
}

#[test]
fn test_steps_keep_args_and_messages_in_order() {
    let plan = compile_plan(&config(), &USER_PROFILE);
    let password = plan.property("Password").unwrap();

    assert_eq!(password.steps.len(), 2);
    assert_eq!(password.steps[0].rule_name, "MinLength");
    assert_eq!(password.steps[0].args, vec!["8"]);
    assert_eq!(password.steps[0].custom_message(), None);
    assert_eq!(password.steps[1].rule_name, "Regex");
    assert_eq!(password.steps[1].args, vec!["[0-9]"]);
    assert_eq!(password.steps[1].custom_message(), Some("Needs number"));
    assert_eq!(plan.step_count(), 3);
}

#[test]
fn test_blank_custom_message_is_ignored() {
    let step = RuleExecutionStep::new("MinValue", vec![], Some("  ".to_string()));
    assert_eq!(step.custom_message(), None);
}

#[test]
fn test_nested_step_is_recognized_ignoring_case() {
    assert!(RuleExecutionStep::new("Nested", vec![], None).is_nested());
    assert!(RuleExecutionStep::new("nested", vec![], None).is_nested());
    assert!(!RuleExecutionStep::new("Required", vec![], None).is_nested());
}

#[test]
fn test_open_types_accept_every_configured_property() {
    let plan = compile_plan(&config(), &TypeDescriptor::open("UserProfile"));
    let names: Vec<&str> = plan
        .properties
        .iter()
        .map(|p| p.property_name.as_str())
        .collect();

    assert_eq!(names, vec!["Password", "Nickname", "age"]);
}

#[test]
fn test_compilation_is_idempotent() {
    let config = config();
    assert_eq!(
        compile_plan(&config, &USER_PROFILE),
        compile_plan(&config, &USER_PROFILE)
    );
}

#[test]
fn test_plan_serializes_with_camel_case_keys() {
    let plan = compile_plan(&config(), &USER_PROFILE);
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["typeName"], "UserProfile");
    assert_eq!(json["properties"][0]["propertyName"], "Password");
    assert_eq!(json["properties"][0]["steps"][1]["ruleName"], "Regex");
    assert_eq!(
        json["properties"][0]["steps"][1]["customErrorMessage"],
        "Needs number"
    );
    assert!(json["properties"][0]["steps"][0].get("customErrorMessage").is_none());
}

#[test]
fn test_cache_returns_the_same_plan() {
    let cache = PlanCache::new(config());
    assert!(cache.is_empty());

    let first = cache.plan_for(&USER_PROFILE);
    let second = cache.plan_for(&USER_PROFILE);

    assert!(Arc::ptr_eq(&first, &second));
    assert!(cache.contains(&USER_PROFILE));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_keys_on_the_whole_descriptor() {
    let cache = PlanCache::new(config());

    let declared = cache.plan_for(&USER_PROFILE);
    let open = cache.plan_for(&TypeDescriptor::open("UserProfile"));

    assert_eq!(cache.len(), 2);
    assert_ne!(declared.properties.len(), open.properties.len());
}

#[test]
fn test_unconfigured_types_are_not_cached() {
    let cache = PlanCache::new(RuleConfiguration::empty());
    let ghost = TypeDescriptor::open("Ghost");

    let plan = cache.plan_for(&ghost);
    assert!(plan.is_empty());
    assert_eq!(plan.type_name, "Ghost");
    assert!(!cache.contains(&ghost));
    assert!(cache.is_empty());
}

#[test]
fn test_cache_size_is_bounded_by_configured_types() {
    let cache = PlanCache::new(config());

    for i in 0..500 {
        let plan = cache.plan_for(&TypeDescriptor::open(format!("Unknown{}", i)));
        assert!(plan.is_empty());
    }
    cache.plan_for(&TypeDescriptor::open("UserProfile"));
    cache.plan_for(&TypeDescriptor::open("userprofile"));

    // Section lookup ignores case, but descriptors are keyed by exact name.
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_concurrent_lookups_share_one_plan() {
    let cache = Arc::new(PlanCache::new(config()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.plan_for(&USER_PROFILE))
        })
        .collect();

    let plans: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for plan in &plans[1..] {
        assert!(Arc::ptr_eq(&plans[0], plan));
    }
    assert_eq!(cache.len(), 1);
}
