//! Aliased Property Tests

use strand_reactivity::{
    alias, define_property, get, inspect, remove_dependent_keys, set, unwatch, watch,
    ObjectId, PropertyError, Registry, Value,
};

fn host_with_total(registry: &mut Registry) -> ObjectId {
    let host = registry.create_object();
    set(registry, host, "total", Value::from(3)).unwrap();
    host
}

#[test]
fn should_mirror_the_target_value() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total")).unwrap();

    assert_eq!(get(&mut registry, host, "mirror").unwrap(), Value::from(3));
    assert_eq!(
        get(&mut registry, host, "mirror").unwrap(),
        get(&mut registry, host, "total").unwrap()
    );
}

#[test]
fn should_reject_a_self_referential_alias() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);

    let error = define_property(&mut registry, host, "mirror", alias("mirror")).unwrap_err();
    assert_eq!(
        error,
        PropertyError::SelfReferentialAlias {
            key: "mirror".to_string()
        }
    );

    // The failed declaration registers nothing and leaves the key undefined.
    assert!(!registry.meta(host).unwrap().peek_deps("mirror", "mirror"));
    assert_eq!(get(&mut registry, host, "mirror").unwrap(), Value::Null);
}

#[test]
fn should_forward_two_way_writes_to_the_target() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total")).unwrap();

    let written = set(&mut registry, host, "mirror", Value::from(5)).unwrap();
    assert_eq!(written, Value::from(5));
    assert_eq!(get(&mut registry, host, "total").unwrap(), Value::from(5));
}

#[test]
fn should_raise_on_read_only_writes_and_leave_the_target_unchanged() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total").read_only()).unwrap();

    let error = set(&mut registry, host, "mirror", Value::from(5)).unwrap_err();
    match &error {
        PropertyError::ReadOnlyWrite { key, object } => {
            assert_eq!(key, "mirror");
            assert_eq!(object, &inspect(&registry, host));
        }
        other => panic!("expected ReadOnlyWrite, got {:?}", other),
    }
    assert!(error
        .to_string()
        .starts_with("Cannot set read-only property 'mirror' on object:"));

    assert_eq!(get(&mut registry, host, "total").unwrap(), Value::from(3));
    assert_eq!(get(&mut registry, host, "mirror").unwrap(), Value::from(3));
}

#[test]
fn should_detach_a_one_way_alias_on_first_write() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total").one_way()).unwrap();

    set(&mut registry, host, "mirror", Value::from(4)).unwrap();
    assert_eq!(get(&mut registry, host, "mirror").unwrap(), Value::from(4));
    assert_eq!(get(&mut registry, host, "total").unwrap(), Value::from(3));

    // The key is an ordinary property now: further writes stay local and the
    // target no longer shows through.
    set(&mut registry, host, "mirror", Value::from(7)).unwrap();
    assert_eq!(get(&mut registry, host, "mirror").unwrap(), Value::from(7));
    assert_eq!(get(&mut registry, host, "total").unwrap(), Value::from(3));

    set(&mut registry, host, "total", Value::from(9)).unwrap();
    assert_eq!(get(&mut registry, host, "mirror").unwrap(), Value::from(7));
}

#[test]
fn should_drop_the_dependency_edge_when_a_watched_one_way_alias_detaches() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total").one_way()).unwrap();

    watch(&mut registry, host, "mirror").unwrap();
    assert!(registry.meta(host).unwrap().peek_deps("total", "mirror"));

    set(&mut registry, host, "mirror", Value::from(4)).unwrap();
    assert!(!registry.meta(host).unwrap().peek_deps("total", "mirror"));
}

#[test]
fn should_register_the_dependency_edge_on_first_watch_only() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total")).unwrap();

    assert!(!registry.meta(host).unwrap().peek_deps("total", "mirror"));

    watch(&mut registry, host, "mirror").unwrap();
    assert!(registry.meta(host).unwrap().peek_deps("total", "mirror"));

    // A second watcher reuses the existing edge.
    watch(&mut registry, host, "mirror").unwrap();
    assert!(registry.meta(host).unwrap().peek_deps("total", "mirror"));

    unwatch(&mut registry, host, "mirror").unwrap();
    assert!(registry.meta(host).unwrap().peek_deps("total", "mirror"));

    unwatch(&mut registry, host, "mirror").unwrap();
    assert!(!registry.meta(host).unwrap().peek_deps("total", "mirror"));

    // Unwatching past zero stays a no-op.
    unwatch(&mut registry, host, "mirror").unwrap();
    assert!(!registry.meta(host).unwrap().peek_deps("total", "mirror"));
}

#[test]
fn should_register_immediately_when_setup_finds_an_existing_watcher() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);

    watch(&mut registry, host, "mirror").unwrap();
    define_property(&mut registry, host, "mirror", alias("total")).unwrap();

    assert!(registry.meta(host).unwrap().peek_deps("total", "mirror"));
}

#[test]
fn should_reassert_the_edge_on_every_read() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total")).unwrap();

    watch(&mut registry, host, "mirror").unwrap();
    assert!(registry.meta(host).unwrap().peek_deps("total", "mirror"));

    // Drop the edge behind the alias's back; a single read heals it.
    let descriptor = alias("total");
    remove_dependent_keys(&descriptor, &mut registry, host, "mirror").unwrap();
    assert!(!registry.meta(host).unwrap().peek_deps("total", "mirror"));

    get(&mut registry, host, "mirror").unwrap();
    assert!(registry.meta(host).unwrap().peek_deps("total", "mirror"));
}

#[test]
fn should_notify_watchers_of_the_alias_when_the_target_changes() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total")).unwrap();

    watch(&mut registry, host, "mirror").unwrap();
    registry.take_changes();

    set(&mut registry, host, "total", Value::from(10)).unwrap();
    let changes = registry.take_changes();
    assert!(changes.iter().any(|change| change.key == "mirror"));
    // "total" itself is unwatched, so no event for it.
    assert!(!changes.iter().any(|change| change.key == "total"));

    watch(&mut registry, host, "total").unwrap();
    set(&mut registry, host, "total", Value::from(11)).unwrap();
    let changes = registry.take_changes();
    assert!(changes.iter().any(|change| change.key == "total"));
    assert!(changes.iter().any(|change| change.key == "mirror"));
}

#[test]
fn should_notify_alias_watchers_when_writing_through_the_alias() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);
    define_property(&mut registry, host, "mirror", alias("total")).unwrap();

    watch(&mut registry, host, "mirror").unwrap();
    registry.take_changes();

    set(&mut registry, host, "mirror", Value::from(12)).unwrap();
    let changes = registry.take_changes();
    assert!(changes.iter().any(|change| change.key == "mirror"));
}

// The end-to-end scenario: two-way mirror, then a read-only redeclaration.
#[test]
fn should_support_the_mirror_scenario() {
    let mut registry = Registry::new();
    let host = host_with_total(&mut registry);

    define_property(&mut registry, host, "mirror", alias("total")).unwrap();
    assert_eq!(get(&mut registry, host, "mirror").unwrap(), Value::from(3));

    set(&mut registry, host, "mirror", Value::from(5)).unwrap();
    assert_eq!(get(&mut registry, host, "total").unwrap(), Value::from(5));

    define_property(&mut registry, host, "mirror", alias("total").read_only()).unwrap();
    assert!(set(&mut registry, host, "mirror", Value::from(6)).is_err());
    assert_eq!(get(&mut registry, host, "total").unwrap(), Value::from(5));
}
