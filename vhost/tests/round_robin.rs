//! Round-robin selection as seen by a request router.

use std::collections::HashSet;

use ztunnel_vhost::{RegistryConfig, RegistryError, RotationPolicy, VirtualHost, VirtualHosts};

#[test]
fn test_two_tunnels_alternate_then_wrap() {
    let registry = VirtualHosts::new();
    let u1 = VirtualHost::new("u1", "8080", "1.2.3.4:5");
    let u2 = VirtualHost::new("u2", "8081", "1.2.3.4:6");
    registry.add_host(&u1, "u1");
    registry.add_host(&u2, "u2");

    let first = registry.get_next_host().unwrap();
    let second = registry.get_next_host().unwrap();
    let third = registry.get_next_host().unwrap();

    assert!(first == u1 || first == u2);
    assert_ne!(first, second);
    assert!(third == u1 || third == u2);
}

#[test]
fn test_fresh_registry_has_no_target() {
    let registry = VirtualHosts::default();
    assert_eq!(registry.get_next_host(), Err(RegistryError::EmptyRegistry));
    assert_eq!(
        registry.get_next_host().unwrap_err().to_string(),
        "there is no open connections"
    );
}

#[test]
fn test_full_cycle_covers_every_tunnel() {
    for n in 2..8 {
        let registry = VirtualHosts::new();
        for i in 0..n {
            let id = format!("conn-{}", i);
            registry.add_host(&VirtualHost::new(&id, "80", "10.0.0.1:1"), &id);
        }

        let seen: HashSet<String> = (0..n)
            .map(|_| registry.get_next_host().unwrap().identifier)
            .collect();
        assert_eq!(seen.len(), n);

        let wrapped = registry.get_next_host().unwrap();
        assert!(seen.contains(&wrapped.identifier));
    }
}

#[test]
fn test_registry_from_config() {
    let config: RegistryConfig = serde_yaml::from_str("rotation: ordered").unwrap();
    let registry = VirtualHosts::with_config(&config);
    assert_eq!(registry.policy(), RotationPolicy::Ordered);

    for id in ["x", "y"] {
        registry.add_host(&VirtualHost::new(id, "80", "10.0.0.1:1"), id);
    }
    let picked: Vec<String> = (0..4)
        .map(|_| registry.get_next_host().unwrap().identifier)
        .collect();
    assert_eq!(picked, ["x", "y", "x", "y"]);
}
