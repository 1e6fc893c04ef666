//! Property tests: diffing in both directions implicates the same resources.

use std::collections::BTreeMap;

use graphdecl_diff::{DiffAction, diff};
use graphdecl_foundation::{DiscoveredResource, IndexDef, PropertyDef, ResourceKind};
use proptest::prelude::*;

fn property() -> impl Strategy<Value = PropertyDef> {
    (
        prop::sample::select(vec!["id", "name", "age", "email"]),
        prop::sample::select(vec!["String", "Integer"]),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(name, ty, required, unique)| PropertyDef {
            name: name.to_string(),
            ty: ty.to_string(),
            required,
            unique,
            description: None,
        })
}

fn resource() -> impl Strategy<Value = DiscoveredResource> {
    (
        prop::sample::select(vec!["Person", "Company", "Team", "KNOWS"]),
        prop::collection::vec(property(), 0..4),
        any::<bool>(),
    )
        .prop_map(|(label, properties, indexed)| {
            let mut resource = if label == "KNOWS" {
                DiscoveredResource::relationship(label, "Person", "Person")
            } else {
                DiscoveredResource::node(label)
            };
            for property in properties {
                if resource.property(&property.name).is_none() {
                    resource.properties.push(property);
                }
            }
            if indexed {
                resource = resource.with_index(IndexDef::new("RANGE", ["name"]));
            }
            resource
        })
}

fn snapshot() -> impl Strategy<Value = Vec<DiscoveredResource>> {
    prop::collection::vec(resource(), 0..5)
}

proptest! {
    #[test]
    fn diff_is_symmetric(a in snapshot(), b in snapshot()) {
        let forward = diff(&a, &b);
        let backward = diff(&b, &a);

        let flip = |entries: &[graphdecl_diff::DiffEntry]| -> BTreeMap<(ResourceKind, String), DiffAction> {
            entries
                .iter()
                .map(|e| ((e.kind, e.name.clone()), e.action))
                .collect()
        };
        let forward_map = flip(&forward.entries);
        let backward_map = flip(&backward.entries);

        prop_assert_eq!(forward_map.len(), backward_map.len());
        for (key, action) in &forward_map {
            prop_assert_eq!(backward_map.get(key).copied(), Some(action.reversed()));
        }

        let counts = forward.counts();
        let reverse = backward.counts();
        prop_assert_eq!(counts.added, reverse.removed);
        prop_assert_eq!(counts.modified, reverse.modified);
    }

    #[test]
    fn self_diff_is_empty(a in snapshot()) {
        prop_assert!(diff(&a, &a).is_empty());
    }

    #[test]
    fn removing_a_property_is_always_breaking(r in resource()) {
        prop_assume!(!r.properties.is_empty());
        let mut trimmed = r.clone();
        trimmed.properties.pop();
        let result = diff(&[r], &[trimmed]);
        prop_assert!(result.has_breaking());
    }
}
