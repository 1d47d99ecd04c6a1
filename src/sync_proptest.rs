//! Property-based tests for the access synchronizer.
//!
//! Random sequences of add/remove operations are applied to an in-memory
//! store, and the table invariants are checked after every step.

#[cfg(test)]
mod proptest_tests {
    use crate::access::{group_access_name, split_group_access_name, AccessType};
    use crate::store::MemoryStore;
    use crate::sync::AccessSynchronizer;
    use proptest::prelude::*;

    const REPO: &str = "Example_Repo";

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, String, AccessType),
        Remove(String, String, AccessType),
    }

    fn access_strategy() -> impl Strategy<Value = AccessType> {
        prop_oneof![
            Just(AccessType::Read),
            Just(AccessType::Triage),
            Just(AccessType::Write),
        ]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        // Small name pools so operations collide often.
        let group = prop_oneof![Just("alpha".to_string()), Just("beta".to_string())];
        let partner = prop_oneof![
            Just("p1".to_string()),
            Just("p2".to_string()),
            Just("p3".to_string()),
        ];
        (any::<bool>(), group, partner, access_strategy()).prop_map(|(add, g, p, a)| {
            if add {
                Op::Add(g, p, a)
            } else {
                Op::Remove(g, p, a)
            }
        })
    }

    fn check_invariants(store: &MemoryStore) -> Result<(), TestCaseError> {
        // No empty membership keys, and each key has a matching permission entry.
        for (key, partners) in store.groups.iter() {
            prop_assert!(!partners.is_empty(), "empty key {} persisted", key);
            let (_, access) = split_group_access_name(key).unwrap();
            let descriptor = store.permissions.get(REPO, key);
            prop_assert!(descriptor.is_some(), "{} has no permission entry", key);
            prop_assert_eq!(descriptor.unwrap().permissions, access);
        }

        // Every permission entry is backed by members.
        if let Some(section) = store.permissions.repository(REPO) {
            for key in section.keys() {
                prop_assert!(
                    store.groups.contains_group(key),
                    "permission entry {} has no members",
                    key
                );
            }
        }

        // A partner holds at most one access type per group.
        for group in ["alpha", "beta"] {
            for partner in ["p1", "p2", "p3"] {
                let held = AccessType::ALL
                    .into_iter()
                    .filter(|a| {
                        store
                            .groups
                            .contains_partner(&group_access_name(group, *a), partner)
                    })
                    .count();
                prop_assert!(held <= 1, "{} holds {} access types in {}", partner, held, group);
            }
        }
        Ok(())
    }

    proptest! {
        /// Property: table invariants hold after any sequence of operations
        #[test]
        fn invariants_hold_after_any_sequence(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let mut sync = AccessSynchronizer::new(MemoryStore::new(), REPO);
            for op in ops {
                match op {
                    Op::Add(g, p, a) => { sync.add_partner(&g, &p, a).unwrap(); }
                    Op::Remove(g, p, a) => { sync.remove_partner(&g, &p, a).unwrap(); }
                }
                check_invariants(sync.store())?;
            }
        }

        /// Property: after an add, the partner holds exactly the requested access
        #[test]
        fn add_leaves_partner_in_exactly_one_set(
            ops in prop::collection::vec(op_strategy(), 0..20),
            access in access_strategy(),
        ) {
            let mut sync = AccessSynchronizer::new(MemoryStore::new(), REPO);
            for op in ops {
                match op {
                    Op::Add(g, p, a) => { sync.add_partner(&g, &p, a).unwrap(); }
                    Op::Remove(g, p, a) => { sync.remove_partner(&g, &p, a).unwrap(); }
                }
            }

            sync.add_partner("alpha", "p1", access).unwrap();
            let store = sync.store();
            for other in AccessType::ALL {
                let member = store
                    .groups
                    .contains_partner(&group_access_name("alpha", other), "p1");
                prop_assert_eq!(member, other == access);
            }
        }

        /// Property: adding twice is the same as adding once
        #[test]
        fn add_is_idempotent(access in access_strategy()) {
            let mut sync = AccessSynchronizer::new(MemoryStore::new(), REPO);
            sync.add_partner("alpha", "p1", access).unwrap();
            let first = sync.store().groups.clone();
            let outcome = sync.add_partner("alpha", "p1", access).unwrap();
            prop_assert!(!outcome.changed);
            prop_assert_eq!(&sync.store().groups, &first);
        }
    }
}
