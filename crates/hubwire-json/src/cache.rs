//! Per-type member name cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::strategy::Strategy;

/// Identifies a cached type.
///
/// Serde only reports a type's bare name, so two types with the same name in
/// different modules share an entry. Decoding checks every cached member
/// against the fields the type actually declares before using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    /// `std::any::type_name` of the strategy that produced the entry.
    pub strategy: &'static str,
    /// The type name serde reports for the struct.
    pub type_name: &'static str,
}

impl TypeKey {
    /// Key for `type_name` under strategy `S`.
    #[must_use]
    pub fn of<S: ?Sized>(type_name: &'static str) -> Self {
        Self {
            strategy: std::any::type_name::<S>(),
            type_name,
        }
    }
}

/// A struct member and its wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Name as declared on the host type (after any serde rename).
    pub host: &'static str,
    /// Name as it appears in JSON.
    pub wire: String,
}

/// The members of one type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Members {
    members: Vec<Member>,
}

impl Members {
    /// Map every host name through the strategy.
    #[must_use]
    pub fn build<S: Strategy + ?Sized>(hosts: &[&'static str], strategy: &S) -> Self {
        Self {
            members: hosts
                .iter()
                .map(|&host| Member {
                    host,
                    wire: strategy.member_name(host),
                })
                .collect(),
        }
    }

    /// Wire name of a host member, if known.
    #[must_use]
    pub fn wire_name(&self, host: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.host == host)
            .map(|m| m.wire.as_str())
    }

    /// Host member for a wire name, if known.
    #[must_use]
    pub fn host_name(&self, wire: &str) -> Option<&'static str> {
        self.members.iter().find(|m| m.wire == wire).map(|m| m.host)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Cache of type → members, shared between serializer instances.
///
/// Entries are built outside the lock and published whole. Two threads that
/// miss at the same time may both build an entry; the first one stored wins
/// and both callers get it.
#[derive(Debug, Default)]
pub struct MemberCache {
    types: RwLock<HashMap<TypeKey, Arc<Members>>>,
}

impl MemberCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a type without populating the cache.
    #[must_use]
    pub fn get(&self, key: &TypeKey) -> Option<Arc<Members>> {
        // Entries are only ever inserted whole, so a poisoned map is still valid.
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Return the entry for `key`, building it with `build` on a miss.
    pub fn get_or_insert_with(
        &self,
        key: TypeKey,
        build: impl FnOnce() -> Members,
    ) -> Arc<Members> {
        if let Some(members) = self.get(&key) {
            return members;
        }

        let built = Arc::new(build());
        trace!(
            type_name = key.type_name,
            members = built.len(),
            "caching member names"
        );

        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(built)
            .clone()
    }

    /// Number of cached types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::strategy::{GitHubStrategy, PocoStrategy};

    const FIELDS: &[&str] = &["Id", "LastReadAt"];

    #[test]
    fn test_members_build() {
        let members = Members::build(FIELDS, &GitHubStrategy);
        assert_eq!(members.len(), 2);
        assert_eq!(members.wire_name("LastReadAt"), Some("last_read_at"));
        assert_eq!(members.host_name("id"), Some("Id"));
        assert_eq!(members.host_name("Id"), None);
        assert_eq!(members.wire_name("Missing"), None);
    }

    #[test]
    fn test_get_or_insert_builds_once() {
        let cache = MemberCache::new();
        let key = TypeKey::of::<GitHubStrategy>("Thread");
        let builds = AtomicUsize::new(0);

        for _ in 0..3 {
            let members = cache.get_or_insert_with(key, || {
                builds.fetch_add(1, Ordering::SeqCst);
                Members::build(FIELDS, &GitHubStrategy)
            });
            assert_eq!(members.len(), 2);
        }

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_entry_wins() {
        let cache = MemberCache::new();
        let key = TypeKey::of::<GitHubStrategy>("Thread");

        let first = cache.get_or_insert_with(key, || Members::build(&["Id"], &GitHubStrategy));
        let second = cache.get_or_insert_with(key, || Members::build(FIELDS, &GitHubStrategy));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_strategies_do_not_share_entries() {
        let cache = MemberCache::new();
        let github = cache.get_or_insert_with(TypeKey::of::<GitHubStrategy>("Thread"), || {
            Members::build(FIELDS, &GitHubStrategy)
        });
        let poco = cache.get_or_insert_with(TypeKey::of::<PocoStrategy>("Thread"), || {
            Members::build(FIELDS, &PocoStrategy)
        });

        assert_eq!(github.wire_name("LastReadAt"), Some("last_read_at"));
        assert_eq!(poco.wire_name("LastReadAt"), Some("LastReadAt"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear() {
        let cache = MemberCache::new();
        cache.get_or_insert_with(TypeKey::of::<GitHubStrategy>("Thread"), Members::default);
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&TypeKey::of::<GitHubStrategy>("Thread")).is_none());
    }

    #[test]
    fn test_concurrent_lookups_see_complete_entries() {
        let cache = Arc::new(MemberCache::new());
        let key = TypeKey::of::<GitHubStrategy>("Thread");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    cache
                        .get_or_insert_with(key, || Members::build(FIELDS, &GitHubStrategy))
                        .len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
        assert_eq!(cache.len(), 1);
    }
}
