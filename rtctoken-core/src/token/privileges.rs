//! Insertion-ordered privilege sets
//!
//! Entry order determines the byte layout of the signed claim payload, so
//! the set is backed by an index-stable map rather than a hashed one.

use crate::Privilege;
use indexmap::IndexMap;

/// Ordered mapping from privilege code to expiry timestamp
#[derive(Debug, Clone, Default)]
pub struct PrivilegeSet {
    entries: IndexMap<u16, u32>,
}

impl PrivilegeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the expiry for a raw privilege code
    ///
    /// Re-adding a code overwrites its expiry in place and keeps its original
    /// position. Codes and expiries are not validated.
    pub fn add(&mut self, code: u16, expire_at: u32) {
        self.entries.insert(code, expire_at);
    }

    /// Insert or update a known privilege
    pub fn insert(&mut self, privilege: Privilege, expire_at: u32) {
        self.add(privilege.code(), expire_at);
    }

    /// Builder-style variant of [`PrivilegeSet::insert`]
    pub fn with(mut self, privilege: Privilege, expire_at: u32) -> Self {
        self.insert(privilege, expire_at);
        self
    }

    /// Grant every privilege in code order, all expiring at `expire_at`
    pub fn grant_all(expire_at: u32) -> Self {
        Privilege::ALL
            .into_iter()
            .fold(Self::new(), |set, p| set.with(p, expire_at))
    }

    /// Expiry currently held for a code
    pub fn get(&self, code: u16) -> Option<u32> {
        self.entries.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (u16, u32)> + '_ {
        self.entries.iter().map(|(code, expire_at)| (*code, *expire_at))
    }

    /// Overall token expiry: the latest expiry currently held, 0 when empty
    pub fn expired_ts(&self) -> u32 {
        self.entries.values().copied().max().unwrap_or(0)
    }
}

// Order is part of the wire layout, so equality compares entries in sequence.
impl PartialEq for PrivilegeSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.iter().eq(other.iter())
    }
}

impl Eq for PrivilegeSet {}

impl FromIterator<(u16, u32)> for PrivilegeSet {
    fn from_iter<I: IntoIterator<Item = (u16, u32)>>(iter: I) -> Self {
        let mut set = PrivilegeSet::new();
        for (code, expire_at) in iter {
            set.add(code, expire_at);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut set = PrivilegeSet::new();
        set.add(3, 100);
        set.add(1, 200);
        set.add(4, 300);

        let codes: Vec<u16> = set.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec![3, 1, 4]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut set = PrivilegeSet::new();
        set.insert(Privilege::JoinChannel, 100);
        set.insert(Privilege::PublishAudioStream, 200);
        set.insert(Privilege::JoinChannel, 500);

        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![(1, 500), (2, 200)]);
    }

    #[test]
    fn test_expired_ts_tracks_max() {
        let mut set = PrivilegeSet::new();
        assert_eq!(set.expired_ts(), 0);

        set.add(1, 100);
        assert_eq!(set.expired_ts(), 100);
        set.add(2, 50);
        assert_eq!(set.expired_ts(), 100);
        set.add(3, 900);
        assert_eq!(set.expired_ts(), 900);

        // Lowering the only maximal entry lowers the overall expiry
        set.add(3, 10);
        assert_eq!(set.expired_ts(), 100);
    }

    #[test]
    fn test_unknown_codes_accepted() {
        let mut set = PrivilegeSet::new();
        set.add(0, 1);
        set.add(u16::MAX, u32::MAX);
        assert_eq!(set.get(u16::MAX), Some(u32::MAX));
        assert_eq!(set.expired_ts(), u32::MAX);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = PrivilegeSet::from_iter([(1, 10), (2, 20)]);
        let b = PrivilegeSet::from_iter([(2, 20), (1, 10)]);
        assert_ne!(a, b);
        assert_eq!(a, PrivilegeSet::from_iter([(1, 10), (2, 20)]));
    }

    #[test]
    fn test_grant_all() {
        let set = PrivilegeSet::grant_all(1_700_003_600);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![
                (1, 1_700_003_600),
                (2, 1_700_003_600),
                (3, 1_700_003_600),
                (4, 1_700_003_600),
            ]
        );
    }
}
