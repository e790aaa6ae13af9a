//! Per-frame contact registry
//!
//! Narrow-phase routines append to the registry as they detect overlaps.
//! The world clears it at the start of every step, so after a step it holds
//! exactly the contacts of that frame. An unordered body pair is recorded at
//! most once per frame: the first detection wins and later ones, including
//! those from later substeps, are ignored.

use crate::body::BodyKey;
use bubblecatch_math::Vec2;

/// A detected overlap between two bodies
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub a: BodyKey,
    pub b: BodyKey,
    /// Unit normal pointing from `b` toward `a` (the direction `a` was pushed)
    pub normal: Vec2,
}

impl Contact {
    /// Create a new contact
    pub fn new(a: BodyKey, b: BodyKey, normal: Vec2) -> Self {
        Self { a, b, normal }
    }

    /// Check whether `key` is either side of this contact
    pub fn involves(&self, key: BodyKey) -> bool {
        self.a == key || self.b == key
    }

    /// Check whether this contact is between `x` and `y`, in either order
    pub fn is_pair(&self, x: BodyKey, y: BodyKey) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// The other side of the contact and the normal pointing toward `key`
    ///
    /// Returns `None` if `key` is not part of this contact.
    pub fn toward(&self, key: BodyKey) -> Option<(BodyKey, Vec2)> {
        if self.a == key {
            Some((self.b, self.normal))
        } else if self.b == key {
            Some((self.a, -self.normal))
        } else {
            None
        }
    }
}

/// The contacts detected during the current frame, in detection order
#[derive(Clone, Debug, Default)]
pub struct ContactRegistry {
    contacts: Vec<Contact>,
}

impl ContactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every contact (start of a frame)
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Check whether the unordered pair already has a contact this frame
    pub fn contains_pair(&self, x: BodyKey, y: BodyKey) -> bool {
        self.contacts.iter().any(|c| c.is_pair(x, y))
    }

    /// Record a contact unless its pair is already known
    ///
    /// Returns `true` if the contact was added.
    pub fn insert(&mut self, contact: Contact) -> bool {
        if self.contains_pair(contact.a, contact.b) {
            return false;
        }
        self.contacts.push(contact);
        true
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contacts involving `key`, as `(other, normal toward key)`
    pub fn involving(&self, key: BodyKey) -> impl Iterator<Item = (BodyKey, Vec2)> + '_ {
        self.contacts.iter().filter_map(move |c| c.toward(key))
    }

    /// Drop every contact that references `key`
    pub fn retain_without(&mut self, key: BodyKey) {
        self.contacts.retain(|c| !c.involves(key));
    }
}

impl<'a> IntoIterator for &'a ContactRegistry {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn three_keys() -> (BodyKey, BodyKey, BodyKey) {
        let mut map: SlotMap<BodyKey, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()), map.insert(()))
    }

    #[test]
    fn test_insert_and_dedup_unordered() {
        let (a, b, c) = three_keys();
        let mut registry = ContactRegistry::new();

        assert!(registry.insert(Contact::new(a, b, Vec2::Y)));
        // Same pair, swapped order, is a duplicate
        assert!(!registry.insert(Contact::new(b, a, -Vec2::Y)));
        assert!(registry.insert(Contact::new(a, c, Vec2::X)));

        assert_eq!(registry.len(), 2);
        // The first detection is kept untouched
        assert_eq!(registry.as_slice()[0].normal, Vec2::Y);
    }

    #[test]
    fn test_contains_pair() {
        let (a, b, c) = three_keys();
        let mut registry = ContactRegistry::new();
        registry.insert(Contact::new(a, b, Vec2::Y));

        assert!(registry.contains_pair(a, b));
        assert!(registry.contains_pair(b, a));
        assert!(!registry.contains_pair(a, c));
    }

    #[test]
    fn test_clear() {
        let (a, b, _) = three_keys();
        let mut registry = ContactRegistry::new();
        registry.insert(Contact::new(a, b, Vec2::Y));
        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.insert(Contact::new(a, b, Vec2::Y)));
    }

    #[test]
    fn test_involving_orients_normal() {
        let (a, b, c) = three_keys();
        let mut registry = ContactRegistry::new();
        registry.insert(Contact::new(a, b, Vec2::Y));

        let from_a: Vec<_> = registry.involving(a).collect();
        assert_eq!(from_a, vec![(b, Vec2::Y)]);

        let from_b: Vec<_> = registry.involving(b).collect();
        assert_eq!(from_b, vec![(a, -Vec2::Y)]);

        assert_eq!(registry.involving(c).count(), 0);
    }

    #[test]
    fn test_retain_without() {
        let (a, b, c) = three_keys();
        let mut registry = ContactRegistry::new();
        registry.insert(Contact::new(a, b, Vec2::Y));
        registry.insert(Contact::new(b, c, Vec2::X));
        registry.insert(Contact::new(a, c, Vec2::X));

        registry.retain_without(b);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains_pair(a, c));
        assert!((&registry).into_iter().all(|contact| !contact.involves(b)));
    }
}
