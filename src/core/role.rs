//! Role identification and per-role data storage.
//!
//! ## RoleId
//!
//! Type-safe role identifier. Roles follow the order the game model
//! declares them in; `RoleId(0)` is the first declared role.
//!
//! ## RoleMap
//!
//! Per-role storage backed by `Vec` for O(1) access. A joint action is a
//! `RoleMap` holding one action per role.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Role identifier supporting 1-255 roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u8);

impl RoleId {
    /// Create a new role ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw role index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all role IDs in declaration order.
    ///
    /// ```
    /// use ggp_search::core::RoleId;
    ///
    /// let roles: Vec<_> = RoleId::all(3).collect();
    /// assert_eq!(roles, vec![RoleId::new(0), RoleId::new(1), RoleId::new(2)]);
    /// ```
    pub fn all(role_count: usize) -> impl Iterator<Item = RoleId> {
        (0..role_count as u8).map(RoleId)
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Role {}", self.0)
    }
}

/// Per-role data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ggp_search::core::{RoleId, RoleMap};
///
/// let mut goals: RoleMap<u8> = RoleMap::with_value(2, 50);
/// goals[RoleId::new(1)] = 100;
/// assert_eq!(goals[RoleId::new(0)], 50);
/// assert_eq!(goals[RoleId::new(1)], 100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleMap<T> {
    data: Vec<T>,
}

/// One action per role, ordered by role.
pub type JointAction<A> = RoleMap<A>;

impl<T> RoleMap<T> {
    /// Create a new RoleMap with values from a factory function.
    pub fn new(role_count: usize, factory: impl Fn(RoleId) -> T) -> Self {
        assert!(role_count > 0, "Must have at least 1 role");
        assert!(role_count <= 255, "At most 255 roles supported");

        let data = (0..role_count as u8).map(|i| factory(RoleId(i))).collect();
        Self { data }
    }

    /// Create a new RoleMap with all entries set to the same value.
    pub fn with_value(role_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(role_count, |_| value.clone())
    }

    /// Build from a vector already in role order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 role");
        assert!(data.len() <= 255, "At most 255 roles supported");
        Self { data }
    }

    /// Number of roles.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, role: RoleId) -> &T {
        &self.data[role.index()]
    }

    pub fn get_mut(&mut self, role: RoleId) -> &mut T {
        &mut self.data[role.index()]
    }

    /// Iterate over (RoleId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (RoleId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (RoleId(i as u8), v))
    }

    /// Values in role order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Index<RoleId> for RoleMap<T> {
    type Output = T;

    fn index(&self, role: RoleId) -> &Self::Output {
        self.get(role)
    }
}

impl<T> IndexMut<RoleId> for RoleMap<T> {
    fn index_mut(&mut self, role: RoleId) -> &mut Self::Output {
        self.get_mut(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_id_basics() {
        let r1 = RoleId::new(1);
        assert_eq!(r1.index(), 1);
        assert_eq!(format!("{}", r1), "Role 1");
    }

    #[test]
    fn test_role_map_new() {
        let map: RoleMap<i32> = RoleMap::new(3, |r| r.index() as i32 * 10);
        assert_eq!(map[RoleId::new(0)], 0);
        assert_eq!(map[RoleId::new(2)], 20);
        assert_eq!(map.role_count(), 3);
    }

    #[test]
    fn test_joint_action_from_vec() {
        let joint: JointAction<&str> = RoleMap::from_vec(vec!["mark", "noop"]);
        assert_eq!(joint[RoleId::new(0)], "mark");
        assert_eq!(joint[RoleId::new(1)], "noop");
        assert_eq!(joint.as_slice(), &["mark", "noop"]);
    }

    #[test]
    fn test_role_map_iter() {
        let map: RoleMap<i32> = RoleMap::new(2, |r| r.index() as i32);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(RoleId::new(0), &0), (RoleId::new(1), &1)]);
    }

    #[test]
    fn test_role_map_serialization() {
        let map: RoleMap<u8> = RoleMap::from_vec(vec![0, 100]);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: RoleMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 role")]
    fn test_role_map_zero_roles() {
        let _: RoleMap<i32> = RoleMap::with_value(0, 0);
    }
}
