//! Group index: vertex groups ↔ per-vertex group membership

use hashbrown::HashMap;
use std::collections::BTreeSet;

use super::types::{Face, Group};

/// Forward direction: vertex index → ids of the groups containing it.
#[derive(Debug, Clone, Default)]
pub struct GroupMembership {
    by_vertex: Vec<BTreeSet<usize>>,
}

impl GroupMembership {
    /// Invert `groups` over a table of `vertex_count` vertices.
    ///
    /// Out-of-range members are ignored; models are validated before this runs.
    pub fn new(groups: &[Group], vertex_count: usize) -> Self {
        let mut by_vertex = vec![BTreeSet::new(); vertex_count];
        for (id, group) in groups.iter().enumerate() {
            for &vertex in &group.vertices {
                if let Some(set) = by_vertex.get_mut(vertex as usize) {
                    set.insert(id);
                }
            }
        }
        Self { by_vertex }
    }

    pub fn groups_of(&self, vertex: u32) -> Option<&BTreeSet<usize>> {
        self.by_vertex.get(vertex as usize)
    }

    /// Union of the group ids of a face's three corners.
    pub fn face_groups(&self, face: &Face) -> BTreeSet<usize> {
        face.vertices()
            .iter()
            .filter_map(|&v| self.groups_of(v))
            .flatten()
            .copied()
            .collect()
    }
}

/// Reverse direction: accumulates vertex → group names, then emits groups
/// in first-seen name order with ascending member indices.
#[derive(Debug, Clone, Default)]
pub struct GroupBuilder {
    order: Vec<String>,
    members: HashMap<String, BTreeSet<u32>>,
}

impl GroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<'a, I>(&mut self, vertex: u32, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.members_mut(name).insert(vertex);
        }
    }

    /// Add `vertices` to `name`, creating the group even when empty.
    pub fn extend_group<I>(&mut self, name: &str, vertices: I)
    where
        I: IntoIterator<Item = u32>,
    {
        self.members_mut(name).extend(vertices);
    }

    fn members_mut(&mut self, name: &str) -> &mut BTreeSet<u32> {
        if !self.members.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.members.entry(name.to_string()).or_default()
    }

    pub fn finish(mut self) -> Vec<Group> {
        self.order
            .into_iter()
            .map(|name| {
                let vertices = self.members.remove(&name).unwrap_or_default();
                Group { name, vertices }
            })
            .collect()
    }
}

/// Group name as written to interchange output.
pub fn sanitize_group_name(name: &str) -> String {
    if name.is_empty() {
        return "unnamed".to_string();
    }
    name.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::types::Corner;
    use glam::Vec2;

    fn face(a: u32, b: u32, c: u32) -> Face {
        Face::new(
            [
                Corner::new(a, Vec2::ZERO),
                Corner::new(b, Vec2::ZERO),
                Corner::new(c, Vec2::ZERO),
            ],
            None,
        )
    }

    #[test]
    fn test_forward_membership() {
        let groups = vec![Group::new("a", [0, 2]), Group::new("b", [1])];
        let membership = GroupMembership::new(&groups, 4);

        assert_eq!(membership.groups_of(0), Some(&BTreeSet::from([0])));
        assert_eq!(membership.groups_of(1), Some(&BTreeSet::from([1])));
        assert_eq!(membership.groups_of(3), Some(&BTreeSet::new()));
        assert_eq!(membership.groups_of(4), None);
    }

    #[test]
    fn test_face_union() {
        let groups = vec![Group::new("a", [0]), Group::new("b", [2]), Group::new("c", [3])];
        let membership = GroupMembership::new(&groups, 4);
        assert_eq!(membership.face_groups(&face(0, 1, 2)), BTreeSet::from([0, 1]));
        assert_eq!(membership.face_groups(&face(1, 1, 1)), BTreeSet::new());
    }

    #[test]
    fn test_vertex_in_several_groups() {
        let groups = vec![Group::new("a", [0, 1]), Group::new("b", [1])];
        let membership = GroupMembership::new(&groups, 2);
        assert_eq!(membership.groups_of(1), Some(&BTreeSet::from([0, 1])));
    }

    #[test]
    fn test_builder_first_seen_order() {
        let mut builder = GroupBuilder::new();
        builder.add(4, ["lid"]);
        builder.add(1, ["base", "lid"]);
        builder.add(0, ["base"]);
        builder.add(1, ["lid"]);

        let groups = builder.finish();
        assert_eq!(
            groups,
            vec![Group::new("lid", [1, 4]), Group::new("base", [0, 1])]
        );
    }

    #[test]
    fn test_builder_without_names() {
        let mut builder = GroupBuilder::new();
        builder.add(0, std::iter::empty());
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn test_sanitize_group_name() {
        assert_eq!(sanitize_group_name("left arm"), "left_arm");
        assert_eq!(sanitize_group_name("head"), "head");
        assert_eq!(sanitize_group_name(""), "unnamed");
    }
}
