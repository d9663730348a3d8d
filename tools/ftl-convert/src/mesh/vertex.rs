//! Vertex identity and the deduplicating vertex table

use glam::Vec3;
use hashbrown::HashMap;
use std::hash::{Hash, Hasher};

/// Position + normal pair, compared by exact bit pattern.
///
/// `0.0` and `-0.0` are different vertices, and two NaNs with the same payload
/// are the same vertex. There is no epsilon.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    fn bits(&self) -> [u32; 6] {
        [
            self.position.x.to_bits(),
            self.position.y.to_bits(),
            self.position.z.to_bits(),
            self.normal.x.to_bits(),
            self.normal.y.to_bits(),
            self.normal.z.to_bits(),
        ]
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

/// Canonical vertex sequence with value lookup.
///
/// Indices are handed out in insertion order and never change.
#[derive(Debug, Clone, Default)]
pub struct VertexTable {
    vertices: Vec<Vertex>,
    lookup: HashMap<Vertex, u32>,
}

impl VertexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-insert: equal vertices share one index.
    pub fn insert(&mut self, vertex: Vertex) -> u32 {
        if let Some(&index) = self.lookup.get(&vertex) {
            return index;
        }
        self.push(vertex)
    }

    /// Append without deduplication.
    ///
    /// Used for sources that already share vertices by index; lookup keeps
    /// resolving to the first occurrence of a value.
    pub fn push(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.lookup.entry(vertex).or_insert(index);
        index
    }

    pub fn index_of(&self, vertex: &Vertex) -> Option<u32> {
        self.lookup.get(vertex).copied()
    }

    pub fn get(&self, index: u32) -> Option<&Vertex> {
        self.vertices.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl FromIterator<Vertex> for VertexTable {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        let mut table = Self::new();
        for vertex in iter {
            table.insert(vertex);
        }
        table
    }
}
