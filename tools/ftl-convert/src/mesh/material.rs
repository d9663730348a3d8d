//! Ordered material registry

use hashbrown::HashMap;

/// Named material with its diffuse texture path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: String,
    pub texture: String,
}

impl Material {
    pub fn new(name: impl Into<String>, texture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texture: texture.into(),
        }
    }

    /// Material created on first reference, using its name as texture path.
    pub fn placeholder(name: &str) -> Self {
        Self::new(name, name)
    }
}

/// Name → index registry. Indices, once handed out, never move.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
    lookup: HashMap<String, usize>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material; lookup by name keeps resolving to the first entry.
    pub fn push(&mut self, material: Material) -> usize {
        let index = self.materials.len();
        self.lookup.entry(material.name.clone()).or_insert(index);
        self.materials.push(material);
        index
    }

    /// Register a declared material, skipping names already registered.
    pub fn declare(&mut self, material: Material) -> usize {
        match self.index_of(&material.name) {
            Some(index) => index,
            None => self.push(material),
        }
    }

    /// Index of `name`, creating it with `factory` on first use.
    pub fn get_or_insert_with<F>(&mut self, name: &str, factory: F) -> usize
    where
        F: FnOnce() -> Material,
    {
        match self.index_of(name) {
            Some(index) => index,
            None => self.push(factory()),
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Texture list in table order.
    pub fn textures(&self) -> Vec<String> {
        self.materials.iter().map(|m| m.texture.clone()).collect()
    }
}
