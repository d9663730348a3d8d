//! Mesh converters between the file models and the intermediate mesh model
//!
//! Every reader produces a [`MeshModel`](crate::mesh::MeshModel) in interchange
//! conventions and every writer consumes one, so any source can feed any target.

mod ftl;
mod gltf;
mod obj;

pub use self::ftl::{mesh_from_ftl, mesh_to_ftl};
pub use self::gltf::mesh_from_gltf;
pub use self::obj::{mesh_from_obj, mesh_to_obj};
