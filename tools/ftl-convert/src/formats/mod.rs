//! Source and target file formats
//!
//! The engine format lives in `ftl-common` and is re-exported here; OBJ/MTL
//! and glTF are handled locally.

pub mod gltf;
pub mod mtl;
pub mod obj;

pub use ftl_common::formats::*;
pub use ftl_common::{ensure_packed, ensure_unpacked, FtlError};

pub use self::gltf::{read_gltf, GltfMesh, GltfScene};
pub use mtl::{parse_mtl, write_mtl, MtlLibrary, MtlMaterial};
pub use obj::{
    parse_obj, write_obj, ObjCorner, ObjError, ObjMaterialBlock, ObjObject, ObjPolygon, ObjScene,
    ObjVertexGroup,
};
