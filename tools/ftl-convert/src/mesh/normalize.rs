//! Coordinate and winding conversions between engine and interchange conventions
//!
//! The engine stores Y pointing down and V measured from the top of the
//! texture. Both flips are self-inverse; the Y flip mirrors the mesh, so every
//! crossing of the engine boundary also reverses the winding once.

use glam::{Vec2, Vec3};

use super::vertex::Vertex;

/// Negate the Y axis.
pub fn flip_axis(v: Vec3) -> Vec3 {
    Vec3::new(v.x, -v.y, v.z)
}

/// `v' = 1 - v`
pub fn flip_uv(uv: Vec2) -> Vec2 {
    Vec2::new(uv.x, 1.0 - uv.y)
}

/// Flip position and normal of a vertex.
pub fn flip_vertex(vertex: Vertex) -> Vertex {
    Vertex::new(flip_axis(vertex.position), flip_axis(vertex.normal))
}

/// Swap corners 1 and 2.
pub fn swap_winding<T>(corners: &mut [T; 3]) {
    corners.swap(1, 2);
}

/// Mean of the three corner normals.
pub fn face_normal(normals: [Vec3; 3]) -> Vec3 {
    (normals[0] + normals[1] + normals[2]) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_flip_is_involution() {
        for v in [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.5, -7.25, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ] {
            assert_eq!(flip_axis(flip_axis(v)), v);
        }
        assert_eq!(flip_axis(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_uv_flip_is_involution() {
        for uv in [Vec2::new(0.0, 0.0), Vec2::new(0.25, 0.75), Vec2::new(1.0, 0.5)] {
            assert_eq!(flip_uv(flip_uv(uv)), uv);
        }
        assert_eq!(flip_uv(Vec2::new(0.25, 0.25)), Vec2::new(0.25, 0.75));
    }

    #[test]
    fn test_vertex_flip() {
        let vertex = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y);
        let flipped = flip_vertex(vertex);
        assert_eq!(flipped.position, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(flipped.normal, Vec3::NEG_Y);
        assert_eq!(flip_vertex(flipped), vertex);
    }

    #[test]
    fn test_swap_winding() {
        let mut corners = [0, 1, 2];
        swap_winding(&mut corners);
        assert_eq!(corners, [0, 2, 1]);
        swap_winding(&mut corners);
        assert_eq!(corners, [0, 1, 2]);
    }

    #[test]
    fn test_face_normal_is_mean() {
        let normal = face_normal([Vec3::X, Vec3::Y, Vec3::Z]);
        assert_eq!(normal, Vec3::splat(1.0 / 3.0));
    }
}
