//! Static level-3 Menger cube mesh.
//!
//! The cube is carved on a 3^level grid; only faces between a solid cell and
//! an empty one are emitted, so the buffer holds the visible shell only.

use glam::Vec3;

pub const MENGER_LEVEL: u32 = 3;
pub const MENGER_EXTENT: f32 = 9.0; // edge length in world units

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

// (normal, u, v) with u × v = normal, so corners wind counter-clockwise
// seen from outside.
const FACES: [([i32; 3], Vec3, Vec3); 6] = [
    ([1, 0, 0], Vec3::Y, Vec3::Z),
    ([-1, 0, 0], Vec3::Z, Vec3::Y),
    ([0, 1, 0], Vec3::Z, Vec3::X),
    ([0, -1, 0], Vec3::X, Vec3::Z),
    ([0, 0, 1], Vec3::X, Vec3::Y),
    ([0, 0, -1], Vec3::Y, Vec3::X),
];

fn is_solid(cells: i32, x: i32, y: i32, z: i32, level: u32) -> bool {
    if x < 0 || y < 0 || z < 0 || x >= cells || y >= cells || z >= cells {
        return false;
    }
    let (mut x, mut y, mut z) = (x, y, z);
    for _ in 0..level {
        let centred = (x % 3 == 1) as u8 + (y % 3 == 1) as u8 + (z % 3 == 1) as u8;
        if centred >= 2 {
            return false;
        }
        x /= 3;
        y /= 3;
        z /= 3;
    }
    true
}

pub fn menger_mesh(level: u32, extent: f32) -> Mesh {
    let cells = 3_i32.pow(level);
    let cell = extent / cells as f32;
    let half = cell * 0.5;
    let origin = Vec3::splat(-extent * 0.5 + half);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for z in 0..cells {
        for y in 0..cells {
            for x in 0..cells {
                if !is_solid(cells, x, y, z, level) {
                    continue;
                }
                let centre = origin + Vec3::new(x as f32, y as f32, z as f32) * cell;
                for (dir, u, v) in FACES {
                    if is_solid(cells, x + dir[0], y + dir[1], z + dir[2], level) {
                        continue;
                    }
                    let normal = Vec3::new(dir[0] as f32, dir[1] as f32, dir[2] as f32);
                    let face = centre + normal * half;
                    let (u, v) = (u * half, v * half);
                    let base = vertices.len() as u32;
                    for corner in [face - u - v, face + u - v, face + u + v, face - u + v] {
                        vertices.push(MeshVertex {
                            position: corner.to_array(),
                            normal: normal.to_array(),
                        });
                    }
                    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
                }
            }
        }
    }

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_only_exposed_faces() {
        let unit = menger_mesh(0, 1.0);
        assert_eq!(unit.vertices.len(), 6 * 4);
        assert_eq!(unit.indices.len(), 6 * 6);

        let l1 = menger_mesh(1, 3.0);
        assert_eq!(l1.indices.len(), 72 * 6);
        let l3 = menger_mesh(MENGER_LEVEL, MENGER_EXTENT);
        assert_eq!(l3.indices.len(), 18_048 * 6);
    }

    #[test]
    fn faces_wind_counter_clockwise_outward() {
        let mesh = menger_mesh(1, 3.0);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let (pa, pb, pc) = (
                Vec3::from(a.position),
                Vec3::from(b.position),
                Vec3::from(c.position),
            );
            let face_normal = (pb - pa).cross(pc - pa).normalize();
            assert!(face_normal.dot(Vec3::from(a.normal)) > 0.99);
        }
    }

    #[test]
    fn mesh_fits_extent() {
        let mesh = menger_mesh(2, 9.0);
        for v in &mesh.vertices {
            for c in v.position {
                assert!(c.abs() <= 4.5 + 1e-4);
            }
        }
    }
}
