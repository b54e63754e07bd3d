/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};

/// A 3D vertex with position and color (channels in 0..=255)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, color: Vector3<f32>) -> Self {
        Self { position, color }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Assemble the triangle referenced by `face`.
    ///
    /// Vertices without a color entry are drawn white.
    pub fn assemble(
        positions: &[Point3<f32>],
        colors: &[Vector3<f32>],
        face: [usize; 3],
    ) -> Result<Self> {
        let vertex = |index: usize| -> Result<Vertex> {
            let position = positions.get(index).ok_or(Error::IndexOutOfRange {
                index,
                len: positions.len(),
            })?;
            let color = colors.get(index).copied().unwrap_or_else(Mesh::white);
            Ok(Vertex::new(*position, color))
        };

        Ok(Self::new(vertex(face[0])?, vertex(face[1])?, vertex(face[2])?))
    }
}

/// Indexed triangle geometry with optional per-vertex colors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub indices: Vec<[usize; 3]>,
    pub colors: Vec<Vector3<f32>>,
}

impl Mesh {
    pub fn new(positions: Vec<Point3<f32>>, indices: Vec<[usize; 3]>) -> Self {
        Self {
            positions,
            indices,
            colors: Vec::new(),
        }
    }

    pub fn with_colors(mut self, colors: Vec<Vector3<f32>>) -> Self {
        self.colors = colors;
        self
    }

    fn white() -> Vector3<f32> {
        Vector3::new(255.0, 255.0, 255.0)
    }

    /// The single red/green/blue triangle the viewer renders
    pub fn demo_triangle() -> Self {
        Self::new(
            vec![
                Point3::new(2.0, 0.0, -2.0),
                Point3::new(0.0, 2.0, -2.0),
                Point3::new(-2.0, 0.0, -2.0),
            ],
            vec![[0, 1, 2]],
        )
        .with_colors(vec![
            Vector3::new(255.0, 0.0, 0.0),
            Vector3::new(0.0, 255.0, 0.0),
            Vector3::new(0.0, 0.0, 255.0),
        ])
    }

    /// Iterate over assembled triangles
    pub fn triangles(&self) -> impl Iterator<Item = Result<Triangle>> + '_ {
        self.indices
            .iter()
            .map(|face| Triangle::assemble(&self.positions, &self.colors, *face))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_triangle() {
        let mesh = Mesh::demo_triangle();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices, vec![[0, 1, 2]]);

        let triangles: Vec<_> = mesh.triangles().collect::<Result<_>>().unwrap();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0].vertices[1].position, Point3::new(0.0, 2.0, -2.0));
        assert_eq!(triangles[0].vertices[2].color, Vector3::new(0.0, 0.0, 255.0));
    }

    #[test]
    fn test_missing_colors_default_to_white() {
        let mesh = Mesh::new(Mesh::demo_triangle().positions, vec![[2, 1, 0]]);
        let triangle = mesh.triangles().next().unwrap().unwrap();
        assert!(triangle.vertices.iter().all(|v| v.color == Mesh::white()));
    }

    #[test]
    fn test_out_of_range_index() {
        let mesh = Mesh::new(Mesh::demo_triangle().positions, vec![[0, 1, 7]]);
        let err = mesh.triangles().next().unwrap().unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 7, len: 3 });
    }
}
