/// Software rasterizer with a color and depth buffer
use std::collections::HashMap;

use bitflags::bitflags;
use image::{Rgb, RgbImage};
use nalgebra::{Point3, Vector3, Vector4};
use tri3d_core::{Error, Transform, Transform4, Triangle};

use crate::error::Result;

bitflags! {
    /// Buffers reset by [`Rasterizer::clear`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Buffers: u8 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// How index triples are turned into pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Triangle outlines, drawn white without depth testing
    Line,
    /// Filled triangles with interpolated color and depth testing
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosBufId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndBufId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColBufId(usize);

fn white() -> Vector3<f32> {
    Vector3::new(255.0, 255.0, 255.0)
}

/// A vertex after the viewport transform: pixel x/y (y up), depth in [0, 1]
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    color: Vector3<f32>,
}

pub struct Rasterizer {
    width: usize,
    height: usize,
    frame_buffer: Vec<Vector3<f32>>,
    depth_buffer: Vec<f32>,
    positions: HashMap<usize, Vec<Point3<f32>>>,
    indices: HashMap<usize, Vec<[usize; 3]>>,
    colors: HashMap<usize, Vec<Vector3<f32>>>,
    next_id: usize,
    model: Transform4,
    view: Transform4,
    projection: Transform4,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            frame_buffer: vec![Vector3::zeros(); size],
            depth_buffer: vec![f32::INFINITY; size],
            positions: HashMap::new(),
            indices: HashMap::new(),
            colors: HashMap::new(),
            next_id: 0,
            model: Transform4::identity(),
            view: Transform4::identity(),
            projection: Transform4::identity(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn load_positions(&mut self, positions: Vec<Point3<f32>>) -> PosBufId {
        let id = self.next_id();
        self.positions.insert(id, positions);
        PosBufId(id)
    }

    pub fn load_indices(&mut self, indices: Vec<[usize; 3]>) -> IndBufId {
        let id = self.next_id();
        self.indices.insert(id, indices);
        IndBufId(id)
    }

    pub fn load_colors(&mut self, colors: Vec<Vector3<f32>>) -> ColBufId {
        let id = self.next_id();
        self.colors.insert(id, colors);
        ColBufId(id)
    }

    pub fn set_model(&mut self, model: Transform4) {
        self.model = model;
    }

    pub fn set_view(&mut self, view: Transform4) {
        self.view = view;
    }

    pub fn set_projection(&mut self, projection: Transform4) {
        self.projection = projection;
    }

    pub fn clear(&mut self, buffers: Buffers) {
        if buffers.contains(Buffers::COLOR) {
            self.frame_buffer.fill(Vector3::zeros());
        }
        if buffers.contains(Buffers::DEPTH) {
            self.depth_buffer.fill(f32::INFINITY);
        }
    }

    /// Draw with every vertex white
    pub fn draw(&mut self, pos: PosBufId, ind: IndBufId, primitive: Primitive) -> Result<()> {
        self.draw_faces(pos, ind, None, primitive)
    }

    /// Draw with per-vertex colors from `col`
    pub fn draw_colored(
        &mut self,
        pos: PosBufId,
        ind: IndBufId,
        col: ColBufId,
        primitive: Primitive,
    ) -> Result<()> {
        self.draw_faces(pos, ind, Some(col), primitive)
    }

    fn draw_faces(
        &mut self,
        pos: PosBufId,
        ind: IndBufId,
        col: Option<ColBufId>,
        primitive: Primitive,
    ) -> Result<()> {
        let positions = self
            .positions
            .get(&pos.0)
            .ok_or(Error::UnknownBuffer(pos.0))?;
        let faces = self.indices.get(&ind.0).ok_or(Error::UnknownBuffer(ind.0))?;
        let colors = match col {
            Some(col) => self
                .colors
                .get(&col.0)
                .ok_or(Error::UnknownBuffer(col.0))?
                .as_slice(),
            None => &[],
        };

        let mvp = Transform::mvp_matrix(&self.model, &self.view, &self.projection);

        let mut screen_triangles = Vec::with_capacity(faces.len());
        for face in faces {
            let triangle = Triangle::assemble(positions, colors, *face)?;
            if let Some(projected) = self.project(&triangle, &mvp) {
                screen_triangles.push(projected);
            }
        }

        for coords in &screen_triangles {
            match primitive {
                Primitive::Triangle => self.rasterize_triangle(coords),
                Primitive::Line => self.rasterize_wireframe(coords),
            }
        }

        Ok(())
    }

    /// Clip-space transform, perspective divide and viewport mapping
    fn project(&self, triangle: &Triangle, mvp: &Transform4) -> Option<[ScreenVertex; 3]> {
        let (w, h) = (self.width as f32, self.height as f32);
        let mut out = [ScreenVertex {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
            color: white(),
        }; 3];

        for (vertex, slot) in triangle.vertices.iter().zip(out.iter_mut()) {
            let clip: Vector4<f32> = mvp * vertex.position.to_homogeneous();

            // Prevent division by near-zero w
            if clip.w.abs() < 1e-6 {
                return None;
            }
            let ndc = clip.xyz() / clip.w;

            *slot = ScreenVertex {
                x: 0.5 * w * (ndc.x + 1.0),
                y: 0.5 * h * (ndc.y + 1.0),
                depth: (1.0 - ndc.z) / 2.0,
                color: vertex.color,
            };
        }

        Some(out)
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenVertex; 3]) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i64;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i64;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i64;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = self.index(x as usize, y as usize);
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.frame_buffer[idx] = v0.color * w0 + v1.color * w1 + v2.color * w2;
                }
            }
        }
    }

    fn rasterize_wireframe(&mut self, coords: &[ScreenVertex; 3]) {
        let [v0, v1, v2] = *coords;
        self.draw_line(v2, v0);
        self.draw_line(v0, v1);
        self.draw_line(v1, v2);
    }

    /// Bresenham line between two screen vertices
    fn draw_line(&mut self, from: ScreenVertex, to: ScreenVertex) {
        let (mut x0, mut y0) = (from.x.floor() as i64, from.y.floor() as i64);
        let (x1, y1) = (to.x.floor() as i64, to.y.floor() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, white());
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: Vector3<f32>) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = self.index(x as usize, y as usize);
        self.frame_buffer[idx] = color;
    }

    /// Buffer index for screen (x, y) with y pointing up; row 0 is the top
    fn index(&self, x: usize, y: usize) -> usize {
        (self.height - 1 - y) * self.width + x
    }

    /// Row-major colors, top row first, channels in 0..=255
    pub fn frame_buffer(&self) -> &[Vector3<f32>] {
        &self.frame_buffer
    }

    /// Convert the color buffer into an 8-bit image
    pub fn to_image(&self) -> RgbImage {
        let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = self.frame_buffer[y as usize * self.width + x as usize];
            Rgb([channel(c.x), channel(c.y), channel(c.z)])
        })
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
