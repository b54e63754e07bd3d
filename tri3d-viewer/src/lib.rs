/// Frame controller driving the rasterizer and an image sink
use std::time::Duration;

use image::RgbImage;
use tri3d_core::{Mesh, ModelRotation, SceneState};

pub mod cli;
pub mod config;
pub mod error;
pub mod rasterizer;
pub mod sink;

pub use cli::{parse_args, CliError, RunMode};
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use rasterizer::{Buffers, ColBufId, IndBufId, PosBufId, Primitive, Rasterizer};
pub use sink::{FileSink, ImageSink, TerminalSink, KEY_ESC};

/// Whether the interactive loop keeps going after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Owns the scene state and runs one of the [`RunMode`]s
pub struct FrameController<S: ImageSink> {
    mode: RunMode,
    scene: SceneState,
    rasterizer: Rasterizer,
    sink: S,
    pos_id: PosBufId,
    ind_id: IndBufId,
    col_id: ColBufId,
    angle_step: f32,
    key_timeout: Duration,
    frame_count: u64,
}

impl<S: ImageSink> FrameController<S> {
    pub fn new(config: &ViewerConfig, mode: RunMode, sink: S) -> Result<Self> {
        let camera = config.camera()?;
        let (angle, rotation) = match &mode {
            RunMode::SingleShot { angle, .. } => (*angle, ModelRotation::ZAxis),
            RunMode::InteractiveFixedAxis => (0.0, ModelRotation::ZAxis),
            RunMode::InteractiveArbitraryAxis { axis } => (0.0, ModelRotation::Axis(*axis)),
        };

        let mut rasterizer = Rasterizer::new(config.width, config.height);
        let mesh = Mesh::demo_triangle();
        let pos_id = rasterizer.load_positions(mesh.positions);
        let ind_id = rasterizer.load_indices(mesh.indices);
        let col_id = rasterizer.load_colors(mesh.colors);

        log::debug!("run mode: {mode:?}");

        Ok(Self {
            mode,
            scene: SceneState::new(angle, camera, rotation),
            rasterizer,
            sink,
            pos_id,
            ind_id,
            col_id,
            angle_step: config.angle_step,
            key_timeout: config.key_timeout,
            frame_count: 0,
        })
    }

    pub fn angle(&self) -> f32 {
        self.scene.angle
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn run(&mut self) -> Result<()> {
        match self.mode.clone() {
            RunMode::SingleShot { path, .. } => {
                let image = self.render_frame()?;
                self.sink.write(&image, &path)?;
                log::info!("saved frame to {}", path.display());
                Ok(())
            }
            RunMode::InteractiveFixedAxis | RunMode::InteractiveArbitraryAxis { .. } => {
                self.main_loop()
            }
        }
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            let image = self.render_frame()?;
            self.sink.status(&format!(
                "tri3d | angle: {:.0} | frame: {} | A/D=Rotate ESC=Quit",
                self.scene.angle, self.frame_count
            ))?;
            self.sink.present(&image)?;
            let key = self.sink.wait_key(self.key_timeout)?;

            log::debug!("frame count: {}", self.frame_count);
            self.frame_count += 1;

            if self.handle_key(key) == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Apply one key code to the scene state
    pub fn handle_key(&mut self, key: Option<u32>) -> Flow {
        match key {
            Some(KEY_ESC) => Flow::Exit,
            Some(code) if code == 'a' as u32 => {
                self.scene.rotate(self.angle_step);
                Flow::Continue
            }
            Some(code) if code == 'd' as u32 => {
                self.scene.rotate(-self.angle_step);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    /// Clear, rebuild every matrix from the scene state, draw
    pub fn render_frame(&mut self) -> Result<RgbImage> {
        self.rasterizer.clear(Buffers::COLOR | Buffers::DEPTH);

        let transforms = self.scene.transforms();
        self.rasterizer.set_model(transforms.model);
        self.rasterizer.set_view(transforms.view);
        self.rasterizer.set_projection(transforms.projection);

        self.rasterizer
            .draw_colored(self.pos_id, self.ind_id, self.col_id, Primitive::Triangle)?;

        Ok(self.rasterizer.to_image())
    }
}
