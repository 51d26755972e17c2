//! [`FrameCompositor`]: present a CPU pixel surface through a shader pass.

use pixelpass_glium::{
    DeviceSettings, Error, FrameCapture, GliumDevice, GpuDevice, Result, ShaderSources,
    TextureHandle,
};
use pixelpass_surface::{ImageRef, PixelSurface};
use tracing::{debug, error, info, trace};

use crate::bindings::BindingTable;
use crate::config::{check_resolution, CompositorConfig};
use crate::uniforms::{Uniform, Uniforms};

/// Sampler name the compositor's own surface is bound under.
pub const SCREEN_TEXTURE: &str = "screen_texture";

/// Owns a GPU device, a pixel surface and the sampler slot table.
///
/// Draw into the surface through [`Canvas`](pixelpass_surface::Canvas) (the
/// compositor forwards it) or [`FrameCompositor::surface_mut`], then call
/// [`FrameCompositor::update`] once per frame.
#[derive(Debug)]
pub struct FrameCompositor<D: GpuDevice = GliumDevice> {
    binder: UniformBinder<D>,
    surface: PixelSurface,
    frames_presented: u64,
}

impl FrameCompositor<GliumDevice> {
    /// Open a window and GL context, compile the shaders and allocate a
    /// transparent surface at the logical resolution.
    pub fn open(config: &CompositorConfig) -> Result<Self> {
        config.validate()?;

        let sources = ShaderSources::load(&config.vertex_shader, &config.fragment_shader)
            .map_err(Error::from)?;
        let settings = DeviceSettings {
            output_resolution: config.output_resolution,
            title: config.title.clone(),
        };
        let device = GliumDevice::open(&settings, &sources)?;

        info!(
            output = ?config.output_resolution,
            logical = ?config.logical_resolution(),
            vertex = %config.vertex_shader.display(),
            fragment = %config.fragment_shader.display(),
            "compositor opened"
        );
        Self::with_device(device, config.logical_resolution())
    }
}

impl<D: GpuDevice> FrameCompositor<D> {
    /// Build a compositor on an already opened device.
    pub fn with_device(device: D, logical_resolution: (u32, u32)) -> Result<Self> {
        check_resolution(logical_resolution)?;
        let (width, height) = logical_resolution;

        Ok(Self {
            binder: UniformBinder {
                device,
                bindings: BindingTable::new(),
                frame_textures: Vec::new(),
            },
            surface: PixelSurface::new(width, height),
            frames_presented: 0,
        })
    }

    /// Composite one frame.
    ///
    /// Binds `uniforms` (plus the compositor's surface as `screen_texture`
    /// unless the caller supplied that name), draws the quad, releases every
    /// texture created for this frame and presents. The order is fixed:
    /// textures are never released before the draw that reads them, and the
    /// frame is only presented once they are gone.
    ///
    /// On failure the frame's textures are still released and nothing is
    /// presented. `uniforms` is never modified.
    pub fn update(&mut self, uniforms: &Uniforms<'_>) -> Result<()> {
        let frame = self.frames_presented + 1;

        let drawn = self.bind_uniforms(uniforms).and_then(|()| {
            trace!(frame, "draw");
            self.binder.device.draw_quad()
        });
        self.binder.release_frame_textures();

        if let Err(err) = drawn {
            error!(frame, %err, "frame aborted");
            return Err(err);
        }

        trace!(frame, "present");
        self.binder.device.present()?;
        self.frames_presented = frame;
        Ok(())
    }

    fn bind_uniforms(&mut self, uniforms: &Uniforms<'_>) -> Result<()> {
        for (name, uniform) in uniforms.iter() {
            match uniform {
                Uniform::Image(image) => self.binder.bind_image(name, *image)?,
                Uniform::Value(value) => self.binder.device.set_uniform(name, *value)?,
            }
        }

        if !uniforms.contains(SCREEN_TEXTURE) {
            self.binder.bind_image(SCREEN_TEXTURE, self.surface.as_image())?;
        }
        Ok(())
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.binder.bindings
    }

    pub fn device(&self) -> &D {
        &self.binder.device
    }

    pub fn logical_resolution(&self) -> (u32, u32) {
        (self.surface.width(), self.surface.height())
    }

    pub fn output_resolution(&self) -> (u32, u32) {
        self.binder.device.output_size()
    }

    /// Frames successfully presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Read back the last presented frame.
    pub fn capture_frame(&mut self) -> Result<FrameCapture> {
        self.binder.device.capture_frame()
    }
}

/// The per-frame texture state, kept apart from the surface so the surface
/// can be borrowed while binding.
#[derive(Debug)]
struct UniformBinder<D> {
    device: D,
    bindings: BindingTable,
    /// Textures created during the current `update`, in creation order.
    frame_textures: Vec<(String, TextureHandle)>,
}

impl<D: GpuDevice> UniformBinder<D> {
    fn bind_image(&mut self, name: &str, image: ImageRef<'_>) -> Result<()> {
        let texture = self.surface_to_texture(name, image)?;
        self.frame_textures.push((name.to_string(), texture));

        let slot = match self.bindings.slot(name) {
            Some(slot) => slot,
            None => {
                // Recorded only once the device has accepted the slot.
                self.device.assign_sampler(name, self.bindings.next_slot())?;
                let slot = self.bindings.assign(name);
                debug!(uniform = name, slot, "sampler slot assigned");
                slot
            }
        };

        trace!(uniform = name, slot, %texture, "bind");
        self.device.bind_texture(slot, texture)
    }

    fn surface_to_texture(&mut self, name: &str, image: ImageRef<'_>) -> Result<TextureHandle> {
        if let Some(reason) = image.layout_problem() {
            return Err(Error::Format {
                name: name.to_string(),
                reason,
            });
        }
        self.device.upload_texture(image)
    }

    fn release_frame_textures(&mut self) {
        for (name, texture) in self.frame_textures.drain(..) {
            trace!(uniform = %name, %texture, "release");
            self.device.release_texture(texture);
        }
    }
}
