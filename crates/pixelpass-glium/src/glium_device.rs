//! [`GliumDevice`]: a window, a glium context, one program and one quad.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Formatter};

use glium::backend::glutin::SimpleWindowBuilder;
use glium::backend::Facade;
use glium::glutin::surface::WindowSurface;
use glium::index::{NoIndices, PrimitiveType};
use glium::program::ProgramCreationError;
use glium::texture::{ClientFormat, MipmapsOption, RawImage2d, UncompressedFloatFormat};
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter, SamplerBehavior, Uniforms};
use glium::winit::event_loop::EventLoop;
use glium::winit::window::Window;
use glium::{
    BlitTarget, Display, DrawParameters, Frame, GlObject, Program, Surface, Texture2d,
    VertexBuffer,
};
use pixelpass_surface::ImageRef;
use tracing::{debug, trace, warn};

use crate::device::{DeviceSettings, FrameCapture, GpuDevice, TextureHandle};
use crate::error::{CompileError, Error, Result};
use crate::glsl;
use crate::quad::{QuadVertex, QUAD};
use crate::shader::ShaderSources;
use crate::swizzle;
use crate::uniform::UniformValue;

/// OpenGL implementation of [`GpuDevice`] on top of glium.
///
/// Opening a device creates the process's event loop and a window sized to
/// the output resolution, so only one can exist per process. Events are never
/// pumped; the window is purely a presentation target.
///
/// Slots are the caller's bookkeeping, not GL texture units. glium picks the
/// units itself on every draw, handing them out in visit order to the
/// samplers the program declares. Samplers are visited in slot order, so a
/// lower slot always gets a lower unit, but unit numbers shift when a slot
/// is unbound or undeclared. Programs must not rely on explicit
/// `layout(binding = N)` qualifiers.
pub struct GliumDevice {
    // Drop order: frame and GL objects first, then the display, then the
    // window and event loop that own the native surface.
    pending_frame: Option<Frame>,
    textures: HashMap<TextureHandle, Texture2d>,
    next_texture: u64,
    /// Sampler name per slot, as assigned by the caller.
    samplers: BTreeMap<u32, String>,
    /// Textures attached for the next draw.
    bound: BTreeMap<u32, TextureHandle>,
    /// Non-sampler values; they persist across frames like GL program state.
    values: Vec<(String, UniformValue)>,
    /// Copy of the last presented frame, taken from the back buffer before
    /// the swap.
    presented: Texture2d,
    has_presented: bool,
    quad: VertexBuffer<QuadVertex>,
    program: Program,
    display: Display<WindowSurface>,
    window: Window,
    _event_loop: EventLoop<()>,
    output_size: (u32, u32),
}

impl Debug for GliumDevice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GliumDevice")
            .field("output_size", &self.output_size)
            .field("live_textures", &self.textures.len())
            .field("samplers", &self.samplers)
            .finish()
    }
}

impl GliumDevice {
    /// Open a window with a GL context and build the program and quad.
    pub fn open(settings: &DeviceSettings, sources: &ShaderSources) -> Result<Self> {
        let (width, height) = settings.output_resolution;
        if width == 0 || height == 0 {
            return Err(Error::InvalidResolution { width, height });
        }

        let event_loop = EventLoop::builder()
            .build()
            .map_err(|e| Error::Context(e.to_string()))?;

        let (window, display) = SimpleWindowBuilder::new()
            .with_title(&settings.title)
            .with_inner_size(width, height)
            .build(&event_loop);

        swizzle::load_gl();

        let ctx = display.get_context();
        debug!("OPENGL_VERSION {}", ctx.get_opengl_version_string());

        let supported = glsl::supported_versions(&**ctx);
        debug!(?supported, "supported GLSL versions");

        for (stage, source) in sources.stages() {
            glsl::check_stage(stage, source, &supported)?;
        }

        let program = Program::from_source(&display, &sources.vertex, &sources.fragment, None)
            .map_err(program_error)?;
        debug!(uniforms = program.uniforms().count(), "shader program linked");

        let quad = VertexBuffer::immutable(&display, &QUAD).map_err(|e| {
            Error::ResourceExhausted {
                resource: "quad vertex buffer",
                reason: e.to_string(),
            }
        })?;

        let presented = Texture2d::empty_with_format(
            &display,
            UncompressedFloatFormat::U8U8U8U8,
            MipmapsOption::NoMipmap,
            width,
            height,
        )
        .map_err(|e| Error::ResourceExhausted {
            resource: "frame copy texture",
            reason: e.to_string(),
        })?;

        Ok(Self {
            pending_frame: None,
            textures: HashMap::new(),
            next_texture: 0,
            samplers: BTreeMap::new(),
            bound: BTreeMap::new(),
            values: Vec::new(),
            presented,
            has_presented: false,
            quad,
            program,
            display,
            window,
            _event_loop: event_loop,
            output_size: (width, height),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn display(&self) -> &Display<WindowSurface> {
        &self.display
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

fn program_error(err: ProgramCreationError) -> Error {
    let compile = match err {
        ProgramCreationError::CompilationError(log, stage) => CompileError::Stage {
            stage: format!("{stage:?}").to_lowercase(),
            log,
        },
        ProgramCreationError::LinkingError(log) => CompileError::Link { log },
        other => CompileError::Backend(other.to_string()),
    };
    Error::Compilation(compile)
}

fn nearest_sampler() -> SamplerBehavior {
    SamplerBehavior {
        minify_filter: MinifySamplerFilter::Nearest,
        magnify_filter: MagnifySamplerFilter::Nearest,
        ..Default::default()
    }
}

/// Bound samplers in slot order, skipping slots with no assigned name or no
/// live texture.
fn frame_samplers<'a, T>(
    samplers: &'a BTreeMap<u32, String>,
    bound: &BTreeMap<u32, TextureHandle>,
    textures: &'a HashMap<TextureHandle, T>,
) -> Vec<(&'a str, &'a T)> {
    bound
        .iter()
        .filter_map(|(slot, handle)| {
            let name = samplers.get(slot)?;
            let texture = textures.get(handle)?;
            Some((name.as_str(), texture))
        })
        .collect()
}

/// Uniform set for a single draw: samplers in slot order, then values.
///
/// glium binds each declared sampler to the next free texture unit as it is
/// visited and writes that unit into the sampler uniform itself.
struct FrameUniforms<'a> {
    samplers: Vec<(&'a str, &'a Texture2d)>,
    values: &'a [(String, UniformValue)],
}

impl Uniforms for FrameUniforms<'_> {
    fn visit_values<'a, F: FnMut(&str, glium::uniforms::UniformValue<'a>)>(
        &'a self,
        mut output: F,
    ) {
        let sampler = nearest_sampler();
        for (name, texture) in &self.samplers {
            output(
                name,
                glium::uniforms::UniformValue::Texture2d(texture, Some(sampler)),
            );
        }
        for (name, value) in self.values {
            output(name, value.as_glium());
        }
    }
}

impl GpuDevice for GliumDevice {
    fn upload_texture(&mut self, image: ImageRef<'_>) -> Result<TextureHandle> {
        if let Some(reason) = image.layout_problem() {
            return Err(Error::Format {
                name: "<direct upload>".to_string(),
                reason,
            });
        }

        let raw = RawImage2d {
            data: Cow::Borrowed(image.data),
            width: image.width,
            height: image.height,
            format: ClientFormat::U8U8U8U8,
        };
        let texture = Texture2d::with_format(
            &self.display,
            raw,
            UncompressedFloatFormat::U8U8U8U8,
            MipmapsOption::NoMipmap,
        )
        .map_err(|e| Error::ResourceExhausted {
            resource: "texture",
            reason: e.to_string(),
        })?;

        // SAFETY: the display's context is the only one in the process and
        // stays current for its lifetime; `load_gl` ran in `open`.
        unsafe { swizzle::apply_bgra_swizzle(texture.get_id())? };

        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        trace!(%handle, width = image.width, height = image.height, "texture uploaded");
        self.textures.insert(handle, texture);
        Ok(handle)
    }

    /// Records the slot's name. The program itself is not touched; glium
    /// sets sampler units per draw.
    fn assign_sampler(&mut self, name: &str, slot: u32) -> Result<()> {
        if self.program.get_uniform(name).is_none() {
            warn!(uniform = name, slot, "sampler not declared by the program, ignoring it");
        }
        self.samplers.insert(slot, name.to_string());
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: TextureHandle) -> Result<()> {
        if !self.textures.contains_key(&texture) {
            return Err(Error::UnknownTexture(texture));
        }
        self.bound.insert(slot, texture);
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()> {
        if self.program.get_uniform(name).is_none() {
            return Err(Error::UnknownUniform {
                name: name.to_string(),
            });
        }
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, current)) => *current = value,
            None => self.values.push((name.to_string(), value)),
        }
        Ok(())
    }

    fn draw_quad(&mut self) -> Result<()> {
        let samplers = frame_samplers(&self.samplers, &self.bound, &self.textures);
        let uniforms = FrameUniforms {
            samplers,
            values: &self.values,
        };

        // A frame left over from a failed draw is drawn over, not shown.
        let mut frame = match self.pending_frame.take() {
            Some(frame) => frame,
            None => self.display.draw(),
        };
        let result = frame.draw(
            &self.quad,
            NoIndices(PrimitiveType::TriangleStrip),
            &self.program,
            &uniforms,
            &DrawParameters::default(),
        );
        self.pending_frame = Some(frame);

        result.map_err(|e| Error::Draw(e.to_string()))
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture).is_some() {
            self.bound.retain(|_, bound| *bound != texture);
            trace!(%texture, "texture released");
        }
    }

    fn present(&mut self) -> Result<()> {
        self.bound.clear();
        let frame = match self.pending_frame.take() {
            Some(frame) => frame,
            None => self.display.draw(),
        };

        let (width, height) = self.output_size;
        let target = BlitTarget {
            left: 0,
            bottom: 0,
            width: width as i32,
            height: height as i32,
        };
        frame.blit_whole_color_to(
            &self.presented.as_surface(),
            &target,
            MagnifySamplerFilter::Nearest,
        );

        frame.finish().map_err(|e| Error::Present(format!("{e:?}")))?;
        self.has_presented = true;
        Ok(())
    }

    fn live_textures(&self) -> usize {
        self.textures.len()
    }

    fn output_size(&self) -> (u32, u32) {
        self.output_size
    }

    fn capture_frame(&mut self) -> Result<FrameCapture> {
        if !self.has_presented {
            return Err(Error::Capture("no frame has been presented".to_string()));
        }
        let raw: RawImage2d<'static, u8> = self.presented.read();

        Ok(FrameCapture {
            width: raw.width,
            height: raw.height,
            pixels: rows_top_first(&raw.data, raw.width),
        })
    }
}

/// Reorder GL's bottom-to-top RGBA rows top first.
fn rows_top_first(data: &[u8], width: u32) -> Vec<u8> {
    let row = width as usize * 4;
    if row == 0 {
        return Vec::new();
    }
    data.chunks_exact(row).rev().flatten().copied().collect()
}

impl Drop for GliumDevice {
    fn drop(&mut self) {
        if let Some(mut frame) = self.pending_frame.take() {
            if let Err(err) = frame.set_finish() {
                debug!("discarding pending frame failed: {err:?}");
            }
        }
    }
}
