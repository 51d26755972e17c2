//! In-memory [`GpuDevice`] that records every call and rasterizes the
//! pass-through shader on the CPU.

use std::collections::{BTreeMap, HashMap, HashSet};

use pixelpass_glium::{Error, FrameCapture, GpuDevice, Result, TextureHandle, UniformValue};
use pixelpass_surface::ImageRef;

use crate::compositor::SCREEN_TEXTURE;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Upload { width: u32, height: u32 },
    AssignSampler { name: String, slot: u32 },
    Bind { slot: u32, texture: TextureHandle },
    SetUniform { name: String, value: UniformValue },
    Draw,
    Release(TextureHandle),
    Present,
}

impl Call {
    pub fn kind(&self) -> &'static str {
        match self {
            Call::Upload { .. } => "upload",
            Call::AssignSampler { .. } => "assign",
            Call::Bind { .. } => "bind",
            Call::SetUniform { .. } => "set",
            Call::Draw => "draw",
            Call::Release(_) => "release",
            Call::Present => "present",
        }
    }
}

#[derive(Debug)]
struct StoredTexture {
    width: u32,
    height: u32,
    bgra: Vec<u8>,
}

#[derive(Debug)]
pub struct RecordingDevice {
    output: (u32, u32),
    /// Non-sampler uniforms the fake program declares.
    declared: HashSet<String>,
    textures: HashMap<TextureHandle, StoredTexture>,
    next_texture: u64,
    samplers: BTreeMap<u32, String>,
    bound: BTreeMap<u32, TextureHandle>,
    pub values: HashMap<String, UniformValue>,
    pub calls: Vec<Call>,
    pub peak_textures: usize,
    uploads: usize,
    fail_upload: Option<usize>,
    back_buffer: Option<FrameCapture>,
    front_buffer: Option<FrameCapture>,
}

impl RecordingDevice {
    pub fn new(output: (u32, u32)) -> Self {
        Self {
            output,
            declared: HashSet::new(),
            textures: HashMap::new(),
            next_texture: 1,
            samplers: BTreeMap::new(),
            bound: BTreeMap::new(),
            values: HashMap::new(),
            calls: Vec::new(),
            peak_textures: 0,
            uploads: 0,
            fail_upload: None,
            back_buffer: None,
            front_buffer: None,
        }
    }

    /// Accept `name` in [`GpuDevice::set_uniform`].
    pub fn declare(mut self, name: &str) -> Self {
        self.declared.insert(name.to_string());
        self
    }

    /// Make the `nth` upload (1-based, counted over the device's lifetime)
    /// fail with [`Error::ResourceExhausted`].
    pub fn fail_upload(mut self, nth: usize) -> Self {
        self.fail_upload = Some(nth);
        self
    }

    pub fn count(&self, kind: &str) -> usize {
        self.calls.iter().filter(|c| c.kind() == kind).count()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.calls.iter().map(Call::kind).collect()
    }

    pub fn assigned(&self, name: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::AssignSampler { name: n, .. } if n == name))
            .count()
    }

    /// Nearest-sample the texture bound to `screen_texture` over the whole
    /// output, converting the stored blue-first bytes to RGBA.
    fn rasterize(&self) -> Result<FrameCapture> {
        let (width, height) = self.output;
        let mut pixels = vec![0u8; width as usize * height as usize * 4];

        let source = self
            .samplers
            .iter()
            .find(|(_, name)| name.as_str() == SCREEN_TEXTURE)
            .and_then(|(slot, _)| self.bound.get(slot));
        let Some(handle) = source else {
            return Ok(FrameCapture {
                width,
                height,
                pixels,
            });
        };
        let texture = self
            .textures
            .get(handle)
            .ok_or_else(|| Error::Draw(format!("{handle} was released before the draw")))?;

        for y in 0..height {
            let v = (y as f32 + 0.5) / height as f32;
            let ty = ((v * texture.height as f32) as u32).min(texture.height - 1);
            for x in 0..width {
                let u = (x as f32 + 0.5) / width as f32;
                let tx = ((u * texture.width as f32) as u32).min(texture.width - 1);

                let src = (ty as usize * texture.width as usize + tx as usize) * 4;
                let [b, g, r, a] = [
                    texture.bgra[src],
                    texture.bgra[src + 1],
                    texture.bgra[src + 2],
                    texture.bgra[src + 3],
                ];
                let dst = (y as usize * width as usize + x as usize) * 4;
                pixels[dst..dst + 4].copy_from_slice(&[r, g, b, a]);
            }
        }

        Ok(FrameCapture {
            width,
            height,
            pixels,
        })
    }
}

impl GpuDevice for RecordingDevice {
    fn upload_texture(&mut self, image: ImageRef<'_>) -> Result<TextureHandle> {
        self.calls.push(Call::Upload {
            width: image.width,
            height: image.height,
        });
        self.uploads += 1;
        if self.fail_upload == Some(self.uploads) {
            return Err(Error::ResourceExhausted {
                resource: "texture",
                reason: "out of texture memory".to_string(),
            });
        }
        if let Some(reason) = image.layout_problem() {
            return Err(Error::Format {
                name: "<direct upload>".to_string(),
                reason,
            });
        }

        let handle = TextureHandle::from_raw(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(
            handle,
            StoredTexture {
                width: image.width,
                height: image.height,
                bgra: image.data.to_vec(),
            },
        );
        self.peak_textures = self.peak_textures.max(self.textures.len());
        Ok(handle)
    }

    fn assign_sampler(&mut self, name: &str, slot: u32) -> Result<()> {
        self.calls.push(Call::AssignSampler {
            name: name.to_string(),
            slot,
        });
        self.samplers.insert(slot, name.to_string());
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: TextureHandle) -> Result<()> {
        self.calls.push(Call::Bind { slot, texture });
        if !self.textures.contains_key(&texture) {
            return Err(Error::UnknownTexture(texture));
        }
        self.bound.insert(slot, texture);
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()> {
        self.calls.push(Call::SetUniform {
            name: name.to_string(),
            value,
        });
        if !self.declared.contains(name) {
            return Err(Error::UnknownUniform {
                name: name.to_string(),
            });
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn draw_quad(&mut self) -> Result<()> {
        self.calls.push(Call::Draw);
        self.back_buffer = Some(self.rasterize()?);
        Ok(())
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        self.calls.push(Call::Release(texture));
        if self.textures.remove(&texture).is_some() {
            self.bound.retain(|_, bound| *bound != texture);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.calls.push(Call::Present);
        self.bound.clear();
        let frame = self
            .back_buffer
            .take()
            .ok_or_else(|| Error::Present("nothing was drawn".to_string()))?;
        self.front_buffer = Some(frame);
        Ok(())
    }

    fn live_textures(&self) -> usize {
        self.textures.len()
    }

    fn output_size(&self) -> (u32, u32) {
        self.output
    }

    fn capture_frame(&mut self) -> Result<FrameCapture> {
        self.front_buffer
            .clone()
            .ok_or_else(|| Error::Capture("no frame has been presented".to_string()))
    }
}
