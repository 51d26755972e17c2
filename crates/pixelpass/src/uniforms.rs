//! Per-call uniform maps.

use pixelpass_glium::UniformValue;
use pixelpass_surface::{ImageRef, PixelSurface};

/// A uniform value for one `update` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform<'a> {
    /// Written directly into the program.
    Value(UniformValue),
    /// Uploaded as a texture for this frame and bound to the name's slot.
    Image(ImageRef<'a>),
}

impl<'a> From<&'a PixelSurface> for Uniform<'a> {
    fn from(surface: &'a PixelSurface) -> Self {
        Uniform::Image(surface.as_image())
    }
}

impl<'a> From<ImageRef<'a>> for Uniform<'a> {
    fn from(image: ImageRef<'a>) -> Self {
        Uniform::Image(image)
    }
}

impl From<UniformValue> for Uniform<'_> {
    fn from(value: UniformValue) -> Self {
        Uniform::Value(value)
    }
}

macro_rules! impl_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Uniform<'_> {
                fn from(v: $ty) -> Self {
                    Uniform::Value(UniformValue::from(v))
                }
            }
        )*
    };
}

impl_from_value!(
    f32,
    [f32; 2],
    [f32; 3],
    [f32; 4],
    i32,
    [i32; 2],
    [i32; 3],
    [i32; 4],
    u32,
    bool,
    [[f32; 2]; 2],
    [[f32; 3]; 3],
    [[f32; 4]; 4],
);

/// Insertion-ordered map of uniform name to value.
///
/// Iteration order decides which new sampler names get which slots, so it is
/// kept exactly as the caller built the map. Re-inserting a name replaces the
/// value in place.
///
/// ```
/// use pixelpass::{Uniforms, PixelSurface};
///
/// let noise = PixelSurface::new(16, 16);
/// let uniforms = Uniforms::new()
///     .with("time", 1.5f32)
///     .with("noise", &noise);
/// assert_eq!(uniforms.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uniforms<'a> {
    entries: Vec<(String, Uniform<'a>)>,
}

impl<'a> Uniforms<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Uniforms::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Uniform<'a>>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name`, returning the value it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Uniform<'a>>,
    ) -> Option<Uniform<'a>> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, current)) => Some(std::mem::replace(current, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Uniform<'a>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove `name`; the remaining entries keep their order.
    pub fn remove(&mut self, name: &str) -> Option<Uniform<'a>> {
        let at = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(at).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Uniform<'a>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}
