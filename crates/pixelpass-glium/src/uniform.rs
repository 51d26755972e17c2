//! Non-sampler uniform values.

/// A scalar, vector or matrix uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Int(i32),
    IVec2([i32; 2]),
    IVec3([i32; 3]),
    IVec4([i32; 4]),
    UInt(u32),
    Bool(bool),
    Mat2([[f32; 2]; 2]),
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
}

impl UniformValue {
    pub(crate) fn as_glium(&self) -> glium::uniforms::UniformValue<'static> {
        use glium::uniforms::UniformValue as G;

        match *self {
            UniformValue::Float(v) => G::Float(v),
            UniformValue::Vec2(v) => G::Vec2(v),
            UniformValue::Vec3(v) => G::Vec3(v),
            UniformValue::Vec4(v) => G::Vec4(v),
            UniformValue::Int(v) => G::SignedInt(v),
            UniformValue::IVec2(v) => G::IntVec2(v),
            UniformValue::IVec3(v) => G::IntVec3(v),
            UniformValue::IVec4(v) => G::IntVec4(v),
            UniformValue::UInt(v) => G::UnsignedInt(v),
            UniformValue::Bool(v) => G::Bool(v),
            UniformValue::Mat2(v) => G::Mat2(v),
            UniformValue::Mat3(v) => G::Mat3(v),
            UniformValue::Mat4(v) => G::Mat4(v),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(v: $ty) -> Self {
                    UniformValue::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    f32 => Float,
    [f32; 2] => Vec2,
    [f32; 3] => Vec3,
    [f32; 4] => Vec4,
    i32 => Int,
    [i32; 2] => IVec2,
    [i32; 3] => IVec3,
    [i32; 4] => IVec4,
    u32 => UInt,
    bool => Bool,
    [[f32; 2]; 2] => Mat2,
    [[f32; 3]; 3] => Mat3,
    [[f32; 4]; 4] => Mat4,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_matching_variant() {
        assert_eq!(UniformValue::from(1.5f32), UniformValue::Float(1.5));
        assert_eq!(UniformValue::from([1, 2]), UniformValue::IVec2([1, 2]));
        assert_eq!(UniformValue::from(3u32), UniformValue::UInt(3));
        assert_eq!(UniformValue::from(true), UniformValue::Bool(true));
    }

    #[test]
    fn glium_value_keeps_payload() {
        match UniformValue::Vec3([0.1, 0.2, 0.3]).as_glium() {
            glium::uniforms::UniformValue::Vec3(v) => assert_eq!(v, [0.1, 0.2, 0.3]),
            _ => panic!("Vec3 converted to another glium variant"),
        }
    }
}
