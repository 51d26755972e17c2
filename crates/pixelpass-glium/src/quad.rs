//! The constant full-screen quad.

/// One quad corner: clip-space position and texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    pub vert: [f32; 2],
    pub texcoord: [f32; 2],
}

glium::implement_vertex!(QuadVertex, vert, texcoord);

/// Four corners in triangle-strip order covering clip space.
///
/// Texture row 0 maps to the top edge, so surface rows come out top to bottom
/// without a flip.
pub const QUAD: [QuadVertex; 4] = [
    QuadVertex {
        vert: [-1.0, 1.0],
        texcoord: [0.0, 0.0],
    },
    QuadVertex {
        vert: [1.0, 1.0],
        texcoord: [1.0, 0.0],
    },
    QuadVertex {
        vert: [-1.0, -1.0],
        texcoord: [0.0, 1.0],
    },
    QuadVertex {
        vert: [1.0, -1.0],
        texcoord: [1.0, 1.0],
    },
];
