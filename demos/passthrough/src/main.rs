//! Pass-through demo: a bouncing square drawn on the CPU and shown through
//! `shaders/shader.vert` and `shaders/shader.frag` unchanged.
//!
//! Run from this directory so the default shader paths resolve. The frame
//! count defaults to 300 and can be given as the first argument.

use anyhow::{Context, Result};
use pixelpass::{Canvas, Color, CompositorConfig, FrameCompositor, Rect, Uniforms};

const OUTPUT: (u32, u32) = (640, 480);
const LOGICAL: (u32, u32) = (160, 120);
const SQUARE: u32 = 16;

fn main() -> Result<()> {
    pixelpass::logging::init();

    let frames: u64 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid frame count `{arg}`"))?,
        None => 300,
    };

    let config = CompositorConfig::new(OUTPUT)
        .with_logical_resolution(LOGICAL)
        .with_title("pixelpass passthrough");
    let mut compositor =
        FrameCompositor::open(&config).context("failed to open the compositor")?;

    let mut position = (10i32, 20i32);
    let mut velocity = (2i32, 1i32);
    let uniforms = Uniforms::new();

    for frame in 0..frames {
        step(&mut position, &mut velocity);

        compositor.fill(Color::rgb(16, 16, 32));
        let corner = (LOGICAL.0 as i32 - 1, LOGICAL.1 as i32 - 1);
        compositor.draw_line((0, 0), corner, Color::BLUE);
        compositor.fill_rect(
            Rect::new(position.0, position.1, SQUARE, SQUARE),
            Color::RED,
        );

        compositor
            .update(&uniforms)
            .with_context(|| format!("frame {frame} failed"))?;
    }

    tracing::info!(frames = compositor.frames_presented(), "done");
    Ok(())
}

fn step(position: &mut (i32, i32), velocity: &mut (i32, i32)) {
    let max_x = (LOGICAL.0 - SQUARE) as i32;
    let max_y = (LOGICAL.1 - SQUARE) as i32;

    position.0 += velocity.0;
    position.1 += velocity.1;
    if position.0 <= 0 || position.0 >= max_x {
        velocity.0 = -velocity.0;
        position.0 = position.0.clamp(0, max_x);
    }
    if position.1 <= 0 || position.1 >= max_y {
        velocity.1 = -velocity.1;
        position.1 = position.1.clamp(0, max_y);
    }
}
