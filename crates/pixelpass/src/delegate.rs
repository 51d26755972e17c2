//! Drawing on a [`FrameCompositor`] draws on its surface.

use pixelpass_glium::GpuDevice;
use pixelpass_surface::{Canvas, Color, PixelSurface, Rect};

use crate::compositor::FrameCompositor;

impl<D: GpuDevice> Canvas for FrameCompositor<D> {
    fn size(&self) -> (u32, u32) {
        self.surface().size()
    }

    fn get_at(&self, x: u32, y: u32) -> Option<Color> {
        self.surface().get_at(x, y)
    }

    fn set_at(&mut self, x: u32, y: u32, color: Color) -> bool {
        self.surface_mut().set_at(x, y, color)
    }

    fn fill(&mut self, color: Color) {
        self.surface_mut().fill(color)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.surface_mut().fill_rect(rect, color)
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        self.surface_mut().draw_line(from, to, color)
    }

    fn blit(&mut self, source: &PixelSurface, dest: (i32, i32)) {
        self.surface_mut().blit(source, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingDevice;
    use crate::Uniforms;

    #[test]
    fn canvas_calls_reach_the_surface() {
        let mut compositor =
            FrameCompositor::with_device(RecordingDevice::new((8, 8)), (8, 8)).unwrap();

        compositor.fill(Color::BLACK);
        compositor.fill_rect(Rect::new(2, 2, 2, 2), Color::RED);
        compositor.draw_line((0, 7), (7, 7), Color::BLUE);
        assert!(compositor.set_at(7, 0, Color::GREEN));
        assert!(!compositor.set_at(8, 0, Color::GREEN));

        assert_eq!(compositor.size(), (8, 8));
        assert_eq!(compositor.get_at(3, 3), Some(Color::RED));
        assert_eq!(compositor.surface().get_at(5, 7), Some(Color::BLUE));
        assert_eq!(compositor.get_at(7, 0), Some(Color::GREEN));
        assert_eq!(compositor.get_at(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn blitted_sprite_shows_up_in_the_frame() {
        let mut sprite = PixelSurface::new(2, 2);
        sprite.fill(Color::WHITE);
        let mut compositor =
            FrameCompositor::with_device(RecordingDevice::new((4, 4)), (4, 4)).unwrap();
        compositor.fill(Color::BLACK);
        compositor.blit(&sprite, (2, 2));

        compositor.update(&Uniforms::new()).unwrap();

        let frame = compositor.capture_frame().unwrap();
        assert_eq!(frame.pixel(3, 3), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 255]));
    }
}
