//! Conversion between device pixels and beatmap (osu!pixel) space.

/// Width of the beatmap coordinate space.
pub const PLAYFIELD_WIDTH: f32 = 640.0;
/// Height of the beatmap coordinate space.
pub const PLAYFIELD_HEIGHT: f32 = 480.0;

/// Scale factors from beatmap space to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSystem {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl PixelSystem {
    /// Scale for a device of `width` x `height` pixels over a `playfield` of the given size.
    pub fn new(width: u32, height: u32, playfield: (f32, f32)) -> Self {
        Self {
            scale_x: width as f32 / playfield.0,
            scale_y: height as f32 / playfield.1,
        }
    }

    /// Device resolution matched 1:1 to the 640x480 playfield.
    pub fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn to_beatmap(&self, device: (f32, f32)) -> (f32, f32) {
        (device.0 / self.scale_x, device.1 / self.scale_y)
    }

    pub fn to_device(&self, beatmap: (f32, f32)) -> (f32, f32) {
        (beatmap.0 * self.scale_x, beatmap.1 * self.scale_y)
    }

    pub fn update_size(&mut self, width: u32, height: u32, playfield: (f32, f32)) {
        *self = Self::new(width, height, playfield);
    }
}

impl Default for PixelSystem {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_scale() {
        let mut pixels = PixelSystem::new(1280, 960, (PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT));
        assert_eq!(pixels.scale_x, 2.0);
        assert_eq!(pixels.to_beatmap((200.0, 100.0)), (100.0, 50.0));
        assert_eq!(pixels.to_device((100.0, 50.0)), (200.0, 100.0));

        pixels.update_size(640, 240, (PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT));
        assert_eq!(pixels.to_beatmap((10.0, 10.0)), (10.0, 20.0));
    }
}
