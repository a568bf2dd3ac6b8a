pub mod curve;
pub mod difficulty;
pub mod hit_window;
pub mod pixel_system;

pub use curve::{SLIDER_TESSELLATION, evaluate, object_position, render_points, tessellate};
pub use difficulty::DifficultyProperties;
pub use hit_window::HitWindow;
pub use pixel_system::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, PixelSystem};
