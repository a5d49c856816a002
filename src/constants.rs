use std::time::Duration;

pub const WINDOW_TITLE: &str = "DVD Logo";
pub const WINDOW_WIDTH: i32 = 800;            // Initial (and restored) window width
pub const WINDOW_HEIGHT: i32 = 600;           // Initial (and restored) window height
pub const FPS: u32 = 60;                      // Frames per second

pub const TICK_INTERVAL: Duration = Duration::from_millis(10); // One animation step
pub const MAX_CATCH_UP: u32 = 10;             // Most ticks replayed in a single frame

pub const TEXT_SPEED: i32 = 2;                // Pixels per tick on each axis
pub const TEXT_SIZE: i32 = 20;                // Font size, also the text height used for bouncing
pub const DEFAULT_TEXT: &str = "DVD Logo";
pub const START_X: i32 = 0;
pub const START_Y: i32 = 50;

pub const MENU_BAR_HEIGHT: i32 = 22;
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tif", "tiff", "tga", "ico", "qoi"];
