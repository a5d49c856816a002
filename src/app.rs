use std::path::Path;
use anyhow::Result;
use log::{error, info};
use rand::rngs::ThreadRng;
use raylib::prelude::*;
use crate::bitmap::load_bitmap;
use crate::cli::Args;
use crate::constants::*;
use crate::driver::{Ticker, tick};
use crate::error::ImageLoadError;
use crate::options::{Fullscreen, FullscreenChange, OptionsDialog, SizePreset};
use crate::state::BounceState;
use crate::surface::{RenderSurface, WindowViewport};

pub struct App {
    pub state: BounceState,
    pub preset: SizePreset,
    pub options: OptionsDialog,
    pub fullscreen: Fullscreen,
    surface: RenderSurface,
    ticker: Ticker,
    rng: ThreadRng,
}

impl App {
    pub fn new(args: &Args) -> Self {
        let mut app = Self {
            state: BounceState::new(args.text.clone(), args.party),
            preset: args.size,
            options: OptionsDialog::default(),
            fullscreen: Fullscreen { keybind_enabled: args.fullscreen_keybind, is_fullscreen: false },
            surface: RenderSurface::default(),
            ticker: Ticker::new(),
            rng: rand::rng(),
        };

        if let Some(path) = &args.image {
            if let Err(e) = app.load_image(path) {
                error!("Error loading image: {}", e);
            }
        }

        app
    }

    /// Decodes `path` and makes it the bouncing content. On failure the
    /// current content stays on screen.
    pub fn load_image(&mut self, path: &Path) -> Result<(), ImageLoadError> {
        let bitmap = load_bitmap(path)?;
        self.state.load_bitmap(bitmap, self.preset.dimensions());
        info!("Loaded {} at {}", path.display(), self.preset.label());
        Ok(())
    }

    pub fn apply_preset(&mut self, preset: SizePreset) {
        self.preset = preset;
        let size = preset.dimensions();
        self.state.resize(size.width, size.height);
        info!("Image size set to {}", preset.label());
    }

    // File > Upload Image
    fn upload_image(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Upload Image")
            .add_filter("Image Files", IMAGE_EXTENSIONS)
            .pick_file();

        let Some(path) = picked else {
            return;
        };

        if let Err(e) = self.load_image(&path) {
            error!("Error loading image: {}", e);
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Error")
                .set_description(format!("Error loading image: {}", e))
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }
    }

    pub fn handle_input(&mut self, rl: &mut RaylibHandle) {
        if self.options.open {
            self.handle_options_input(rl);
            return;
        }

        if rl.is_key_pressed(KeyboardKey::KEY_O) {
            self.upload_image();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_TAB) {
            self.options.open(self.preset);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_F11) {
            match self.fullscreen.on_f11() {
                Some(FullscreenChange::EnterBorderless) => rl.toggle_borderless_windowed(),
                Some(FullscreenChange::Leave { restore }) => {
                    rl.toggle_borderless_windowed();
                    rl.set_window_size(restore.width, restore.height);
                }
                None => return,
            }
            info!("Fullscreen: {}", self.fullscreen.is_fullscreen);
        }
    }

    fn handle_options_input(&mut self, rl: &RaylibHandle) {
        let picks = [
            (KeyboardKey::KEY_ONE, SizePreset::Small),
            (KeyboardKey::KEY_TWO, SizePreset::Medium),
            (KeyboardKey::KEY_THREE, SizePreset::Large),
        ];
        for (key, preset) in picks {
            if rl.is_key_pressed(key) {
                self.options.select(preset);
            }
        }

        if rl.is_key_pressed(KeyboardKey::KEY_DOWN) {
            self.options.select_next();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_UP) {
            self.options.select_previous();
        }
        // The checkbox takes effect right away, Apply only concerns the size.
        if rl.is_key_pressed(KeyboardKey::KEY_K) {
            self.fullscreen.toggle_keybind();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_ENTER) {
            let preset = self.options.apply();
            self.apply_preset(preset);
        } else if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            self.options.cancel();
        }
    }

    pub fn update(&mut self, rl: &RaylibHandle) {
        let due = self.ticker.advance(rl.get_frame_time());
        let viewport = WindowViewport::new(rl);
        for _ in 0..due {
            tick(&mut self.state, &viewport, &mut self.rng);
        }
    }

    pub fn draw(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<()> {
        self.surface.sync_texture(rl, thread, &self.state)?;

        let mut d = rl.begin_drawing(thread);
        self.surface.draw(&mut d, &self.state);
        self.draw_menu_bar(&mut d);
        if self.options.open {
            self.draw_options(&mut d);
        }
        Ok(())
    }

    fn draw_menu_bar(&self, d: &mut RaylibDrawHandle) {
        let width = d.get_screen_width();
        d.draw_rectangle(0, 0, width, MENU_BAR_HEIGHT, Color::LIGHTGRAY);

        let mut hint = String::from("File:  [O] Upload Image   [Tab] Options");
        if self.fullscreen.keybind_enabled {
            hint.push_str("   [F11] Fullscreen");
        }
        d.draw_text(&hint, 8, 4, 14, Color::BLACK);
    }

    fn draw_options(&self, d: &mut RaylibDrawHandle) {
        let (screen_w, screen_h) = (d.get_screen_width(), d.get_screen_height());
        let (w, h) = (300, 200);
        let x = (screen_w - w) / 2;
        let y = (screen_h - h) / 2;

        d.draw_rectangle(0, 0, screen_w, screen_h, Color::new(0, 0, 0, 120));
        d.draw_rectangle(x, y, w, h, Color::RAYWHITE);
        d.draw_rectangle_lines(x, y, w, h, Color::DARKGRAY);
        d.draw_text("Options", x + 12, y + 10, 20, Color::BLACK);

        for (i, preset) in SizePreset::ALL.iter().enumerate() {
            let mark = if *preset == self.options.selected { "(o)" } else { "( )" };
            let line = format!("{} [{}] {}", mark, i + 1, preset.label());
            d.draw_text(&line, x + 16, y + 44 + i as i32 * 22, 16, Color::BLACK);
        }

        let check = if self.fullscreen.keybind_enabled { "[x]" } else { "[ ]" };
        let line = format!("{} [K] Enable F11 Fullscreen Keybind", check);
        d.draw_text(&line, x + 16, y + 118, 16, Color::BLACK);
        d.draw_text("[Enter] Apply    [Esc] Cancel", x + 16, y + 164, 16, Color::DARKGRAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Content;
    use clap::Parser;
    use image::RgbaImage;
    use std::io::Write;

    fn app() -> App {
        App::new(&Args::parse_from(["bouncer"]))
    }

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        RgbaImage::new(width, height).save(&path).unwrap();
        path
    }

    #[test]
    fn uploaded_image_is_scaled_to_current_preset() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.preset = SizePreset::Small;

        app.load_image(&write_png(dir.path(), "a.png", 50, 50)).unwrap();

        let bitmap = app.state.bitmap().unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (320, 240));
    }

    #[test]
    fn failed_load_keeps_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not an image").unwrap();
        let mut app = app();

        assert!(app.load_image(file.path()).is_err());
        assert!(matches!(&app.state.content, Content::Text(t) if t == DEFAULT_TEXT));
    }

    #[test]
    fn failed_load_keeps_previous_bitmap() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.load_image(&write_png(dir.path(), "a.png", 20, 10)).unwrap();
        let before = app.state.bitmap().unwrap().generation();

        let bogus = dir.path().join("bogus.png");
        std::fs::write(&bogus, b"\x89PNG but not really").unwrap();
        assert!(app.load_image(&bogus).is_err());

        assert_eq!(app.state.bitmap().unwrap().generation(), before);
    }

    #[test]
    fn applying_preset_rescales_and_is_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.load_image(&write_png(dir.path(), "a.png", 20, 10)).unwrap();

        app.apply_preset(SizePreset::Large);
        app.apply_preset(SizePreset::Large);

        let bitmap = app.state.bitmap().unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (800, 600));
        assert_eq!(app.preset, SizePreset::Large);
    }

    #[test]
    fn preset_without_image_only_records_choice() {
        let mut app = app();
        app.apply_preset(SizePreset::Small);

        assert_eq!(app.preset, SizePreset::Small);
        assert!(app.state.bitmap().is_none());
    }
}
