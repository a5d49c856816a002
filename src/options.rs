use clap::ValueEnum;
use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::state::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SizePreset {
    /// 320x240
    Small,
    /// 640x480
    #[default]
    Medium,
    /// 800x600
    Large,
}

impl SizePreset {
    pub const ALL: [SizePreset; 3] = [SizePreset::Small, SizePreset::Medium, SizePreset::Large];

    pub fn dimensions(self) -> Size {
        match self {
            SizePreset::Small  => Size::new(320, 240),
            SizePreset::Medium => Size::new(640, 480),
            SizePreset::Large  => Size::new(800, 600),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizePreset::Small  => "320x240",
            SizePreset::Medium => "640x480",
            SizePreset::Large  => "800x600",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(1)
    }
}

/// The modal options panel: a radio group of size presets and the F11
/// keybind checkbox.
#[derive(Debug, Clone, Default)]
pub struct OptionsDialog {
    pub open: bool,
    pub selected: SizePreset,
}

impl OptionsDialog {
    pub fn open(&mut self, current: SizePreset) {
        self.open = true;
        self.selected = current;
    }

    pub fn select(&mut self, preset: SizePreset) {
        self.selected = preset;
    }

    pub fn select_next(&mut self) {
        let index = (self.selected.index() + 1) % SizePreset::ALL.len();
        self.selected = SizePreset::ALL[index];
    }

    pub fn select_previous(&mut self) {
        let len = SizePreset::ALL.len();
        let index = (self.selected.index() + len - 1) % len;
        self.selected = SizePreset::ALL[index];
    }

    /// Closes the dialog and hands back the preset to apply.
    pub fn apply(&mut self) -> SizePreset {
        self.open = false;
        self.selected
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }
}

/// What the window has to do after F11.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenChange {
    /// Cover the whole monitor with an undecorated window.
    EnterBorderless,
    /// Back to a decorated window of `restore` size.
    Leave { restore: Size },
}

/// Borderless fullscreen on F11, inert until the keybind is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fullscreen {
    pub keybind_enabled: bool,
    pub is_fullscreen: bool,
}

impl Fullscreen {
    pub fn toggle_keybind(&mut self) {
        self.keybind_enabled = !self.keybind_enabled;
    }

    /// Returns the mode switch to perform, if the keybind is enabled.
    pub fn on_f11(&mut self) -> Option<FullscreenChange> {
        if !self.keybind_enabled {
            return None;
        }
        self.is_fullscreen = !self.is_fullscreen;
        Some(if self.is_fullscreen {
            FullscreenChange::EnterBorderless
        } else {
            FullscreenChange::Leave { restore: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT) }
        })
    }
}
