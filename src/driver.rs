use rand::Rng;
use raylib::prelude::Color;
use crate::constants::*;
use crate::state::{BounceState, Content, Size};

/// The part of the window the driver needs to know about.
pub trait Viewport {
    fn bounds(&self) -> Size;
    fn measure_text(&self, text: &str, font_size: i32) -> i32;
}

/// Which velocity components were reflected during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

/// Advances the animation by one step.
///
/// The caller redraws after every frame, so there is no separate redraw
/// request to issue here.
pub fn tick(state: &mut BounceState, viewport: &impl Viewport, rng: &mut impl Rng) -> Bounce {
    state.bounds = viewport.bounds();

    state.position.x += state.velocity.x;
    state.position.y += state.velocity.y;

    // (lower, upper) thresholds per axis
    let (x_range, y_range) = match &state.content {
        Content::Bitmap(bitmap) => (
            (0, state.bounds.width - bitmap.width()),
            (0, state.bounds.height - bitmap.height()),
        ),
        // Text keeps the vertical check of the original window: lower bound is
        // the font size, upper bound the full height.
        Content::Text(text) => (
            (0, state.bounds.width - viewport.measure_text(text, TEXT_SIZE)),
            (TEXT_SIZE, state.bounds.height),
        ),
    };

    let bounce = Bounce {
        x: outside(state.position.x, x_range),
        y: outside(state.position.y, y_range),
    };
    if bounce.x {
        state.velocity.x = -state.velocity.x;
    }
    if bounce.y {
        state.velocity.y = -state.velocity.y;
    }

    if state.party_mode {
        state.background = random_color(rng);
    }

    bounce
}

fn outside(value: i32, (lower, upper): (i32, i32)) -> bool {
    value < lower || value > upper
}

pub fn random_color(rng: &mut impl Rng) -> Color {
    Color::new(rng.random(), rng.random(), rng.random(), 255)
}

/// Turns variable frame times into a whole number of fixed-length ticks.
pub struct Ticker {
    interval: f32,
    accumulator: f32,
    max_catch_up: u32,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            interval: TICK_INTERVAL.as_secs_f32(),
            accumulator: 0.0,
            max_catch_up: MAX_CATCH_UP,
        }
    }

    /// Returns how many ticks are due after `dt` seconds. A backlog longer
    /// than `MAX_CATCH_UP` ticks (a blocking dialog, a dragged window) is
    /// dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);

        let due = (self.accumulator / self.interval).floor() as u32;
        if due > self.max_catch_up {
            self.accumulator = 0.0;
            return self.max_catch_up;
        }

        self.accumulator -= due as f32 * self.interval;
        due
    }
}
