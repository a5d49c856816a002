use anyhow::Result;
use log::{error, info};
use raylib::prelude::*;

mod app;
mod bitmap;
mod cli;
mod constants;
mod driver;
mod error;
mod options;
mod state;
mod surface;

use crate::app::App;
use crate::constants::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // --- Command Line ---
    let args = cli::parse_args();
    if args.party {
        info!("Party Mode Enabled!");
    }

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title(WINDOW_TITLE)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    // Esc belongs to the options dialog
    rl.set_exit_key(None);

    let mut app = App::new(&args);

    // --- Main Loop ---
    while !rl.window_should_close() {
        app.handle_input(&mut rl);
        app.update(&rl);

        if let Err(e) = app.draw(&mut rl, &thread) {
            // Keep bouncing whatever is left rather than closing the window
            error!("Render error: {:#}", e);
            app.state.content = state::Content::Text(args.text.clone());
        }
    }

    Ok(())
}
