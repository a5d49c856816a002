// Command line interface module

use std::ffi::OsString;
use std::path::PathBuf;
use clap::Parser;
use crate::constants::DEFAULT_TEXT;
use crate::options::SizePreset;

/// bouncer - bounce a label or an image around the window
#[derive(Parser, Debug)]
#[command(name = "bouncer")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Re-randomize the background color on every tick (also accepted as -pm)
    #[arg(short, long)]
    pub party: bool,

    /// Text shown while no image is loaded
    #[arg(long, default_value = DEFAULT_TEXT)]
    pub text: String,

    /// Image to bounce from the start instead of the text
    #[arg(long, value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Size the image is scaled to
    #[arg(long, value_enum, default_value_t = SizePreset::Medium)]
    pub size: SizePreset,

    /// Enable the F11 fullscreen keybind at startup
    #[arg(long)]
    pub fullscreen_keybind: bool,
}

/// `-pm` predates the clap interface; rewrite it so clap doesn't read it as `-p -m`.
fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| if arg == "-pm" { OsString::from("--party") } else { arg })
        .collect()
}

pub fn parse_args() -> Args {
    Args::parse_from(normalize_legacy_flags(std::env::args_os()))
}
