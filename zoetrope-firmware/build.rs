//! Build script for zoetrope-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Bakes the slideshow interval from ZOETROPE_SLIDESHOW_MS

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Frame hold time used when the environment does not say otherwise: ten
/// minutes, slow enough to feel like wall art rather than an animation.
const DEFAULT_SLIDESHOW_MS: u32 = 600_000;

/// Anything shorter than a second would thrash a reflective panel.
const MIN_SLIDESHOW_MS: u32 = 1_000;

/// One day. Longer settings are almost certainly a unit mistake.
const MAX_SLIDESHOW_MS: u32 = 86_400_000;

fn main() {
    setup_linker();
    emit_slideshow_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Resolve and validate the slideshow interval, then write it out as a
/// constant the firmware includes.
fn emit_slideshow_config() {
    println!("cargo:rerun-if-env-changed=ZOETROPE_SLIDESHOW_MS");

    let interval = match env::var("ZOETROPE_SLIDESHOW_MS") {
        Ok(raw) => match raw.parse::<u32>() {
            Ok(ms) if (MIN_SLIDESHOW_MS..=MAX_SLIDESHOW_MS).contains(&ms) => ms,
            Ok(ms) => panic!(
                "ZOETROPE_SLIDESHOW_MS={} is out of range: expected {} to {} milliseconds",
                ms, MIN_SLIDESHOW_MS, MAX_SLIDESHOW_MS
            ),
            Err(_) => panic!(
                "ZOETROPE_SLIDESHOW_MS={:?} is not a whole number of milliseconds",
                raw
            ),
        },
        Err(_) => DEFAULT_SLIDESHOW_MS,
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("slideshow_config.rs")).unwrap();
    writeln!(f, "/// Frame hold time baked in at build time, milliseconds.").unwrap();
    writeln!(f, "pub const SLIDESHOW_INTERVAL_MS: u32 = {};", interval).unwrap();
}
