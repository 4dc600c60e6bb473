use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

const REQUIRED: &[&str] = &[
    "fonts/helvetiker_regular.typeface.json",
    "textures/matcaps/3.png",
    "textures/matcaps/5.png",
    "textures/matcaps/7.png",
    "textures/matcaps/8.png",
];

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");
    for asset in REQUIRED {
        if !assets_src.join(asset).exists() {
            println!(
                "cargo:warning=missing asset assets/{asset}; the demo will run without it"
            );
        }
    }
    if !assets_src.exists() {
        return Ok(());
    }

    // OUT_DIR is target/<profile>/build/<pkg>/out; the binary runs from target/<profile>.
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let Some(profile_dir) = out_dir.ancestors().nth(3) else {
        return Ok(());
    };
    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    copy_items(&[assets_src], profile_dir, &copy_options)?;

    Ok(())
}
