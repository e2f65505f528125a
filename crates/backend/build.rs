use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy the workspace `config.toml` next to the built binary so the server
/// picks it up when started from `target/<profile>/`.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let Some(target_dir) = target_profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source = workspace_root.join("config.toml");
    let dest = target_dir.join("config.toml");

    if !source.exists() {
        println!("cargo:warning=no config.toml at {:?}, embedded defaults will be used", source);
        return;
    }
    if let Err(e) = fs::copy(&source, &dest) {
        panic!("failed to copy config.toml to {:?}: {}", dest, e);
    }
}

// OUT_DIR looks like target/<profile>/build/backend-<hash>/out
fn target_profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
