//! Resolves the full version string at compile time and hands it to clap via
//! the `CODEGRAPH_SETUP_FULL_VERSION` environment variable.

#[path = "src/version.rs"]
mod version;

use std::env;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-env-changed={}", version::VERSION_OVERRIDE_ENV);
    println!("cargo:rerun-if-env-changed={}", version::VERSION_SUFFIX_ENV);

    let base = env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();

    let override_full = env::var(version::VERSION_OVERRIDE_ENV).ok();
    let suffix = env::var(version::VERSION_SUFFIX_ENV).ok();
    let git = version::git_build_info(Path::new(&manifest_dir));

    let full = version::compose_version(
        &base,
        override_full.as_deref(),
        suffix.as_deref(),
        git.as_ref(),
    );

    println!("cargo:rustc-env=CODEGRAPH_SETUP_FULL_VERSION={full}");
}
