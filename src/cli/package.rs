use crate::config::Config;
use crate::errors::Result;
use crate::release::Packager;
use colored::*;
use std::env;
use std::fs;

/// Compile assets, build the linux binary, and bundle the release artifact
/// named after the HEAD commit.
pub fn run() -> Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::load(&cwd)?;
    let packager = Packager::new(&config.release, &cwd);

    packager.ensure_sassc()?;
    packager.compile_sass()?;
    println!("{} compiled sass", "✓".green());

    packager.ensure_clean()?;

    packager.run_script(&config.release.webpack_script)?;
    packager.run_script(&config.release.build_script)?;
    println!("{} built {}", "✓".green(), config.release.binary);

    let sha = packager.head_sha()?;
    let artifact = packager.archive(&sha)?;
    // the binary lives on only inside the artifact
    fs::remove_file(cwd.join(&config.release.binary))?;
    println!("{} packaged {}", "✓".green(), artifact.display());

    Ok(())
}
