//! Init command - Generate configuration file

use anyhow::{bail, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::info;

use mcpdrift::config::TEMPLATE;

pub fn run(output: &str, force: bool) -> Result<()> {
    info!("Generating config file: {}", output);

    let path = Path::new(output);

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            output
        );
    }

    fs::write(path, TEMPLATE)?;

    println!("{}", "✓ Configuration file created".green());
    println!("  Location: {}", output.yellow());
    println!();
    println!("Edit {} to customize mcpdrift behavior.", output.cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn run_creates_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mcpdrift.toml");

        run(path.to_str().unwrap(), false).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[golden]"));
        assert!(contents.contains("[ci]"));
    }

    #[test]
    fn run_fails_if_file_exists_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mcpdrift.toml");
        fs::write(&path, "existing content").unwrap();

        let result = run(path.to_str().unwrap(), false);
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing content");
    }

    #[test]
    fn run_overwrites_with_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mcpdrift.toml");
        fs::write(&path, "existing content").unwrap();

        run(path.to_str().unwrap(), true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[schema]"));
    }
}
