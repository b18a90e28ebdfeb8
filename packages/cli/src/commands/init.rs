use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use wiredit_editor::{FileName, DEFAULT_FILE_NAME, DEFAULT_TEMPLATE};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Diagram file to create
    #[arg(default_value = DEFAULT_FILE_NAME)]
    pub path: PathBuf,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.path);
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    FileName::parse(name)?;

    // Check if the diagram already exists
    if path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠".yellow(),
            args.path.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "Initializing wiring diagram...".bright_blue().bold());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, DEFAULT_TEMPLATE)?;
    println!("  {} Created {}", "✓".green(), args.path.display());

    let config_path = cwd.join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() || args.force {
        let config_json = serde_json::to_string_pretty(&Config::default())?;
        fs::write(&config_path, config_json)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    println!();
    println!("Next steps:");
    println!("  1. Run: wiredit edit {}", args.path.display());
    println!("  2. Or render once: wiredit render {}", args.path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_template_and_config() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                path: PathBuf::from("harness.yml"),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("harness.yml")).unwrap(),
            DEFAULT_TEMPLATE
        );
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("harness.yml"), "mine").unwrap();

        init(
            InitArgs {
                path: PathBuf::from("harness.yml"),
                force: false,
            },
            dir.path(),
        )
        .unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("harness.yml")).unwrap(),
            "mine"
        );
    }

    #[test]
    fn test_init_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let result = init(
            InitArgs {
                path: PathBuf::from("harness.json"),
                force: false,
            },
            dir.path(),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("harness.json").exists());
    }
}
