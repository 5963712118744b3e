// Path: crates/cli/src/commands/config.rs

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use learnchain_types::config::ClientConfig;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct ConfigCmdArgs {
    #[clap(subcommand)]
    pub command: ConfigSubCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubCommands {
    /// Write a configuration file with every default spelled out.
    Init {
        /// Target file. Defaults to the global `--config` path.
        #[clap(long)]
        out: Option<PathBuf>,
        /// Overwrite an existing file.
        #[clap(long)]
        force: bool,
    },
    /// Print the effective configuration after defaults and environment overrides.
    Show,
}

pub fn run(args: ConfigCmdArgs, config_path: &Path) -> Result<()> {
    match args.command {
        ConfigSubCommands::Init { out, force } => {
            let target = out.unwrap_or_else(|| config_path.to_path_buf());
            write_default(&target, force)?;
            println!("Wrote {}", target.display());
        }
        ConfigSubCommands::Show => {
            let config = ClientConfig::load_or_default(config_path)
                .with_context(|| format!("failed to load {}", config_path.display()))?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

fn write_default(target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        return Err(anyhow!(
            "'{}' already exists; pass --force to overwrite",
            target.display()
        ));
    }
    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(target, toml::to_string_pretty(&ClientConfig::default())?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("learnchain.toml");

        write_default(&path, false).unwrap();
        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.search.top_n, 5);

        assert!(write_default(&path, false).is_err());
        write_default(&path, true).unwrap();
    }
}
