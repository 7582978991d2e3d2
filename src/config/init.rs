use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::get_config_path;

const DEFAULT_CONFIG: &str = "\
# kneeform configuration. Every key is optional; delete what you do not need.

# Color scheme: auto | dark | light. Auto probes the terminal background.
#theme: auto

# Directory for 'w' file exports and the clipboard file fallback.
# Defaults to the platform data directory.
#export_dir: ~/Documents/knee-exports

# Classification bound overrides, keyed by report parameter name. Overrides
# change the coloring thresholds only, not the printed reference text.
# Parameters without built-in bounds (legLength, legLengthDifference) need
# both low and high.
#ranges:
#  femoralTorsion:
#    low: 5
#    high: 25
#  tttgDistanceMRI:
#    high: 12
";

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Write the commented default config, asking before overwriting.
pub fn run_init(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Leaving existing config untouched.");
            return Ok(());
        }
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory at {}", parent.display())
        })?;
    }

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open {} for writing", config_path.display()))?;
    file.write_all(DEFAULT_CONFIG.as_bytes())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to commit {}", config_path.display()))?;

    println!("Wrote default config to {}", config_path.display());
    Ok(())
}
