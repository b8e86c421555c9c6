use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cache::BookCache;
use crate::config::API_KEY_ENV;

/// Run the init command - interactively create a config file
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    // Check if config already exists
    if config_path.exists() && !force {
        eprintln!(
            "{}: Config already exists at {}",
            "Error".red().bold(),
            config_path.display()
        );
        eprintln!();
        eprintln!("Use {} to overwrite.", "--force".cyan());
        bail!("Config file already exists");
    }

    println!("{}", "gutenbergctl configuration".bold());
    println!();
    println!(
        "This will create a config file at: {}",
        config_path.display().to_string().cyan()
    );
    println!();

    let api_key = prompt_api_key()?;
    let cache_path = prompt_cache_path()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    std::fs::write(config_path, render_config(api_key.as_deref(), &cache_path))
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    println!();
    println!(
        "{} Config written to {}",
        "✓".green(),
        config_path.display()
    );
    println!();
    println!("You can now use:");
    println!(
        "  {} - browse and analyze books interactively",
        "gutenbergctl explore".cyan()
    );
    println!(
        "  {} - analyze a single book",
        "gutenbergctl analyze <id> --kind sentiment".cyan()
    );

    Ok(())
}

/// Config file contents; an absent key is left as a commented-out line
fn render_config(api_key: Option<&str>, cache_path: &Path) -> String {
    let key_line = match api_key {
        Some(key) => format!("api_key = {}", toml::Value::String(key.to_string())),
        None => "# api_key = \"gsk_...\"".to_string(),
    };

    format!(
        r#"# gutenbergctl configuration
# The {} environment variable overrides api_key

[groq]
{}

[cache]
path = {}
"#,
        API_KEY_ENV,
        key_line,
        toml::Value::String(cache_path.display().to_string())
    )
}

fn prompt_api_key() -> Result<Option<String>> {
    println!("{}", "Step 1: Groq API key".bold());
    println!();
    println!("Analysis requests are sent to the Groq chat completion API.");
    println!(
        "Leave this blank to provide the key through {} instead.",
        API_KEY_ENV.cyan()
    );
    println!();

    print!("Enter API key: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    println!();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

fn prompt_cache_path() -> Result<PathBuf> {
    println!("{}", "Step 2: Choose a cache file".bold());
    println!();
    println!("Fetched books are stored in this JSON file.");
    println!();

    let default = BookCache::default_path().unwrap_or_else(|_| PathBuf::from("books.json"));

    print!(
        "Enter cache file path [{}]: ",
        default.display().to_string().green()
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    let path = if input.is_empty() {
        default
    } else if let Some(stripped) = input.strip_prefix("~/") {
        // Expand ~ to home directory
        if let Some(home) = dirs::home_dir() {
            home.join(stripped)
        } else {
            PathBuf::from(input)
        }
    } else {
        PathBuf::from(input)
    };

    println!();
    Ok(path)
}
