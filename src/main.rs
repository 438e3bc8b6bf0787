use anyhow::{Context, Result};
use remarkup::{Config, MarkupRenderer};
use std::fs;
use std::io::{self, Read, Write};

/// Reads remarkup source from the configured file or stdin.
///
/// # Errors
///
/// Returns error if the input cannot be read or is not valid UTF8
fn read_input(config: &Config) -> Result<String> {
    match config.input_path() {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

/// Writes rendered HTML to the configured file or stdout.
///
/// # Errors
///
/// Returns error if the output cannot be written
fn write_output(config: &Config, html: &str) -> Result<()> {
    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).context("Failed to create output directory")?;
            }
            fs::write(path, html)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            log::info!("Generated: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("Failed to write stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    if config.base_url() != config.base_url {
        log::warn!(
            "Trailing slash removed from base URL, references resolve under {}",
            config.base_url()
        );
    }

    let content = read_input(&config)?;
    let renderer = MarkupRenderer::new(config.base_url());
    let fragment = renderer.render(&content);
    log::info!(
        "Rendered {} bytes of remarkup into {} bytes of HTML",
        content.len(),
        fragment.len()
    );

    let html = if config.standalone {
        remarkup::page::document(&config.title, &fragment).into_string()
    } else {
        fragment
    };

    write_output(&config, &html)
}
