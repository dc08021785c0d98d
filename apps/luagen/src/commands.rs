use anyhow::{bail, Context, Result};
use colored::Colorize;
use luagen_config::AppConfig;
use luagen_core::{FsSource, GenerationOutput, Generator, StubFile};
use std::fs;
use std::io::ErrorKind;

fn run_generator(config: &AppConfig) -> Result<(GenerationOutput, Vec<StubFile>)> {
    let settings = config.generator_settings();
    let source = FsSource::new();
    let output = Generator::new(&settings, &source).run().with_context(|| {
        format!(
            "Failed to generate stubs from {}",
            config.layout.source_dir.display()
        )
    })?;
    let files = output.render(&settings);
    Ok((output, files))
}

fn print_diagnostics(output: &GenerationOutput) {
    if output.diagnostics.is_empty() {
        return;
    }
    println!(
        "\n{}",
        format!("⚠ {} warning(s)", output.diagnostics.len()).yellow()
    );
    for diagnostic in output.diagnostics.iter() {
        println!("{} {}", "⚠".yellow(), diagnostic);
    }
}

pub fn generate(config: &AppConfig) -> Result<()> {
    println!("{}", "Generating Lua stubs...".bold());
    let (output, files) = run_generator(config)?;

    let out_dir = &config.output.dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    for file in &files {
        let path = out_dir.join(&file.file_name);
        fs::write(&path, &file.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Wrote stub");
        println!("{} Wrote {}", "✓".green(), path.display());
    }

    print_diagnostics(&output);
    println!(
        "\n{}",
        format!("✓ {} stub files generated", files.len()).green().bold()
    );
    Ok(())
}

pub fn check(config: &AppConfig) -> Result<()> {
    println!("{}", "Checking Lua stubs...".bold());
    let (output, files) = run_generator(config)?;
    print_diagnostics(&output);

    let mut stale = Vec::new();
    for file in &files {
        let path = config.output.dir.join(&file.file_name);
        match fs::read_to_string(&path) {
            Ok(existing) if existing == file.contents => {
                println!("{} {}", "✓".green(), path.display());
            }
            Ok(_) => {
                println!("{} {} differs", "✗".red(), path.display());
                stale.push(file.file_name.as_str());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                println!("{} {} missing", "✗".red(), path.display());
                stale.push(file.file_name.as_str());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        }
    }

    if !stale.is_empty() {
        bail!(
            "{} stub file(s) out of date: {}. Run `luagen generate`.",
            stale.len(),
            stale.join(", ")
        );
    }
    println!("\n{}", "✓ Stubs are up to date".green().bold());
    Ok(())
}

pub fn dump(config: &AppConfig) -> Result<()> {
    let (output, _) = run_generator(config)?;
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize symbol tables")?;
    println!("{json}");
    Ok(())
}
