use cableway_common::export::assembler::ReportOptions;
use cableway_common::{FormSnapshot, ImageList};
use cableway_report::{cli, config, error, export, form_entry, init_logging, scanner};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{ReportError, Result};
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Report failed: {}", err);
        if let Some(hint) = err.hint() {
            eprintln!("  {}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate { form, images, image_dir, output_dir, date } => {
            let config = Config::load()?;
            let snapshot = load_form(form.as_deref())?;
            let images = scanner::collect_images(&images, image_dir.as_deref())?;
            let date = date.unwrap_or_else(today);
            let output_dir = config.resolve_output_dir(output_dir.as_deref());
            generate(&config, &snapshot, &images, date, &output_dir)?;
        }

        Commands::Interactive { images, image_dir, output_dir } => {
            let config = Config::load()?;
            let images = scanner::collect_images(&images, image_dir.as_deref())?;
            println!("Images: {}", images.len());

            let snapshot = form_entry::run_interactive_form()?;
            let output_dir = config.resolve_output_dir(output_dir.as_deref());
            generate(&config, &snapshot, &images, today(), &output_dir)?;
        }

        Commands::Template { output } => {
            let json = FormSnapshot::template_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Template written: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Config { set_output_dir, show } => {
            let mut config = Config::load()?;

            if let Some(dir) = set_output_dir {
                config.set_output_dir(dir)?;
                println!("Output directory saved");
            }

            if show {
                println!("Settings:");
                println!("  File: {}", Config::config_path()?.display());
                println!("  Output directory: {}", config.resolve_output_dir(None).display());
                println!("  Report title: {}", config.document_title);
            }
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load_form(path: Option<&Path>) -> Result<FormSnapshot> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ReportError::FileNotFound(path.display().to_string()));
            }
            let content = std::fs::read_to_string(path)?;
            Ok(FormSnapshot::from_json(&content)?)
        }
        None => Ok(FormSnapshot::empty()),
    }
}

fn generate(
    config: &Config,
    snapshot: &FormSnapshot,
    images: &ImageList,
    date: NaiveDate,
    output_dir: &Path,
) -> Result<()> {
    let options = ReportOptions {
        title: config.document_title.clone(),
        ..ReportOptions::default()
    };
    let report = export::generate_report_with(snapshot, images, date, output_dir, &options)?;

    println!("Report saved as {}", report.file_name);
    println!("  Pages: {}", report.page_count);
    if !images.is_empty() {
        println!("  Photos: {} placed", report.placed_images);
    }
    if report.skipped_images > 0 {
        println!("  {} photo(s) could not be read and were left out", report.skipped_images);
    }
    Ok(())
}
