use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cableway-report")]
#[command(about = "Cableway inspection report generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the PDF report from a form file and photos
    Generate {
        /// Form JSON file (field name → value); omitted fields are empty
        #[arg(short, long)]
        form: Option<PathBuf>,

        /// Photo to attach (png/jpg/jpeg); repeat for more
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,

        /// Attach every photo directly inside this folder
        #[arg(long)]
        image_dir: Option<PathBuf>,

        /// Output directory (default: config, then current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Report date YYYY-MM-DD (default: today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Fill in the form field by field, then generate
    Interactive {
        /// Photo to attach (png/jpg/jpeg); repeat for more
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,

        /// Attach every photo directly inside this folder
        #[arg(long)]
        image_dir: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Write a blank form JSON with every field
    Template {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or edit settings
    Config {
        /// Default output directory
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date: {}. Use YYYY-MM-DD", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-14"), Ok(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()));
        assert!(parse_date("14/03/2024").is_err());
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::parse_from([
            "cableway-report",
            "generate",
            "--form",
            "form.json",
            "-i",
            "a.jpg",
            "-i",
            "b.png",
            "--date",
            "2024-03-14",
        ]);
        match cli.command {
            Commands::Generate { form, images, date, image_dir, output_dir } => {
                assert_eq!(form, Some(PathBuf::from("form.json")));
                assert_eq!(images, vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 14));
                assert!(image_dir.is_none());
                assert!(output_dir.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_interactive_takes_no_form_file() {
        assert!(Cli::try_parse_from(["cableway-report", "interactive", "--form", "draft.json"]).is_err());
        assert!(Cli::try_parse_from(["cableway-report", "interactive", "--save-form", "draft.json"]).is_err());

        let cli = Cli::parse_from(["cableway-report", "interactive", "-i", "a.jpg"]);
        assert!(matches!(cli.command, Commands::Interactive { ref images, .. } if images.len() == 1));
    }
}
