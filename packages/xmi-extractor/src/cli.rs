//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::extract::DiagramKind;
use crate::output::{generate, report_path, write_report, OutputFormat};
use crate::report::ReportOptions;

/// XMI Extractor - Turn UML/XMI diagram exports into review reports.
#[derive(Parser)]
#[command(name = "xmi-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract actors, use cases, the system boundary and associations.
    Usecase(ExtractArgs),

    /// Extract partitions, actions, decisions and flows.
    Activity(ExtractArgs),

    /// Extract requirements and their relationships.
    Requirement(ExtractArgs),

    /// Show the prompt and context files for a verification option.
    Files {
        /// Verification option name (omit to list all options)
        option: Option<String>,

        /// Catalog YAML file
        #[arg(short, long)]
        catalog: PathBuf,
    },
}

/// Arguments shared by the extraction subcommands.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ExtractArgs {
    /// XMI export to read
    pub input: PathBuf,

    /// Report path (default: <input stem>_<suffix>.<ext> beside the input)
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the report instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Report title
    #[arg(short, long)]
    pub title: Option<String>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Usecase(args) => extract_command(DiagramKind::UseCase, &args),
        Commands::Activity(args) => extract_command(DiagramKind::Activity, &args),
        Commands::Requirement(args) => extract_command(DiagramKind::Requirement, &args),
        Commands::Files { option, catalog } => files_command(option.as_deref(), &catalog),
    }
}

/// Execute one of the extraction commands.
fn extract_command(kind: DiagramKind, args: &ExtractArgs) -> Result<()> {
    let options = ReportOptions {
        title: args.title.clone(),
    };
    let report = generate(kind, &args.input, args.format, &options)?;

    if args.stdout {
        print!("{report}");
        return Ok(());
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| report_path(kind, &args.input, args.format));
    write_report(&output_path, &report)?;

    println!(
        "{} {} report from {}",
        style("Extracted").bold(),
        style(kind).cyan(),
        style(args.input.display()).green()
    );
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the files command.
fn files_command(option: Option<&str>, catalog_path: &Path) -> Result<()> {
    let catalog = Catalog::from_yaml_file(catalog_path)?;

    let Some(option) = option else {
        println!("{}", style("Verification options:").bold());
        for name in catalog.option_names() {
            println!("  {name}");
        }
        return Ok(());
    };

    let prompt = catalog.prompt_path(option)?;
    let files = catalog.files_for(option)?;

    println!("{} {}", style("Prompt:").bold(), prompt.display());
    if !prompt.exists() {
        println!("  {}", style("(prompt file not found)").yellow());
    }

    println!("{} ({})", style("Files:").bold(), files.len());
    for file in &files {
        if file.exists() {
            println!("  {}", file.display());
        } else {
            println!("  {} {}", file.display(), style("(missing)").yellow());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_usecase_defaults() {
        let cli = Cli::parse_from(["xmi-extractor", "usecase", "diagram.xml"]);

        let Commands::Usecase(args) = cli.command else {
            panic!("expected usecase command");
        };
        assert_eq!(args.input, PathBuf::from("diagram.xml"));
        assert!(args.output.is_none());
        assert!(!args.stdout);
        assert_eq!(args.format, OutputFormat::Markdown);
        assert!(args.title.is_none());
    }

    #[test]
    fn test_cli_parse_activity_with_options() {
        let cli = Cli::parse_from([
            "xmi-extractor",
            "activity",
            "flow.xml",
            "--format",
            "json",
            "--output",
            "out.json",
            "--title",
            "Show items",
        ]);

        let Commands::Activity(args) = cli.command else {
            panic!("expected activity command");
        };
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.title.as_deref(), Some("Show items"));
    }

    #[test]
    fn test_cli_output_conflicts_with_stdout() {
        let result = Cli::try_parse_from([
            "xmi-extractor",
            "requirement",
            "req.xml",
            "--stdout",
            "--output",
            "r.md",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_files() {
        let cli = Cli::parse_from([
            "xmi-extractor",
            "files",
            "Requirement coverage",
            "--catalog",
            "catalog.yaml",
        ]);

        let Commands::Files { option, catalog } = cli.command else {
            panic!("expected files command");
        };
        assert_eq!(option.as_deref(), Some("Requirement coverage"));
        assert_eq!(catalog, PathBuf::from("catalog.yaml"));
    }
}
