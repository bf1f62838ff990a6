use crate::model::Confidence;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "leftovers")]
#[command(about = "Find and remove files left behind by uninstalled macOS apps", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Show what would be removed without deleting")]
    pub dry_run: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfidenceArg {
    High,
    Medium,
    Low,
}

impl From<ConfidenceArg> for Confidence {
    fn from(arg: ConfidenceArg) -> Self {
        match arg {
            ConfidenceArg::High => Confidence::High,
            ConfidenceArg::Medium => Confidence::Medium,
            ConfidenceArg::Low => Confidence::Low,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Report leftovers without deleting anything")]
    Scan {
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
        #[arg(short, long)]
        out: Option<String>,
        #[arg(short, long, help = "Only report this confidence level")]
        confidence: Option<ConfidenceArg>,
    },
    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
    #[command(about = "View deletion history")]
    History {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum ConfigActions {
    #[command(about = "Show current configuration")]
    Show,
    #[command(about = "Add excluded path (glob pattern)")]
    AddExclude {
        #[arg(short, long)]
        path: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_flags() {
        let cli = Cli::try_parse_from(["leftovers", "scan", "-F", "json", "-c", "high"]).unwrap();
        match cli.command {
            Some(Commands::Scan {
                format: OutputFormat::Json,
                confidence: Some(ConfidenceArg::High),
                out: None,
            }) => {}
            _ => panic!("unexpected parse"),
        }
    }

    #[test]
    fn test_global_dry_run_after_subcommand() {
        let cli = Cli::try_parse_from(["leftovers", "history", "--dry-run"]).unwrap();
        assert!(cli.dry_run);

        let cli = Cli::try_parse_from(["leftovers"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);
    }
}
