//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "survey")]
#[command(about = "Record customer survey responses", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new survey workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Storage backend (csv, sqlite, document)
        #[arg(short, long, default_value = "csv")]
        backend: String,

        /// Data file name, relative to the workspace (default depends on backend)
        #[arg(short, long)]
        data_file: Option<String>,
    },

    /// Record a customer response
    Add {
        /// Customer email (must be unique)
        email: String,

        /// Boolean answer (true/false, yes/no, 1/0)
        flag: String,

        /// Favorite number
        #[arg(allow_hyphen_values = true)]
        number: String,
    },

    /// List recorded customers
    List,

    /// Export all customers to a csv or sqlite file
    Export {
        /// Export format (csv, sqlite)
        format: String,

        /// Output file (default: customer_data.csv / customer_data.db in the workspace)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_negative_number() {
        let cli = Cli::try_parse_from(["survey", "add", "a@x.com", "true", "-7"]).unwrap();
        match cli.command {
            Commands::Add {
                email,
                flag,
                number,
            } => {
                assert_eq!(email, "a@x.com");
                assert_eq!(flag, "true");
                assert_eq!(number, "-7");
            }
            other => panic!("Expected Add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_defaults() {
        let cli = Cli::try_parse_from(["survey", "init"]).unwrap();
        match cli.command {
            Commands::Init {
                path,
                backend,
                data_file,
            } => {
                assert_eq!(path, PathBuf::from("."));
                assert_eq!(backend, "csv");
                assert!(data_file.is_none());
            }
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_with_output() {
        let cli =
            Cli::try_parse_from(["survey", "export", "sqlite", "--output", "copy.db"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Export { ref format, output: Some(_) } if format == "sqlite"
        ));
    }
}
