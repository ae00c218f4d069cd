use clap::{Parser, Subcommand};

use tenji_cli::commands::{config_ops, dict_ops};
use tenji_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "tenjidic", about = "Tenji reading dictionary tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a dictionary from sorted `word reading` lines
    Build {
        /// Output file
        #[arg(short, long)]
        output: String,
        /// Input files (stdin when omitted)
        inputs: Vec<String>,
    },
    /// Show dictionary statistics
    Info {
        /// Dictionary file
        dict_file: String,
    },
    /// Walk a word through the dictionary, one symbol at a time
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Word to look up
        word: String,
    },
    /// Print every edge in file order
    Dump {
        /// Dictionary file
        dict_file: String,
    },
    /// Check every table slot and record against the file bounds
    Verify {
        /// Dictionary file
        dict_file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build { output, inputs } => dict_ops::build(&output, &inputs),
        Command::Info { dict_file } => dict_ops::info(&dict_file),
        Command::Lookup { dict_file, word } => dict_ops::lookup(&dict_file, &word),
        Command::Dump { dict_file } => dict_ops::dump(&dict_file),
        Command::Verify { dict_file } => dict_ops::verify(&dict_file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
