use clap::Parser;

use tenji_cli::commands::{config_ops, convert_ops};
use tenji_cli::trace_init::init_tracing;
use tenji_core::braille::OutputFormat;

#[derive(Parser)]
#[command(name = "tenji", about = "Convert Japanese text to braille")]
struct Cli {
    /// Dictionary file
    #[arg(short = 'D', long = "dict", default_value = "tenji.tcdb")]
    dict_file: String,
    /// Fold width in cells (default from settings)
    #[arg(short, long)]
    width: Option<usize>,
    /// Print the source of each chunk before the output
    #[arg(short, long)]
    debug: bool,
    /// Output format: nabcc or unicode (default from settings)
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Custom settings TOML file
    #[arg(long)]
    config: Option<String>,
    /// Input files (stdin when omitted)
    inputs: Vec<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Some(file) = &cli.config {
        config_ops::load_settings(file);
    }
    let opts = convert_ops::ConvertOptions::resolve(cli.width, cli.format, cli.debug);
    convert_ops::convert(&cli.dict_file, &cli.inputs, &opts);
}
