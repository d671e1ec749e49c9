//! forge – render a cover letter template to HTML and PDF.
//!
//! Usage:
//!   forge [cover_letter.md] [--no-pdf] [--chrome-path PATH] [--name-from-fields]
//!
//! Placeholder values come from the environment (and a `.env` file in the
//! working directory). Outputs are written next to the input: `<stem>.html`
//! and, unless `--no-pdf` is given, `<stem>.pdf`.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use letter_forge::pipeline::DEFAULT_INPUT;
use letter_forge::{
    run, ChromeRenderer, ExportOptions, Exporter, OutputNaming, PipelineConfig, Variables,
};

#[derive(Parser)]
#[command(name = "forge")]
#[command(version, about = "Render a cover letter template to HTML and PDF", long_about = None)]
struct Cli {
    /// Markdown input file
    #[arg(default_value = DEFAULT_INPUT)]
    file: PathBuf,

    /// Only write the HTML file
    #[arg(long)]
    no_pdf: bool,

    /// Browser executable to print with (default: probe PATH)
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Name the PDF <NAME>-<APPLYING_COMPANY>-<JOB_TITLE>.pdf when all are set
    #[arg(long)]
    name_from_fields: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let config = PipelineConfig {
        input: cli.file,
        no_pdf: cli.no_pdf,
        export: ExportOptions {
            browser: cli.chrome_path,
            naming: if cli.name_from_fields {
                OutputNaming::FromFields
            } else {
                OutputNaming::InputStem
            },
            profile_root: None,
        },
    };
    let vars = Variables::from_env();

    match run(&config, &vars, &Exporter::new(ChromeRenderer)) {
        Ok(output) => {
            if let Some(pdf) = output.pdf_path {
                println!("PDF saved as: {}", pdf.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
