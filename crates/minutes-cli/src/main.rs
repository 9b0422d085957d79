use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod analyze;

#[derive(Debug, Parser)]
#[command(name = "minutes-cli")]
#[command(about = "Meeting minutes analysis command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a transcript file and print or write an export
    Analyze {
        /// Transcript file (.txt, .md, .html, .htm, .xml)
        file: PathBuf,

        /// Transcript language: zh, en, or auto
        #[arg(long, default_value = "auto")]
        language: String,

        /// Export format: canonical, report, or document
        #[arg(long, default_value = "canonical")]
        export: String,

        /// Write the export here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write an iCalendar file for the extracted action items
        #[arg(long)]
        calendar: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            file,
            language,
            export,
            output,
            calendar,
        } => {
            analyze::run(
                &file,
                &language,
                &export,
                output.as_deref(),
                calendar.as_deref(),
            )
            .await
        }
    }
}
