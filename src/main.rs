use clap::Parser;
use rarecandy::OutputFormat;
use rarecandy::cli::{self, Command, Presentation};
use rarecandy::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::Write;

#[derive(Parser)]
#[command(name = "rarecandy", about = "Browse the Pokémon TCG card catalog")]
struct Args {
    /// Output format
    #[arg(short, long, default_value_t, value_enum, global = true)]
    format: OutputFormat,

    /// Disable colored type badges
    #[arg(long, global = true)]
    plain: bool,

    /// API base URL (overrides config and POKEMONTCG_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Results per page
    #[arg(long, global = true)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

fn init_logging() {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let log_path = config::config_dir()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .map(|dir| dir.join("rarecandy.log"))
        .unwrap_or_else(|| "rarecandy.log".into());

    if let Ok(log_file) = File::create(&log_path) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();
    init_logging();

    log::info!("Rare Candy starting up: {:?}", args.command);

    let file_config = config::load_config()?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            page_size: args.page_size,
        },
    );

    let presentation = Presentation {
        format: args.format,
        color: !args.plain,
    };
    let output = cli::run(args.command, &resolved, presentation).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    Ok(())
}
