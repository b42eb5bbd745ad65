mod commands;
mod core;
mod ui;
mod utils;

use clap::Parser;
use commands::new::NewCommand;

#[derive(Parser)]
#[command(name = "nexst", version)]
#[command(about = "Scaffold a NextJS + NestJS full-stack workspace in one command", long_about = None)]
struct Cli {
    #[command(flatten)]
    new: NewCommand,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    utils::logging::init(cli.new.log_level.as_deref(), cli.new.verbose);

    let code = cli.new.execute().await?;
    std::process::exit(code);
}
