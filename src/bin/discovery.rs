use clap::Parser;
use discovery::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    discovery::native::init_tracing();

    match cli.command {
        Commands::Serve(args) => commands::execute_serve(args).await?,
        Commands::Get(args) => commands::execute_get(args).await?,
        Commands::Update(args) => commands::execute_update(args).await?,
    }

    Ok(())
}
