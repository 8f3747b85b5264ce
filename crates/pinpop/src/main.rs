use clap::{Parser, Subcommand};
use pinpop::app::App;
use pinpop::config;
use pinpop::sys::runtime;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pinpop", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Control socket to listen on (overrides the config file)
    #[arg(short = 's', long)]
    socket: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write the default config file if there is none, and print its path
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default();
    if let Some(socket) = cli.socket {
        config.server.socket = socket;
    }

    let app = App::new(&config)?;
    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config.server.socket.clone(), app.published());

    app.run(rx);
    Ok(())
}
