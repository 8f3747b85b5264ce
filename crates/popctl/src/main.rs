use clap::{Parser, Subcommand};
use popctl::geom::{Offset, Point};
use popctl::protocol::{Request, SOCKET_PATH};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "popctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control socket of the running pinpop daemon
    #[arg(short = 's', long, default_value = SOCKET_PATH)]
    socket: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Hold the trigger; engages the menu once the long-press minimum is reached
    Press {
        /// Seconds the trigger was held (defaults to the configured minimum)
        #[arg(long)]
        held: Option<f64>,
    },
    /// Report the cumulative drag translation of the current gesture
    Drag {
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
        /// Touch-down location of the gesture, in trigger-local coordinates
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        start: Option<Vec<f64>>,
    },
    /// Lift the finger, firing the committed action if any
    Release,
    /// Print the last published menu snapshot
    State,
}

impl Commands {
    fn into_request(self) -> Request {
        match self {
            Commands::Press { held } => Request::Press { held },
            Commands::Drag { dx, dy, start } => Request::Drag {
                translation: Offset::new(dx, dy),
                start: start.and_then(|s| match s.as_slice() {
                    [x, y] => Some(Point::new(*x, *y)),
                    _ => None,
                }),
            },
            Commands::Release => Request::Release,
            Commands::State => Request::State,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let request = cli.command.into_request();

    let reply = send_request(&cli.socket, &request)?;
    println!("{}", reply);
    Ok(())
}

fn send_request(socket: &Path, request: &Request) -> anyhow::Result<String> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to pinpop daemon at {}: {}. Is pinpop running?",
            socket.display(),
            e
        )
    })?;

    log::debug!("Sending '{}'", request);
    writeln!(stream, "{}", request)?;

    let mut reply = String::new();
    BufReader::new(stream).read_line(&mut reply)?;
    if reply.is_empty() {
        anyhow::bail!("pinpop closed the connection without replying");
    }
    Ok(reply.trim_end().to_string())
}
