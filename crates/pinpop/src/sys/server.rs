use crate::app::{SharedSnapshot, Snapshot};
use crate::events::{AppEvent, Gesture};
use crate::menu::Transition;
use async_channel::Sender;
use popctl::protocol::Request;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

fn error_line(message: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

/// Latest published state. What fired and how to animate belong to the
/// event that produced it, so polling never replays them.
fn current(published: &SharedSnapshot) -> Snapshot {
    Snapshot {
        transition: Transition::None,
        fired: None,
        ..published.read().clone()
    }
}

/// Reply to one protocol line, as a single JSON document.
pub async fn respond(line: &str, tx: &Sender<AppEvent>, published: &SharedSnapshot) -> String {
    let request = match line.parse::<Request>() {
        Ok(r) => r,
        Err(e) => return error_line(e),
    };

    let snapshot = match Gesture::from_request(&request) {
        Some(gesture) => {
            let (reply_tx, reply_rx) = async_channel::bounded(1);
            if tx
                .send(AppEvent::Gesture(gesture, Some(reply_tx)))
                .await
                .is_err()
            {
                return error_line("menu is shutting down");
            }
            match reply_rx.recv().await {
                Ok(s) => s,
                Err(_) => return error_line("menu dropped the request"),
            }
        }
        None => current(published),
    };

    serde_json::to_string(&snapshot).unwrap_or_else(error_line)
}

fn remove_stale_socket(path: &Path) {
    if std::fs::metadata(path).is_ok() {
        let _ = std::fs::remove_file(path);
    }
}

pub async fn run_server(socket: PathBuf, tx: Sender<AppEvent>, published: SharedSnapshot) {
    remove_stale_socket(&socket);

    let listener = match UnixListener::bind(&socket) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket.display());

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                let published = published.clone();
                tokio::spawn(async move {
                    let (reader, mut writer) = stream.into_split();
                    let mut lines = BufReader::new(reader).lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if line.trim().is_empty() {
                            continue;
                        }
                        let mut reply = respond(&line, &tx, &published).await;
                        reply.push('\n');
                        if let Err(e) = writer.write_all(reply.as_bytes()).await {
                            log::warn!("Client went away: {}", e);
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
