//! Background sync worker — all remote order I/O runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels, so the UI
//! never blocks waiting on persistence. Pushes are best-effort: failures
//! come back as quiet error records, never as user-facing errors, and there
//! is no in-flight cancellation.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use orderdeck_core::{OrderEntry, RemoteOrderClient};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    PushOrder {
        key: String,
        entries: Vec<OrderEntry>,
    },
    FetchOrder {
        key: String,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    OrderFetched {
        key: String,
        entries: Vec<OrderEntry>,
    },
    PushDone {
        key: String,
    },
    Error {
        context: String,
        message: String,
    },
}

/// Spawn the background sync thread. With no endpoint configured the worker
/// still runs and drains commands so senders never error.
pub fn spawn_worker(
    endpoint: Option<String>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("orderdeck-sync".into())
        .spawn(move || {
            worker_loop(endpoint, rx, tx);
        })
        .expect("failed to spawn sync worker thread")
}

fn worker_loop(endpoint: Option<String>, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    let client = endpoint.map(RemoteOrderClient::new);

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::PushOrder { key, entries }) => {
                let Some(client) = &client else { continue };
                match client.push(&key, &entries) {
                    Ok(()) => {
                        let _ = tx.send(WorkerResponse::PushDone { key });
                    }
                    Err(e) => {
                        let _ = tx.send(WorkerResponse::Error {
                            context: format!("push {key}"),
                            message: e.to_string(),
                        });
                    }
                }
            }
            Ok(WorkerCommand::FetchOrder { key }) => {
                let Some(client) = &client else { continue };
                match client.fetch(&key) {
                    // A non-success response means "no stored order" — nothing
                    // to report.
                    Ok(None) => {}
                    Ok(Some(entries)) => {
                        let _ = tx.send(WorkerResponse::OrderFetched { key, entries });
                    }
                    Err(e) => {
                        let _ = tx.send(WorkerResponse::Error {
                            context: format!("fetch {key}"),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(None, cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn commands_without_endpoint_are_drained_silently() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let handle = spawn_worker(None, cmd_rx, resp_tx);
        cmd_tx
            .send(WorkerCommand::PushOrder {
                key: "watchlist".into(),
                entries: vec![],
            })
            .unwrap();
        cmd_tx
            .send(WorkerCommand::FetchOrder {
                key: "watchlist".into(),
            })
            .unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();

        assert!(resp_rx.try_recv().is_err());
    }

    #[test]
    fn channel_close_stops_the_worker() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(None, cmd_rx, resp_tx);
        drop(cmd_tx);
        handle.join().unwrap();
    }
}
