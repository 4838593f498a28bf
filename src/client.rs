//! Session Client: owns the connection and publishes snapshots.
//!
//! [`SessionClient::start`] spawns one driver task that multiplexes the
//! inbound transport, the heartbeat timer and queued moves with
//! `tokio::select!`. Every inbound event that changes the session publishes a
//! fresh `Arc<Snapshot>` into a `watch` channel; the renderer reads one
//! snapshot per frame from the matching [`SnapshotReceiver`].

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::board::Point;
use crate::config::ClientConfig;
use crate::nickname::Nickname;
use crate::protocol::ClientMessage;
use crate::session::{SessionMachine, Snapshot, Transition};
use crate::transport::Transport;

/// Read side of the single-slot latest-snapshot holder.
pub type SnapshotReceiver = watch::Receiver<Arc<Snapshot>>;

#[derive(Debug)]
enum Command {
    Put(Point),
}

/// Handle to a running session.
///
/// Dropping the handle stops the driver task and its heartbeat.
pub struct SessionClient {
    cmd_tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl SessionClient {
    /// Identify as `nickname` and start driving `transport`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use = "dropping the client closes the session"]
    pub fn start<T>(transport: T, nickname: Nickname, config: &ClientConfig) -> (Self, SnapshotReceiver)
    where
        T: Transport + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(Snapshot::default()));
        let task = tokio::spawn(drive(
            transport,
            nickname,
            config.heartbeat_interval,
            cmd_rx,
            snapshot_tx,
        ));
        (Self { cmd_tx, task }, snapshot_rx)
    }

    /// Queue a move for the server. Never waits for an answer.
    pub fn submit_move(&self, point: Point) {
        if self.cmd_tx.send(Command::Put(point)).is_err() {
            debug!("dropping move {:?}: session driver has stopped", point);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the driver task and release its heartbeat timer.
    pub fn shutdown(&self) {
        debug!("session client shutdown requested");
        self.task.abort();
    }
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("running", &self.is_running())
            .finish()
    }
}

impl Drop for SessionClient {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn drive<T: Transport>(
    mut transport: T,
    nickname: Nickname,
    heartbeat_every: Duration,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<Arc<Snapshot>>,
) {
    let mut machine = SessionMachine::new();
    info!("joining as {}", nickname);

    if let Err(e) = transport
        .send(ClientMessage::Client {
            nickname: nickname.into_string(),
        })
        .await
    {
        warn!("failed to identify: {e}");
        lose_connection(&mut machine, &snapshots);
        return;
    }

    let mut heartbeat = interval_at(Instant::now() + heartbeat_every, heartbeat_every);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            incoming = transport.recv() => {
                match incoming {
                    Ok(msg) => {
                        match machine.apply(msg) {
                            Transition::Changed => publish(&machine, &snapshots),
                            Transition::Unchanged => {}
                            Transition::Ignored(reason) => debug!("ignored server event: {reason}"),
                        }
                        if machine.state().is_terminal() {
                            info!("session removed by server");
                            return;
                        }
                    }
                    Err(e) => {
                        info!("connection lost: {e}");
                        break;
                    }
                }
            }

            _ = heartbeat.tick() => {
                if let Err(e) = transport.send(ClientMessage::Heartbeat).await {
                    warn!("heartbeat failed: {e}");
                    break;
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(Command::Put(point)) => {
                        debug!("sending move {:?}", point);
                        if let Err(e) = transport.send(ClientMessage::Put(point)).await {
                            warn!("failed to send move: {e}");
                            break;
                        }
                    }
                    None => {
                        debug!("command channel closed, stopping session driver");
                        return;
                    }
                }
            }
        }
    }

    lose_connection(&mut machine, &snapshots);
}

fn publish(machine: &SessionMachine, snapshots: &watch::Sender<Arc<Snapshot>>) {
    debug!("publishing snapshot in state {}", machine.state());
    snapshots.send_replace(Arc::new(machine.snapshot().clone()));
}

fn lose_connection(machine: &mut SessionMachine, snapshots: &watch::Sender<Arc<Snapshot>>) {
    if machine.connection_lost().is_changed() {
        publish(machine, snapshots);
    }
}
