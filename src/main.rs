use std::io::Write;

use clap::{Args, Parser};
use log::info;
use reversi_client::{
    init_logging, ui, ClientConfig, Nickname, NicknameError, SessionClient, SnapshotReceiver,
    TcpTransport, DEFAULT_SERVER,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Join a game in a native window.
    Play {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Join a game from the terminal, typing moves such as `d3`.
    Console {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Args)]
struct SessionArgs {
    #[arg(long, default_value = DEFAULT_SERVER)]
    server: String,
    /// Nickname, 1-10 letters or digits.
    #[arg(long, conflicts_with = "url")]
    nick: Option<String>,
    /// Entry URL carrying the nickname as `?nick=NAME`.
    #[arg(long)]
    url: Option<String>,
}

impl SessionArgs {
    fn nickname(&self) -> Result<Nickname, NicknameError> {
        match (&self.nick, &self.url) {
            (Some(nick), _) => Nickname::parse(nick),
            (None, Some(url)) => Nickname::from_url(url),
            (None, None) => Err(NicknameError::Missing),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = ClientConfig::default();

    match cli.command {
        Commands::Play { session } => {
            let nickname = session.nickname()?;
            play(&session.server, nickname, &config).await
        }
        Commands::Console { session } => {
            let nickname = session.nickname()?;
            let (client, snapshots) = connect(&session.server, nickname, &config).await?;
            let outcome = console(&client, snapshots).await;
            client.shutdown();
            outcome
        }
    }
}

async fn connect(
    server: &str,
    nickname: Nickname,
    config: &ClientConfig,
) -> anyhow::Result<(SessionClient, SnapshotReceiver)> {
    info!("connecting to {} as {}", server, nickname);
    let transport = TcpTransport::connect(server, config).await?;
    Ok(SessionClient::start(transport, nickname, config))
}

#[cfg(feature = "window")]
async fn play(server: &str, nickname: Nickname, config: &ClientConfig) -> anyhow::Result<()> {
    let (client, snapshots) = connect(server, nickname, config).await?;
    let outcome = reversi_client::window::play(&client, &snapshots, config).await;
    client.shutdown();
    outcome
}

#[cfg(not(feature = "window"))]
async fn play(_server: &str, _nickname: Nickname, _config: &ClientConfig) -> anyhow::Result<()> {
    anyhow::bail!("built without window support; rebuild with `--features window` or use `console`")
}

async fn console(client: &SessionClient, mut snapshots: SnapshotReceiver) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    show(&snapshots.borrow_and_update())?;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                show(&snapshot)?;
                if snapshot.state.is_terminal() {
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let snapshot = snapshots.borrow().clone();
                match snapshot.scene() {
                    Some(scene) if scene.accepts_input() => {
                        match ui::parse_move(&line, scene.board) {
                            Some(point) if scene.board.can_put(point, scene.turn) => {
                                client.submit_move(point);
                            }
                            _ => println!("Not a legal move: {}", line.trim()),
                        }
                    }
                    _ => println!("Not your turn."),
                }
            }
        }
    }
    Ok(())
}

fn show(snapshot: &reversi_client::Snapshot) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    write!(out, "\n{}", ui::snapshot_text(snapshot))?;
    out.flush()?;
    Ok(())
}
