//! Line-oriented command input
//!
//! Reads `start`, `stop` and `quit` lines from an async reader (stdin in
//! interactive mode) and forwards them to the session over a channel.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::control::ControlCommand;

/// Forwards parsed commands from `reader` until EOF, `quit`, or the
/// receiving session goes away.
///
/// Blank lines are skipped; unknown words are logged and skipped.
///
/// # Errors
///
/// Returns an I/O error if reading fails.
pub async fn forward_commands<R>(
    reader: R,
    tx: mpsc::Sender<ControlCommand>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ControlCommand>() {
            Ok(c) => c,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        if tx.send(command).await.is_err() {
            debug!("session closed; input reader exiting");
            return Ok(());
        }
        if command == ControlCommand::Quit {
            break;
        }
    }
    debug!("command input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    async fn collect(input: &[u8]) -> Vec<ControlCommand> {
        let reader = BufReader::new(tokio_test::io::Builder::new().read(input).build());
        let (tx, mut rx) = mpsc::channel(16);
        forward_commands(reader, tx).await.unwrap();
        let mut out = Vec::new();
        while let Some(c) = rx.recv().await {
            out.push(c);
        }
        out
    }

    #[tokio::test]
    async fn test_forwards_commands_in_order() {
        let got = collect(b"start\nstop\nstart\n").await;
        assert_eq!(
            got,
            [
                ControlCommand::Start,
                ControlCommand::Stop,
                ControlCommand::Start
            ]
        );
    }

    #[tokio::test]
    async fn test_skips_blank_and_unknown_lines() {
        let got = collect(b"\n  \npause\nstart\n").await;
        assert_eq!(got, [ControlCommand::Start]);
    }

    #[tokio::test]
    async fn test_stops_after_quit() {
        let got = collect(b"start\nquit\nstop\n").await;
        assert_eq!(got, [ControlCommand::Start, ControlCommand::Quit]);
    }

    #[tokio::test]
    async fn test_exits_when_receiver_dropped() {
        let mock = tokio_test::io::Builder::new().read(b"start\nstop\n").build();
        let reader = BufReader::new(mock);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        forward_commands(reader, tx).await.unwrap();
    }
}
