//! Line-oriented front end: each input line is one UI event against the shared board.

use board_sync::{BoardHandle, BoardSnapshot, DropFeedback, SyncError};
use chess::{render_board, DisplayOptions, Pos, PosParseError};
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
Commands:
  show                 print the board
  fen <text>           set the position from FEN text
  drag <sq>            can the piece on <sq> be picked up?
  drop <from> <to>     can the dragged piece be dropped on <to>?
  move <from> <to>     play a move (shorthand: e2e4)
  status               print the game status
  json                 print the snapshot as JSON
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    SetFen(String),
    Drag(Pos),
    Drop { from: Pos, to: Pos },
    Move { from: Pos, to: Pos },
    Status,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command \"{0}\", try \"help\"")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Square(#[from] PosParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error(transparent)]
    Board(#[from] SyncError),
    #[error("Failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match head {
        "" => Err(ParseError::Empty),
        "show" => Ok(Command::Show),
        "fen" => Ok(Command::SetFen(rest.to_string())),
        "drag" => match args.as_slice() {
            [sq] => Ok(Command::Drag(sq.parse()?)),
            _ => Err(ParseError::Usage("drag <sq>")),
        },
        "drop" => match args.as_slice() {
            [from, to] => Ok(Command::Drop {
                from: from.parse()?,
                to: to.parse()?,
            }),
            _ => Err(ParseError::Usage("drop <from> <to>")),
        },
        "move" => match args.as_slice() {
            [from, to] => Ok(Command::Move {
                from: from.parse()?,
                to: to.parse()?,
            }),
            _ => Err(ParseError::Usage("move <from> <to>")),
        },
        "status" => Ok(Command::Status),
        "json" => Ok(Command::Json),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => parse_shorthand_move(other).ok_or_else(|| ParseError::Unknown(other.to_string())),
    }
}

/// `e2e4` style moves.
fn parse_shorthand_move(word: &str) -> Option<Command> {
    if word.len() != 4 || !word.is_ascii() {
        return None;
    }
    let (from, to) = word.split_at(2);
    Some(Command::Move {
        from: from.parse().ok()?,
        to: to.parse().ok()?,
    })
}

/// Output settings for one interactive session.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    view: DisplayOptions,
    json: bool,
}

impl Session {
    pub fn new(view: DisplayOptions, json: bool) -> Self {
        Self { view, json }
    }

    pub async fn execute(&self, board: &BoardHandle, cmd: Command) -> Result<String, ReplError> {
        let out = match cmd {
            Command::Show => self.render(&*board.snapshot().await?)?,
            Command::SetFen(fen) => self.render(&*board.set_position(fen).await?)?,
            Command::Move { from, to } => self.render(&*board.apply_move(from, to).await?)?,
            Command::Drag(pos) => {
                let allowed = board.can_drag(pos).await?;
                format!("{pos}: {}", if allowed { "can drag" } else { "cannot drag" })
            }
            Command::Drop { from, to } => {
                let feedback = board.drop_feedback(from, to, true).await?;
                let verdict = match feedback {
                    Some(DropFeedback::Accept) => "legal",
                    _ => "illegal",
                };
                format!("{from} -> {to}: {verdict}")
            }
            Command::Status => board.snapshot().await?.status.clone(),
            Command::Json => serde_json::to_string_pretty(&*board.snapshot().await?)?,
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        };
        Ok(out)
    }

    pub fn render(&self, snapshot: &BoardSnapshot) -> Result<String, ReplError> {
        if self.json {
            return Ok(serde_json::to_string_pretty(snapshot)?);
        }

        let mut out = render_board(&snapshot.board, self.view);
        out.push_str(&format!("FEN: {}\n", snapshot.fen));
        out.push_str(&format!("Status: {}", snapshot.status));
        if let Some(error) = &snapshot.error {
            out.push_str(&format!("\nError: {error}"));
        }
        Ok(out)
    }
}

/// Read commands from stdin until `quit` or end of input.
/// Must run inside the board provider's scope.
pub async fn run(session: Session) -> anyhow::Result<()> {
    let board = BoardHandle::current()?;
    println!("{}", session.render(&*board.snapshot().await?)?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => cmd,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        tracing::debug!(?cmd, "command");
        match session.execute(&board, cmd).await {
            Ok(out) => println!("{out}"),
            Err(e) => {
                tracing::error!(error = %e, "command failed");
                eprintln!("error: {e}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_sync::BoardProvider;
    use engine::CozyEngine;

    fn pos(s: &str) -> Pos {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("show"), Ok(Command::Show));
        assert_eq!(parse_command("  quit "), Ok(Command::Quit));
        assert_eq!(parse_command("drag e2"), Ok(Command::Drag(pos("e2"))));
        assert_eq!(
            parse_command("drop e2 e4"),
            Ok(Command::Drop {
                from: pos("e2"),
                to: pos("e4")
            })
        );
        assert_eq!(
            parse_command("move g1 f3"),
            Ok(Command::Move {
                from: pos("g1"),
                to: pos("f3")
            })
        );
        assert_eq!(
            parse_command("e7e5"),
            Ok(Command::Move {
                from: pos("e7"),
                to: pos("e5")
            })
        );
    }

    #[test]
    fn test_parse_fen_keeps_whole_text() {
        assert_eq!(
            parse_command("fen 8/8/8/4k3/8/8/8/4K3 w - - 0 1"),
            Ok(Command::SetFen("8/8/8/4k3/8/8/8/4K3 w - - 0 1".to_string()))
        );
        assert_eq!(parse_command("fen"), Ok(Command::SetFen(String::new())));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_command("   "), Err(ParseError::Empty));
        assert_eq!(parse_command("drag"), Err(ParseError::Usage("drag <sq>")));
        assert_eq!(
            parse_command("move e2"),
            Err(ParseError::Usage("move <from> <to>"))
        );
        assert!(matches!(parse_command("drag z9"), Err(ParseError::Square(_))));
        assert_eq!(
            parse_command("castle"),
            Err(ParseError::Unknown("castle".to_string()))
        );
        assert_eq!(
            parse_command("e2x4"),
            Err(ParseError::Unknown("e2x4".to_string()))
        );
    }

    #[tokio::test]
    async fn test_execute_against_board() {
        let provider = BoardProvider::spawn(CozyEngine::new()).unwrap();
        let board = provider.handle();
        let session = Session::new(DisplayOptions::default(), false);

        let out = session
            .execute(&board, Command::Drag(pos("e2")))
            .await
            .unwrap();
        assert_eq!(out, "e2: can drag");

        let out = session
            .execute(
                &board,
                Command::Drop {
                    from: pos("e2"),
                    to: pos("e5"),
                },
            )
            .await
            .unwrap();
        assert_eq!(out, "e2 -> e5: illegal");

        let out = session
            .execute(
                &board,
                Command::Move {
                    from: pos("e2"),
                    to: pos("e4"),
                },
            )
            .await
            .unwrap();
        assert!(out.contains("4 . . . . P . . ."));
        assert!(out.contains("FEN: rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));

        let out = session
            .execute(&board, Command::SetFen("nonsense".to_string()))
            .await
            .unwrap();
        assert!(out.contains("FEN: nonsense"));
        assert!(out.contains("Error: "));
        assert!(out.contains("4 . . . . P . . ."));

        provider.shutdown().await;
    }

    #[tokio::test]
    async fn test_json_output() {
        let provider = BoardProvider::spawn(CozyEngine::new()).unwrap();
        let board = provider.handle();
        let session = Session::new(DisplayOptions::default(), true);

        let out = session.execute(&board, Command::Show).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "In Progress");
        assert_eq!(value["error"], serde_json::Value::Null);
        assert_eq!(value["board"].as_array().unwrap().len(), 64);
        assert_eq!(value["board"][0]["pos"], "a8");
        assert_eq!(value["board"][0]["isLightSquare"], true);

        provider.shutdown().await;
    }
}
