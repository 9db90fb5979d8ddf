//! JSON-lines command protocol.
//!
//! **Input:** one `PlayerCommand` per line, e.g. `{"type":"Advance","dt":1.0}`
//! **Output:** one `Reply` per line: the command's response plus every
//! event the session queued while handling it.
//!
//! ```text
//! <- {"response":{"type":"State","state":"Playing","result":null},"events":[]}
//! -> {"type":"Launch","missile_type":"ICBM","target":7}
//! <- {"response":{"type":"Launched","missile":0},"events":[{"type":"MissileLaunched",...}]}
//! -> {"type":"Quit"}
//! <- {"response":{"type":"State","state":"Menu","result":null},"events":[]}
//! ```
//!
//! A malformed line is answered with `Rejected` and the session carries on.
//! The loop ends at end of input or after `Quit`.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use wopr_core::commands::{CommandResponse, PlayerCommand};
use wopr_core::events::GameEvent;
use wopr_sim::GameSession;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub response: CommandResponse,
    pub events: Vec<GameEvent>,
}

/// Parse one input line and run it against the session.
pub fn handle_line(session: &mut GameSession, line: &str) -> Reply {
    dispatch(session, serde_json::from_str(line))
}

fn dispatch(session: &mut GameSession, parsed: serde_json::Result<PlayerCommand>) -> Reply {
    let response = match parsed {
        Ok(command) => {
            tracing::debug!(?command, "command");
            session.handle_command(command)
        }
        Err(err) => {
            tracing::warn!(%err, "malformed command");
            CommandResponse::Rejected {
                reason: format!("Malformed command: {err}"),
            }
        }
    };
    Reply {
        response,
        events: session.drain_events(),
    }
}

/// Serve commands from `input` until it is exhausted or the player quits.
pub fn serve<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    mut output: W,
) -> Result<(), AppError> {
    let greeting = Reply {
        response: CommandResponse::State {
            state: session.state(),
            result: session.result(),
        },
        events: session.drain_events(),
    };
    write_reply(&mut output, &greeting)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<PlayerCommand>(line);
        let quitting = matches!(parsed, Ok(PlayerCommand::Quit));
        let reply = dispatch(session, parsed);
        write_reply(&mut output, &reply)?;
        if quitting {
            break;
        }
    }
    Ok(())
}

fn write_reply<W: Write>(output: &mut W, reply: &Reply) -> Result<(), AppError> {
    serde_json::to_writer(&mut *output, reply)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
