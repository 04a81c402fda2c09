//! Scripted engine double for testing - only compiled in test mode or with mock feature

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chess::{Pos, STANDARD_FEN};

use crate::capability::RulesEngine;

const STANDARD_LINEAR: &str = concat!(
    "rnbqkbnr", "pppppppp", "        ", "        ", "        ", "        ", "PPPPPPPP", "RNBQKBNR"
);

/// One position the double can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedPosition {
    pub fen: String,
    pub linear: String,
    pub status: String,
}

impl ScriptedPosition {
    pub fn new(fen: &str, linear: &str, status: &str) -> Self {
        Self {
            fen: fen.to_string(),
            linear: linear.to_string(),
            status: status.to_string(),
        }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_FEN, STANDARD_LINEAR, "In Progress")
    }
}

/// Calls that reach the double, in order. Read-only board/FEN/status reads are not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SetPosition(String),
    CanDrag(Pos),
    CanDrop(Pos, Pos),
    Move(Pos, Pos),
}

/// Shared view of a [`ScriptedEngine`]'s calls, usable after the engine has been moved away.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<EngineCall>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear()
    }

    fn push(&self, call: EngineCall) {
        self.0.lock().unwrap().push(call);
    }
}

/// Engine double that walks through a fixed sequence of positions.
///
/// Every `make_move` advances to the next scripted position; once the script
/// is exhausted moves are ignored, like an engine refusing an illegal move.
/// `set_position` accepts only FENs registered with [`ScriptedEngine::accepting`].
pub struct ScriptedEngine {
    current: ScriptedPosition,
    accepted: Vec<ScriptedPosition>,
    script: VecDeque<ScriptedPosition>,
    can_drag: Box<dyn Fn(Pos) -> bool + Send>,
    can_drop: Box<dyn Fn(Pos, Pos) -> bool + Send>,
    log: CallLog,
}

impl ScriptedEngine {
    pub fn new(start: ScriptedPosition) -> Self {
        Self {
            accepted: vec![start.clone()],
            current: start,
            script: VecDeque::new(),
            can_drag: Box::new(|_| false),
            can_drop: Box::new(|_, _| false),
            log: CallLog::default(),
        }
    }

    /// Pre-configured with the standard starting position.
    pub fn standard() -> Self {
        Self::new(ScriptedPosition::standard())
    }

    /// Queue the position reached by the next move.
    pub fn then(mut self, next: ScriptedPosition) -> Self {
        self.script.push_back(next);
        self
    }

    /// Let `set_position` accept this position's FEN.
    pub fn accepting(mut self, position: ScriptedPosition) -> Self {
        self.accepted.push(position);
        self
    }

    pub fn with_can_drag<F>(mut self, f: F) -> Self
    where
        F: Fn(Pos) -> bool + Send + 'static,
    {
        self.can_drag = Box::new(f);
        self
    }

    pub fn with_can_drop<F>(mut self, f: F) -> Self
    where
        F: Fn(Pos, Pos) -> bool + Send + 'static,
    {
        self.can_drop = Box::new(f);
        self
    }

    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }
}

impl RulesEngine for ScriptedEngine {
    fn linear_board(&self) -> String {
        self.current.linear.clone()
    }

    fn fen(&self) -> String {
        self.current.fen.clone()
    }

    fn set_position(&mut self, fen: &str) -> Option<String> {
        self.log.push(EngineCall::SetPosition(fen.to_string()));
        match self.accepted.iter().find(|p| p.fen == fen) {
            Some(position) => {
                self.current = position.clone();
                None
            }
            None => Some(format!("Unknown position \"{fen}\"")),
        }
    }

    fn can_drag(&self, pos: Pos) -> bool {
        self.log.push(EngineCall::CanDrag(pos));
        (self.can_drag)(pos)
    }

    fn can_drop(&self, from: Pos, to: Pos) -> bool {
        self.log.push(EngineCall::CanDrop(from, to));
        (self.can_drop)(from, to)
    }

    fn make_move(&mut self, from: Pos, to: Pos) {
        self.log.push(EngineCall::Move(from, to));
        if let Some(next) = self.script.pop_front() {
            self.current = next;
        }
    }

    fn game_status(&self) -> String {
        self.current.status.clone()
    }
}
