//! Rules-engine capability and the typed adapter the synchronizer talks to.
//!
//! The synchronizer never looks inside an engine: it only uses the operations of
//! [`RulesEngine`], through an [`EngineAdapter`]. [`CozyEngine`] is the engine
//! shipped with the application; `ScriptedEngine` (feature `mock`) is a test
//! double that plays back a fixed sequence of positions.

mod adapter;
mod capability;
mod cozy;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use adapter::EngineAdapter;
pub use capability::RulesEngine;
pub use cozy::CozyEngine;
pub use error::EngineError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{CallLog, EngineCall, ScriptedEngine, ScriptedPosition};
