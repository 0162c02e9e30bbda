//! Game rules
//!
//! Everything here is engine-independent:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, physics integration or platform dependencies

pub mod pool;
pub mod state;
pub mod tick;

pub use pool::EntityPool;
pub use state::{Ball, Balloon, Command, EntityId, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, tick};
