//! SLG resolution over the shared subgoal table: producer/consumer sharing
//! of tabled answers, plus cycle detection and fixpoint evaluation for
//! mutually recursive predicates.

pub mod engine;
pub mod scc;

pub use engine::{EngineStats, Producer, SlgConfig, SlgEngine};
pub use scc::tarjan_scc;
