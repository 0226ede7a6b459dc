//! Caltrain departure board.
//!
//! Reconciles the 511 scheduled-stop and live-vehicle feeds into
//! per-station northbound/southbound departure boards, each train annotated
//! with how late it is running relative to schedule.

pub mod board;
pub mod cache;
pub mod domain;
pub mod siri;
