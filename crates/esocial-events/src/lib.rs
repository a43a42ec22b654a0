//! Event model, per-type normalization, and envelope building.
//!
//! The dispatch table in [`normalize`] is the heart of the gateway: one
//! procedure per event-type tag, each composing the tax-ID, period, and
//! pruning primitives into the formatting rules the government schema
//! expects.

pub mod envelope;
pub mod event;
pub mod normalize;
pub mod prune;

mod payload;
