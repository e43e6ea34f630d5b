//! `wl-search` — the wind-optimised loop search.
//!
//! # Pipeline position
//!
//! This crate consumes the condensed [`JunctionGraph`] built by
//! `wl-spatial` and produces a scored winning cycle:
//!
//! ```text
//! ① effort     — annotate every corridor with a directional wind effort
//! ② enumerate  — depth-bounded DFS collects candidate cycles near the
//!                target distance
//! ③ score      — pick the candidate with the lowest effort-weighted score
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`effort`]    | `EffortTable`, the directional wind-effort formula     |
//! | [`enumerate`] | `enumerate_loops`, `Candidate`, `SearchStats`          |
//! | [`score`]     | `select_best`, `Selection`, `total_effort`             |
//! | [`cancel`]    | `CancelToken` for caller-driven cancellation           |
//!
//! The search is strictly synchronous: one request runs on one thread, and
//! the only suspension point is the periodic wall-clock/cancellation check
//! inside the enumerator.
//!
//! [`JunctionGraph`]: wl_spatial::JunctionGraph

pub mod cancel;
pub mod effort;
pub mod enumerate;
pub mod score;


pub use cancel::CancelToken;
pub use effort::{edge_effort, EffortTable};
pub use enumerate::{enumerate_loops, Candidate, Enumeration, SearchStats, StopReason};
pub use score::{select_best, total_effort, Selection};
