//! models: OI-SVMVAR model evaluator built on the core engines.
//!
//! [`SVMVARModel`] scores one complete draw ([`SVMVARParams`] plus
//! [`LatentState`]) against an observation matrix. It owns no sampler
//! state; callers construct it once per shape and call it for every draw.

pub mod svmvar;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::svmvar::{LatentState, SVMVARModel, SVMVARParams};
