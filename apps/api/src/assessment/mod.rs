// Input-quality heuristics: CV scoring, job relevance, link scoring, upload
// tiers and the operating-mode decision that drives prompt composition.
// Everything except the handlers is pure and synchronous; no I/O.

pub mod analysis;
pub mod handlers;
pub mod link;
pub mod mode;
pub mod policy;
pub mod quality;
pub mod relevance;
pub mod upload;
