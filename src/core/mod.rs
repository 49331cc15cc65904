pub mod listing;
pub mod outdir;
pub mod sampler;
pub mod verifier;
pub mod walker;
