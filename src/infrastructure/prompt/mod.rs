//! Terminal prompts
//!
//! `Confirmer` implementation backed by dialoguer.

mod dialoguer_confirm;

pub use dialoguer_confirm::DialoguerConfirmer;
