//! Core rust implementation of biocrn, a crate for compiling biomolecular circuits into
//! chemical reaction networks.
//!
//! Networks are made of [`crn::species::Species`] and mass action [`crn::reaction::Reaction`]s,
//! which are generated by [`mechanism`]s and collected into a [`crn::network::ReactionNetwork`].

pub mod configuration;
pub mod crn;
pub mod io;
pub mod mechanism;
