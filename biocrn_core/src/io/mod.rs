//! Module for reading and writing reaction networks
pub mod json;
pub mod sbml;
