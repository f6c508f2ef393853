//! Module providing the chemical reaction network representation: species, mass action
//! reactions, rate parameters, and the network that collects them
pub mod network;
pub mod parameters;
pub mod reaction;
pub mod species;
