//! Module providing mechanisms, reusable generators of species and reactions for
//! biochemical processes such as transcription, translation, and cooperative binding.
//!
//! Mechanisms are keyed by their type tag (e.g. `"transcription"`) and can be replaced at
//! several levels, see [`scopes::MechanismScopes`].

pub mod binding;
pub mod michaelis_menten;
pub mod scopes;
pub mod txtl;

use std::fmt::{Debug, Display, Formatter};

use log::warn;
use thiserror::Error;

use crate::crn::parameters::ParameterTable;
use crate::crn::reaction::{Reaction, ReactionError};
use crate::crn::species::Species;

/// A generator of species and reactions for a biochemical process
pub trait Mechanism: Debug + Send + Sync {
    /// Human readable name of the mechanism
    fn name(&self) -> &str;

    /// Type tag used to resolve overrides (e.g. `"transcription"`)
    fn mechanism_type(&self) -> &str;

    /// Species introduced by the mechanism for `target`
    fn update_species(
        &self,
        target: &MechanismTarget,
        options: &SpeciesOptions,
    ) -> Result<Vec<Species>, MechanismError>;

    /// Reactions contributed by the mechanism for `target`, with rates looked up in
    /// `parameters`
    fn update_reactions(
        &self,
        target: &MechanismTarget,
        parameters: &ParameterTable,
    ) -> Result<Vec<Reaction>, MechanismError>;
}

/// What a mechanism acts on
#[derive(Clone, Debug, PartialEq)]
pub enum MechanismTarget {
    /// A single substrate, such as a gene for transcription or a transcript for translation
    Substrate(Species),
    /// `cooperativity` copies of `binder` binding to `bindee`
    Binding {
        binder: Species,
        bindee: Species,
        cooperativity: u32,
    },
}

impl MechanismTarget {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            MechanismTarget::Substrate(_) => "substrate",
            MechanismTarget::Binding { .. } => "binding",
        }
    }
}

/// Which optional species a mechanism should report from `update_species`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpeciesOptions {
    /// Also return the enzyme (polymerase, ribosome, nuclease)
    pub include_enzyme: bool,
    /// Also return the product (transcript, protein)
    pub include_product: bool,
}

/// Enzyme argument of a mechanism, either an existing species or the name of a default one
#[derive(Clone, Debug, PartialEq)]
pub enum Enzyme {
    /// Use this species as the enzyme
    Existing(Species),
    /// Create a species with this name, using the default type for the mechanism
    Named(String),
}

impl Enzyme {
    /// Resolve into a concrete species, using `default_type` for named enzymes
    pub fn resolve(self, default_type: &str) -> Result<Species, MechanismError> {
        match self {
            Enzyme::Existing(species) => Ok(species),
            Enzyme::Named(name) if name.trim().is_empty() => Err(MechanismError::EmptyEnzymeName),
            Enzyme::Named(name) => Ok(Species::new(name, default_type)),
        }
    }
}

impl From<Species> for Enzyme {
    fn from(value: Species) -> Self {
        Enzyme::Existing(value)
    }
}

impl From<&Species> for Enzyme {
    fn from(value: &Species) -> Self {
        Enzyme::Existing(value.clone())
    }
}

impl From<&str> for Enzyme {
    fn from(value: &str) -> Self {
        Enzyme::Named(value.to_string())
    }
}

impl From<String> for Enzyme {
    fn from(value: String) -> Self {
        Enzyme::Named(value)
    }
}

/// Name and type shared by every mechanism
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MechanismInfo {
    pub(crate) name: String,
    pub(crate) mechanism_type: String,
}

impl MechanismInfo {
    /// Warns if the type is empty, as such a mechanism can't take part in overrides
    pub(crate) fn new<N: Into<String>, T: Into<String>>(name: N, mechanism_type: T) -> Self {
        let info = MechanismInfo {
            name: name.into(),
            mechanism_type: mechanism_type.into(),
        };
        if info.mechanism_type.is_empty() {
            warn!(
                "Mechanism {} instantiated without a type. \
                 This could prevent the mechanism from being overridden properly.",
                info.name
            );
        }
        info
    }
}

impl Display for MechanismInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Look up a rate constant, falling back to the configured default
pub(crate) fn rate(parameters: &ParameterTable, symbol: &str) -> Result<f64, MechanismError> {
    parameters
        .get_or_default(symbol)
        .ok_or_else(|| MechanismError::MissingParameter(symbol.to_string()))
}

/// Errors raised while constructing or running a mechanism
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MechanismError {
    #[error("Enzyme name must not be empty")]
    EmptyEnzymeName,
    #[error("{parameter} must contain exactly {expected} values for {mechanism}, got {found}")]
    RateListLength {
        mechanism: String,
        parameter: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Cooperativity must be at least 1")]
    InvalidCooperativity,
    #[error("Mechanism {mechanism} can not act on a {target} target")]
    UnsupportedTarget {
        mechanism: String,
        target: &'static str,
    },
    #[error("No mechanism of type {0} is defined in any scope")]
    MechanismNotFound(String),
    #[error("No value or default for rate parameter {0}")]
    MissingParameter(String),
    #[error("Mechanism generated an invalid reaction: {0}")]
    InvalidReaction(#[from] ReactionError),
}
