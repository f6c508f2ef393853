//! This module provides a struct for representing reactions
use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use indexmap::IndexMap;
use thiserror::Error;

use crate::crn::species::Species;

/// Represents a (possibly reversible) mass action reaction
///
/// Reactions are always stored in normalized form: each side holds the unique species in order
/// of first occurrence, alongside the stoichiometric coefficient of each of those species. Raw
/// species lists with duplicates are collapsed when the reaction is constructed (see
/// [`Reaction::new`] and [`ReactionBuilder`]).
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(skip), setter(into))]
pub struct Reaction {
    /// Unique input species, in order of first occurrence
    #[builder(default)]
    inputs: Vec<Species>,
    /// Unique output species, in order of first occurrence
    #[builder(default)]
    outputs: Vec<Species>,
    /// Stoichiometric coefficient of each input species
    ///
    /// When building, these are the optional explicit coefficients, one per unique input species
    #[builder(default)]
    input_coefs: Vec<u32>,
    /// Stoichiometric coefficient of each output species
    ///
    /// When building, these are the optional explicit coefficients, one per unique output species
    #[builder(default)]
    output_coefs: Vec<u32>,
    /// Forward rate constant
    k: f64,
    /// Reverse rate constant, only present for reversible reactions
    #[builder(default, setter(strip_option))]
    k_rev: Option<f64>,
}

impl ReactionBuilder {
    /// Build the reaction, normalizing the stoichiometry of both sides
    ///
    /// # Examples
    /// ```rust
    /// use biocrn_core::crn::reaction::ReactionBuilder;
    /// use biocrn_core::crn::species::Species;
    /// let r = Species::new("R", "protein");
    /// let d = Species::new("R", "dimer");
    /// let dimerization = ReactionBuilder::default()
    ///     .inputs(vec![r.clone()])
    ///     .input_coefs(vec![2])
    ///     .outputs(vec![d])
    ///     .k(100.)
    ///     .k_rev(10.)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(dimerization.input_coefficient(&r), 2);
    /// ```
    pub fn build(&self) -> Result<Reaction, ReactionError> {
        let k = self.k.ok_or(ReactionError::MissingRateConstant)?;
        Reaction::from_parts(
            self.inputs.clone().unwrap_or_default(),
            self.outputs.clone().unwrap_or_default(),
            k,
            self.k_rev.flatten(),
            self.input_coefs.clone(),
            self.output_coefs.clone(),
        )
    }
}

impl Reaction {
    /// Create a new irreversible reaction, counting duplicated species as stoichiometry
    ///
    /// # Examples
    /// ```rust
    /// use biocrn_core::crn::reaction::Reaction;
    /// use biocrn_core::crn::species::Species;
    /// let g = Species::new("G", "dna");
    /// let r = Species::new("R", "protein");
    /// let expression = Reaction::new(vec![g.clone()], vec![g.clone(), r.clone()], 1.0).unwrap();
    /// assert_eq!(expression.output_coefficient(&r), 1);
    /// assert!(!expression.is_reversible());
    /// ```
    pub fn new(
        inputs: Vec<Species>,
        outputs: Vec<Species>,
        k: f64,
    ) -> Result<Reaction, ReactionError> {
        Reaction::from_parts(inputs, outputs, k, None, None, None)
    }

    /// Create a new reversible reaction, counting duplicated species as stoichiometry
    pub fn new_reversible(
        inputs: Vec<Species>,
        outputs: Vec<Species>,
        k: f64,
        k_rev: f64,
    ) -> Result<Reaction, ReactionError> {
        Reaction::from_parts(inputs, outputs, k, Some(k_rev), None, None)
    }

    /// Create a reaction from raw species lists and optional explicit coefficients
    pub fn from_parts(
        inputs: Vec<Species>,
        outputs: Vec<Species>,
        k: f64,
        k_rev: Option<f64>,
        input_coefs: Option<Vec<u32>>,
        output_coefs: Option<Vec<u32>>,
    ) -> Result<Reaction, ReactionError> {
        if !valid_rate(k) {
            return Err(ReactionError::InvalidRateConstant(k));
        }
        if let Some(k_rev) = k_rev {
            if !valid_rate(k_rev) {
                return Err(ReactionError::InvalidReverseRateConstant(k_rev));
            }
        }
        let (inputs, input_coefs) = normalize_side(inputs, input_coefs, Side::Input)?;
        let (outputs, output_coefs) = normalize_side(outputs, output_coefs, Side::Output)?;
        Ok(Reaction {
            inputs,
            outputs,
            input_coefs,
            output_coefs,
            k,
            k_rev,
        })
    }

    pub fn inputs(&self) -> &[Species] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Species] {
        &self.outputs
    }

    pub fn input_coefs(&self) -> &[u32] {
        &self.input_coefs
    }

    pub fn output_coefs(&self) -> &[u32] {
        &self.output_coefs
    }

    /// Forward rate constant
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Reverse rate constant (None for irreversible reactions)
    pub fn k_rev(&self) -> Option<f64> {
        self.k_rev
    }

    pub fn is_reversible(&self) -> bool {
        self.k_rev.is_some()
    }

    /// Stoichiometric coefficient of `species` on the input side (0 if it is not an input)
    pub fn input_coefficient(&self, species: &Species) -> u32 {
        coefficient_of(&self.inputs, &self.input_coefs, species)
    }

    /// Stoichiometric coefficient of `species` on the output side (0 if it is not an output)
    pub fn output_coefficient(&self, species: &Species) -> u32 {
        coefficient_of(&self.outputs, &self.output_coefs, species)
    }

    /// Iterate over (species, coefficient) pairs of the input side
    pub fn input_stoichiometry(&self) -> impl Iterator<Item = (&Species, u32)> {
        self.inputs.iter().zip(self.input_coefs.iter().copied())
    }

    /// Iterate over (species, coefficient) pairs of the output side
    pub fn output_stoichiometry(&self) -> impl Iterator<Item = (&Species, u32)> {
        self.outputs.iter().zip(self.output_coefs.iter().copied())
    }

    /// Iterate over every species referenced by the reaction, inputs first
    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}

/// Rate constants must be finite and non-negative
fn valid_rate(k: f64) -> bool {
    k.is_finite() && k >= 0f64
}

fn coefficient_of(species_list: &[Species], coefs: &[u32], species: &Species) -> u32 {
    species_list
        .iter()
        .position(|s| s == species)
        .map(|idx| coefs[idx])
        .unwrap_or(0)
}

/// Side of a reaction, used for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Input => write!(f, "input"),
            Side::Output => write!(f, "output"),
        }
    }
}

/// Collapse a raw species list into unique species and their coefficients
///
/// Without explicit coefficients, the coefficient of a species is its number of occurrences.
/// With explicit coefficients there must be exactly one per unique species, and a species
/// listed more than once must have a coefficient equal to its occurrence count.
fn normalize_side(
    raw: Vec<Species>,
    explicit: Option<Vec<u32>>,
    side: Side,
) -> Result<(Vec<Species>, Vec<u32>), ReactionError> {
    let mut counts: IndexMap<Species, u32> = IndexMap::new();
    for species in raw {
        *counts.entry(species).or_insert(0) += 1;
    }

    match explicit {
        None => Ok(counts.into_iter().unzip()),
        Some(coefs) => {
            if coefs.len() != counts.len() {
                return Err(ReactionError::CoefficientLengthMismatch {
                    side,
                    coefficients: coefs.len(),
                    unique_species: counts.len(),
                });
            }
            let mut species_list = Vec::with_capacity(counts.len());
            for ((species, count), coef) in counts.into_iter().zip(coefs.iter().copied()) {
                if coef == 0 {
                    return Err(ReactionError::ZeroCoefficient {
                        side,
                        species: species.to_string(),
                    });
                }
                if count > 1 && count != coef {
                    return Err(ReactionError::CoefficientConflict {
                        side,
                        species: species.to_string(),
                        occurrences: count,
                        coefficient: coef,
                    });
                }
                species_list.push(species);
            }
            Ok((species_list, coefs))
        }
    }
}

// region Display
fn write_side(f: &mut Formatter<'_>, species: &[Species], coefs: &[u32]) -> std::fmt::Result {
    if species.is_empty() {
        return write!(f, "NULL");
    }
    for (idx, (s, coef)) in species.iter().zip(coefs).enumerate() {
        if idx > 0 {
            write!(f, " + ")?;
        }
        if *coef > 1 {
            write!(f, "{} {}", coef, s)?;
        } else {
            write!(f, "{}", s)?;
        }
    }
    Ok(())
}

impl Display for Reaction {
    /// Written as e.g. `2 protein_R <--> dimer_R  k_f=100 k_r=10`
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_side(f, &self.inputs, &self.input_coefs)?;
        match self.k_rev {
            Some(_) => write!(f, " <--> ")?,
            None => write!(f, " --> ")?,
        }
        write_side(f, &self.outputs, &self.output_coefs)?;
        write!(f, "  k_f={}", self.k)?;
        if let Some(k_rev) = self.k_rev {
            write!(f, " k_r={}", k_rev)?;
        }
        Ok(())
    }
}
// endregion Display

/// Errors raised while constructing a reaction
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ReactionError {
    #[error("Reaction is missing its forward rate constant k")]
    MissingRateConstant,
    #[error("Forward rate constant k must be a finite, non-negative number, got {0}")]
    InvalidRateConstant(f64),
    #[error("Reverse rate constant k_rev must be a finite, non-negative number, got {0}")]
    InvalidReverseRateConstant(f64),
    #[error("{coefficients} {side} coefficients were given for {unique_species} unique {side} species")]
    CoefficientLengthMismatch {
        side: Side,
        coefficients: usize,
        unique_species: usize,
    },
    #[error("{side} species {species} appears {occurrences} times but was given coefficient {coefficient}")]
    CoefficientConflict {
        side: Side,
        species: String,
        occurrences: u32,
        coefficient: u32,
    },
    #[error("{side} species {species} was given a coefficient of 0")]
    ZeroCoefficient { side: Side, species: String },
}
