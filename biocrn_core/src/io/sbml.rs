//! Module providing SBML (Level 3 Version 2) export of reaction networks
//!
//! Every species gets a unique SBML id derived from its textual form, every parameter table
//! entry becomes a global parameter, and every reaction is written as an irreversible mass
//! action reaction. Reversible reactions get a paired reverse reaction with the sides swapped.
//! Each written reaction has its own rate constant parameter, so no rate symbol can shadow a
//! species or another reaction's rate.
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use sbml::model::Model;
use sbml::SBMLDocument;
use thiserror::Error;

use crate::configuration::Configuration;
use crate::crn::network::ReactionNetwork;
use crate::crn::parameters::ParameterTable;
use crate::crn::species::Species;

const MODEL_ID: &str = "biocrn_model";

/// Form of the mass action rate law written for each reaction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RateLaw {
    /// Deterministic mass action, `k * S^n`
    #[default]
    Deterministic,
    /// Stochastic mass action propensity, `k * S * (S - 1) * ... * (S - n + 1)`
    Stochastic,
}

impl ReactionNetwork {
    /// Build an SBML document for the network
    pub fn to_sbml(
        &self,
        parameters: &ParameterTable,
        rate_law: RateLaw,
    ) -> Result<SBMLDocument, SbmlError> {
        let sbml_model = SbmlModel::from_network(self, parameters)?;
        Ok(sbml_model.to_document(rate_law))
    }

    /// Render the network as an SBML string
    pub fn to_sbml_string(
        &self,
        parameters: &ParameterTable,
        rate_law: RateLaw,
    ) -> Result<String, SbmlError> {
        Ok(self.to_sbml(parameters, rate_law)?.to_xml_string())
    }

    /// Write the network to an SBML file
    pub fn write_sbml<P: AsRef<Path>>(
        &self,
        path: P,
        parameters: &ParameterTable,
        rate_law: RateLaw,
    ) -> Result<(), SbmlError> {
        let document = self.to_sbml_string(parameters, rate_law)?;
        fs::write(path.as_ref(), document)?;
        debug!(
            "Wrote SBML with {} species and {} reactions to {}",
            self.species().len(),
            self.reactions().len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

// region Model
/// The network with every element assigned its SBML id
struct SbmlModel {
    compartment_id: String,
    compartment_volume: f64,
    initial_concentration: f64,
    /// (id, name) of each species
    species: Vec<(String, String)>,
    /// (id, value) of each global parameter from the parameter table
    parameters: Vec<(String, f64)>,
    reactions: Vec<ElementaryReaction>,
}

/// A single direction mass action reaction, as written to SBML
struct ElementaryReaction {
    id: String,
    /// Id of the global parameter holding `k`
    rate_id: String,
    reactants: Vec<(String, u32)>,
    products: Vec<(String, u32)>,
    k: f64,
}

impl SbmlModel {
    fn from_network(
        network: &ReactionNetwork,
        parameters: &ParameterTable,
    ) -> Result<SbmlModel, SbmlError> {
        let config = Configuration::current();
        let mut ids = SbmlIds::default();

        let compartment_id = ids.unique_id(&config.compartment_id);
        let species_ids: IndexMap<&Species, String> = network
            .species()
            .iter()
            .map(|s| (s, ids.unique_id(&s.to_string())))
            .collect();
        let parameter_ids: Vec<(String, f64)> = parameters
            .iter()
            .map(|(symbol, value)| (ids.unique_id(symbol), value))
            .collect();

        let mut reactions = Vec::with_capacity(network.reactions().len());
        for (idx, reaction) in network.reactions().iter().enumerate() {
            let reactants = stoichiometry(&species_ids, reaction.input_stoichiometry())?;
            let products = stoichiometry(&species_ids, reaction.output_stoichiometry())?;
            let id = ids.unique_id(&format!("r{}", idx));
            let rate_id = ids.unique_id(&format!("k_{}", id));
            if let Some(k_rev) = reaction.k_rev() {
                let reverse_id = ids.unique_id(&format!("r{}_rev", idx));
                let reverse_rate_id = ids.unique_id(&format!("k_{}", reverse_id));
                reactions.push(ElementaryReaction {
                    id,
                    rate_id,
                    reactants: reactants.clone(),
                    products: products.clone(),
                    k: reaction.k(),
                });
                reactions.push(ElementaryReaction {
                    id: reverse_id,
                    rate_id: reverse_rate_id,
                    reactants: products,
                    products: reactants,
                    k: k_rev,
                });
            } else {
                reactions.push(ElementaryReaction {
                    id,
                    rate_id,
                    reactants,
                    products,
                    k: reaction.k(),
                });
            }
        }

        Ok(SbmlModel {
            compartment_id,
            compartment_volume: config.compartment_volume,
            initial_concentration: config.initial_concentration,
            species: species_ids
                .into_iter()
                .map(|(s, id)| (id, s.to_string()))
                .collect(),
            parameters: parameter_ids,
            reactions,
        })
    }

    fn to_document(&self, rate_law: RateLaw) -> SBMLDocument {
        let sbmldoc = SBMLDocument::new(3, 2, vec![]);
        let model = sbmldoc.create_model(MODEL_ID);
        model.set_name(MODEL_ID);

        let compartment = model.create_compartment(&self.compartment_id);
        compartment.set_size(self.compartment_volume);
        compartment.set_constant(true);

        for (id, name) in &self.species {
            let species = model.create_species(id);
            species.set_name(name);
            species.set_compartment(&self.compartment_id);
            species.set_initial_concentration(self.initial_concentration);
            species.set_has_only_substance_units(false);
            species.set_constant(false);
        }

        for (id, value) in &self.parameters {
            map_parameter(&model, id, *value);
        }

        for reaction in &self.reactions {
            map_reaction(&model, reaction, rate_law);
        }

        sbmldoc
    }
}

fn map_parameter(model: &Model, id: &str, value: f64) {
    let parameter = model.create_parameter(id);
    parameter.set_constant(true);
    parameter.set_value(value);
}

fn map_reaction(model: &Model, reaction: &ElementaryReaction, rate_law: RateLaw) {
    map_parameter(model, &reaction.rate_id, reaction.k);

    let sbml_reaction = model.create_reaction(&reaction.id);
    sbml_reaction.set_reversible(false);
    for (id, coef) in &reaction.reactants {
        let reactant = sbml_reaction.create_reactant(id, *coef as f64);
        reactant.set_constant(false);
    }
    for (id, coef) in &reaction.products {
        let product = sbml_reaction.create_product(id, *coef as f64);
        product.set_constant(false);
    }
    sbml_reaction.create_kinetic_law(&reaction.rate_law(rate_law));
}

impl ElementaryReaction {
    /// Mass action rate law as an infix formula, e.g. `k_r0 * protein_R^2`
    fn rate_law(&self, rate_law: RateLaw) -> String {
        let mut formula = self.rate_id.clone();
        for (id, coef) in &self.reactants {
            match rate_law {
                RateLaw::Deterministic if *coef > 1 => {
                    formula.push_str(&format!(" * {}^{}", id, coef));
                }
                RateLaw::Deterministic => formula.push_str(&format!(" * {}", id)),
                RateLaw::Stochastic => {
                    formula.push_str(&format!(" * {}", id));
                    for offset in 1..*coef {
                        formula.push_str(&format!(" * ({} - {})", id, offset));
                    }
                }
            }
        }
        formula
    }
}

/// Map (species, coefficient) pairs onto (SBML id, coefficient) pairs
fn stoichiometry<'a>(
    species_ids: &IndexMap<&Species, String>,
    side: impl Iterator<Item = (&'a Species, u32)>,
) -> Result<Vec<(String, u32)>, SbmlError> {
    side.map(|(s, coef)| match species_ids.get(s) {
        Some(id) => Ok((id.clone(), coef)),
        None => Err(SbmlError::UnknownSpecies(s.to_string())),
    })
    .collect()
}
// endregion Model

// region Ids
/// Convert a name into a valid SBML id
///
/// Characters other than ASCII letters and digits become `_`, names starting with a digit are
/// prefixed with `x_`, names containing `*` are prefixed with `xx`, and a trailing `_` is
/// removed.
pub fn sbml_id_from_name(name: &str) -> String {
    let mut id = String::with_capacity(name.len() + 2);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        id.push_str("x_");
    }
    if name.contains('*') {
        id.push_str("xx");
    }
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c);
        } else {
            id.push('_');
        }
    }
    if id.ends_with('_') {
        id.pop();
    }
    if id.is_empty() {
        id.push('x');
    }
    id
}

/// Tracks the ids used in a document, so that every generated id is unique
#[derive(Default)]
struct SbmlIds {
    used: HashSet<String>,
}

impl SbmlIds {
    /// Valid id for `name`, suffixed with `_1`, `_2`, ... if already taken
    fn unique_id(&mut self, name: &str) -> String {
        let base = sbml_id_from_name(name);
        let mut id = base.clone();
        let mut count = 1;
        while self.used.contains(&id) {
            id = format!("{}_{}", base, count);
            count += 1;
        }
        self.used.insert(id.clone());
        id
    }
}
// endregion Ids

#[derive(Debug, Error)]
pub enum SbmlError {
    #[error("Species {0} is referenced by a reaction but is not part of the network")]
    UnknownSpecies(String),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
