//! This module provides the ReactionNetwork struct for representing an entire chemical
//! reaction network
use std::fmt::{Display, Formatter};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use nalgebra::DMatrix;
use thiserror::Error;

use crate::crn::reaction::Reaction;
use crate::crn::species::Species;

/// Represents a deduplicated chemical reaction network
///
/// Species are unique (by name, type, and attributes) and kept in the order they were first
/// seen. Every species referenced by a reaction is present in the species set.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionNetwork {
    /// Set of unique species, in first seen order
    species: IndexSet<Species>,
    /// Reactions of the network, in the order they were given
    reactions: Vec<Reaction>,
}

impl ReactionNetwork {
    /// Assemble a network from a list of species and reactions
    ///
    /// Duplicate species are removed, and any species referenced by a reaction which was not
    /// in `species` is appended (in the order the reactions reference them).
    ///
    /// # Examples
    /// ```rust
    /// use biocrn_core::crn::network::ReactionNetwork;
    /// use biocrn_core::crn::reaction::Reaction;
    /// use biocrn_core::crn::species::Species;
    /// let g = Species::new("G", "dna");
    /// let r = Species::new("R", "protein");
    /// let expression = Reaction::new(vec![g.clone()], vec![g.clone(), r], 1.0).unwrap();
    /// let network = ReactionNetwork::new(vec![g.clone(), g], vec![expression]);
    /// assert_eq!(network.species().len(), 2);
    /// ```
    pub fn new(species: Vec<Species>, reactions: Vec<Reaction>) -> ReactionNetwork {
        let given = species.len();
        let mut species_set: IndexSet<Species> = IndexSet::with_capacity(given);
        for s in species {
            if !species_set.insert(s) {
                trace!("Dropping duplicate species");
            }
        }
        let declared = species_set.len();
        for reaction in &reactions {
            for s in reaction.species() {
                if !species_set.contains(s) {
                    trace!("Merging species {} referenced by reaction {}", s, reaction);
                    species_set.insert(s.clone());
                }
            }
        }
        debug!(
            "Assembled reaction network: {} species given, {} unique, \
             {} merged from reactions, {} reactions",
            given,
            declared,
            species_set.len() - declared,
            reactions.len()
        );
        ReactionNetwork {
            species: species_set,
            reactions,
        }
    }

    /// Assemble a network without merging species from the reactions
    ///
    /// Duplicate species are still removed, but every species referenced by a reaction must
    /// already be part of `species`.
    pub fn new_strict(
        species: Vec<Species>,
        reactions: Vec<Reaction>,
    ) -> Result<ReactionNetwork, NetworkError> {
        let species_set: IndexSet<Species> = species.into_iter().collect();
        for (idx, reaction) in reactions.iter().enumerate() {
            if let Some(missing) = reaction.species().find(|s| !species_set.contains(*s)) {
                return Err(NetworkError::UndeclaredSpecies {
                    species: missing.to_string(),
                    reaction: idx,
                });
            }
        }
        Ok(ReactionNetwork {
            species: species_set,
            reactions,
        })
    }

    /// Unique species of the network, in first seen order
    pub fn species(&self) -> &IndexSet<Species> {
        &self.species
    }

    /// Reactions of the network
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Index of a species in the network, if present
    pub fn species_index(&self, species: &Species) -> Option<usize> {
        self.species.get_index_of(species)
    }

    /// Stoichiometry matrix of the network
    ///
    /// Rows are species and columns are reactions (both in network order), entries are the net
    /// change of the species when the reaction fires in the forward direction.
    pub fn stoichiometry_matrix(&self) -> DMatrix<f64> {
        let mut matrix = DMatrix::<f64>::zeros(self.species.len(), self.reactions.len());
        for (col, reaction) in self.reactions.iter().enumerate() {
            for (s, coef) in reaction.input_stoichiometry() {
                if let Some(row) = self.species_index(s) {
                    matrix[(row, col)] -= coef as f64;
                }
            }
            for (s, coef) in reaction.output_stoichiometry() {
                if let Some(row) = self.species_index(s) {
                    matrix[(row, col)] += coef as f64;
                }
            }
        }
        matrix
    }

    /// Vector of initial amounts, in network species order
    ///
    /// `initial` is keyed by the textual form of the species (e.g. `"dna_G"`), species which
    /// are not present in `initial` start at 0.
    pub fn initial_condition_vector(&self, initial: &IndexMap<String, f64>) -> Vec<f64> {
        self.species
            .iter()
            .map(|s| initial.get(&s.to_string()).copied().unwrap_or(0f64))
            .collect()
    }
}

impl Display for ReactionNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let species: Vec<String> = self.species.iter().map(|s| s.to_string()).collect();
        writeln!(f, "Species = {}", species.join(", "))?;
        writeln!(f, "Reactions = [")?;
        for reaction in &self.reactions {
            writeln!(f, "\t{}", reaction)?;
        }
        write!(f, "]")
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("Reaction {reaction} references species {species}, which is not part of the network")]
    UndeclaredSpecies { species: String, reaction: usize },
}

#[cfg(test)]
mod network_tests {
    use super::*;

    fn setup_network() -> (ReactionNetwork, Species, Species, Species) {
        let g = Species::new("G", "dna");
        let r = Species::new("R", "protein");
        let d = Species::new("R", "dimer");
        let r1 = Reaction::new(vec![g.clone()], vec![g.clone(), r.clone()], 1.0).unwrap();
        let r2 =
            Reaction::new_reversible(vec![r.clone(), r.clone()], vec![d.clone()], 100., 10.)
                .unwrap();
        let network = ReactionNetwork::new(vec![g.clone(), r.clone(), d.clone()], vec![r1, r2]);
        (network, g, r, d)
    }

    #[test]
    fn end_to_end() {
        let (network, g, r, d) = setup_network();
        assert_eq!(network.species().len(), 3);
        assert_eq!(network.reactions().len(), 2);

        let r1 = &network.reactions()[0];
        assert_eq!(r1.input_coefficient(&g), 1);
        assert_eq!(r1.output_coefficient(&g), 1);
        assert_eq!(r1.output_coefficient(&r), 1);
        assert!(!r1.is_reversible());

        let r2 = &network.reactions()[1];
        assert_eq!(r2.inputs(), &[r.clone()]);
        assert_eq!(r2.input_coefficient(&r), 2);
        assert_eq!(r2.output_coefficient(&d), 1);
        assert!(r2.is_reversible());
        assert!((r2.k() - 100.).abs() < 1e-12);
        assert!((r2.k_rev().unwrap() - 10.).abs() < 1e-12);
    }

    #[test]
    fn deduplication() {
        let a = Species::new("A", "protein");
        let a_copy = Species::new("A", "protein");
        let network = ReactionNetwork::new(vec![a, a_copy], vec![]);
        assert_eq!(network.species().len(), 1);
    }

    #[test]
    fn merge_species_from_reactions() {
        let x = Species::new("X", "protein");
        let y = Species::new("Y", "protein");
        let z = Species::new("Z", "complex");
        let r1 = Reaction::new(vec![x.clone(), y.clone()], vec![z.clone()], 1.0).unwrap();
        let network = ReactionNetwork::new(vec![y.clone()], vec![r1]);
        let species: Vec<&Species> = network.species().iter().collect();
        assert_eq!(species, vec![&y, &x, &z]);
    }

    #[test]
    fn strict_construction() {
        let x = Species::new("X", "protein");
        let y = Species::new("Y", "protein");
        let r1 = Reaction::new(vec![x.clone()], vec![y.clone()], 1.0).unwrap();
        let err = ReactionNetwork::new_strict(vec![x.clone()], vec![r1.clone()]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::UndeclaredSpecies {
                species: "protein_Y".to_string(),
                reaction: 0
            }
        );
        let network = ReactionNetwork::new_strict(vec![x, y], vec![r1]).unwrap();
        assert_eq!(network.species().len(), 2);
    }

    #[test]
    fn stoichiometry_matrix() {
        let (network, g, r, d) = setup_network();
        let matrix = network.stoichiometry_matrix();
        assert_eq!(matrix.shape(), (3, 2));
        let g_row = network.species_index(&g).unwrap();
        let r_row = network.species_index(&r).unwrap();
        let d_row = network.species_index(&d).unwrap();
        assert!((matrix[(g_row, 0)] - 0.).abs() < 1e-12);
        assert!((matrix[(r_row, 0)] - 1.).abs() < 1e-12);
        assert!((matrix[(r_row, 1)] + 2.).abs() < 1e-12);
        assert!((matrix[(d_row, 1)] - 1.).abs() < 1e-12);
    }

    #[test]
    fn initial_conditions() {
        let (network, _, _, _) = setup_network();
        let mut initial = IndexMap::new();
        initial.insert("dna_G".to_string(), 5.0);
        initial.insert("dimer_R".to_string(), 1.5);
        assert_eq!(network.initial_condition_vector(&initial), vec![5.0, 0.0, 1.5]);
    }

    #[test]
    fn display() {
        let (network, _, _, _) = setup_network();
        assert_eq!(
            network.to_string(),
            concat!(
                "Species = dna_G, protein_R, dimer_R\n",
                "Reactions = [\n",
                "\tdna_G --> dna_G + protein_R  k_f=1\n",
                "\t2 protein_R <--> dimer_R  k_f=100 k_r=10\n",
                "]"
            )
        );
    }
}
