//! Module providing JSON IO for reaction networks
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crn::network::ReactionNetwork;
use crate::crn::reaction::{Reaction, ReactionError};
use crate::crn::species::Species;

// region JSON Network
/// Represents a JSON serialized network, used for reading and writing networks in json format
///
/// Species are stored once, reactions refer to them by index.
#[derive(Serialize, Deserialize)]
struct JsonNetwork {
    species: Vec<JsonSpecies>,
    reactions: Vec<JsonReaction>,
}

#[derive(Serialize, Deserialize)]
struct JsonSpecies {
    name: String,
    #[serde(rename = "type", default)]
    species_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    inputs: Vec<usize>,
    input_coefs: Vec<u32>,
    outputs: Vec<usize>,
    output_coefs: Vec<u32>,
    k: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    k_rev: Option<f64>,
}
// endregion JSON Network

// region Conversions
impl From<JsonSpecies> for Species {
    fn from(s: JsonSpecies) -> Self {
        Species::with_attributes(s.name, s.species_type, s.attributes)
    }
}

impl From<&Species> for JsonSpecies {
    fn from(s: &Species) -> Self {
        Self {
            name: s.name().to_string(),
            species_type: s.species_type().to_string(),
            attributes: s.attributes().iter().cloned().collect(),
        }
    }
}

impl ReactionNetwork {
    /// Read a network from a json file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<ReactionNetwork, JsonError> {
        let network_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        ReactionNetwork::from_json_str(&network_str)
    }

    /// Write the network to a json file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let network_string = self.to_json_string()?;
        fs::write(path.as_ref(), network_string)?;
        debug!("Wrote reaction network to {}", path.as_ref().display());
        Ok(())
    }

    /// Parse a network from a json string
    ///
    /// Reactions are validated just as if they had been constructed directly.
    pub fn from_json_str(data: &str) -> Result<ReactionNetwork, JsonError> {
        let json_network = match serde_json::from_str::<JsonNetwork>(data) {
            Ok(network) => network,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        ReactionNetwork::from_json(json_network)
    }

    /// Serialize the network to a json string
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string(&self.to_json()?)?)
    }

    fn from_json(json_network: JsonNetwork) -> Result<Self, JsonError> {
        let species: Vec<Species> = json_network.species.into_iter().map(Species::from).collect();
        let lookup = |reaction: usize, indices: &[usize]| -> Result<Vec<Species>, JsonError> {
            indices
                .iter()
                .map(|&idx| {
                    species
                        .get(idx)
                        .cloned()
                        .ok_or(JsonError::UnknownSpeciesIndex { reaction, index: idx })
                })
                .collect()
        };
        let mut reactions = Vec::with_capacity(json_network.reactions.len());
        for (idx, rxn) in json_network.reactions.into_iter().enumerate() {
            let inputs = lookup(idx, &rxn.inputs)?;
            let outputs = lookup(idx, &rxn.outputs)?;
            reactions.push(Reaction::from_parts(
                inputs,
                outputs,
                rxn.k,
                rxn.k_rev,
                Some(rxn.input_coefs),
                Some(rxn.output_coefs),
            )?);
        }
        Ok(ReactionNetwork::new(species, reactions))
    }

    fn to_json(&self) -> Result<JsonNetwork, JsonError> {
        let json_species: Vec<JsonSpecies> = self.species().iter().map(JsonSpecies::from).collect();
        let indices = |species: &[Species]| -> Result<Vec<usize>, JsonError> {
            species
                .iter()
                .map(|s| {
                    self.species_index(s)
                        .ok_or_else(|| JsonError::UnknownSpecies(s.to_string()))
                })
                .collect()
        };
        let mut json_reactions: Vec<JsonReaction> = Vec::with_capacity(self.reactions().len());
        for r in self.reactions() {
            json_reactions.push(JsonReaction {
                inputs: indices(r.inputs())?,
                input_coefs: r.input_coefs().to_vec(),
                outputs: indices(r.outputs())?,
                output_coefs: r.output_coefs().to_vec(),
                k: r.k(),
                k_rev: r.k_rev(),
            })
        }
        Ok(JsonNetwork {
            species: json_species,
            reactions: json_reactions,
        })
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Reaction {reaction} refers to species index {index}, which does not exist")]
    UnknownSpeciesIndex { reaction: usize, index: usize },
    #[error("Species {0} is referenced by a reaction but is not part of the network")]
    UnknownSpecies(String),
    #[error("Unable to build reaction")]
    InvalidReaction(#[from] ReactionError),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
// endregion Conversions

#[cfg(test)]
mod json_tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_network() -> ReactionNetwork {
        let g = Species::new("G", "dna");
        let r = Species::new("R", "protein");
        let d = Species::new("R", "dimer");
        let r_deg = Species::with_attributes("R", "protein", ["deg"]);
        let r1 = Reaction::new(vec![g.clone()], vec![g.clone(), r.clone()], 1.0).unwrap();
        let r2 =
            Reaction::new_reversible(vec![r.clone(), r.clone()], vec![d.clone()], 100., 10.)
                .unwrap();
        let r3 = Reaction::from_parts(
            vec![d.clone()],
            vec![r_deg.clone()],
            100.,
            Some(10.),
            None,
            Some(vec![2]),
        )
        .unwrap();
        let r4 = Reaction::new(vec![r_deg.clone()], vec![], 0.1).unwrap();
        ReactionNetwork::new(vec![g.clone(), g, r, d, r_deg], vec![r1, r2, r3, r4])
    }

    #[test]
    fn json_species() {
        let data = r#"{"name":"R","type":"protein","attributes":["deg"]}"#;
        let species: Species = serde_json::from_str::<JsonSpecies>(data).unwrap().into();
        assert_eq!(species, Species::with_attributes("R", "protein", ["deg"]));

        let untyped = r#"{"name":"Ribo"}"#;
        let species: Species = serde_json::from_str::<JsonSpecies>(untyped).unwrap().into();
        assert_eq!(species, Species::new("Ribo", ""));
    }

    #[test]
    fn json_string_round_trip() {
        let network = setup_network();
        let json = network.to_json_string().unwrap();
        let parsed = ReactionNetwork::from_json_str(&json).unwrap();
        assert_eq!(parsed, network);
    }

    #[test]
    fn json_reaction_is_validated() {
        let data = r#"{
"species":[{"name":"R","type":"protein"},{"name":"R","type":"dimer"}],
"reactions":[{"inputs":[0],"input_coefs":[2,1],"outputs":[1],"output_coefs":[1],"k":1.0}]
}"#;
        match ReactionNetwork::from_json_str(data) {
            Err(JsonError::InvalidReaction(ReactionError::CoefficientLengthMismatch { .. })) => {}
            _ => panic!("Mismatched coefficients should be rejected"),
        }

        let data = r#"{
"species":[{"name":"R","type":"protein"}],
"reactions":[{"inputs":[0],"input_coefs":[1],"outputs":[3],"output_coefs":[1],"k":1.0}]
}"#;
        match ReactionNetwork::from_json_str(data) {
            Err(JsonError::UnknownSpeciesIndex { reaction: 0, index: 3 }) => {}
            _ => panic!("Unknown species index should be rejected"),
        }
    }

    #[test]
    fn read_write_json() {
        let network = setup_network();
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        network.write_json(&path).unwrap();
        let read = ReactionNetwork::read_json(&path).unwrap();
        assert_eq!(read.species().len(), 4);
        assert_eq!(read.reactions().len(), 4);
        assert_eq!(read, network);

        match ReactionNetwork::read_json(dir.path().join("missing.json")) {
            Err(JsonError::UnableToRead(_)) => {}
            _ => panic!("Reading a missing file should fail"),
        }
    }
}
