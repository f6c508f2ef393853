//! Module providing the layered override hierarchy for mechanisms
//!
//! Mechanisms are stored in type keyed scopes, ordered from broadest (e.g. the defaults of an
//! extract) to most specific (e.g. mechanisms passed for a single component). A mechanism in
//! a more specific scope replaces one of the same type from any broader scope.
use std::sync::Arc;

use indexmap::IndexMap;
use log::trace;

use crate::crn::parameters::ParameterTable;
use crate::crn::reaction::Reaction;
use crate::crn::species::Species;
use crate::mechanism::{Mechanism, MechanismError, MechanismTarget, SpeciesOptions};

/// Map of mechanism type to mechanism
pub type MechanismMap = IndexMap<String, Arc<dyn Mechanism>>;

/// Build a [`MechanismMap`] keyed by each mechanism's type
///
/// If two mechanisms share a type the later one is kept.
pub fn mechanism_map<I>(mechanisms: I) -> MechanismMap
where
    I: IntoIterator<Item = Arc<dyn Mechanism>>,
{
    mechanisms
        .into_iter()
        .map(|m| (m.mechanism_type().to_string(), m))
        .collect()
}

/// Ordered list of mechanism scopes, broadest first
#[derive(Clone, Debug, Default)]
pub struct MechanismScopes {
    scopes: Vec<MechanismMap>,
}

impl MechanismScopes {
    pub fn new() -> Self {
        MechanismScopes { scopes: Vec::new() }
    }

    /// Create from scopes ordered broadest to most specific
    pub fn from_scopes(scopes: Vec<MechanismMap>) -> Self {
        MechanismScopes { scopes }
    }

    /// Add a scope more specific than all current ones
    pub fn push_scope(&mut self, scope: MechanismMap) {
        self.scopes.push(scope);
    }

    /// Copy of these scopes with an additional, most specific, scope
    ///
    /// Mechanisms are reference counted, so the copy is shallow.
    pub fn with_scope(&self, scope: MechanismMap) -> Self {
        let mut scopes = self.clone();
        scopes.push_scope(scope);
        scopes
    }

    /// Number of scopes
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Find the mechanism for a type in the most specific scope which defines it
    ///
    /// # Examples
    /// ```rust
    /// use std::sync::Arc;
    /// use biocrn_core::mechanism::Mechanism;
    /// use biocrn_core::mechanism::scopes::{mechanism_map, MechanismScopes};
    /// use biocrn_core::mechanism::txtl::Transcription;
    /// let rnap = Transcription::new("RNAP").unwrap();
    /// let t7 = Transcription::with_name("t7_transcription", "T7").unwrap();
    /// let defaults = mechanism_map([Arc::new(rnap) as Arc<dyn Mechanism>]);
    /// let component = mechanism_map([Arc::new(t7) as Arc<dyn Mechanism>]);
    /// let scopes = MechanismScopes::from_scopes(vec![defaults, component]);
    /// assert_eq!(scopes.resolve("transcription").unwrap().name(), "t7_transcription");
    /// ```
    pub fn resolve(&self, mechanism_type: &str) -> Option<&Arc<dyn Mechanism>> {
        let found = self
            .scopes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(level, scope)| scope.get(mechanism_type).map(|m| (level, m)));
        match found {
            Some((level, mechanism)) => {
                trace!(
                    "Resolved mechanism type {} to {} at scope {}",
                    mechanism_type,
                    mechanism.name(),
                    level
                );
                Some(mechanism)
            }
            None => None,
        }
    }

    /// Like [`MechanismScopes::resolve`], but fails if no scope defines the type
    pub fn require(&self, mechanism_type: &str) -> Result<&Arc<dyn Mechanism>, MechanismError> {
        self.resolve(mechanism_type)
            .ok_or_else(|| MechanismError::MechanismNotFound(mechanism_type.to_string()))
    }

    /// Resolve a mechanism by type and generate its species and reactions for `target`
    pub fn generate(
        &self,
        mechanism_type: &str,
        target: &MechanismTarget,
        options: &SpeciesOptions,
        parameters: &ParameterTable,
    ) -> Result<(Vec<Species>, Vec<Reaction>), MechanismError> {
        let mechanism = self.require(mechanism_type)?;
        let species = mechanism.update_species(target, options)?;
        let reactions = mechanism.update_reactions(target, parameters)?;
        Ok((species, reactions))
    }
}

#[cfg(test)]
mod scopes_tests {
    use super::*;
    use crate::crn::network::ReactionNetwork;
    use crate::mechanism::binding::OneStepCooperativeBinding;
    use crate::mechanism::txtl::{RnaDegradation, Transcription, Translation};

    fn extract_defaults() -> MechanismMap {
        mechanism_map([
            Arc::new(Transcription::new("RNAP").unwrap()) as Arc<dyn Mechanism>,
            Arc::new(Translation::new("Ribo").unwrap()) as Arc<dyn Mechanism>,
            Arc::new(RnaDegradation::new("RNAase").unwrap()) as Arc<dyn Mechanism>,
        ])
    }

    fn t7_promoter() -> MechanismMap {
        let t7 = Species::new("T7", "protein");
        let transcription = Transcription::with_name("T7_transcription_mm", t7).unwrap();
        mechanism_map([Arc::new(transcription) as Arc<dyn Mechanism>])
    }

    #[test]
    fn most_specific_scope_wins() {
        let scopes = MechanismScopes::from_scopes(vec![
            extract_defaults(),
            MechanismMap::new(),
            t7_promoter(),
        ]);
        assert_eq!(scopes.depth(), 3);
        assert_eq!(
            scopes.resolve("transcription").unwrap().name(),
            "T7_transcription_mm"
        );
        // Falls back to the broadest scope for types not overridden
        assert_eq!(scopes.resolve("translation").unwrap().name(), "translation_mm");
        assert!(scopes.resolve("cooperative_binding").is_none());
        assert_eq!(
            scopes.require("cooperative_binding").unwrap_err(),
            MechanismError::MechanismNotFound("cooperative_binding".to_string())
        );
    }

    #[test]
    fn with_scope_leaves_original_untouched() {
        let defaults = MechanismScopes::from_scopes(vec![extract_defaults()]);
        let overridden = defaults.with_scope(t7_promoter());
        assert_eq!(defaults.resolve("transcription").unwrap().name(), "transcription_mm");
        assert_eq!(
            overridden.resolve("transcription").unwrap().name(),
            "T7_transcription_mm"
        );
    }

    #[test]
    fn later_mechanism_of_same_type_replaces_earlier() {
        let map = mechanism_map([
            Arc::new(OneStepCooperativeBinding::default()) as Arc<dyn Mechanism>,
            Arc::new(OneStepCooperativeBinding::new(
                "custom_binding",
                "cooperative_binding",
            )) as Arc<dyn Mechanism>,
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map["cooperative_binding"].name(), "custom_binding");
    }

    #[test]
    fn gene_expression_network() {
        let parameters: ParameterTable = [
            ("kb", 100.),
            ("ku", 10.),
            ("ktx", 2.),
            ("ktl", 1.),
            ("kdeg", 5.),
        ]
        .into_iter()
        .collect();
        let mut extract = MechanismScopes::new();
        extract.push_scope(extract_defaults());
        let t7_scopes = extract.with_scope(t7_promoter());
        let options = SpeciesOptions {
            include_enzyme: true,
            include_product: true,
        };

        let mut species = Vec::new();
        let mut reactions = Vec::new();
        for (name, scopes) in [("ref", &extract), ("T7Load", &t7_scopes)] {
            let dna = Species::new(name, "dna");
            let rna = Transcription::transcript(&dna);
            species.push(dna.clone());
            for (mechanism_type, target) in [
                ("transcription", MechanismTarget::Substrate(dna.clone())),
                ("translation", MechanismTarget::Substrate(rna.clone())),
                ("rna_degradation", MechanismTarget::Substrate(rna.clone())),
            ] {
                let (new_species, new_reactions) = scopes
                    .generate(mechanism_type, &target, &options, &parameters)
                    .unwrap();
                species.extend(new_species);
                reactions.extend(new_reactions);
            }
        }
        let network = ReactionNetwork::new(species, reactions);
        // Per gene: dna, rna, protein and three complexes. Shared: RNAP, T7, Ribo and RNAase
        assert_eq!(network.species().len(), 16);
        assert_eq!(network.reactions().len(), 12);
        assert!(network
            .species()
            .contains(&Species::new("dna_T7Load:protein_T7", "complex")));
        assert!(!network
            .species()
            .contains(&Species::new("dna_T7Load:protein_RNAP", "complex")));
    }
}
