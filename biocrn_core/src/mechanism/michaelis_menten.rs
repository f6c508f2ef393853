//! Michaelis-Menten style templates shared by the transcription, translation, and degradation
//! mechanisms
//!
//! Both templates bind the substrate and enzyme into a complex, then catalyze:
//! - [`MichaelisMenten`]: `S + E <--> S:E --> E (+ P)`, the substrate is consumed
//! - [`MichaelisMentenCopy`]: `S + E <--> S:E --> S + E + P`, the substrate is regenerated
use crate::crn::reaction::Reaction;
use crate::crn::species::Species;
use crate::mechanism::{MechanismError, MechanismInfo};

/// Rates of a binding then catalysis mechanism
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatalysisRates {
    /// Substrate-enzyme binding rate
    pub kb: f64,
    /// Substrate-enzyme unbinding rate
    pub ku: f64,
    /// Catalytic rate
    pub kcat: f64,
}

impl CatalysisRates {
    pub fn new(kb: f64, ku: f64, kcat: f64) -> Self {
        CatalysisRates { kb, ku, kcat }
    }
}

/// The complex formed when `enzyme` binds `substrate`
///
/// Named `{substrate type}_{substrate name}:{enzyme type}_{enzyme name}` with type `complex`,
/// so that deriving it twice from the same pair always gives the same species.
///
/// Attributes are not part of the name: `dna_G` and `dna_G` tagged `deg` bound to the same
/// enzyme give the same complex. Pass an explicit complex to `update_reactions` to keep them
/// apart.
pub fn enzyme_complex(substrate: &Species, enzyme: &Species) -> Species {
    Species::new(
        format!("{}:{}", substrate.qualified_name(), enzyme.qualified_name()),
        "complex",
    )
}

fn binding_reaction(
    substrate: &Species,
    enzyme: &Species,
    complex: &Species,
    rates: &CatalysisRates,
) -> Result<Reaction, MechanismError> {
    // S + E <--> S:E
    Ok(Reaction::new_reversible(
        vec![substrate.clone(), enzyme.clone()],
        vec![complex.clone()],
        rates.kb,
        rates.ku,
    )?)
}

/// Michaelis-Menten template where the substrate is consumed
///
/// With no product this is a degradation template: `S + E <--> S:E --> E`
#[derive(Clone, Debug, PartialEq)]
pub struct MichaelisMenten {
    info: MechanismInfo,
    enzyme: Species,
}

impl MichaelisMenten {
    pub fn new<N: Into<String>, T: Into<String>>(
        name: N,
        enzyme: Species,
        mechanism_type: T,
    ) -> Self {
        MichaelisMenten {
            info: MechanismInfo::new(name, mechanism_type),
            enzyme,
        }
    }

    pub fn enzyme(&self) -> &Species {
        &self.enzyme
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn mechanism_type(&self) -> &str {
        &self.info.mechanism_type
    }

    pub fn update_species(&self, substrate: &Species) -> Vec<Species> {
        vec![enzyme_complex(substrate, &self.enzyme)]
    }

    /// Binding reaction followed by the catalytic reaction
    ///
    /// `complex` overrides the derived complex species if given.
    pub fn update_reactions(
        &self,
        substrate: &Species,
        product: Option<&Species>,
        complex: Option<&Species>,
        rates: &CatalysisRates,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let complex = complex
            .cloned()
            .unwrap_or_else(|| enzyme_complex(substrate, &self.enzyme));
        let binding = binding_reaction(substrate, &self.enzyme, &complex, rates)?;
        // S:E --> E (+ P)
        let outputs = match product {
            Some(product) => vec![product.clone(), self.enzyme.clone()],
            None => vec![self.enzyme.clone()],
        };
        let catalysis = Reaction::new(vec![complex], outputs, rates.kcat)?;
        Ok(vec![binding, catalysis])
    }
}

/// Michaelis-Menten template where the substrate acts as a template and is regenerated
#[derive(Clone, Debug, PartialEq)]
pub struct MichaelisMentenCopy {
    info: MechanismInfo,
    enzyme: Species,
}

impl MichaelisMentenCopy {
    pub fn new<N: Into<String>, T: Into<String>>(
        name: N,
        enzyme: Species,
        mechanism_type: T,
    ) -> Self {
        MichaelisMentenCopy {
            info: MechanismInfo::new(name, mechanism_type),
            enzyme,
        }
    }

    pub fn enzyme(&self) -> &Species {
        &self.enzyme
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn mechanism_type(&self) -> &str {
        &self.info.mechanism_type
    }

    pub fn update_species(&self, substrate: &Species) -> Vec<Species> {
        vec![enzyme_complex(substrate, &self.enzyme)]
    }

    /// Binding reaction followed by the catalytic reaction `S:E --> S + P + E`
    pub fn update_reactions(
        &self,
        substrate: &Species,
        product: &Species,
        complex: Option<&Species>,
        rates: &CatalysisRates,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let complex = complex
            .cloned()
            .unwrap_or_else(|| enzyme_complex(substrate, &self.enzyme));
        let binding = binding_reaction(substrate, &self.enzyme, &complex, rates)?;
        let catalysis = Reaction::new(
            vec![complex],
            vec![substrate.clone(), product.clone(), self.enzyme.clone()],
            rates.kcat,
        )?;
        Ok(vec![binding, catalysis])
    }
}

#[cfg(test)]
mod michaelis_menten_tests {
    use super::*;
    use crate::crn::network::ReactionNetwork;

    fn setup() -> (Species, Species, Species) {
        (
            Species::new("G", "dna"),
            Species::new("RNAP", "protein"),
            Species::new("G", "rna"),
        )
    }

    #[test]
    fn complex_naming() {
        let (g, rnap, _) = setup();
        let complex = enzyme_complex(&g, &rnap);
        assert_eq!(complex.name(), "dna_G:protein_RNAP");
        assert_eq!(complex.species_type(), "complex");
        assert_eq!(complex.to_string(), "complex_dna_G:protein_RNAP");
    }

    #[test]
    fn copy_template() {
        let (g, rnap, transcript) = setup();
        let template = MichaelisMentenCopy::new("copy", rnap.clone(), "transcription");
        let complex = enzyme_complex(&g, &rnap);
        let reactions = template
            .update_reactions(&g, &transcript, None, &CatalysisRates::new(100., 10., 2.))
            .unwrap();
        assert_eq!(reactions.len(), 2);

        let binding = &reactions[0];
        assert_eq!(binding.inputs(), &[g.clone(), rnap.clone()]);
        assert_eq!(binding.outputs(), &[complex.clone()]);
        assert!(binding.is_reversible());

        let catalysis = &reactions[1];
        assert_eq!(catalysis.inputs(), &[complex]);
        assert_eq!(catalysis.outputs(), &[g, transcript, rnap]);
        assert!(!catalysis.is_reversible());
        assert!((catalysis.k() - 2.).abs() < 1e-12);
    }

    #[test]
    fn copy_template_is_idempotent() {
        let (g, rnap, transcript) = setup();
        let template = MichaelisMentenCopy::new("copy", rnap, "transcription");
        let rates = CatalysisRates::new(100., 10., 1.);
        let first_species = template.update_species(&g);
        let second_species = template.update_species(&g);
        assert_eq!(first_species, second_species);

        let mut reactions = template.update_reactions(&g, &transcript, None, &rates).unwrap();
        reactions.extend(template.update_reactions(&g, &transcript, None, &rates).unwrap());
        let mut species = first_species;
        species.extend(second_species);
        let network = ReactionNetwork::new(species, reactions);
        let complexes = network
            .species()
            .iter()
            .filter(|s| s.species_type() == "complex")
            .count();
        assert_eq!(complexes, 1);
    }

    #[test]
    fn conversion_template() {
        let rna = Species::new("G", "rna");
        let nuclease = Species::new("RNAase", "protein");
        let template = MichaelisMenten::new("deg", nuclease.clone(), "rna_degradation");
        let rates = CatalysisRates::new(100., 10., 5.);

        let degradation = template.update_reactions(&rna, None, None, &rates).unwrap();
        assert_eq!(degradation[1].outputs(), &[nuclease.clone()]);

        let product = Species::new("G", "nucleotides");
        let conversion = template.update_reactions(&rna, Some(&product), None, &rates).unwrap();
        assert_eq!(conversion[1].outputs(), &[product, nuclease]);
        assert_eq!(conversion[1].input_coefficient(&rna), 0);
    }

    #[test]
    fn explicit_complex() {
        let (g, rnap, transcript) = setup();
        let template = MichaelisMentenCopy::new("copy", rnap, "transcription");
        let custom = Species::new("custom", "complex");
        let reactions = template
            .update_reactions(&g, &transcript, Some(&custom), &CatalysisRates::new(1., 1., 1.))
            .unwrap();
        assert_eq!(reactions[0].outputs(), &[custom.clone()]);
        assert_eq!(reactions[1].inputs(), &[custom]);
    }

    #[test]
    fn negative_rates_are_rejected() {
        let (g, rnap, transcript) = setup();
        let template = MichaelisMentenCopy::new("copy", rnap, "transcription");
        let err = template
            .update_reactions(&g, &transcript, None, &CatalysisRates::new(-1., 10., 1.))
            .unwrap_err();
        assert!(matches!(err, MechanismError::InvalidReaction(_)));
    }
}
