//! Transcription, translation, and mRNA degradation mechanisms
//!
//! - [`Transcription`]: `G + RNAP <--> G:RNAP --> G + RNAP + mRNA`
//! - [`Translation`]: `mRNA + Ribo <--> mRNA:Ribo --> mRNA + Ribo + Protein`
//! - [`RnaDegradation`]: `mRNA + RNAase <--> mRNA:RNAase --> RNAase`
use crate::configuration::Configuration;
use crate::crn::parameters::ParameterTable;
use crate::crn::reaction::Reaction;
use crate::crn::species::Species;
use crate::mechanism::michaelis_menten::{CatalysisRates, MichaelisMenten, MichaelisMentenCopy};
use crate::mechanism::{rate, Enzyme, Mechanism, MechanismError, MechanismTarget, SpeciesOptions};

/// Extract the substrate of a target, or fail for binding targets
fn substrate<'a>(
    mechanism: &str,
    target: &'a MechanismTarget,
) -> Result<&'a Species, MechanismError> {
    match target {
        MechanismTarget::Substrate(species) => Ok(species),
        other => Err(MechanismError::UnsupportedTarget {
            mechanism: mechanism.to_string(),
            target: other.kind(),
        }),
    }
}

/// Read `kb`, `ku` and the given catalytic rate from a parameter table
fn catalysis_rates(
    parameters: &ParameterTable,
    kcat_symbol: &str,
) -> Result<CatalysisRates, MechanismError> {
    Ok(CatalysisRates::new(
        rate(parameters, "kb")?,
        rate(parameters, "ku")?,
        rate(parameters, kcat_symbol)?,
    ))
}

// region Transcription
/// Michaelis-Menten transcription of a gene by an RNA polymerase
#[derive(Clone, Debug, PartialEq)]
pub struct Transcription {
    template: MichaelisMentenCopy,
}

impl Transcription {
    pub const TYPE: &'static str = "transcription";

    /// Create a transcription mechanism named `transcription_mm`
    ///
    /// # Examples
    /// ```rust
    /// use biocrn_core::crn::species::Species;
    /// use biocrn_core::mechanism::txtl::Transcription;
    /// let default_rnap = Transcription::new("RNAP").unwrap();
    /// assert_eq!(default_rnap.rnap(), &Species::new("RNAP", "protein"));
    /// let t7 = Transcription::new(Species::new("T7", "protein")).unwrap();
    /// assert_eq!(t7.rnap().name(), "T7");
    /// ```
    pub fn new<E: Into<Enzyme>>(rnap: E) -> Result<Self, MechanismError> {
        Transcription::with_name("transcription_mm", rnap)
    }

    pub fn with_name<N: Into<String>, E: Into<Enzyme>>(
        name: N,
        rnap: E,
    ) -> Result<Self, MechanismError> {
        let config = Configuration::current();
        let rnap = rnap.into().resolve(&config.rnap.1)?;
        Ok(Transcription {
            template: MichaelisMentenCopy::new(name, rnap, Transcription::TYPE),
        })
    }

    /// Transcription with the configured default polymerase
    pub fn with_default_rnap() -> Result<Self, MechanismError> {
        let config = Configuration::current();
        Transcription::new(Species::new(config.rnap.0, config.rnap.1))
    }

    pub fn rnap(&self) -> &Species {
        self.template.enzyme()
    }

    /// The transcript produced from `dna`, an `rna` species with the same name
    pub fn transcript(dna: &Species) -> Species {
        Species::new(dna.name(), "rna")
    }

    /// Species for transcribing `dna`: the polymerase (optional), the gene-polymerase complex,
    /// and the transcript (optional), in that order
    pub fn update_species(
        &self,
        dna: &Species,
        return_transcript: bool,
        return_rnap: bool,
    ) -> Vec<Species> {
        let mut species = Vec::new();
        if return_rnap {
            species.push(self.rnap().clone());
        }
        species.extend(self.template.update_species(dna));
        if return_transcript {
            species.push(Transcription::transcript(dna));
        }
        species
    }

    /// Reactions for transcribing `dna`, with `rates.kcat` the transcription rate
    pub fn update_reactions(
        &self,
        dna: &Species,
        rates: &CatalysisRates,
        complex: Option<&Species>,
        transcript: Option<&Species>,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let transcript = transcript
            .cloned()
            .unwrap_or_else(|| Transcription::transcript(dna));
        self.template.update_reactions(dna, &transcript, complex, rates)
    }
}

impl Mechanism for Transcription {
    fn name(&self) -> &str {
        self.template.name()
    }

    fn mechanism_type(&self) -> &str {
        self.template.mechanism_type()
    }

    fn update_species(
        &self,
        target: &MechanismTarget,
        options: &SpeciesOptions,
    ) -> Result<Vec<Species>, MechanismError> {
        let dna = substrate(self.template.name(), target)?;
        Ok(Transcription::update_species(
            self,
            dna,
            options.include_product,
            options.include_enzyme,
        ))
    }

    fn update_reactions(
        &self,
        target: &MechanismTarget,
        parameters: &ParameterTable,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let dna = substrate(self.template.name(), target)?;
        let rates = catalysis_rates(parameters, "ktx")?;
        Transcription::update_reactions(self, dna, &rates, None, None)
    }
}
// endregion Transcription

// region Translation
/// Michaelis-Menten translation of a transcript by a ribosome
#[derive(Clone, Debug, PartialEq)]
pub struct Translation {
    template: MichaelisMentenCopy,
}

impl Translation {
    pub const TYPE: &'static str = "translation";

    /// Create a translation mechanism named `translation_mm`
    pub fn new<E: Into<Enzyme>>(ribosome: E) -> Result<Self, MechanismError> {
        Translation::with_name("translation_mm", ribosome)
    }

    pub fn with_name<N: Into<String>, E: Into<Enzyme>>(
        name: N,
        ribosome: E,
    ) -> Result<Self, MechanismError> {
        let config = Configuration::current();
        let ribosome = ribosome.into().resolve(&config.ribosome.1)?;
        Ok(Translation {
            template: MichaelisMentenCopy::new(name, ribosome, Translation::TYPE),
        })
    }

    /// Translation with the configured default ribosome
    pub fn with_default_ribosome() -> Result<Self, MechanismError> {
        let config = Configuration::current();
        Translation::new(Species::new(config.ribosome.0, config.ribosome.1))
    }

    pub fn ribosome(&self) -> &Species {
        self.template.enzyme()
    }

    /// The protein translated from `transcript`, a `protein` species with the same name
    pub fn protein(transcript: &Species) -> Species {
        Species::new(transcript.name(), "protein")
    }

    /// Species for translating `transcript`: the ribosome (optional), the transcript-ribosome
    /// complex, and the protein (optional), in that order
    pub fn update_species(
        &self,
        transcript: &Species,
        return_protein: bool,
        return_ribosome: bool,
    ) -> Vec<Species> {
        let mut species = Vec::new();
        if return_ribosome {
            species.push(self.ribosome().clone());
        }
        species.extend(self.template.update_species(transcript));
        if return_protein {
            species.push(Translation::protein(transcript));
        }
        species
    }

    /// Reactions for translating `transcript`, with `rates.kcat` the translation rate
    pub fn update_reactions(
        &self,
        transcript: &Species,
        rates: &CatalysisRates,
        complex: Option<&Species>,
        protein: Option<&Species>,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let protein = protein
            .cloned()
            .unwrap_or_else(|| Translation::protein(transcript));
        self.template.update_reactions(transcript, &protein, complex, rates)
    }
}

impl Mechanism for Translation {
    fn name(&self) -> &str {
        self.template.name()
    }

    fn mechanism_type(&self) -> &str {
        self.template.mechanism_type()
    }

    fn update_species(
        &self,
        target: &MechanismTarget,
        options: &SpeciesOptions,
    ) -> Result<Vec<Species>, MechanismError> {
        let transcript = substrate(self.template.name(), target)?;
        Ok(Translation::update_species(
            self,
            transcript,
            options.include_product,
            options.include_enzyme,
        ))
    }

    fn update_reactions(
        &self,
        target: &MechanismTarget,
        parameters: &ParameterTable,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let transcript = substrate(self.template.name(), target)?;
        let rates = catalysis_rates(parameters, "ktl")?;
        Translation::update_reactions(self, transcript, &rates, None, None)
    }
}
// endregion Translation

// region RNA Degradation
/// Michaelis-Menten degradation of a transcript by a nuclease
#[derive(Clone, Debug, PartialEq)]
pub struct RnaDegradation {
    template: MichaelisMenten,
}

impl RnaDegradation {
    pub const TYPE: &'static str = "rna_degradation";

    /// Create a degradation mechanism named `rna_degradation_mm`
    pub fn new<E: Into<Enzyme>>(nuclease: E) -> Result<Self, MechanismError> {
        RnaDegradation::with_name("rna_degradation_mm", nuclease)
    }

    pub fn with_name<N: Into<String>, E: Into<Enzyme>>(
        name: N,
        nuclease: E,
    ) -> Result<Self, MechanismError> {
        let config = Configuration::current();
        let nuclease = nuclease.into().resolve(&config.nuclease.1)?;
        Ok(RnaDegradation {
            template: MichaelisMenten::new(name, nuclease, RnaDegradation::TYPE),
        })
    }

    /// Degradation with the configured default nuclease
    pub fn with_default_nuclease() -> Result<Self, MechanismError> {
        let config = Configuration::current();
        RnaDegradation::new(Species::new(config.nuclease.0, config.nuclease.1))
    }

    pub fn nuclease(&self) -> &Species {
        self.template.enzyme()
    }

    /// Species for degrading `rna`: the nuclease (optional) then the rna-nuclease complex
    pub fn update_species(&self, rna: &Species, return_nuclease: bool) -> Vec<Species> {
        let mut species = Vec::new();
        if return_nuclease {
            species.push(self.nuclease().clone());
        }
        species.extend(self.template.update_species(rna));
        species
    }

    /// Reactions for degrading `rna`, with `rates.kcat` the degradation rate
    pub fn update_reactions(
        &self,
        rna: &Species,
        rates: &CatalysisRates,
        complex: Option<&Species>,
    ) -> Result<Vec<Reaction>, MechanismError> {
        self.template.update_reactions(rna, None, complex, rates)
    }
}

impl Mechanism for RnaDegradation {
    fn name(&self) -> &str {
        self.template.name()
    }

    fn mechanism_type(&self) -> &str {
        self.template.mechanism_type()
    }

    fn update_species(
        &self,
        target: &MechanismTarget,
        options: &SpeciesOptions,
    ) -> Result<Vec<Species>, MechanismError> {
        let rna = substrate(self.template.name(), target)?;
        Ok(RnaDegradation::update_species(self, rna, options.include_enzyme))
    }

    fn update_reactions(
        &self,
        target: &MechanismTarget,
        parameters: &ParameterTable,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let rna = substrate(self.template.name(), target)?;
        let rates = catalysis_rates(parameters, "kdeg")?;
        RnaDegradation::update_reactions(self, rna, &rates, None)
    }
}
// endregion RNA Degradation

#[cfg(test)]
mod txtl_tests {
    use super::*;

    #[test]
    fn enzyme_arguments() {
        let transcription = Transcription::new("RNAP").unwrap();
        assert_eq!(transcription.rnap(), &Species::new("RNAP", "protein"));
        assert_eq!(Mechanism::name(&transcription), "transcription_mm");
        assert_eq!(transcription.mechanism_type(), "transcription");

        let translation = Translation::new("Ribo").unwrap();
        assert_eq!(translation.ribosome(), &Species::new("Ribo", "ribosome"));

        let degradation = RnaDegradation::new(Species::new("RNAase", "protein")).unwrap();
        assert_eq!(degradation.nuclease(), &Species::new("RNAase", "protein"));

        assert_eq!(
            Transcription::new("").unwrap_err(),
            MechanismError::EmptyEnzymeName
        );
        assert_eq!(Translation::new(String::new()).unwrap_err(), MechanismError::EmptyEnzymeName);
    }

    #[test]
    fn default_enzymes() {
        assert_eq!(
            Transcription::with_default_rnap().unwrap().rnap(),
            &Species::new("RNAP", "protein")
        );
        assert_eq!(
            Translation::with_default_ribosome().unwrap().ribosome(),
            &Species::new("Ribo", "ribosome")
        );
        assert_eq!(
            RnaDegradation::with_default_nuclease().unwrap().nuclease(),
            &Species::new("RNAase", "protein")
        );
    }

    #[test]
    fn transcription_species() {
        let dna = Species::new("ref", "dna");
        let transcription = Transcription::new("RNAP").unwrap();
        let species = transcription.update_species(&dna, true, true);
        assert_eq!(
            species,
            vec![
                Species::new("RNAP", "protein"),
                Species::new("dna_ref:protein_RNAP", "complex"),
                Species::new("ref", "rna"),
            ]
        );
        assert_eq!(transcription.update_species(&dna, false, false).len(), 1);
    }

    #[test]
    fn transcription_reactions() {
        let dna = Species::new("ref", "dna");
        let transcription = Transcription::new("RNAP").unwrap();
        let parameters = ParameterTable::new().with("ktx", 2.0);
        let reactions = Mechanism::update_reactions(
            &transcription,
            &MechanismTarget::Substrate(dna.clone()),
            &parameters,
        )
        .unwrap();
        assert_eq!(reactions.len(), 2);
        assert!((reactions[0].k() - 100.).abs() < 1e-12);
        assert!((reactions[0].k_rev().unwrap() - 10.).abs() < 1e-12);
        assert!((reactions[1].k() - 2.).abs() < 1e-12);
        assert_eq!(
            reactions[1].to_string(),
            "complex_dna_ref:protein_RNAP --> dna_ref + rna_ref + protein_RNAP  k_f=2"
        );
    }

    #[test]
    fn translation_reactions() {
        let rna = Species::new("ref", "rna");
        let translation = Translation::new("Ribo").unwrap();
        let reactions = translation
            .update_reactions(&rna, &CatalysisRates::new(100., 10., 1.5), None, None)
            .unwrap();
        assert_eq!(
            reactions[1].outputs(),
            &[rna.clone(), Species::new("ref", "protein"), Species::new("Ribo", "ribosome")]
        );
        let species = Mechanism::update_species(
            &translation,
            &MechanismTarget::Substrate(rna),
            &SpeciesOptions { include_enzyme: true, include_product: true },
        )
        .unwrap();
        assert_eq!(species.len(), 3);
    }

    #[test]
    fn degradation_reactions() {
        let rna = Species::new("ref", "rna");
        let degradation = RnaDegradation::new("RNAase").unwrap();
        let parameters = ParameterTable::new().with("kdeg", 5.0);
        let reactions = Mechanism::update_reactions(
            &degradation,
            &MechanismTarget::Substrate(rna.clone()),
            &parameters,
        )
        .unwrap();
        assert_eq!(
            reactions[1].to_string(),
            "complex_rna_ref:protein_RNAase --> protein_RNAase  k_f=5"
        );
        assert_eq!(degradation.update_species(&rna, true).len(), 2);
    }

    #[test]
    fn binding_targets_are_rejected() {
        let transcription = Transcription::new("RNAP").unwrap();
        let target = MechanismTarget::Binding {
            binder: Species::new("A", "protein"),
            bindee: Species::new("B", "dna"),
            cooperativity: 2,
        };
        let err = Mechanism::update_reactions(&transcription, &target, &ParameterTable::new())
            .unwrap_err();
        assert_eq!(
            err,
            MechanismError::UnsupportedTarget {
                mechanism: "transcription_mm".to_string(),
                target: "binding"
            }
        );
    }
}
