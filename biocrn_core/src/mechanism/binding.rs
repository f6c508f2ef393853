//! Cooperative binding mechanisms
//!
//! - [`OneStepCooperativeBinding`]: `n binder + bindee <--> complex`
//! - [`TwoStepCooperativeBinding`]: `n binder <--> n-mer`, then `n-mer + bindee <--> complex`
use crate::crn::parameters::ParameterTable;
use crate::crn::reaction::Reaction;
use crate::crn::species::Species;
use crate::mechanism::{
    rate, Mechanism, MechanismError, MechanismInfo, MechanismTarget, SpeciesOptions,
};

/// Extract the binding participants of a target, or fail for substrate targets
fn binding_target<'a>(
    mechanism: &str,
    target: &'a MechanismTarget,
) -> Result<(&'a Species, &'a Species, u32), MechanismError> {
    match target {
        MechanismTarget::Binding {
            binder,
            bindee,
            cooperativity,
        } => Ok((binder, bindee, *cooperativity)),
        other => Err(MechanismError::UnsupportedTarget {
            mechanism: mechanism.to_string(),
            target: other.kind(),
        }),
    }
}

fn check_cooperativity(cooperativity: u32) -> Result<(), MechanismError> {
    if cooperativity == 0 {
        return Err(MechanismError::InvalidCooperativity);
    }
    Ok(())
}

// region One Step
/// Binding of `n` binders to a bindee in a single step
#[derive(Clone, Debug, PartialEq)]
pub struct OneStepCooperativeBinding {
    info: MechanismInfo,
}

impl Default for OneStepCooperativeBinding {
    fn default() -> Self {
        OneStepCooperativeBinding::new("one_step_cooperative_binding", "cooperative_binding")
    }
}

impl OneStepCooperativeBinding {
    pub fn new<N: Into<String>, T: Into<String>>(name: N, mechanism_type: T) -> Self {
        OneStepCooperativeBinding {
            info: MechanismInfo::new(name, mechanism_type),
        }
    }

    /// The bound complex, `{binder type}_{n}x_{binder name}:{bindee type}_{bindee name}`
    pub fn complex(binder: &Species, bindee: &Species, cooperativity: u32) -> Species {
        Species::new(
            format!(
                "{}_{}x_{}:{}",
                binder.species_type(),
                cooperativity,
                binder.name(),
                bindee.qualified_name()
            ),
            "complex",
        )
    }

    pub fn update_species(
        &self,
        binder: &Species,
        bindee: &Species,
        cooperativity: u32,
    ) -> Result<Vec<Species>, MechanismError> {
        check_cooperativity(cooperativity)?;
        Ok(vec![OneStepCooperativeBinding::complex(binder, bindee, cooperativity)])
    }

    /// `cooperativity binder + bindee <--> complex` with forward rate `kb` and reverse `ku`
    pub fn update_reactions(
        &self,
        binder: &Species,
        bindee: &Species,
        kb: f64,
        ku: f64,
        cooperativity: u32,
    ) -> Result<Vec<Reaction>, MechanismError> {
        check_cooperativity(cooperativity)?;
        let complex = OneStepCooperativeBinding::complex(binder, bindee, cooperativity);
        // A species binding to itself is a single input with one extra copy
        let (inputs, input_coefs) = if binder == bindee {
            (vec![binder.clone()], vec![cooperativity + 1])
        } else {
            (vec![binder.clone(), bindee.clone()], vec![cooperativity, 1])
        };
        let binding = Reaction::from_parts(
            inputs,
            vec![complex],
            kb,
            Some(ku),
            Some(input_coefs),
            Some(vec![1]),
        )?;
        Ok(vec![binding])
    }
}

impl Mechanism for OneStepCooperativeBinding {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn mechanism_type(&self) -> &str {
        &self.info.mechanism_type
    }

    fn update_species(
        &self,
        target: &MechanismTarget,
        _options: &SpeciesOptions,
    ) -> Result<Vec<Species>, MechanismError> {
        let (binder, bindee, cooperativity) = binding_target(&self.info.name, target)?;
        OneStepCooperativeBinding::update_species(self, binder, bindee, cooperativity)
    }

    fn update_reactions(
        &self,
        target: &MechanismTarget,
        parameters: &ParameterTable,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let (binder, bindee, cooperativity) = binding_target(&self.info.name, target)?;
        OneStepCooperativeBinding::update_reactions(
            self,
            binder,
            bindee,
            rate(parameters, "kb")?,
            rate(parameters, "ku")?,
            cooperativity,
        )
    }
}
// endregion One Step

// region Two Step
/// Binding of `n` binders to a bindee, by first forming an n-mer of the binder
#[derive(Clone, Debug, PartialEq)]
pub struct TwoStepCooperativeBinding {
    info: MechanismInfo,
}

impl Default for TwoStepCooperativeBinding {
    fn default() -> Self {
        TwoStepCooperativeBinding::new("two_step_cooperative_binding", "cooperative_binding")
    }
}

impl TwoStepCooperativeBinding {
    pub fn new<N: Into<String>, T: Into<String>>(name: N, mechanism_type: T) -> Self {
        TwoStepCooperativeBinding {
            info: MechanismInfo::new(name, mechanism_type),
        }
    }

    /// The n-mer of the binder, `{n}x_{binder name}`
    ///
    /// Named after the binder rather than the bindee, so that different binders of the same
    /// bindee form distinct n-mers.
    pub fn n_mer(binder: &Species, cooperativity: u32) -> Species {
        Species::new(format!("{}x_{}", cooperativity, binder.name()), "complex")
    }

    /// The bound complex, `{binder type}_{n-mer name}:{bindee type}_{bindee name}`
    pub fn complex(binder: &Species, bindee: &Species, cooperativity: u32) -> Species {
        let n_mer = TwoStepCooperativeBinding::n_mer(binder, cooperativity);
        Species::new(
            format!(
                "{}_{}:{}",
                binder.species_type(),
                n_mer.name(),
                bindee.qualified_name()
            ),
            "complex",
        )
    }

    /// The complex followed by the n-mer
    pub fn update_species(
        &self,
        binder: &Species,
        bindee: &Species,
        cooperativity: u32,
    ) -> Result<Vec<Species>, MechanismError> {
        check_cooperativity(cooperativity)?;
        Ok(vec![
            TwoStepCooperativeBinding::complex(binder, bindee, cooperativity),
            TwoStepCooperativeBinding::n_mer(binder, cooperativity),
        ])
    }

    /// Returns the reactions
    /// - `cooperativity binder <--> n-mer` with rates `kb[0]`, `ku[0]`
    /// - `n-mer + bindee <--> complex` with rates `kb[1]`, `ku[1]`
    ///
    /// `kb` and `ku` must hold exactly two rates each.
    pub fn update_reactions(
        &self,
        binder: &Species,
        bindee: &Species,
        kb: &[f64],
        ku: &[f64],
        cooperativity: u32,
    ) -> Result<Vec<Reaction>, MechanismError> {
        for (parameter, rates) in [("kb", kb), ("ku", ku)] {
            if rates.len() != 2 {
                return Err(MechanismError::RateListLength {
                    mechanism: self.info.name.clone(),
                    parameter,
                    expected: 2,
                    found: rates.len(),
                });
            }
        }
        check_cooperativity(cooperativity)?;
        let n_mer = TwoStepCooperativeBinding::n_mer(binder, cooperativity);
        let complex = TwoStepCooperativeBinding::complex(binder, bindee, cooperativity);
        let multimerization = Reaction::from_parts(
            vec![binder.clone()],
            vec![n_mer.clone()],
            kb[0],
            Some(ku[0]),
            Some(vec![cooperativity]),
            Some(vec![1]),
        )?;
        let binding =
            Reaction::new_reversible(vec![n_mer, bindee.clone()], vec![complex], kb[1], ku[1])?;
        Ok(vec![multimerization, binding])
    }
}

impl Mechanism for TwoStepCooperativeBinding {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn mechanism_type(&self) -> &str {
        &self.info.mechanism_type
    }

    fn update_species(
        &self,
        target: &MechanismTarget,
        _options: &SpeciesOptions,
    ) -> Result<Vec<Species>, MechanismError> {
        let (binder, bindee, cooperativity) = binding_target(&self.info.name, target)?;
        TwoStepCooperativeBinding::update_species(self, binder, bindee, cooperativity)
    }

    /// Rates are read from `kb1`, `kb2`, `ku1` and `ku2`
    fn update_reactions(
        &self,
        target: &MechanismTarget,
        parameters: &ParameterTable,
    ) -> Result<Vec<Reaction>, MechanismError> {
        let (binder, bindee, cooperativity) = binding_target(&self.info.name, target)?;
        let kb = [rate(parameters, "kb1")?, rate(parameters, "kb2")?];
        let ku = [rate(parameters, "ku1")?, rate(parameters, "ku2")?];
        TwoStepCooperativeBinding::update_reactions(self, binder, bindee, &kb, &ku, cooperativity)
    }
}
// endregion Two Step
