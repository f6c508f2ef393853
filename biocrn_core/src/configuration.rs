use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Process wide defaults used by mechanisms and writers
#[derive(Clone, Debug)]
pub struct Configuration {
    /// Default binding rate of enzyme-substrate complexes
    pub kb: f64,
    /// Default unbinding rate of enzyme-substrate complexes
    pub ku: f64,
    /// Default catalytic rate of the generic Michaelis-Menten templates
    pub kcat: f64,
    /// Default transcription rate
    pub ktx: f64,
    /// Default translation rate
    pub ktl: f64,
    /// Default mRNA degradation rate
    pub kdeg: f64,
    /// Name and type of the default RNA polymerase
    pub rnap: (String, String),
    /// Name and type of the default ribosome
    pub ribosome: (String, String),
    /// Name and type of the default RNA nuclease
    pub nuclease: (String, String),
    /// Id of the single compartment written to SBML documents
    pub compartment_id: String,
    /// Volume of the SBML compartment (litres)
    pub compartment_volume: f64,
    /// Initial concentration given to every SBML species
    pub initial_concentration: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            kb: 100.,
            ku: 10.,
            kcat: 1.,
            ktx: 1.,
            ktl: 1.,
            kdeg: 1.,
            rnap: ("RNAP".to_string(), "protein".to_string()),
            ribosome: ("Ribo".to_string(), "ribosome".to_string()),
            nuclease: ("RNAase".to_string(), "protein".to_string()),
            compartment_id: "default".to_string(),
            compartment_volume: 1e-6,
            initial_concentration: 0.,
        }
    }
}

impl Configuration {
    /// Snapshot of the current global configuration
    pub fn current() -> Configuration {
        match CONFIGURATION.read() {
            Ok(config) => config.clone(),
            // A writer panicked while holding the lock, the data itself is still usable
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Default rate for a rate constant symbol, if one is known
    pub fn default_rate(&self, symbol: &str) -> Option<f64> {
        match symbol {
            "kb" | "kb1" | "kb2" => Some(self.kb),
            "ku" | "ku1" | "ku2" => Some(self.ku),
            "kcat" => Some(self.kcat),
            "ktx" => Some(self.ktx),
            "ktl" => Some(self.ktl),
            "kdeg" => Some(self.kdeg),
            _ => None,
        }
    }
}
