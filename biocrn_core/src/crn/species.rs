//! This module provides the Species struct representing a molecular species
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use thiserror::Error;

/// Represents a molecular species (DNA, RNA, protein, complex, ...)
///
/// Identity is structural: two species are equal if their name, type, and attribute set
/// all match. Attributes are stored as a sorted set, so the order they were supplied in
/// does not matter.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[builder(setter(into), build_fn(error = "SpeciesError"))]
pub struct Species {
    /// Name of the species
    name: String,
    /// Type of the species, such as "dna", "protein" or "complex"
    #[builder(default)]
    species_type: String,
    /// Attributes of the species
    #[builder(default, setter(custom))]
    attributes: BTreeSet<String>,
}

impl SpeciesBuilder {
    /// Add a single attribute to the species being built
    pub fn attribute<S: Into<String>>(&mut self, attribute: S) -> &mut Self {
        self.attributes
            .get_or_insert_with(BTreeSet::new)
            .insert(attribute.into());
        self
    }

    /// Add several attributes to the species being built
    pub fn attributes<I, S>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self.attributes.get_or_insert_with(BTreeSet::new);
        set.extend(attributes.into_iter().map(Into::into));
        self
    }
}

impl Species {
    /// Create a new species with no attributes
    ///
    /// # Examples
    /// ```rust
    /// use biocrn_core::crn::species::Species;
    /// let gene = Species::new("G", "dna");
    /// assert_eq!(gene.to_string(), "dna_G");
    /// ```
    pub fn new<N: Into<String>, T: Into<String>>(name: N, species_type: T) -> Species {
        Species {
            name: name.into(),
            species_type: species_type.into(),
            attributes: BTreeSet::new(),
        }
    }

    /// Create a new species with a set of attributes
    pub fn with_attributes<N, T, I, S>(name: N, species_type: T, attributes: I) -> Species
    where
        N: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Species {
            name: name.into(),
            species_type: species_type.into(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species_type(&self) -> &str {
        &self.species_type
    }

    pub fn attributes(&self) -> &BTreeSet<String> {
        &self.attributes
    }

    /// Whether the species carries the given attribute
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

    /// The `{type}_{name}` prefix used when deriving names of complexes
    pub(crate) fn qualified_name(&self) -> String {
        format!("{}_{}", self.species_type, self.name)
    }
}

impl Display for Species {
    /// Species are written as `type_name`, followed by `_attribute` for each attribute in
    /// sorted order. A species without a type is written as just its name.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.species_type.is_empty() {
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "{}_{}", self.species_type, self.name)?;
        }
        for attribute in &self.attributes {
            write!(f, "_{}", attribute)?;
        }
        Ok(())
    }
}

/// Errors which can occur while building a [`Species`]
#[derive(Debug, Error)]
pub enum SpeciesError {
    #[error("Species is missing a required field: {0}")]
    UninitializedField(&'static str),
}

impl From<derive_builder::UninitializedFieldError> for SpeciesError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        SpeciesError::UninitializedField(value.field_name())
    }
}
