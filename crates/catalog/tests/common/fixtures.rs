//! Catalog fixtures.
//!
//! [`sample_catalog`] is a small but realistic slice of the repository: a
//! three-level RiPP hierarchy, a few NRPS/PKS clusters and a mix of
//! producing organisms.

use std::io::Write;

use serde_json::{Value, json};
use tempfile::NamedTempFile;

/// Builder for a single catalog entry.
#[derive(Debug, Clone)]
pub struct EntryFixture {
    id: u64,
    classes: Vec<String>,
    compounds: Vec<String>,
    completeness: Option<String>,
    minimal: bool,
    lineage: [String; 7],
    organism: String,
}

impl EntryFixture {
    /// Creates an entry with accession `BGC` + zero-padded id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            classes: Vec::new(),
            compounds: Vec::new(),
            completeness: None,
            minimal: false,
            lineage: Default::default(),
            organism: String::new(),
        }
    }

    /// Sets the BGC type terms.
    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Sets the compound names.
    pub fn with_compounds(mut self, compounds: &[&str]) -> Self {
        self.compounds = compounds.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Sets locus completeness.
    pub fn with_completeness(mut self, completeness: &str) -> Self {
        self.completeness = Some(completeness.to_string());
        self
    }

    /// Marks the entry as minimal.
    pub fn minimal(mut self) -> Self {
        self.minimal = true;
        self
    }

    /// Sets the lineage from superkingdom down to species, and the organism name.
    pub fn with_taxonomy(mut self, lineage: [&str; 7], organism: &str) -> Self {
        self.lineage = lineage.map(String::from);
        self.organism = organism.to_string();
        self
    }

    /// The entry as catalog JSON.
    pub fn build(&self) -> Value {
        let [superkingdom, phylum, class, order, family, genus, species] = &self.lineage;
        json!({
            "id": self.id,
            "accession": format!("BGC{:07}", self.id),
            "minimal": self.minimal,
            "completeness": self.completeness,
            "biosyn_classes": self.classes,
            "compounds": self.compounds,
            "taxonomy": {
                "superkingdom": superkingdom,
                "phylum": phylum,
                "class": class,
                "order": order,
                "family": family,
                "genus": genus,
                "species": species,
                "name": self.organism,
            }
        })
    }
}

const STREPTOMYCES: [&str; 7] = [
    "Bacteria",
    "Actinobacteria",
    "Actinomycetia",
    "Streptomycetales",
    "Streptomycetaceae",
    "Streptomyces",
    "coelicolor",
];

const LACTOCOCCUS: [&str; 7] = [
    "Bacteria",
    "Firmicutes",
    "Bacilli",
    "Lactobacillales",
    "Streptococcaceae",
    "Lactococcus",
    "lactis",
];

const BACILLUS: [&str; 7] = [
    "Bacteria",
    "Firmicutes",
    "Bacilli",
    "Bacillales",
    "Bacillaceae",
    "Bacillus",
    "subtilis",
];

/// The BGC type hierarchy used by [`sample_catalog`].
pub fn sample_types() -> Value {
    json!([
        {"term": "ripp", "name": "RiPP", "description": "Ribosomally synthesized and post-translationally modified peptide", "css_class": "ripp", "parent": null},
        {"term": "lanthipeptide", "name": "Lanthipeptide", "description": "Lanthipeptide", "css_class": "ripp", "parent": "ripp"},
        {"term": "lantibiotic", "name": "Lantibiotic", "description": "Antibacterial lanthipeptide", "css_class": "ripp", "parent": "lanthipeptide"},
        {"term": "nrps", "name": "NRP", "description": "Nonribosomal peptide", "css_class": "nrps", "parent": null},
        {"term": "pks", "name": "Polyketide", "description": "Polyketide", "css_class": "pks", "parent": null},
        {"term": "terpene", "name": "Terpene", "description": "Terpene", "css_class": "terpene", "parent": null}
    ])
}

/// Entries used by [`sample_catalog`].
pub fn sample_entries() -> Vec<EntryFixture> {
    vec![
        EntryFixture::new(1070)
            .with_classes(&["nrps"])
            .with_compounds(&["calcium-dependent antibiotic"])
            .with_completeness("complete")
            .with_taxonomy(STREPTOMYCES, "Streptomyces coelicolor A3(2)"),
        EntryFixture::new(535)
            .with_classes(&["lantibiotic"])
            .with_compounds(&["nisin A"])
            .with_completeness("complete")
            .with_taxonomy(LACTOCOCCUS, "Lactococcus lactis"),
        EntryFixture::new(12)
            .with_classes(&["pks", "nrps"])
            .with_compounds(&["actinorhodin"])
            .with_completeness("incomplete")
            .minimal()
            .with_taxonomy(STREPTOMYCES, "Streptomyces coelicolor A3(2)"),
        EntryFixture::new(600)
            .with_classes(&["lanthipeptide"])
            .with_compounds(&["subtilin", "succinylated subtilin"])
            .with_taxonomy(BACILLUS, "Bacillus subtilis ATCC 6633"),
        EntryFixture::new(88)
            .with_classes(&["pks"])
            .with_compounds(&["erythromycin A"])
            .with_completeness("complete")
            .with_taxonomy(
                [
                    "Bacteria",
                    "Actinobacteria",
                    "Actinomycetia",
                    "Pseudonocardiales",
                    "Pseudonocardiaceae",
                    "Saccharopolyspora",
                    "erythraea",
                ],
                "Saccharopolyspora erythraea NRRL 2338",
            ),
    ]
}

/// The full sample catalog document.
pub fn sample_catalog() -> Value {
    json!({
        "bgc_types": sample_types(),
        "entries": sample_entries().iter().map(EntryFixture::build).collect::<Vec<_>>(),
    })
}

/// Writes `document` to a temporary file that lives as long as the handle.
pub fn write_catalog(document: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(document.to_string().as_bytes())
        .expect("Failed to write catalog");
    file.flush().expect("Failed to flush catalog");
    file
}
