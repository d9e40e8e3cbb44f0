//! Codon table assignments and the codon tables snpEff understands.
//!
//! The user supplies a small YAML mapping from contig name to codon table
//! name, with the special key `default` applying to every contig:
//!
//! ```text
//! {default: Bacterial_and_Plant_Plastid}
//! {chr1: Standard, chrM: Vertebrate_Mitochondrial}
//! ```
//!
//! Definitions for every recognised table are generated from the NCBI
//! translation tables so the temporary snpEff config is self-contained.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Mapping key that assigns a codon table to every contig
pub const WILDCARD_KEY: &str = "default";

#[derive(Error, Debug)]
pub enum CodonTableError {
    #[error("Could not parse coding table: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Contig (or [`WILDCARD_KEY`]) to codon table name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CodonTableMap {
    tables: BTreeMap<String, String>,
}

impl CodonTableMap {
    /// Parse a YAML mapping such as `{default: Standard}`.
    ///
    /// # Errors
    ///
    /// Returns `CodonTableError::Parse` if the text is not a mapping of
    /// strings to strings.
    pub fn parse(text: &str) -> Result<Self, CodonTableError> {
        tracing::debug!("Parsing the coding table");
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.tables.contains_key(WILDCARD_KEY)
    }

    #[must_use]
    pub fn contains(&self, contig: &str) -> bool {
        self.tables.contains_key(contig)
    }

    /// Table for a contig, falling back to the wildcard entry
    #[must_use]
    pub fn table_for(&self, contig: &str) -> Option<&str> {
        self.tables
            .get(contig)
            .or_else(|| self.tables.get(WILDCARD_KEY))
            .map(String::as_str)
    }

    /// Every table name referenced by the mapping, one per entry
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.values().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CodonTableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Codon tables recognised by snpEff
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum KnownCodonTable {
    AlternativeFlatwormMitochondrial,
    AlternativeYeastNuclear,
    AscidianMitochondrial,
    BacterialAndPlantPlastid,
    BlepharismaMacronuclear,
    ChlorophyceanMitochondrial,
    CiliateNuclear,
    Coelenterate,
    DasycladaceanNuclear,
    EchinodermMitochondrial,
    EuplotidNuclear,
    FlatwormMitochondrial,
    HexamitaNuclear,
    InvertebrateMitochondrial,
    Mitochondrial,
    MoldMitochondrial,
    Mycoplasma,
    ProtozoanMitochondrial,
    ScenedesmusObliquusMitochondrial,
    Spiroplasma,
    Standard,
    ThraustochytriumMitochondrial,
    TrematodeMitochondrial,
    VertebrateMitochondrial,
    YeastMitochondrial,
}

impl KnownCodonTable {
    pub const ALL: [Self; 25] = [
        Self::AlternativeFlatwormMitochondrial,
        Self::AlternativeYeastNuclear,
        Self::AscidianMitochondrial,
        Self::BacterialAndPlantPlastid,
        Self::BlepharismaMacronuclear,
        Self::ChlorophyceanMitochondrial,
        Self::CiliateNuclear,
        Self::Coelenterate,
        Self::DasycladaceanNuclear,
        Self::EchinodermMitochondrial,
        Self::EuplotidNuclear,
        Self::FlatwormMitochondrial,
        Self::HexamitaNuclear,
        Self::InvertebrateMitochondrial,
        Self::Mitochondrial,
        Self::MoldMitochondrial,
        Self::Mycoplasma,
        Self::ProtozoanMitochondrial,
        Self::ScenedesmusObliquusMitochondrial,
        Self::Spiroplasma,
        Self::Standard,
        Self::ThraustochytriumMitochondrial,
        Self::TrematodeMitochondrial,
        Self::VertebrateMitochondrial,
        Self::YeastMitochondrial,
    ];

    /// Name as written in snpEff configs and in the user's mapping
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AlternativeFlatwormMitochondrial => "Alternative_Flatworm_Mitochondrial",
            Self::AlternativeYeastNuclear => "Alternative_Yeast_Nuclear",
            Self::AscidianMitochondrial => "Ascidian_Mitochondrial",
            Self::BacterialAndPlantPlastid => "Bacterial_and_Plant_Plastid",
            Self::BlepharismaMacronuclear => "Blepharisma_Macronuclear",
            Self::ChlorophyceanMitochondrial => "Chlorophycean_Mitochondrial",
            Self::CiliateNuclear => "Ciliate_Nuclear",
            Self::Coelenterate => "Coelenterate",
            Self::DasycladaceanNuclear => "Dasycladacean_Nuclear",
            Self::EchinodermMitochondrial => "Echinoderm_Mitochondrial",
            Self::EuplotidNuclear => "Euplotid_Nuclear",
            Self::FlatwormMitochondrial => "Flatworm_Mitochondrial",
            Self::HexamitaNuclear => "Hexamita_Nuclear",
            Self::InvertebrateMitochondrial => "Invertebrate_Mitochondrial",
            Self::Mitochondrial => "Mitochondrial",
            Self::MoldMitochondrial => "Mold_Mitochondrial",
            Self::Mycoplasma => "Mycoplasma",
            Self::ProtozoanMitochondrial => "Protozoan_Mitochondrial",
            Self::ScenedesmusObliquusMitochondrial => "Scenedesmus_obliquus_Mitochondrial",
            Self::Spiroplasma => "Spiroplasma",
            Self::Standard => "Standard",
            Self::ThraustochytriumMitochondrial => "Thraustochytrium_Mitochondrial",
            Self::TrematodeMitochondrial => "Trematode_Mitochondrial",
            Self::VertebrateMitochondrial => "Vertebrate_Mitochondrial",
            Self::YeastMitochondrial => "Yeast_Mitochondrial",
        }
    }

    /// NCBI translation table number
    #[must_use]
    pub fn ncbi_id(self) -> u8 {
        match self {
            Self::Standard => 1,
            Self::VertebrateMitochondrial | Self::Mitochondrial => 2,
            Self::YeastMitochondrial => 3,
            Self::MoldMitochondrial
            | Self::ProtozoanMitochondrial
            | Self::Coelenterate
            | Self::Mycoplasma
            | Self::Spiroplasma => 4,
            Self::InvertebrateMitochondrial => 5,
            Self::CiliateNuclear | Self::DasycladaceanNuclear | Self::HexamitaNuclear => 6,
            Self::EchinodermMitochondrial | Self::FlatwormMitochondrial => 9,
            Self::EuplotidNuclear => 10,
            Self::BacterialAndPlantPlastid => 11,
            Self::AlternativeYeastNuclear => 12,
            Self::AscidianMitochondrial => 13,
            Self::AlternativeFlatwormMitochondrial => 14,
            Self::BlepharismaMacronuclear => 15,
            Self::ChlorophyceanMitochondrial => 16,
            Self::TrematodeMitochondrial => 21,
            Self::ScenedesmusObliquusMitochondrial => 22,
            Self::ThraustochytriumMitochondrial => 23,
        }
    }

    /// Amino acids for the 64 codons in TCAG order, and the space-separated
    /// start codons
    fn translation(self) -> (&'static str, &'static str) {
        match self.ncbi_id() {
            2 => (
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG",
                "ATT ATC ATA ATG GTG",
            ),
            3 => (
                "FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "ATA ATG",
            ),
            4 => (
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "TTA TTG CTG ATT ATC ATA ATG GTG",
            ),
            5 => (
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG",
                "TTG ATT ATC ATA ATG GTG",
            ),
            6 => (
                "FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "ATG",
            ),
            9 => (
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
                "ATG GTG",
            ),
            10 => (
                "FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "ATG",
            ),
            11 => (
                "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "TTG CTG ATT ATC ATA ATG GTG",
            ),
            12 => (
                "FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "CTG ATG",
            ),
            13 => (
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG",
                "TTG ATA ATG GTG",
            ),
            14 => (
                "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
                "ATG",
            ),
            15 => (
                "FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "ATG",
            ),
            16 => (
                "FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "ATG",
            ),
            21 => (
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
                "ATG GTG",
            ),
            22 => (
                "FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "ATG",
            ),
            23 => (
                "FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "ATT ATG GTG",
            ),
            _ => (
                "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                "TTG CTG ATG",
            ),
        }
    }

    /// Codon list in snpEff syntax: `TTT/F, TTC/F, ..., ATG/M+, ...`
    ///
    /// `+` marks a start codon, `*` a stop codon.
    #[must_use]
    pub fn snpeff_codons(self) -> String {
        const BASES: [char; 4] = ['T', 'C', 'A', 'G'];

        let (amino_acids, starts) = self.translation();
        let mut codons = Vec::with_capacity(64);
        for (i, aa) in amino_acids.chars().enumerate() {
            let codon: String = [BASES[i / 16], BASES[(i / 4) % 4], BASES[i % 4]]
                .iter()
                .collect();
            let start = if starts.split(' ').any(|s| s == codon) { "+" } else { "" };
            codons.push(format!("{codon}/{aa}{start}"));
        }
        codons.join(", ")
    }
}

impl fmt::Display for KnownCodonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KnownCodonTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Whether snpEff knows a codon table by this exact name
#[must_use]
pub fn is_known_codon_table(name: &str) -> bool {
    name.parse::<KnownCodonTable>().is_ok()
}
