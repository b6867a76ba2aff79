use super::coerce::{self, Categorical};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_STRENGTH: i64 = 5;
pub const DEFAULT_POPULATION: i64 = 20_000;
pub const DEFAULT_HONEY_STORES: i64 = 5;
pub const DEFAULT_PEST_LEVEL: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueenStatus {
    Present,
    #[serde(rename = "Not Present")]
    NotPresent,
    Unknown,
}

impl QueenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueenStatus::Present => "Present",
            QueenStatus::NotPresent => "Not Present",
            QueenStatus::Unknown => "Unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match coerce::normalize_label(s).as_str() {
            "present" => Some(QueenStatus::Present),
            "notpresent" | "absent" | "queenless" => Some(QueenStatus::NotPresent),
            "unknown" => Some(QueenStatus::Unknown),
            _ => None,
        }
    }
}

impl Categorical for QueenStatus {
    fn parse_label(s: &str) -> Option<Self> {
        Self::from_str(s)
    }
}

impl std::fmt::Display for QueenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroodPattern {
    Solid,
    Spotty,
    None,
    Other,
}

impl BroodPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroodPattern::Solid => "Solid",
            BroodPattern::Spotty => "Spotty",
            BroodPattern::None => "None",
            BroodPattern::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match coerce::normalize_label(s).as_str() {
            "solid" => Some(BroodPattern::Solid),
            "spotty" => Some(BroodPattern::Spotty),
            "none" => Some(BroodPattern::None),
            "other" => Some(BroodPattern::Other),
            _ => None,
        }
    }
}

impl Categorical for BroodPattern {
    fn parse_label(s: &str) -> Option<Self> {
        Self::from_str(s)
    }
}

impl std::fmt::Display for BroodPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Disease and pest signs recorded at inspection. Ordering follows the
/// declaration order, which is also the order advisories are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiseaseSign {
    VarroaMites,
    AmericanFoulbrood,
    EuropeanFoulbrood,
    Nosema,
    WaxMoths,
    SmallHiveBeetles,
}

impl DiseaseSign {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseSign::VarroaMites => "Varroa Mites",
            DiseaseSign::AmericanFoulbrood => "American Foulbrood",
            DiseaseSign::EuropeanFoulbrood => "European Foulbrood",
            DiseaseSign::Nosema => "Nosema",
            DiseaseSign::WaxMoths => "Wax Moths",
            DiseaseSign::SmallHiveBeetles => "Small Hive Beetles",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match coerce::normalize_label(s).as_str() {
            "varroamites" | "varroa" => Some(DiseaseSign::VarroaMites),
            "americanfoulbrood" | "afb" => Some(DiseaseSign::AmericanFoulbrood),
            "europeanfoulbrood" | "efb" => Some(DiseaseSign::EuropeanFoulbrood),
            "nosema" => Some(DiseaseSign::Nosema),
            "waxmoths" | "waxmoth" => Some(DiseaseSign::WaxMoths),
            "smallhivebeetles" | "smallhivebeetle" | "shb" => Some(DiseaseSign::SmallHiveBeetles),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn all() -> &'static [DiseaseSign] {
        &[
            DiseaseSign::VarroaMites,
            DiseaseSign::AmericanFoulbrood,
            DiseaseSign::EuropeanFoulbrood,
            DiseaseSign::Nosema,
            DiseaseSign::WaxMoths,
            DiseaseSign::SmallHiveBeetles,
        ]
    }

    pub fn is_foulbrood(&self) -> bool {
        matches!(
            self,
            DiseaseSign::AmericanFoulbrood | DiseaseSign::EuropeanFoulbrood
        )
    }

    pub fn is_hive_pest(&self) -> bool {
        matches!(self, DiseaseSign::WaxMoths | DiseaseSign::SmallHiveBeetles)
    }
}

impl std::fmt::Display for DiseaseSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub treatment_type: String,
    #[serde(default, deserialize_with = "coerce::lenient_date")]
    pub application_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

#[cfg(test)]
impl Treatment {
    pub fn new(treatment_type: &str, application_date: NaiveDate) -> Self {
        Self {
            treatment_type: treatment_type.to_string(),
            application_date: Some(application_date),
            notes: None,
        }
    }
}

/// Point-in-time inspection record for one hive.
///
/// Numeric fields hold `None` when the input was missing or not a number;
/// the accessors fall back to the `DEFAULT_*` constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSnapshot {
    #[serde(
        default,
        deserialize_with = "coerce::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub hive_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub hive_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub installation_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_inspection: Option<NaiveDate>,

    #[serde(default, deserialize_with = "coerce::lenient_int")]
    pub strength: Option<i64>,
    #[serde(default, deserialize_with = "coerce::lenient_category")]
    pub queen_status: Option<QueenStatus>,
    #[serde(default, deserialize_with = "coerce::lenient_category")]
    pub brood_pattern: Option<BroodPattern>,
    #[serde(default, deserialize_with = "coerce::lenient_int")]
    pub population: Option<i64>,
    #[serde(default, deserialize_with = "coerce::lenient_int")]
    pub honey_stores: Option<i64>,
    #[serde(default, deserialize_with = "coerce::lenient_int")]
    pub pest_level: Option<i64>,
    #[serde(default, deserialize_with = "coerce::lenient_strings")]
    pub disease_signs: Vec<String>,
    #[serde(default, deserialize_with = "coerce::lenient_list")]
    pub treatments: Vec<Treatment>,
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub location: String,
}

impl HiveSnapshot {
    pub fn strength(&self) -> i64 {
        self.strength.unwrap_or(DEFAULT_STRENGTH)
    }

    pub fn population(&self) -> i64 {
        self.population.unwrap_or(DEFAULT_POPULATION)
    }

    pub fn honey_stores(&self) -> i64 {
        self.honey_stores.unwrap_or(DEFAULT_HONEY_STORES)
    }

    pub fn pest_level(&self) -> i64 {
        self.pest_level.unwrap_or(DEFAULT_PEST_LEVEL)
    }

    /// Recognized disease signs as a set; unknown labels are dropped.
    pub fn diseases(&self) -> BTreeSet<DiseaseSign> {
        self.disease_signs
            .iter()
            .filter_map(|s| DiseaseSign::from_str(s))
            .collect()
    }
}

#[cfg(test)]
impl HiveSnapshot {
    pub fn with_strength(mut self, strength: i64) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn with_queen_status(mut self, status: QueenStatus) -> Self {
        self.queen_status = Some(status);
        self
    }

    pub fn with_brood_pattern(mut self, pattern: BroodPattern) -> Self {
        self.brood_pattern = Some(pattern);
        self
    }

    pub fn with_population(mut self, population: i64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_honey_stores(mut self, stores: i64) -> Self {
        self.honey_stores = Some(stores);
        self
    }

    pub fn with_pest_level(mut self, level: i64) -> Self {
        self.pest_level = Some(level);
        self
    }

    pub fn with_disease(mut self, sign: DiseaseSign) -> Self {
        self.disease_signs.push(sign.as_str().to_string());
        self
    }

    pub fn with_treatment(mut self, treatment: Treatment) -> Self {
        self.treatments.push(treatment);
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }
}

/// A stored hive with its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hive {
    pub id: String,
    pub beekeeper: String,
    pub snapshot: HiveSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Hive ids are `H` followed by a zero-padded sequence number.
pub fn format_hive_id(sequence: u32) -> String {
    format!("H{:04}", sequence)
}

pub fn parse_hive_sequence(id: &str) -> Option<u32> {
    id.strip_prefix('H')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queen_status_from_str_valid() {
        assert_eq!(QueenStatus::from_str("Present"), Some(QueenStatus::Present));
        assert_eq!(
            QueenStatus::from_str("Not Present"),
            Some(QueenStatus::NotPresent)
        );
        assert_eq!(
            QueenStatus::from_str("not-present"),
            Some(QueenStatus::NotPresent)
        );
        assert_eq!(QueenStatus::from_str("UNKNOWN"), Some(QueenStatus::Unknown));
    }

    #[test]
    fn queen_status_from_str_invalid() {
        assert_eq!(QueenStatus::from_str("Maybe"), None);
        assert_eq!(QueenStatus::from_str(""), None);
    }

    #[test]
    fn brood_pattern_from_str() {
        assert_eq!(BroodPattern::from_str("Spotty"), Some(BroodPattern::Spotty));
        assert_eq!(BroodPattern::from_str("none"), Some(BroodPattern::None));
        assert_eq!(BroodPattern::from_str("patchy"), None);
    }

    #[test]
    fn disease_sign_display_round_trip() {
        for sign in DiseaseSign::all() {
            assert_eq!(
                DiseaseSign::from_str(sign.as_str()),
                Some(*sign),
                "Round-trip failed for {:?}",
                sign
            );
        }
    }

    #[test]
    fn snapshot_defaults_when_fields_missing() {
        let hive: HiveSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(hive.strength(), DEFAULT_STRENGTH);
        assert_eq!(hive.population(), DEFAULT_POPULATION);
        assert_eq!(hive.honey_stores(), DEFAULT_HONEY_STORES);
        assert_eq!(hive.pest_level(), DEFAULT_PEST_LEVEL);
        assert!(hive.queen_status.is_none());
        assert!(hive.diseases().is_empty());
        assert!(hive.location.is_empty());
    }

    #[test]
    fn snapshot_tolerates_malformed_input() {
        let hive: HiveSnapshot = serde_json::from_str(
            r#"{
                "strength": "strong",
                "population": "12000 bees",
                "honeyStores": null,
                "pestLevel": 6.8,
                "queenStatus": "Sleeping",
                "broodPattern": 4,
                "diseaseSigns": ["Nosema", "Chalkbrood", 3],
                "treatments": [{"treatmentType": "Oxalic acid", "applicationDate": "soon"}]
            }"#,
        )
        .unwrap();

        assert_eq!(hive.strength(), DEFAULT_STRENGTH);
        assert_eq!(hive.population(), 12_000);
        assert_eq!(hive.honey_stores(), DEFAULT_HONEY_STORES);
        assert_eq!(hive.pest_level(), 6);
        assert!(hive.queen_status.is_none());
        assert!(hive.brood_pattern.is_none());
        assert_eq!(hive.disease_signs, vec!["Nosema", "Chalkbrood"]);
        assert_eq!(
            hive.diseases().into_iter().collect::<Vec<_>>(),
            vec![DiseaseSign::Nosema]
        );
        assert_eq!(hive.treatments[0].application_date, None);
    }

    #[test]
    fn null_text_and_list_fields_read_as_empty() {
        let hive: HiveSnapshot =
            serde_json::from_str(r#"{"strength": 2, "location": null, "hiveName": null}"#).unwrap();
        assert_eq!(hive.strength(), 2);
        assert!(hive.location.is_empty());
        assert!(hive.hive_name.is_none());

        let hive: HiveSnapshot = serde_json::from_str(r#"{"treatments": null}"#).unwrap();
        assert!(hive.treatments.is_empty());

        let hive: HiveSnapshot = serde_json::from_str(r#"{"treatments": "none"}"#).unwrap();
        assert!(hive.treatments.is_empty());
    }

    #[test]
    fn treatment_with_null_type_keeps_its_date() {
        let hive: HiveSnapshot = serde_json::from_str(
            r#"{"treatments": [{"treatmentType": null, "applicationDate": "2024-06-01"}, 7]}"#,
        )
        .unwrap();
        assert_eq!(hive.treatments.len(), 1);
        assert_eq!(hive.treatments[0].treatment_type, "");
        assert_eq!(
            hive.treatments[0].application_date,
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
    }

    #[test]
    fn snapshot_serialization_round_trips_categories() {
        let hive = HiveSnapshot::default()
            .with_queen_status(QueenStatus::NotPresent)
            .with_brood_pattern(BroodPattern::None);
        let json = serde_json::to_string(&hive).unwrap();
        assert!(json.contains("\"queenStatus\":\"Not Present\""));

        let parsed: HiveSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hive);
    }

    #[test]
    fn hive_id_format() {
        assert_eq!(format_hive_id(1), "H0001");
        assert_eq!(format_hive_id(42), "H0042");
        assert_eq!(format_hive_id(12345), "H12345");
        assert_eq!(parse_hive_sequence("H0042"), Some(42));
        assert_eq!(parse_hive_sequence("X0042"), None);
    }
}
