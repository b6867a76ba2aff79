use super::coerce::{self, Categorical};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_QUANTITY: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    Honey,
    Beeswax,
    Propolis,
    #[serde(rename = "Royal Jelly")]
    RoyalJelly,
    #[serde(rename = "Bee Pollen")]
    BeePollen,
    Other,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Honey => "Honey",
            ProductType::Beeswax => "Beeswax",
            ProductType::Propolis => "Propolis",
            ProductType::RoyalJelly => "Royal Jelly",
            ProductType::BeePollen => "Bee Pollen",
            ProductType::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match coerce::normalize_label(s).as_str() {
            "honey" => Some(ProductType::Honey),
            "beeswax" | "wax" => Some(ProductType::Beeswax),
            "propolis" => Some(ProductType::Propolis),
            "royaljelly" => Some(ProductType::RoyalJelly),
            "beepollen" | "pollen" => Some(ProductType::BeePollen),
            "other" => Some(ProductType::Other),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn all() -> &'static [ProductType] {
        &[
            ProductType::Honey,
            ProductType::Beeswax,
            ProductType::Propolis,
            ProductType::RoyalJelly,
            ProductType::BeePollen,
            ProductType::Other,
        ]
    }
}

impl Categorical for ProductType {
    fn parse_label(s: &str) -> Option<Self> {
        Self::from_str(s)
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    Premium,
    Organic,
    Standard,
    Unspecified,
}

impl QualityGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::Premium => "Premium",
            QualityGrade::Organic => "Organic",
            QualityGrade::Standard => "Standard",
            QualityGrade::Unspecified => "Unspecified",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match coerce::normalize_label(s).as_str() {
            "premium" => Some(QualityGrade::Premium),
            "organic" => Some(QualityGrade::Organic),
            "standard" => Some(QualityGrade::Standard),
            "unspecified" => Some(QualityGrade::Unspecified),
            _ => None,
        }
    }
}

impl Categorical for QualityGrade {
    fn parse_label(s: &str) -> Option<Self> {
        Self::from_str(s)
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    G,
    Liters,
    Ml,
    Pieces,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::Liters => "liters",
            Unit::Ml => "ml",
            Unit::Pieces => "pieces",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match coerce::normalize_label(s).as_str() {
            "kg" | "kilograms" => Some(Unit::Kg),
            "g" | "grams" => Some(Unit::G),
            "liters" | "litres" | "l" => Some(Unit::Liters),
            "ml" => Some(Unit::Ml),
            "pieces" | "pcs" => Some(Unit::Pieces),
            _ => None,
        }
    }
}

impl Categorical for Unit {
    fn parse_label(s: &str) -> Option<Self> {
        Self::from_str(s)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A harvested product as entered by the beekeeper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub product_name: String,
    #[serde(default, deserialize_with = "coerce::lenient_category")]
    pub product_type: Option<ProductType>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::lenient_int")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "coerce::lenient_category")]
    pub unit: Option<Unit>,
    #[serde(default, deserialize_with = "coerce::lenient_float")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_date")]
    pub harvest_date: Option<NaiveDate>,
    /// Record date, used when no harvest date was given.
    #[serde(
        default,
        deserialize_with = "coerce::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "coerce::lenient_category")]
    pub quality_grade: Option<QualityGrade>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin_location: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_float",
        skip_serializing_if = "Option::is_none"
    )]
    pub moisture_content: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub wax_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pollen_source: Option<String>,
}

impl ProductSnapshot {
    pub fn quantity(&self) -> i64 {
        self.quantity.unwrap_or(DEFAULT_QUANTITY)
    }

    pub fn unit(&self) -> Unit {
        self.unit.unwrap_or_default()
    }

    /// Harvest month (1-12), falling back to the record date.
    pub fn harvest_month(&self) -> Option<u32> {
        self.harvest_date.or(self.date).map(|d| d.month())
    }

    pub fn origin_location(&self) -> Option<&str> {
        coerce::non_empty(&self.origin_location)
    }

    pub fn wax_color(&self) -> Option<&str> {
        coerce::non_empty(&self.wax_color)
    }

    pub fn pollen_source(&self) -> Option<&str> {
        coerce::non_empty(&self.pollen_source)
    }

    /// Fill the defaults applied when a product is first recorded: harvested
    /// today, Honey, ungraded.
    pub fn with_creation_defaults(mut self, today: NaiveDate) -> Self {
        self.harvest_date.get_or_insert(today);
        self.product_type.get_or_insert(ProductType::Honey);
        self.quality_grade.get_or_insert(QualityGrade::Unspecified);
        self.unit.get_or_insert(Unit::Kg);
        self
    }
}

#[cfg(test)]
impl ProductSnapshot {
    pub fn new(product_name: &str, product_type: ProductType, quantity: i64) -> Self {
        Self {
            product_name: product_name.to_string(),
            product_type: Some(product_type),
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    pub fn with_harvest_date(mut self, date: NaiveDate) -> Self {
        self.harvest_date = Some(date);
        self
    }

    pub fn with_quality(mut self, grade: QualityGrade) -> Self {
        self.quality_grade = Some(grade);
        self
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin_location = Some(origin.to_string());
        self
    }

    pub fn with_moisture(mut self, moisture: f64) -> Self {
        self.moisture_content = Some(moisture);
        self
    }

    pub fn with_wax_color(mut self, color: &str) -> Self {
        self.wax_color = Some(color.to_string());
        self
    }

    pub fn with_pollen_source(mut self, source: &str) -> Self {
        self.pollen_source = Some(source.to_string());
        self
    }
}

/// A stored product with its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub beekeeper: String,
    pub snapshot: ProductSnapshot,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_type_from_str_valid() {
        assert_eq!(ProductType::from_str("Honey"), Some(ProductType::Honey));
        assert_eq!(
            ProductType::from_str("Royal Jelly"),
            Some(ProductType::RoyalJelly)
        );
        assert_eq!(
            ProductType::from_str("bee-pollen"),
            Some(ProductType::BeePollen)
        );
    }

    #[test]
    fn product_type_from_str_invalid() {
        assert_eq!(ProductType::from_str("Mead"), None);
        assert_eq!(ProductType::from_str(""), None);
    }

    #[test]
    fn product_type_display_round_trip() {
        for product_type in ProductType::all() {
            assert_eq!(
                ProductType::from_str(product_type.as_str()),
                Some(*product_type),
                "Round-trip failed for {:?}",
                product_type
            );
        }
    }

    #[test]
    fn quality_grade_from_str() {
        assert_eq!(QualityGrade::from_str("premium"), Some(QualityGrade::Premium));
        assert_eq!(QualityGrade::from_str("ORGANIC"), Some(QualityGrade::Organic));
        assert_eq!(QualityGrade::from_str("gold"), None);
    }

    #[test]
    fn quantity_defaults_to_zero_on_garbage() {
        let product: ProductSnapshot =
            serde_json::from_str(r#"{"quantity": "lots", "productType": "Honey"}"#).unwrap();
        assert_eq!(product.quantity(), DEFAULT_QUANTITY);
        assert_eq!(product.product_type, Some(ProductType::Honey));
    }

    #[test]
    fn null_text_fields_read_as_absent() {
        let product: ProductSnapshot = serde_json::from_str(
            r#"{"productName": null, "originLocation": null, "waxColor": 5, "quantity": 120}"#,
        )
        .unwrap();
        assert_eq!(product.product_name, "");
        assert_eq!(product.origin_location(), None);
        assert_eq!(product.wax_color(), Some("5"));
        assert_eq!(product.quantity(), 120);
    }

    #[test]
    fn harvest_month_falls_back_to_record_date() {
        let mut product = ProductSnapshot::default();
        assert_eq!(product.harvest_month(), None);

        product.date = NaiveDate::from_ymd_opt(2024, 12, 2);
        assert_eq!(product.harvest_month(), Some(12));

        product.harvest_date = NaiveDate::from_ymd_opt(2024, 4, 20);
        assert_eq!(product.harvest_month(), Some(4));
    }

    #[test]
    fn blank_optional_text_is_absent() {
        let product: ProductSnapshot = serde_json::from_str(
            r#"{"originLocation": "", "waxColor": "  ", "pollenSource": "Clover"}"#,
        )
        .unwrap();
        assert_eq!(product.origin_location(), None);
        assert_eq!(product.wax_color(), None);
        assert_eq!(product.pollen_source(), Some("Clover"));
    }

    #[test]
    fn creation_defaults_keep_given_values() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let harvested = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        let product = ProductSnapshot::default().with_creation_defaults(today);
        assert_eq!(product.harvest_date, Some(today));
        assert_eq!(product.product_type, Some(ProductType::Honey));
        assert_eq!(product.quality_grade, Some(QualityGrade::Unspecified));

        let product = ProductSnapshot::new("Raw Wax", ProductType::Beeswax, 10)
            .with_harvest_date(harvested)
            .with_creation_defaults(today);
        assert_eq!(product.harvest_date, Some(harvested));
        assert_eq!(product.product_type, Some(ProductType::Beeswax));
    }
}
