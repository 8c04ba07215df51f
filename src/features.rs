//! Feature record assembly from raw form inputs.
//!
//! The record mirrors the training-time schema: eleven numeric usage
//! metrics, four categorical fields, and one derived missing-data indicator
//! appended with a constant placeholder. Assembly performs no validation
//! beyond what the input widgets already constrain.

/// Column names of the assembled record, in assembly order.
pub const ASSEMBLED_COLUMNS: [&str; 16] = [
    "MONTANT",
    "FREQUENCE_RECH",
    "REVENUE",
    "ARPU_SEGMENT",
    "FREQUENCE",
    "DATA_VOLUME",
    "ON_NET",
    "ORANGE",
    "TIGO",
    "REGULARITY",
    "FREQ_TOP_PACK",
    "TENURE",
    "TOP_PACK",
    "REGION",
    "MRG",
    DATA_VOLUME_MISSING,
];

/// Categorical columns that go through label encoding.
pub const CATEGORICAL_COLUMNS: [&str; 4] = ["TENURE", "TOP_PACK", "REGION", "MRG"];

/// Derived indicator column appended to every record.
pub const DATA_VOLUME_MISSING: &str = "DATA_VOLUME_MISSING";

/// Constant placeholder value for the derived indicator column.
pub const DATA_VOLUME_MISSING_PLACEHOLDER: f32 = 0.0;

/// Tenure buckets the model was trained on, longest first.
pub const TENURE_OPTIONS: [&str; 11] = [
    "K > 24 month",
    "J 21-24 month",
    "I 18-21 month",
    "H 15-18 month",
    "G 12-15 month",
    "F 9-12 month",
    "E 6-9 month",
    "D 3-6 month",
    "C 1-3 month",
    "B 0-1 month",
    "A < 1 month",
];

/// Top-pack product types the model was trained on.
pub const TOP_PACK_OPTIONS: [&str; 6] = [
    "No_Top_Pack",
    "other",
    "Data C",
    "All Net 500MB Day",
    "Data E",
    "Data D",
];

/// Regions the model was trained on.
pub const REGION_OPTIONS: [&str; 6] = [
    "Dakar",
    "Thiès",
    "Saint-Louis",
    "Kaolack",
    "Ziguinchor",
    "Diourbel",
];

/// Merchant-flag values the model was trained on.
pub const MRG_OPTIONS: [&str; 2] = ["NO", "YES"];

/// One customer's form entries prior to assembly.
///
/// Numeric fields default to zero; categorical fields default to the first
/// entry of their option list, matching the form's initial selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerForm {
    /// Tenure bucket, one of [`TENURE_OPTIONS`].
    pub tenure: String,
    pub montant: f32,
    pub frequence_rech: f32,
    pub revenue: f32,
    pub arpu_segment: f32,
    pub frequence: f32,
    pub data_volume: f32,
    pub on_net: f32,
    pub orange: f32,
    pub tigo: f32,
    pub regularity: f32,
    /// Top-pack type, one of [`TOP_PACK_OPTIONS`].
    pub top_pack: String,
    pub freq_top_pack: f32,
    /// Region, one of [`REGION_OPTIONS`].
    pub region: String,
    /// Merchant flag, one of [`MRG_OPTIONS`].
    pub mrg: String,
}

impl Default for CustomerForm {
    fn default() -> Self {
        Self {
            tenure: TENURE_OPTIONS[0].to_string(),
            montant: 0.0,
            frequence_rech: 0.0,
            revenue: 0.0,
            arpu_segment: 0.0,
            frequence: 0.0,
            data_volume: 0.0,
            on_net: 0.0,
            orange: 0.0,
            tigo: 0.0,
            regularity: 0.0,
            top_pack: TOP_PACK_OPTIONS[0].to_string(),
            freq_top_pack: 0.0,
            region: REGION_OPTIONS[0].to_string(),
            mrg: MRG_OPTIONS[0].to_string(),
        }
    }
}

/// A single cell of an assembled record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Continuous usage metric or an already-encoded code.
    Numeric(f32),
    /// Raw categorical value awaiting label encoding.
    Categorical(String),
}

/// Single-row record whose column set mirrors the training-time schema.
///
/// Columns keep their assembly order; reordering to the model's trained
/// feature order happens later, during scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    columns: Vec<(String, FieldValue)>,
}

impl FeatureRecord {
    /// Assemble the one-row record for a submitted form, appending the
    /// derived indicator column with its constant placeholder.
    pub fn from_form(form: &CustomerForm) -> Self {
        let mut record = Self::default();
        record.push_numeric("MONTANT", form.montant);
        record.push_numeric("FREQUENCE_RECH", form.frequence_rech);
        record.push_numeric("REVENUE", form.revenue);
        record.push_numeric("ARPU_SEGMENT", form.arpu_segment);
        record.push_numeric("FREQUENCE", form.frequence);
        record.push_numeric("DATA_VOLUME", form.data_volume);
        record.push_numeric("ON_NET", form.on_net);
        record.push_numeric("ORANGE", form.orange);
        record.push_numeric("TIGO", form.tigo);
        record.push_numeric("REGULARITY", form.regularity);
        record.push_numeric("FREQ_TOP_PACK", form.freq_top_pack);
        record.push_categorical("TENURE", &form.tenure);
        record.push_categorical("TOP_PACK", &form.top_pack);
        record.push_categorical("REGION", &form.region);
        record.push_categorical("MRG", &form.mrg);
        record.push_numeric(DATA_VOLUME_MISSING, DATA_VOLUME_MISSING_PLACEHOLDER);
        record
    }

    /// Value stored for `name`, if the record has that column.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Columns in assembly order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Column names in assembly order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns in the record.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn push_numeric(&mut self, name: &str, value: f32) {
        self.columns
            .push((name.to_string(), FieldValue::Numeric(value)));
    }

    fn push_categorical(&mut self, name: &str, value: &str) {
        self.columns
            .push((name.to_string(), FieldValue::Categorical(value.to_string())));
    }
}
