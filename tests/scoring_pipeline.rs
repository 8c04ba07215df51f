mod support;

use support::config_home::ConfigHomeGuard;

use churnscope::{
    app_dirs,
    artifact::{ArtifactError, BUNDLE_FILE_NAME, ModelBundle, SUPPORTED_BUNDLE_VERSION},
    config,
    encoding::{EncoderSet, LabelEncoder},
    features::{
        ASSEMBLED_COLUMNS, CustomerForm, FeatureRecord, MRG_OPTIONS, REGION_OPTIONS,
        TENURE_OPTIONS, TOP_PACK_OPTIONS,
    },
    ml::{Classifier, LogisticModel},
    scoring::ScoringContext,
};
use regex::Regex;
use tempfile::TempDir;

struct BundleHarness {
    _env: ConfigHomeGuard,
    _temp: TempDir,
}

impl BundleHarness {
    /// Point the app root at a tempdir without installing a bundle.
    fn empty() -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let env = ConfigHomeGuard::redirect(temp.path());
        Self {
            _env: env,
            _temp: temp,
        }
    }

    /// Point the app root at a tempdir and install the demo bundle at the
    /// default location.
    fn with_default_bundle() -> Self {
        let harness = Self::empty();
        let models = app_dirs::models_dir().expect("resolve models dir");
        let json = serde_json::to_string_pretty(&demo_bundle()).expect("serialize bundle");
        std::fs::write(models.join(BUNDLE_FILE_NAME), json).expect("write bundle");
        harness
    }
}

/// Bundle whose trained feature order reverses the assembly order, so these
/// tests only pass when records are reindexed before prediction.
fn demo_bundle() -> ModelBundle {
    let feature_names: Vec<String> = ASSEMBLED_COLUMNS
        .iter()
        .rev()
        .map(|name| name.to_string())
        .collect();
    let position = |name: &str| {
        feature_names
            .iter()
            .position(|trained| trained == name)
            .expect("known feature")
    };
    let mut weights = vec![0.0; feature_names.len()];
    weights[position("ORANGE")] = 0.01;
    weights[position("REGULARITY")] = -0.05;

    let mut encoders = EncoderSet::new();
    encoders.insert("TENURE", LabelEncoder::from_classes(TENURE_OPTIONS));
    encoders.insert("TOP_PACK", LabelEncoder::from_classes(TOP_PACK_OPTIONS));
    encoders.insert("REGION", LabelEncoder::from_classes(REGION_OPTIONS));
    encoders.insert("MRG", LabelEncoder::from_classes(MRG_OPTIONS));

    ModelBundle {
        bundle_version: SUPPORTED_BUNDLE_VERSION,
        classifier: Classifier::Logistic(LogisticModel {
            feature_len: feature_names.len(),
            weights,
            bias: 0.3,
        }),
        feature_names,
        encoders,
    }
}

/// A long-tenure customer with zeroed usage metrics.
fn quiet_customer() -> CustomerForm {
    CustomerForm {
        tenure: "K > 24 month".to_string(),
        top_pack: "No_Top_Pack".to_string(),
        region: "Dakar".to_string(),
        mrg: "NO".to_string(),
        ..CustomerForm::default()
    }
}

#[test]
fn missing_bundle_is_reported_with_its_path() {
    let _harness = BundleHarness::empty();
    let config = config::load_or_default().expect("load default config");
    let err = ScoringContext::load(&config.model).expect_err("bundle should be missing");
    match err {
        ArtifactError::Missing { path } => {
            assert!(path.ends_with(format!("models/{BUNDLE_FILE_NAME}")), "{path:?}");
        }
        other => panic!("expected a missing-bundle error, got {other}"),
    }
}

#[test]
fn default_bundle_scores_a_submitted_form() {
    let _harness = BundleHarness::with_default_bundle();
    let config = config::load_or_default().expect("load default config");
    let scoring = ScoringContext::load(&config.model).expect("load bundle");

    let record = FeatureRecord::from_form(&quiet_customer());
    let prediction = scoring.score(&record).expect("score record");

    // All inputs are zero or code zero, so only the bias contributes.
    assert_eq!(prediction.label, 1);
    assert!((prediction.probability - 0.574).abs() < 0.01);

    let message = prediction.message();
    let shape = Regex::new(r"^This customer is likely to churn \(Probability: \d\.\d\d\)$")
        .expect("compile regex");
    assert!(shape.is_match(&message), "message: {message}");
}

#[test]
fn scoring_is_deterministic() {
    let _harness = BundleHarness::with_default_bundle();
    let config = config::load_or_default().expect("load default config");
    let scoring = ScoringContext::load(&config.model).expect("load bundle");

    let record = FeatureRecord::from_form(&quiet_customer());
    let first = scoring.score(&record).expect("first score");
    let second = scoring.score(&record).expect("second score");
    assert_eq!(first, second);
}

#[test]
fn usage_metrics_move_the_probability_after_reindexing() {
    let _harness = BundleHarness::with_default_bundle();
    let config = config::load_or_default().expect("load default config");
    let scoring = ScoringContext::load(&config.model).expect("load bundle");

    let baseline = scoring
        .score(&FeatureRecord::from_form(&quiet_customer()))
        .expect("score baseline");

    let mut heavy_off_net = quiet_customer();
    heavy_off_net.orange = 100.0;
    let churny = scoring
        .score(&FeatureRecord::from_form(&heavy_off_net))
        .expect("score off-net heavy form");
    assert!(churny.probability > baseline.probability);

    let mut habitual = quiet_customer();
    habitual.regularity = 62.0;
    let loyal = scoring
        .score(&FeatureRecord::from_form(&habitual))
        .expect("score regular form");
    assert_eq!(loyal.label, 0);
    assert!(loyal.message().contains("unlikely to churn"));
}

#[test]
fn accented_region_label_encodes() {
    let _harness = BundleHarness::with_default_bundle();
    let config = config::load_or_default().expect("load default config");
    let scoring = ScoringContext::load(&config.model).expect("load bundle");

    let mut form = quiet_customer();
    form.region = "Thiès".to_string();
    let prediction = scoring
        .score(&FeatureRecord::from_form(&form))
        .expect("score accented region");
    assert!(prediction.probability > 0.0 && prediction.probability < 1.0);
}

#[test]
fn every_listed_option_encodes() {
    let _harness = BundleHarness::with_default_bundle();
    let config = config::load_or_default().expect("load default config");
    let scoring = ScoringContext::load(&config.model).expect("load bundle");

    let mut forms = Vec::new();
    for tenure in TENURE_OPTIONS {
        let mut form = quiet_customer();
        form.tenure = tenure.to_string();
        forms.push(form);
    }
    for top_pack in TOP_PACK_OPTIONS {
        let mut form = quiet_customer();
        form.top_pack = top_pack.to_string();
        forms.push(form);
    }
    for region in REGION_OPTIONS {
        let mut form = quiet_customer();
        form.region = region.to_string();
        forms.push(form);
    }
    for mrg in MRG_OPTIONS {
        let mut form = quiet_customer();
        form.mrg = mrg.to_string();
        forms.push(form);
    }

    for form in forms {
        let prediction = scoring
            .score(&FeatureRecord::from_form(&form))
            .unwrap_or_else(|err| {
                panic!(
                    "{} / {} / {} / {} did not score: {err}",
                    form.tenure, form.top_pack, form.region, form.mrg
                )
            });
        assert!((0.0..=1.0).contains(&prediction.probability));
        assert!(prediction.label <= 1, "label {}", prediction.label);
    }
}

#[test]
fn unseen_category_fails_with_column_and_value() {
    let _harness = BundleHarness::with_default_bundle();
    let config = config::load_or_default().expect("load default config");
    let scoring = ScoringContext::load(&config.model).expect("load bundle");

    let mut form = quiet_customer();
    form.region = "Casablanca".to_string();
    let err = scoring
        .score(&FeatureRecord::from_form(&form))
        .expect_err("unseen region should fail");
    let message = err.to_string();
    assert!(message.contains("REGION"), "message: {message}");
    assert!(message.contains("Casablanca"), "message: {message}");
}

#[test]
fn probability_text_always_has_two_decimals() {
    let _harness = BundleHarness::with_default_bundle();
    let config = config::load_or_default().expect("load default config");
    let scoring = ScoringContext::load(&config.model).expect("load bundle");

    let shape = Regex::new(r"^\d\.\d\d$").expect("compile regex");
    for orange in [0.0, 3.5, 250.0, 10_000.0] {
        let mut form = quiet_customer();
        form.orange = orange;
        let prediction = scoring
            .score(&FeatureRecord::from_form(&form))
            .expect("score form");
        let text = prediction.probability_text();
        assert!(shape.is_match(&text), "ORANGE {orange} rendered as {text}");
    }
}

#[test]
fn config_override_relocates_the_bundle() {
    let harness = BundleHarness::empty();
    let custom = harness._temp.path().join("elsewhere").join("churn.json");
    std::fs::create_dir_all(custom.parent().expect("parent")).expect("create custom dir");
    let json = serde_json::to_string_pretty(&demo_bundle()).expect("serialize bundle");
    std::fs::write(&custom, json).expect("write bundle");

    let root = app_dirs::app_root_dir().expect("resolve app root");
    std::fs::write(
        root.join("config.toml"),
        format!("[model]\nbundle_path = {custom:?}\n"),
    )
    .expect("write config");

    let config = config::load_or_default().expect("load config");
    let scoring = ScoringContext::load(&config.model).expect("load relocated bundle");
    let record = FeatureRecord::from_form(&quiet_customer());
    assert!(scoring.score(&record).is_ok());
}

#[test]
fn corrupt_bundle_fails_to_parse() {
    let _harness = BundleHarness::empty();
    let models = app_dirs::models_dir().expect("resolve models dir");
    std::fs::write(models.join(BUNDLE_FILE_NAME), "{\"bundle_version\": oops").expect("write");

    let config = config::load_or_default().expect("load default config");
    let err = ScoringContext::load(&config.model).expect_err("corrupt bundle should fail");
    assert!(matches!(err, ArtifactError::Parse { .. }), "got {err}");
}

#[test]
fn bundle_wire_format_is_stable() {
    let json = r#"{
        "bundle_version": 1,
        "classifier": {
            "kind": "logistic",
            "feature_len": 3,
            "weights": [0.25, -0.5, 1.0],
            "bias": 0.125
        },
        "feature_names": ["REVENUE", "REGION", "MRG"],
        "encoders": {
            "REGION": ["Dakar", "Thiès"],
            "MRG": ["NO", "YES"]
        }
    }"#;
    let bundle: ModelBundle = serde_json::from_str(json).expect("parse bundle");
    bundle.validate().expect("validate bundle");
    assert_eq!(bundle.feature_names.len(), 3);
    let mrg = bundle.encoders.get("MRG").expect("MRG encoder");
    assert_eq!(mrg.code_of("YES"), Some(1));
}
