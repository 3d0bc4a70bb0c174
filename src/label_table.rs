use crate::error::DiagnosisError;
use std::collections::{HashMap, HashSet};

pub const HEALTHY_LABEL: &str = "healthy";

pub const FALLBACK_TREATMENT: &str =
    "Consult with a tea cultivation expert for specific treatment recommendations.";

const ANTHRACNOSE_ADVICE: &str = "Prune affected branches and apply fungicides containing copper or mancozeb. Ensure proper spacing between plants for good air circulation.";
const ALGAL_LEAF_ADVICE: &str = "Remove affected leaves and apply copper oxychloride. Improve drainage and reduce humidity around plants.";
const BIRD_EYE_SPOT_ADVICE: &str = "Apply fungicides containing carbendazim or copper. Enhance soil nutrition with balanced fertilizers.";
const BROWN_BLIGHT_ADVICE: &str =
    "Prune affected areas and apply triazole fungicides. Avoid overhead irrigation.";
const GRAY_BLIGHT_ADVICE: &str = "Apply sulfur-based fungicides and ensure good air circulation by proper spacing and pruning.";
const RED_LEAF_SPOT_ADVICE: &str = "Remove infected leaves and apply fungicides containing chlorothalonil. Improve soil drainage.";
const WHITE_SPOT_ADVICE: &str = "Use copper-based fungicides and maintain proper spacing. Avoid excessive nitrogen fertilization.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabel {
    pub index: usize,
    pub name: String,
}

impl ClassLabel {
    pub fn is_healthy(&self) -> bool {
        self.name.eq_ignore_ascii_case(HEALTHY_LABEL)
    }
}

/// Index-to-name taxonomy of one model. Indices are contiguous from 0 and
/// names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabelTable {
    labels: Vec<ClassLabel>,
}

impl ClassLabelTable {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, DiagnosisError> {
        if names.is_empty() {
            return Err(DiagnosisError::InvalidConfiguration(
                "label table must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut labels = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if name.trim().is_empty() {
                return Err(DiagnosisError::InvalidConfiguration(format!(
                    "label {} has an empty name",
                    index
                )));
            }
            if !seen.insert(name) {
                return Err(DiagnosisError::InvalidConfiguration(format!(
                    "duplicate label name: {}",
                    name
                )));
            }
            labels.push(ClassLabel {
                index,
                name: name.to_string(),
            });
        }

        Ok(Self { labels })
    }

    /// Labels of the `trained_model` artifact.
    pub fn tea_leaf() -> Self {
        Self::from_static(&[
            "Anthracnose",
            "algal leaf",
            "bird eye spot",
            "brown blight",
            "gray light",
            "healthy",
            "red leaf spot",
            "white spot",
        ])
    }

    /// Labels of the `tea_disease_model` artifact.
    pub fn tea_leaf_title_case() -> Self {
        Self::from_static(&[
            "Anthracnose",
            "Algal Leaf",
            "Bird Eye Spot",
            "Brown Blight",
            "Gray Blight",
            "Healthy",
            "Red Leaf Spot",
            "White Spot",
        ])
    }

    /// Labels of the `tea_disease_mobilenet` artifact. Note the different
    /// ordering: algal leaf comes first.
    pub fn tea_leaf_snake_case() -> Self {
        Self::from_static(&[
            "algal_leaf",
            "anthracnose",
            "bird_eye_spot",
            "brown_blight",
            "gray_blight",
            "healthy",
            "red_leaf_spot",
            "white_spot",
        ])
    }

    fn from_static(names: &[&'static str]) -> Self {
        Self {
            labels: names
                .iter()
                .enumerate()
                .map(|(index, name)| ClassLabel {
                    index,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, index: usize) -> Option<&ClassLabel> {
        self.labels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassLabel> {
        self.labels.iter()
    }
}

/// Disease name to advice. Lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentTable {
    advice: HashMap<String, String>,
}

impl TreatmentTable {
    pub fn new<K: Into<String>, V: Into<String>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            advice: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn tea_leaf() -> Self {
        Self::new([
            ("Anthracnose", ANTHRACNOSE_ADVICE),
            ("algal leaf", ALGAL_LEAF_ADVICE),
            ("bird eye spot", BIRD_EYE_SPOT_ADVICE),
            ("brown blight", BROWN_BLIGHT_ADVICE),
            ("gray light", GRAY_BLIGHT_ADVICE),
            ("red leaf spot", RED_LEAF_SPOT_ADVICE),
            ("white spot", WHITE_SPOT_ADVICE),
        ])
    }

    pub fn tea_leaf_title_case() -> Self {
        Self::new([
            ("Anthracnose", ANTHRACNOSE_ADVICE),
            ("Algal Leaf", ALGAL_LEAF_ADVICE),
            ("Bird Eye Spot", BIRD_EYE_SPOT_ADVICE),
            ("Brown Blight", BROWN_BLIGHT_ADVICE),
            ("Gray Blight", GRAY_BLIGHT_ADVICE),
            ("Red Leaf Spot", RED_LEAF_SPOT_ADVICE),
            ("White Spot", WHITE_SPOT_ADVICE),
        ])
    }

    pub fn tea_leaf_snake_case() -> Self {
        Self::new([
            ("anthracnose", ANTHRACNOSE_ADVICE),
            ("algal_leaf", ALGAL_LEAF_ADVICE),
            ("bird_eye_spot", BIRD_EYE_SPOT_ADVICE),
            ("brown_blight", BROWN_BLIGHT_ADVICE),
            ("gray_blight", GRAY_BLIGHT_ADVICE),
            ("red_leaf_spot", RED_LEAF_SPOT_ADVICE),
            ("white_spot", WHITE_SPOT_ADVICE),
        ])
    }

    /// Exact-name lookup, falling back to generic advice.
    pub fn lookup(&self, name: &str) -> &str {
        self.advice
            .get(name)
            .map(String::as_str)
            .unwrap_or(FALLBACK_TREATMENT)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.advice.contains_key(name)
    }
}
