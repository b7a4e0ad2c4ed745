//! Model performance view-data: metric cards, feature importance,
//! confusion matrix and the monthly performance history.
//!
//! The figures are published with the dataset; nothing here trains or
//! evaluates a model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub accuracy:  f64,
    pub precision: f64,
    pub recall:    f64,
    pub f1_score:  f64,
    pub roc_auc:   f64,
}

// ── Metric cards ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricCard {
    pub title:       &'static str,
    pub description: &'static str,
    pub value:       f64,
    pub benchmark:   f64,
    /// value ≥ benchmark
    pub meets_benchmark: bool,
}

impl MetricCard {
    fn new(title: &'static str, description: &'static str, value: f64, benchmark: f64) -> Self {
        Self {
            title,
            description,
            value,
            benchmark,
            meets_benchmark: value >= benchmark,
        }
    }
}

pub const ACCURACY_BENCHMARK:  f64 = 0.85;
pub const PRECISION_BENCHMARK: f64 = 0.80;
pub const RECALL_BENCHMARK:    f64 = 0.85;
pub const ROC_AUC_BENCHMARK:   f64 = 0.90;

pub fn metric_cards(m: &ModelMetrics) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Accuracy",  "Overall prediction accuracy", m.accuracy,  ACCURACY_BENCHMARK),
        MetricCard::new("Precision", "True positive rate",          m.precision, PRECISION_BENCHMARK),
        MetricCard::new("Recall",    "Sensitivity to churn cases",  m.recall,    RECALL_BENCHMARK),
        MetricCard::new("ROC-AUC",   "Area under the ROC curve",    m.roc_auc,   ROC_AUC_BENCHMARK),
    ]
}

// ── Feature importance ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureImportance {
    pub feature:     &'static str,
    pub importance:  f64,
    pub description: &'static str,
    /// Bar width as a fraction of the most important feature.
    pub relative:    f64,
}

const FEATURES: [(&str, f64, &str); 8] = [
    ("Contract Type",    0.35, "Month-to-month vs long-term contracts"),
    ("Tenure",           0.28, "Customer relationship duration"),
    ("Monthly Charges",  0.22, "Monthly service charges"),
    ("Tech Support",     0.18, "Technical support subscription"),
    ("Payment Method",   0.15, "Payment method preference"),
    ("Internet Service", 0.12, "Type of internet service"),
    ("Online Security",  0.10, "Online security add-on"),
    ("Age",              0.08, "Customer age demographic"),
];

/// Global feature importances, most important first.
pub fn feature_importance() -> Vec<FeatureImportance> {
    let top = FEATURES
        .iter()
        .map(|(_, imp, _)| *imp)
        .fold(0.0_f64, f64::max);

    let mut rows: Vec<FeatureImportance> = FEATURES
        .iter()
        .map(|&(feature, importance, description)| FeatureImportance {
            feature,
            importance,
            description,
            relative: if top > 0.0 { importance / top } else { 0.0 },
        })
        .collect();
    rows.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

// ── Confusion matrix ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negative:  u64,
    pub false_negative: u64,
    pub false_positive: u64,
    pub true_positive:  u64,
}

impl ConfusionMatrix {
    pub fn published() -> Self {
        Self {
            true_negative:  1847,
            false_negative: 89,
            false_positive: 156,
            true_positive:  421,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_negative + self.false_negative + self.false_positive + self.true_positive
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

// ── Performance history ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PerformancePoint {
    pub month:     &'static str,
    pub accuracy:  f64,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
}

pub fn performance_history() -> Vec<PerformancePoint> {
    [
        ("Jan", 0.84, 0.81, 0.87, 0.84),
        ("Feb", 0.85, 0.82, 0.88, 0.85),
        ("Mar", 0.86, 0.83, 0.89, 0.86),
        ("Apr", 0.87, 0.84, 0.89, 0.86),
        ("May", 0.87, 0.84, 0.89, 0.86),
        ("Jun", 0.87, 0.84, 0.89, 0.86),
    ]
    .into_iter()
    .map(|(month, accuracy, precision, recall, f1)| PerformancePoint {
        month,
        accuracy,
        precision,
        recall,
        f1,
    })
    .collect()
}

/// Everything the model performance tab renders.
#[derive(Debug, Clone, Serialize)]
pub struct ModelPerformanceView {
    pub cards:              Vec<MetricCard>,
    pub f1_score:           f64,
    pub feature_importance: Vec<FeatureImportance>,
    pub confusion_matrix:   ConfusionMatrix,
    pub history:            Vec<PerformancePoint>,
}

impl ModelPerformanceView {
    pub fn build(metrics: &ModelMetrics) -> Self {
        Self {
            cards:              metric_cards(metrics),
            f1_score:           metrics.f1_score,
            feature_importance: feature_importance(),
            confusion_matrix:   ConfusionMatrix::published(),
            history:            performance_history(),
        }
    }
}
