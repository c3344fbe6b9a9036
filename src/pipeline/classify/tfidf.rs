//! Statistical Stage-1 strategy: TF-IDF features over word uni- and bi-grams
//! feeding a multinomial logistic regression. Tiny-corpus sized; trained
//! full-batch and deterministically.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use ndarray::{Array1, Array2, Axis};
use regex::Regex;

use super::model::StandardizationStrategy;
use super::types::StandardizedCategory;

/// Inverse regularization strength.
const C: f64 = 1.0;
const MAX_ITER: usize = 500;
const LEARNING_RATE: f64 = 1.0;

/// Tokens are runs of at least two word characters.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid token regex"));

fn terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN.find_iter(&lower).map(|m| m.as_str()).collect();
    let mut out: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    out.extend(tokens.windows(2).map(|w| format!("{} {}", w[0], w[1])));
    out
}

/// Smoothed TF-IDF with L2-normalised rows.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f64>,
}

impl TfidfVectorizer {
    pub fn fit(docs: &[&str]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let unique: BTreeSet<String> = terms(doc).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = docs.len() as f64;
        let vocabulary = document_frequency
            .keys()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();
        let idf = document_frequency
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect::<Array1<f64>>();

        Self { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn transform(&self, docs: &[&str]) -> Array2<f64> {
        let mut x = Array2::<f64>::zeros((docs.len(), self.vocabulary.len()));
        for (row, doc) in docs.iter().enumerate() {
            for term in terms(doc) {
                if let Some(&col) = self.vocabulary.get(&term) {
                    x[[row, col]] += 1.0;
                }
            }
        }
        for mut row in x.rows_mut() {
            row *= &self.idf;
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }
        x
    }
}

/// Multinomial logistic regression with L2 penalty.
#[derive(Debug, Clone)]
pub struct SoftmaxRegression {
    /// features x classes
    weights: Array2<f64>,
    bias: Array1<f64>,
    classes: Vec<StandardizedCategory>,
}

impl SoftmaxRegression {
    /// Fit by full-batch gradient descent on mean log-loss + `1/(2Cn)·‖W‖²`.
    pub fn fit(x: &Array2<f64>, labels: &[StandardizedCategory]) -> Self {
        let classes: Vec<StandardizedCategory> =
            labels.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let n_samples = x.nrows();
        let n_classes = classes.len();

        let mut targets = Array2::<f64>::zeros((n_samples, n_classes));
        for (row, label) in labels.iter().enumerate() {
            if let Some(col) = classes.iter().position(|c| c == label) {
                targets[[row, col]] = 1.0;
            }
        }

        let n = n_samples.max(1) as f64;
        let penalty = 1.0 / (C * n);
        let mut weights = Array2::<f64>::zeros((x.ncols(), n_classes));
        let mut bias = Array1::<f64>::zeros(n_classes);

        for _ in 0..MAX_ITER {
            let probs = softmax(x.dot(&weights) + &bias);
            let residual = probs - &targets;
            let grad_w = x.t().dot(&residual) / n + &(&weights * penalty);
            let grad_b = residual.sum_axis(Axis(0)) / n;
            weights.scaled_add(-LEARNING_RATE, &grad_w);
            bias.scaled_add(-LEARNING_RATE, &grad_b);
        }

        Self {
            weights,
            bias,
            classes,
        }
    }

    pub fn classes(&self) -> &[StandardizedCategory] {
        &self.classes
    }

    /// Class probabilities for each row of `x`.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Array2<f64> {
        softmax(x.dot(&self.weights) + &self.bias)
    }

    /// Most probable class per row; ties resolve to the earlier class.
    pub fn predict(&self, x: &Array2<f64>) -> Vec<StandardizedCategory> {
        self.predict_proba(x)
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                for (col, &p) in row.iter().enumerate() {
                    if p > row[best] {
                        best = col;
                    }
                }
                self.classes
                    .get(best)
                    .copied()
                    .unwrap_or_default()
            })
            .collect()
    }
}

fn softmax(mut logits: Array2<f64>) -> Array2<f64> {
    for mut row in logits.rows_mut() {
        let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        if sum > 0.0 {
            row /= sum;
        }
    }
    logits
}

/// Stage-1 strategy backed by a fitted TF-IDF + logistic regression model.
#[derive(Debug, Clone)]
pub struct TrainedStrategy {
    vectorizer: TfidfVectorizer,
    model: SoftmaxRegression,
}

impl TrainedStrategy {
    pub fn fit(texts: &[&str], labels: &[StandardizedCategory]) -> Self {
        let vectorizer = TfidfVectorizer::fit(texts);
        let x = vectorizer.transform(texts);
        let model = SoftmaxRegression::fit(&x, labels);
        tracing::info!(
            examples = texts.len(),
            features = vectorizer.vocabulary_len(),
            classes = model.classes().len(),
            "Stage-1 model trained"
        );
        Self { vectorizer, model }
    }
}

impl StandardizationStrategy for TrainedStrategy {
    fn name(&self) -> &'static str {
        "tfidf_logreg"
    }

    fn is_trained(&self) -> bool {
        !self.model.classes().is_empty() && self.vectorizer.vocabulary_len() > 0
    }

    fn predict(&self, complaint: &str) -> StandardizedCategory {
        let x = self.vectorizer.transform(&[complaint]);
        self.model
            .predict(&x)
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}
