// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Comparison and ranking of several components.
//!
//! The [Comparator] evaluates a batch of components, picks the one with the
//! highest speedup and explains the choice. It never keeps any history of
//! what it has been asked to compare; the caller owns the list of components
//! and passes in whichever slice it is interested in.

use std::sync::Arc;

use log::{debug, warn};

use crate::component::Component;
use crate::evaluator::{Evaluate, Evaluator, round_to_precision};
use crate::result::SpeedupResult;
use crate::types::{AmdahlError, AmdahlResult};

/// Number of trailing components compared by default.
pub const DEFAULT_LAST_N: usize = 3;

/// A component that could not be evaluated as part of a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedComponent {
    pub component: Arc<Component>,
    pub error: AmdahlError,
}

/// The results for a batch of components along with the best of them.
#[derive(Clone, Debug)]
pub struct Analysis {
    /// Results in the order the components were given.
    results: Vec<SpeedupResult>,

    /// Index into `results` of the highest speedup. First one wins on ties.
    best: Option<usize>,

    justification: String,

    skipped: Vec<SkippedComponent>,
}

impl Analysis {
    #[must_use]
    pub fn results(&self) -> &[SpeedupResult] {
        &self.results
    }

    #[must_use]
    pub fn best_result(&self) -> Option<&SpeedupResult> {
        self.best.map(|i| &self.results[i])
    }

    #[must_use]
    pub fn best_component(&self) -> Option<&Arc<Component>> {
        self.best_result().map(SpeedupResult::component)
    }

    #[must_use]
    pub fn justification(&self) -> &str {
        &self.justification
    }

    /// Components left out of the batch because their evaluation failed.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedComponent] {
        &self.skipped
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results ordered by speedup, highest first. Equal speedups keep their
    /// input order.
    #[must_use]
    pub fn ranked_results(&self) -> Vec<&SpeedupResult> {
        let mut ranked: Vec<&SpeedupResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| b.speedup().total_cmp(&a.speedup()));
        ranked
    }

    /// `(name, speedup)` pairs in [Analysis::ranked_results] order.
    #[must_use]
    pub fn ranking(&self) -> Vec<(&str, f64)> {
        self.ranked_results()
            .into_iter()
            .map(|r| (r.component().name(), r.speedup()))
            .collect()
    }
}

/// The outcome of comparing a window of components that may be empty.
#[derive(Clone, Debug)]
pub enum Comparison {
    /// There was nothing to compare.
    NoData,
    Ranked(Analysis),
}

impl Comparison {
    #[must_use]
    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            Comparison::NoData => None,
            Comparison::Ranked(analysis) => Some(analysis),
        }
    }
}

/// Which component to pick to reach a target speedup.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetRecommendation {
    /// No components were given.
    NoData,

    /// The highest-speedup component that reaches the target.
    Met {
        component: Arc<Component>,
        speedup: f64,
    },

    /// Nothing reaches the target. This is the best that can be done, how far
    /// short it falls and what factor it would need (or why no factor is
    /// enough).
    BestAvailable {
        component: Arc<Component>,
        speedup: f64,
        shortfall: f64,
        required_factor: AmdahlResult<f64>,
    },
}

/// Head-to-head comparison of two components.
#[derive(Clone, Debug, PartialEq)]
pub struct PairComparison {
    pub better: Arc<Component>,
    pub better_speedup: f64,
    pub other: Arc<Component>,
    pub other_speedup: f64,
    pub difference: f64,
}

/// Ranks components using an [Evaluate] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Comparator<E = Evaluator> {
    evaluator: E,
}

impl<E: Evaluate> Comparator<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn evaluate(&self, component: &Arc<Component>) -> AmdahlResult<SpeedupResult> {
        SpeedupResult::evaluate(&self.evaluator, component)
    }

    /// Evaluate every component and choose the best.
    ///
    /// A component whose evaluation fails is recorded in
    /// [Analysis::skipped] and the rest of the batch carries on.
    pub fn evaluate_all(&self, components: &[Arc<Component>]) -> Analysis {
        let mut results: Vec<SpeedupResult> = Vec::with_capacity(components.len());
        let mut skipped = Vec::new();
        let mut best: Option<usize> = None;

        for component in components {
            let result = match self.evaluate(component) {
                Ok(result) => result,
                Err(error) => {
                    warn!("Skipping {}: {error}", component.name());
                    skipped.push(SkippedComponent {
                        component: component.clone(),
                        error,
                    });
                    continue;
                }
            };
            debug!(
                "{}: speedup {:.4}x, ceiling {:.4}x",
                component.name(),
                result.speedup(),
                result.theoretical_ceiling()
            );

            let is_better = match best {
                Some(i) => result.speedup() > results[i].speedup(),
                None => true,
            };
            if is_better {
                best = Some(results.len());
            }
            results.push(result);
        }

        let justification = justify(&results, best);
        Analysis {
            results,
            best,
            justification,
            skipped,
        }
    }

    /// Compare only the last `n` components (all of them if there are fewer).
    pub fn evaluate_last_n(&self, components: &[Arc<Component>], n: usize) -> Comparison {
        let start = components.len().saturating_sub(n);
        let window = &components[start..];
        if window.is_empty() {
            return Comparison::NoData;
        }
        Comparison::Ranked(self.evaluate_all(window))
    }

    /// Components reaching at least `min_speedup`, highest speedup first.
    pub fn find_components_meeting(
        &self,
        components: &[Arc<Component>],
        min_speedup: f64,
    ) -> Vec<Arc<Component>> {
        let mut meeting: Vec<(f64, &Arc<Component>)> = components
            .iter()
            .map(|c| (self.evaluator.speedup(c), c))
            .filter(|(speedup, _)| *speedup >= min_speedup)
            .collect();
        meeting.sort_by(|a, b| b.0.total_cmp(&a.0));
        meeting.into_iter().map(|(_, c)| c.clone()).collect()
    }

    /// Recommend a component for `target`, falling back to the best available
    /// one when none reaches it.
    pub fn recommend_for_target(
        &self,
        components: &[Arc<Component>],
        target: f64,
    ) -> TargetRecommendation {
        if let Some(component) = self.find_components_meeting(components, target).first() {
            return TargetRecommendation::Met {
                speedup: self.evaluator.speedup(component),
                component: component.clone(),
            };
        }

        let mut best: Option<(f64, &Arc<Component>)> = None;
        for component in components {
            let speedup = self.evaluator.speedup(component);
            if best.is_none_or(|(best_speedup, _)| speedup > best_speedup) {
                best = Some((speedup, component));
            }
        }

        match best {
            None => TargetRecommendation::NoData,
            Some((speedup, component)) => TargetRecommendation::BestAvailable {
                component: component.clone(),
                speedup,
                shortfall: round_to_precision(target - speedup),
                required_factor: self
                    .evaluator
                    .required_factor(component.improvable_fraction(), target),
            },
        }
    }

    /// Which of `a` and `b` gives more speedup. `b` is preferred on a tie.
    pub fn compare_pair(&self, a: &Arc<Component>, b: &Arc<Component>) -> PairComparison {
        let speedup_a = self.evaluator.speedup(a);
        let speedup_b = self.evaluator.speedup(b);
        let ((better, better_speedup), (other, other_speedup)) = if speedup_a > speedup_b {
            ((a, speedup_a), (b, speedup_b))
        } else {
            ((b, speedup_b), (a, speedup_a))
        };
        PairComparison {
            better: better.clone(),
            better_speedup,
            other: other.clone(),
            other_speedup,
            difference: round_to_precision(better_speedup - other_speedup),
        }
    }

    /// Explain why a component's overall speedup is small even when its
    /// improvement factor is large.
    pub fn limited_impact_explanation(&self, component: &Component) -> AmdahlResult<String> {
        let speedup = self.evaluator.speedup(component);
        let ceiling = self.evaluator.theoretical_ceiling(component)?;
        let f = component.improvable_fraction();
        Ok(format!(
            "Although {} has k={} its overall speedup is only {speedup:.4}x because its \
             improvable fraction f={f:.2} ({:.0}% of the work) is small. By Amdahl's Law, \
             A = 1/((1-f) + f/k), the impact is limited by the {:.0}% of the system that is \
             not improved: no improvement factor can take it past {ceiling:.4}x.",
            component.name(),
            component.improvement_factor(),
            f * 100.0,
            (1.0 - f) * 100.0,
        ))
    }
}

fn justify(results: &[SpeedupResult], best: Option<usize>) -> String {
    let Some(best_index) = best else {
        return "No best component could be determined".to_string();
    };
    let winner = &results[best_index];
    let component = winner.component();

    let mut text = format!(
        "Component '{}' is the best option to optimize because it gives the highest overall \
         speedup: {:.4}x.\n\nTechnical analysis:\n",
        component.name(),
        winner.speedup()
    );
    text.push_str(&format!(
        "- Improvable fraction (f): {:.1}%\n",
        component.improvable_fraction() * 100.0
    ));
    text.push_str(&format!(
        "- Improvement factor (k): {}\n",
        component.improvement_factor()
    ));
    text.push_str(&format!("- Actual speedup: {:.4}x\n", winner.speedup()));
    text.push_str(&format!(
        "- Theoretical ceiling: {:.4}x\n",
        winner.theoretical_ceiling()
    ));
    text.push_str(&format!(
        "- Efficiency: {:.1}% of the theoretical ceiling\n",
        winner.efficiency_percent()
    ));

    let mut others: Vec<&SpeedupResult> = results
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != best_index)
        .map(|(_, r)| r)
        .collect();
    if others.is_empty() {
        return text;
    }
    others.sort_by(|a, b| b.speedup().total_cmp(&a.speedup()));

    text.push_str("\nComparison with other components:\n");
    for other in &others {
        text.push_str(&format!(
            "- {}: {:.4}x (difference: +{:.4}x)\n",
            other.component().name(),
            other.speedup(),
            winner.speedup() - other.speedup()
        ));
    }

    let higher_factor: Vec<&&SpeedupResult> = others
        .iter()
        .filter(|r| r.component().improvement_factor() > component.improvement_factor())
        .collect();
    if !higher_factor.is_empty() {
        text.push_str("\nHigher factor, lower speedup:\n");
        for other in higher_factor {
            text.push_str(&format!(
                "- {} has k={} but only {:.1}% of the work is improvable, which caps it at \
                 {:.4}x\n",
                other.component().name(),
                other.component().improvement_factor(),
                other.component().improvable_fraction() * 100.0,
                other.theoretical_ceiling()
            ));
        }
    }

    text
}
