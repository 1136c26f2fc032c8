//! # Association graph builder
//!
//! Folds a [`Table`] into an [`AssociationGraph`] in one linear pass.
//!
//! ```text
//! Row ─► empty label?      ─► skip
//!     ─► s_AB not finite?  ─► skip
//!     ─► s_AB > threshold? ─► skip
//!     ─► node(A), node(B), edge(A, B, citation, evidence, {bio2bel, s_AB})
//! ```
//!
//! Rows with positive network separation describe well separated diseases;
//! only overlapping pairs (`s_AB <= threshold`) become associations.

use serde::Serialize;
use tracing::{debug, info};

use crate::graph::AssociationGraph;
use crate::model::*;
use crate::table::{Row, Table};

/// Module tag recorded in every edge's annotations.
pub const MODULE_NAME: &str = "ddr";

/// PubMed id of Menche, J., *et al.* (2015).
pub const CITATION_PUBMED: &str = "25700523";

/// Evidence text attached to every edge.
pub const EVIDENCE: &str = "from ddr";

// ============================================================================
// Configuration
// ============================================================================

/// Builder options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuilderConfig {
    /// Largest `s_AB` still admitted as an association.
    pub min_network_separation: f64,
    /// Invoke the progress observer once per row.
    pub report_progress: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            min_network_separation: 0.0,
            report_progress: false,
        }
    }
}

impl BuilderConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.min_network_separation = threshold;
        self
    }

    pub fn with_progress(mut self, report: bool) -> Self {
        self.report_progress = report;
        self
    }
}

// ============================================================================
// Row decisions and stats
// ============================================================================

/// What the builder does with a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDecision {
    Keep,
    EmptyLabel,
    NonFinite,
    AboveThreshold,
}

/// Per-row progress signal. `index` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub index: usize,
    pub total: usize,
}

/// Row accounting for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows: usize,
    pub associations: usize,
    pub empty_label: usize,
    pub non_finite: usize,
    pub above_threshold: usize,
}

impl BuildStats {
    pub fn skipped(&self) -> usize {
        self.empty_label + self.non_finite + self.above_threshold
    }

    fn record(&mut self, decision: RowDecision) {
        self.rows += 1;
        match decision {
            RowDecision::Keep => self.associations += 1,
            RowDecision::EmptyLabel => self.empty_label += 1,
            RowDecision::NonFinite => self.non_finite += 1,
            RowDecision::AboveThreshold => self.above_threshold += 1,
        }
    }
}

// ============================================================================
// AssociationGraphBuilder
// ============================================================================

/// Single-pass table → graph fold.
#[derive(Debug, Clone, Default)]
pub struct AssociationGraphBuilder {
    config: BuilderConfig,
}

impl AssociationGraphBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Filter decision for `row` under this builder's threshold.
    pub fn decide(&self, row: &Row) -> RowDecision {
        if row.disease_a.is_empty() || row.disease_b.is_empty() {
            RowDecision::EmptyLabel
        } else if !row.s_ab_observed.is_finite() {
            RowDecision::NonFinite
        } else if row.s_ab_observed > self.config.min_network_separation {
            RowDecision::AboveThreshold
        } else {
            RowDecision::Keep
        }
    }

    pub fn build(&self, table: &Table) -> AssociationGraph {
        self.build_with_stats(table, |_| {}).0
    }

    pub fn build_with_progress<F>(&self, table: &Table, on_progress: F) -> AssociationGraph
    where
        F: FnMut(Progress),
    {
        self.build_with_stats(table, on_progress).0
    }

    /// Build the graph and report how each row was handled.
    ///
    /// `on_progress` is only called when `report_progress` is set; it sees
    /// each row index before the row is processed and cannot affect the result.
    pub fn build_with_stats<F>(&self, table: &Table, mut on_progress: F) -> (AssociationGraph, BuildStats)
    where
        F: FnMut(Progress),
    {
        let mut graph = AssociationGraph::default();
        let mut stats = BuildStats::default();
        let total = table.len();
        let citation = Citation::pubmed(CITATION_PUBMED);

        for (index, row) in table.iter().enumerate() {
            if self.config.report_progress {
                on_progress(Progress { index, total });
            }

            let decision = self.decide(row);
            stats.record(decision);
            if decision != RowDecision::Keep {
                continue;
            }

            let a = graph.add_node(DiseaseEntity::mesh(row.disease_a.as_str()));
            let b = graph.add_node(DiseaseEntity::mesh(row.disease_b.as_str()));

            let mut annotations = Annotations::new();
            annotations.insert(SOURCE_MODULE_KEY.to_string(), Value::from(MODULE_NAME));
            annotations.insert(SEPARATION_KEY.to_string(), Value::Float(row.s_ab_observed));

            graph.add_association(a, b, citation.clone(), EVIDENCE, annotations);
        }

        debug!(
            empty_label = stats.empty_label,
            non_finite = stats.non_finite,
            above_threshold = stats.above_threshold,
            "skipped rows"
        );
        info!(
            rows = stats.rows,
            diseases = graph.count_nodes(),
            associations = graph.count_edges(),
            threshold = self.config.min_network_separation,
            "built disease association graph"
        );

        (graph, stats)
    }
}

/// Build with the given threshold and no progress reporting.
pub fn build(table: &Table, threshold: f64) -> AssociationGraph {
    AssociationGraphBuilder::new(BuilderConfig::default().with_threshold(threshold)).build(table)
}
