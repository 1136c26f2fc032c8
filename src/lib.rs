//! # ddr-bel — Disease-Disease Relationships as a BEL Graph
//!
//! Turns the disease-pair network-separation table of Menche, J., *et al.*
//! (2015) into a typed association graph.
//!
//! ## Design Principles
//!
//! 1. **Positional parsing**: the table has no trusted header; rows are bound by position
//! 2. **One pass**: table → graph is a single linear fold, deterministic in row order
//! 3. **Closed model**: `DiseaseEntity`, `AssociationEdge`, `Value` are fixed types
//! 4. **Explicit configuration**: threshold, progress and data directory are values, not globals
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ddr_bel::{Manager, BuilderConfig, DataSource};
//!
//! # fn example() -> ddr_bel::Result<()> {
//! let source = DataSource::new("/var/lib/ddr");
//! let manager = Manager::from_source(&source, BuilderConfig::default())?;
//!
//! let summary = manager.summarize();
//! println!("{} diseases, {} associations", summary.diseases, summary.associations);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | (default) | Table loading, graph building, export |
//! | `download` | Fetch the supplementary archive over HTTP |
//! | `cli` | The `ddr-bel` command-line tool |

use std::io::Read;
use std::sync::Arc;

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod table;
pub mod builder;
pub mod graph;
pub mod export;
pub mod source;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    AssociationEdge, Annotations, Citation, DiseaseEntity,
    EdgeId, NodeId, Value, MESH,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use table::{Row, Table, TableLoader, COLUMNS, DEFAULT_SKIP_ROWS};
pub use builder::{
    AssociationGraphBuilder, BuilderConfig, BuildStats, Progress, RowDecision,
};
pub use graph::{AssociationGraph, Summary};
pub use source::DataSource;
pub use export::ExportFormat;

// ============================================================================
// Top-level Manager handle
// ============================================================================

/// The primary entry point. A `Manager` owns one built graph and answers
/// summary questions about it.
///
/// The graph is behind an `Arc` so serializers on other threads can read it.
#[derive(Debug, Clone)]
pub struct Manager {
    graph: Arc<AssociationGraph>,
    stats: BuildStats,
}

impl Manager {
    /// Build from an already-loaded table.
    pub fn from_table(table: &Table, config: BuilderConfig) -> Self {
        Self::from_table_with_progress(table, config, |_| {})
    }

    /// Build from a table, reporting per-row progress to `on_progress`.
    pub fn from_table_with_progress<F>(table: &Table, config: BuilderConfig, on_progress: F) -> Self
    where
        F: FnMut(Progress),
    {
        let (graph, stats) = AssociationGraphBuilder::new(config).build_with_stats(table, on_progress);
        Self { graph: Arc::new(graph), stats }
    }

    /// Parse a raw TSV stream with the default schema and build.
    pub fn from_reader<R: Read>(reader: R, config: BuilderConfig) -> Result<Self> {
        let table = TableLoader::default().load(reader)?;
        Ok(Self::from_table(&table, config))
    }

    /// Read the local archive of `source` and build.
    pub fn from_source(source: &DataSource, config: BuilderConfig) -> Result<Self> {
        let table = source.open_table(&TableLoader::default())?;
        Ok(Self::from_table(&table, config))
    }

    pub fn graph(&self) -> &Arc<AssociationGraph> {
        &self.graph
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Number of diseases in the graph.
    pub fn count_diseases(&self) -> usize {
        self.graph.count_nodes()
    }

    /// Number of disease-disease associations in the graph.
    pub fn count_relations(&self) -> usize {
        self.graph.count_edges()
    }

    pub fn summarize(&self) -> Summary {
        self.graph.summarize()
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow { line: u64, expected: usize, found: usize },

    #[error("Numeric parse error at line {line}, column '{column}': {value:?} is not a number")]
    NumericParse { line: u64, column: String, value: String },

    #[error("Encoding error at line {line}, column '{column}': field is not valid UTF-8")]
    Encoding { line: u64, column: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Table read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Download error: {0}")]
    Download(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
