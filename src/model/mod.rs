//! # Association Graph Model
//!
//! Typed DTOs for the disease association graph.
//! These types cross every boundary: builder ↔ graph ↔ exporters ↔ user.
//!
//! Design rule: no csv, zip, or HTTP types here.
//! This module is pure data — no I/O, no state.

pub mod node;
pub mod edge;
pub mod value;
pub mod annotations;

pub use node::{DiseaseEntity, NodeId, MESH};
pub use edge::{AssociationEdge, Citation, EdgeId};
pub use value::Value;
pub use annotations::{Annotations, SEPARATION_KEY, SOURCE_MODULE_KEY};
