//! Process network model for P-graph problems.
//!
//! A process network is a bipartite directed graph: materials flow into
//! operating units, which produce other materials at fixed flow ratios.
//! Optional mutual-exclusion sets forbid some units from being active
//! together.
//!
//! The model is pure data plus validation. Encoding it for an external solver
//! lives in `pgraph-codec`.

pub mod edge;
pub mod error;
pub mod exclusion;
pub mod network;
pub mod node;

pub use edge::Edge;
pub use error::{ModelError, Result};
pub use exclusion::{exclusion_sets, MutualExclusionSet};
pub use network::Network;
pub use node::{keys, Attributes, MaterialType, Node, NodeId, NodeKind, UNBOUNDED};
