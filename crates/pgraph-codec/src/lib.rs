//! Text protocol of the external P-graph solver.
//!
//! [`encode`](encode::encode) renders a [`pgraph_core::Network`] into the
//! solver's `PNS_problem_v1` input language. [`decode`](decode::decode) turns
//! the solver's free-form report back into a [`SolutionSet`]. Both are pure
//! functions over strings; running the solver lives in `pgraph-solver`.

pub mod activity;
pub mod decode;
pub mod encode;
pub mod error;
pub mod mode;
pub mod reassemble;
pub mod solution;

pub use activity::{Activity, EdgeActivity, NodeActivity};
pub use decode::decode;
pub use encode::{encode, EncodeOptions, InputDocument};
pub use error::{CodecError, ParseError, Result};
pub use mode::SolverMode;
pub use solution::{
    MaterialRecord, OperatingUnitRecord, Solution, SolutionId, SolutionSet, StructureContents,
};
