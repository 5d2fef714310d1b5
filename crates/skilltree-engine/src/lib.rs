//! Computation layer of the skill tree: prerequisite resolution, graph
//! construction, completion tracking, and the orchestrator that composes
//! them with the layout engine into a render-ready structure.

pub mod builder;
pub mod completion;
pub mod resolver;
pub mod tree;
