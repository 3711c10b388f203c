//! Catena core library.
//!
//! Discovers every file under a root directory, reads their
//! `require '<path>'` directives, rejects circular dependencies and writes
//! all files into a single artifact so that each file follows the files it
//! requires.
//!
//! The pipeline is strictly sequential: [`scan`], [`directive`] parsing into
//! a [`graph::GraphBuilder`], cycle detection and sorting on the resulting
//! [`graph::DependencyGraph`], then [`concat`]. [`runner`] wires the stages
//! together for the command line tool.

pub mod cli;
pub mod concat;
pub mod config;
pub mod directive;
pub mod graph;
pub mod node_id;
pub mod runner;
pub mod scan;
pub mod status;
