//! Wireup resolves a construction order for a set of interdependent
//! components and then builds them, once, on the caller's thread.
//!
//! Every component is made by a [`Producer`]: it consumes the outputs of
//! other producers and any caller-supplied static values, and yields exactly
//! one value. Producers declare their inputs up front, so the build can link
//! the whole dependency graph, reject an incomplete or cyclic one before
//! anything runs, and then invoke each producer exactly once with its
//! arguments already built.
//!
//! Wireup is split into three major parts:
//! 1. [`GraphBuilder`]: registers producers and statics, then resolves and
//!    builds the graph in one shot
//! 2. [`Producer`] / [`DynProducer`]: how components declare what they need
//!    and what they make
//! 3. [`Container`]: holds every built value for typed retrieval
//!
//! # Examples
//!
//! ```rust
//! use wireup::{DynError, GraphBuilder, Inputs, Producer, TypeInfo};
//!
//! struct Config { port: u16 }
//! struct Listener { port: u16 }
//!
//! struct ListenerProducer;
//! impl Producer for ListenerProducer {
//!     type Output = Listener;
//!
//!     fn requires() -> Vec<TypeInfo> {
//!         vec![TypeInfo::of::<Config>()]
//!     }
//!
//!     fn produce(&mut self, inputs: Inputs<'_>) -> Result<Listener, DynError> {
//!         let config = inputs.get::<Config>()?;
//!         Ok(Listener { port: config.port })
//!     }
//! }
//!
//! let container = GraphBuilder::new()
//!     .add_static(Config { port: 8080 })
//!     .add_producer(ListenerProducer)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(container.require::<Listener>().unwrap().port, 8080);
//! ```
//!
//! The build is strictly sequential: edge discovery, a topological sort of
//! the producers, then one invocation per producer in that order. A graph is
//! single-use; [`GraphBuilder::build`] consumes the builder.

pub mod builder;
pub mod container;
pub mod errors;
mod graph;
pub mod producer;
pub mod types;

pub use builder::GraphBuilder;
pub use container::Container;
pub use errors::{BuildError, InputError, RequireError};
pub use producer::{DynProducer, FnProducer, Inputs, Producer};
pub use types::{DynError, Injectable, Instance, TypeInfo};
