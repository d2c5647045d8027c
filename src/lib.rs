//! Generates the VEGL Python parameter script from a job-object field model.
//!
//! Pipeline: [`model`] tags each field once → [`classify`] picks the primitive
//! fields → [`assemble`] builds a [`ir::Program`] (bounding-box helper,
//! parameter class, global instance) → [`codegen`] renders it to text.
pub mod assemble;
pub mod classify;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod geometry;
pub mod ident;
pub mod ir;
pub mod jq_exec;
pub mod literal;
pub mod model;
pub mod path_de;

pub use assemble::{assemble, Assembler};
pub use classify::{classify, partition, Classification};
pub use codegen::{emit_class, Codegen, Layout};
pub use config::GeneratorOptions;
pub use error::{Error, Result};
pub use geometry::BoundingBox;
pub use literal::python_literal;
pub use model::{FieldModel, FieldValue, Number, Primitive};
