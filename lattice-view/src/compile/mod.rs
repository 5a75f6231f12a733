//! Template Compilation
//!
//! Turns a node tree plus an observed data object into live bindings.
//! [`Compiler`] does the walk; [`Directive`] holds the binding routines;
//! [`Template`] parses interpolation markers.

mod compiler;
mod directive;
mod template;

pub use compiler::{Compiler, Fragment};
pub use directive::{BindContext, Directive, Method, Methods};
pub use template::{Segment, Template};
