//! Business logic services.
//!
//! Services validate referenced ids, orchestrate repositories, and map
//! store failures into the application error taxonomy, using the
//! `FromContext` derive macro for dependency injection.

mod category;

pub use category::CategoryService;
