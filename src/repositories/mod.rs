//! Data access layer over the document store.
//!
//! Repositories provide typed collection access and return raw driver
//! errors; classification into the application taxonomy happens in the
//! service layer, once per operation. Injected via the `FromContext`
//! derive macro.

mod category;
mod user;

pub use category::CategoryRepository;
pub use user::UserRepository;
