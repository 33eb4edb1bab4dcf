//! Statement normalization (pure, infallible)

mod field;
mod principal;
mod statement;

pub use field::normalize_field;
pub use principal::{simplify_principal, COMPLEX_PRINCIPAL_PREFIX};
pub use statement::normalize_statement;
