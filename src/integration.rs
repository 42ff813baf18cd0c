/// Methods to assist in Gauss-Legendre-Quadrature integration
pub mod glq;

/// Quadrature rules over each reference element shape
pub mod rules;

pub use rules::QuadratureRule;
