//! # Conrey characters
//!
//! Dirichlet characters mod q in the Conrey numbering: every character is
//! labelled by a residue n coprime to q, and chi_q(n, .) denotes "the
//! character numbered n". All of the expensive number theory (factoring q,
//! primitive roots, discrete-log tables, root-of-unity tables) happens once
//! per modulus in [`group::DirichletGroup`]; evaluating chi(n, m) afterwards
//! is integer table lookups and modular arithmetic.

pub mod arith;
pub mod character;
pub mod complex;
pub mod gauss;
pub mod group;

pub use character::DirichletCharacter;
pub use group::{DirichletGroup, GroupError};
