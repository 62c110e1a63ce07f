//! `dtn-grid` — uniform-grid spatial index for contact detection.
//!
//! # Crate layout
//!
//! | Module  | Contents                                          |
//! |---------|----------------------------------------------------|
//! | [`grid`]| `UniformGrid`, `recommended_cell_size`             |

pub mod grid;

#[cfg(test)]
mod tests;

pub use grid::{recommended_cell_size, UniformGrid};
