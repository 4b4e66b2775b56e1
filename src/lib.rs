//! **mazegen** is a random perfect maze generation and rendering library.
//!
//! The maze is built by randomised Kruskal-style spanning tree construction:
//! keep knocking down walls between randomly sampled adjacent cells that are
//! not yet connected until every cell is in one connected component.

pub mod cells;
pub mod disjoint_set;
pub mod generators;
pub mod renderers;
pub mod squaregrid;
mod utils;

pub mod errors {
    use error_chain::*;
    error_chain! {
        errors {
            InvalidGridSize(dimension_size: usize) {
                description("invalid grid dimension size")
                display("invalid grid dimension size: {}, the maze dimension must be at least 1",
                        dimension_size)
            }
        }
    }
}
