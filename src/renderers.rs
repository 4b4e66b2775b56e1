//! Image rendering of a finished maze grid.
//!
//! Consumes only the per-cell wall flags and open/closed status: black wall
//! segments on a white background, with the outer boundary wall of each open
//! cell left undrawn so the entrance and exit read as gaps in the outline.

use image::{ImageBuffer, Rgb, RgbImage};
use std::cmp;
use std::path::Path;

use crate::cells::WallSide;
use crate::errors::*;
use crate::squaregrid::SquareGrid;

const WALL_COLOUR: Rgb<u8> = Rgb { data: [0, 0, 0] };
const BACKGROUND_COLOUR: Rgb<u8> = Rgb { data: [0xff, 0xff, 0xff] };

#[derive(Debug, Copy, Clone)]
pub struct RenderOptions<'path> {
    cell_side_pixels_length: u8,
    output_file: Option<&'path Path>,
}

#[derive(Debug, Copy, Clone)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}
impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels_length: 10,
                output_file: None,
            },
        }
    }

    pub fn cell_side_pixels_length(mut self, pixels: u8) -> RenderOptionsBuilder<'path> {
        self.options.cell_side_pixels_length = pixels;
        self
    }

    pub fn output_file(mut self, path: Option<&'path Path>) -> RenderOptionsBuilder<'path> {
        self.options.output_file = path;
        self
    }

    pub fn build(self) -> RenderOptions<'path> {
        self.options
    }
}

/// Draws the maze as a 2-D line drawing, written out as a PNG when an output
/// file is set. The drawn image buffer is returned either way.
pub fn render_square_grid(grid: &SquareGrid, options: &RenderOptions) -> Result<RgbImage> {
    let cell_size_pixels = cmp::max(options.cell_side_pixels_length, 1) as usize;

    // One extra pixel so the east and south boundary lines fit.
    let image_side = (cell_size_pixels * grid.dimension() + 1) as u32;
    let mut image: RgbImage = ImageBuffer::from_pixel(image_side, image_side, BACKGROUND_COLOUR);

    for cell_coord in grid.iter() {
        let cell = grid.cell(cell_coord);
        let gap_side = grid.opening_side(cell_coord);

        let column = cell_coord.x as usize;
        let row = cell_coord.y as usize;
        let x1 = column * cell_size_pixels;
        let y1 = row * cell_size_pixels;
        let x2 = (column + 1) * cell_size_pixels;
        let y2 = (row + 1) * cell_size_pixels;

        for &side in WallSide::ALL.iter() {
            if !cell.has_wall(side) || gap_side == Some(side) {
                continue;
            }
            match side {
                WallSide::Top => draw_horizontal_line(&mut image, x1, x2, y1),
                WallSide::Right => draw_vertical_line(&mut image, x2, y1, y2),
                WallSide::Bottom => draw_horizontal_line(&mut image, x1, x2, y2),
                WallSide::Left => draw_vertical_line(&mut image, x1, y1, y2),
            }
        }
    }

    if let Some(file_path) = options.output_file {
        image.save(file_path)
             .chain_err(|| format!("Failed to write maze image file {}", file_path.display()))?;
    }

    Ok(image)
}

fn draw_horizontal_line(image: &mut RgbImage, x1: usize, x2: usize, y: usize) {
    for x in x1..(x2 + 1) {
        image.put_pixel(x as u32, y as u32, WALL_COLOUR);
    }
}

fn draw_vertical_line(image: &mut RgbImage, x: usize, y1: usize, y2: usize) {
    for y in y1..(y2 + 1) {
        image.put_pixel(x as u32, y as u32, WALL_COLOUR);
    }
}
