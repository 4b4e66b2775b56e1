#![cfg_attr(feature="clippy", feature(plugin))]
#![cfg_attr(feature="clippy", plugin(clippy))]

use docopt::Docopt;
use mazegen::{
    generators::{self, GeneratorOptions},
    renderers,
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path
};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver [--grid-size=<n>] [--seed=<s>] [text --text-out=<path>] [image --image-out=<path> --cell-pixels=<n>]

Options:
    -h --help            Show this screen.
    --grid-size=<n>      The maze grid size is n * n [default: 20].
    --seed=<s>           Random seed. The same seed and grid size always reproduces the same maze.
    --text-out=<path>    Output file path for a textual rendering of the maze.
    --image-out=<path>   Output file path for an image rendering of the maze. Always PNG format [default: maze.png].
    --cell-pixels=<n>    Pixel count to render one cell wall in the maze [default: 10] max 255.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: usize,
    flag_seed: Option<usize>,
    cmd_text: bool,
    flag_text_out: String,
    cmd_image: bool,
    flag_image_out: String,
    flag_cell_pixels: u8,
}

// We'll put our errors in an `errors` module; the `error_chain!` invocation
// links in the library's own error type so `?` converts it.
mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }
        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    // Without an explicit render command small mazes go to the terminal and
    // large ones, which would not fit a screen of text, go to an image file.
    let large_grid_cell_count = 25 * 25;
    let cell_count = args.flag_grid_size * args.flag_grid_size;
    let any_render_option = args.cmd_text || args.cmd_image;
    let do_text_render = args.cmd_text ||
                         (!any_render_option && cell_count < large_grid_cell_count);
    let do_image_render = args.cmd_image ||
                          (!any_render_option && cell_count >= large_grid_cell_count);

    let generator_options = GeneratorOptions {
        dimension_size: args.flag_grid_size,
        random_seed: args.flag_seed,
    };
    let maze_grid = generators::generate(&generator_options)?;

    if do_text_render {
        if args.flag_text_out.is_empty() {
            println!("{}", maze_grid);
        } else {
            write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if do_image_render {
        let out_image_path = Path::new(&args.flag_image_out);
        let render_options = renderers::RenderOptionsBuilder::new()
            .cell_side_pixels_length(args.flag_cell_pixels)
            .output_file(Some(out_image_path))
            .build();
        let _image = renderers::render_square_grid(&maze_grid, &render_options)?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
