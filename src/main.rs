use clap::Parser;

use mandelbrot_tiler::cli::args::{CommandsEnum, ParameterFilePath, TileRendererArgs};
use mandelbrot_tiler::cli::color_swatch::{generate_color_swatch, ColorSwatchParams};
use mandelbrot_tiler::cli::render::{render_tile_to_files, TileRenderParams};
use mandelbrot_tiler::core::file_io::{
    build_output_path_with_date_time, extract_base_name, maybe_date_time_string, FilePrefix,
};

fn file_prefix_for(params: &ParameterFilePath, project: &str) -> FilePrefix {
    FilePrefix {
        directory_path: build_output_path_with_date_time(
            &params.params_path,
            project,
            &maybe_date_time_string(params.date_time_out),
        ),
        file_base: extract_base_name(&params.params_path).to_owned(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = TileRendererArgs::parse();

    match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let render_params: TileRenderParams =
                serde_json::from_str(&std::fs::read_to_string(&params.params_path)?)?;
            render_tile_to_files(&render_params, file_prefix_for(params, "tiles"))
        }
        Some(CommandsEnum::ColorSwatch(params)) => {
            let swatch_params: ColorSwatchParams =
                serde_json::from_str(&std::fs::read_to_string(&params.params_path)?)?;
            generate_color_swatch(&swatch_params, file_prefix_for(params, "color_swatch"))
        }
        None => {
            println!("No command specified; run with --help to see the options.");
            Ok(())
        }
    }
}
