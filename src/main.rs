extern crate gfx_core;
extern crate env_logger;
extern crate piston_window;
#[macro_use] extern crate log;
#[macro_use] extern crate clap;

use std::{io, process};
use std::ffi::OsStr;
use std::path::PathBuf;

use clap::Arg;
use piston_window::{
    OpenGL,
    PistonWindow,
    WindowSettings,
    TextureSettings,
    Glyphs,
    Event,
    Input,
    Button,
    ButtonArgs,
    ButtonState,
    Key,
};

mod common;
mod parse;
mod viewport;

use common::{Point, Segment};
use viewport::{grid_marks, Viewport};

fn main() {
    env_logger::init();
    match run() {
        Ok(()) =>
            info!("graceful shutdown"),
        Err(e) => {
            error!("fatal error: {:?}", e);
            process::exit(1);
        },
    }
}

#[derive(Debug)]
enum Error {
    MissingParameter(&'static str),
    Piston(PistonError),
}

#[derive(Debug)]
enum PistonError {
    BuildWindow(String),
    LoadFont { file: String, error: io::Error, },
    DrawText(gfx_core::factory::CombinedError),
}

const DEFAULT_INPUT: &'static str = "lines.txt";
const CONSOLE_HEIGHT: u32 = 32;
const SCREEN_WIDTH: u32 = 960;
const SCREEN_HEIGHT: u32 = 720;

struct Config {
    input: PathBuf,
    assets_dir: PathBuf,
}

fn run() -> Result<(), Error> {
    let matches = app_from_crate!()
        .arg(Arg::with_name("input")
             .value_name("FILE")
             .help("Line segment data file produced by the curve generator")
             .default_value(DEFAULT_INPUT)
             .index(1))
        .arg(Arg::with_name("assets-dir")
             .short("a")
             .long("assets-dir")
             .value_name("DIR")
             .help("Graphics resources directory")
             .default_value("./assets")
             .takes_value(true))
        .get_matches();

    let config = Config {
        input: PathBuf::from(matches.value_of("input")
            .ok_or(Error::MissingParameter("input"))?),
        assets_dir: PathBuf::from(matches.value_of("assets-dir")
            .ok_or(Error::MissingParameter("assets-dir"))?),
    };

    if matches.occurrences_of("input") == 0 {
        info!("no input file given, loading default {:?}", config.input);
    } else {
        info!("loading line segments from {:?}", config.input);
    }
    if config.input.extension() != Some(OsStr::new("txt")) {
        warn!("input file {:?} does not have a .txt extension", config.input);
    }

    let segments = parse::load_segments(&config.input);
    if segments.is_empty() {
        info!("no line segments were loaded, nothing to plot");
        return Ok(());
    }
    info!("loaded {} line segments", segments.len());

    run_viewer(&config, segments)
}

fn run_viewer(config: &Config, segments: Vec<Segment>) -> Result<(), Error> {
    let viewport = match Viewport::from_segments(&segments) {
        Some(viewport) =>
            viewport,
        None => {
            info!("no valid line segments found to plot");
            return Ok(());
        },
    };

    let opengl = OpenGL::V4_1;
    let mut window: PistonWindow = WindowSettings::new("Koch curve plot", [SCREEN_WIDTH, SCREEN_HEIGHT])
        .exit_on_esc(true)
        .opengl(opengl)
        .build()
        .map_err(PistonError::BuildWindow)
        .map_err(Error::Piston)?;

    let mut font_path = config.assets_dir.clone();
    font_path.push("FiraSans-Regular.ttf");
    let mut glyphs = Glyphs::new(&font_path, window.factory.clone(), TextureSettings::new())
        .map_err(|e| Error::Piston(PistonError::LoadFont {
            file: font_path.to_string_lossy().to_string(),
            error: e,
        }))?;

    info!("plotting {} line segments", segments.len());

    let step = viewport.grid_step();
    let grid_x = grid_marks(viewport.x_min, viewport.x_max, step);
    let grid_y = grid_marks(viewport.y_min, viewport.y_max, step);
    let summary = format!("total segments: {}", segments.len());
    let mut mapping = viewport.fit(SCREEN_WIDTH as f64, (SCREEN_HEIGHT - CONSOLE_HEIGHT) as f64);

    while let Some(event) = window.next() {
        let maybe_result = window.draw_2d(&event, |context, g2d| {
            use piston_window::{clear, text, line, Transformed};
            clear([1.0, 1.0, 1.0, 1.0], g2d);

            let plot_transform = context.transform.trans(0.0, CONSOLE_HEIGHT as f64);
            // grid first, segments draw on top of it
            for &gx in grid_x.iter() {
                let top = mapping.apply(Point { x: gx, y: viewport.y_max, });
                let bottom = mapping.apply(Point { x: gx, y: viewport.y_min, });
                line([0.5, 0.5, 0.5, 0.3], 0.5, [top[0], top[1], bottom[0], bottom[1]], plot_transform, g2d);
            }
            for &gy in grid_y.iter() {
                let left = mapping.apply(Point { x: viewport.x_min, y: gy, });
                let right = mapping.apply(Point { x: viewport.x_max, y: gy, });
                line([0.5, 0.5, 0.5, 0.3], 0.5, [left[0], left[1], right[0], right[1]], plot_transform, g2d);
            }
            for segment in segments.iter() {
                let src = mapping.apply(segment.src);
                let dst = mapping.apply(segment.dst);
                line([0.75, 0., 0., 1.0], 0.75, [src[0], src[1], dst[0], dst[1]], plot_transform, g2d);
            }
            text::Text::new_color([0.1, 0.1, 0.1, 1.0], 16).draw(
                &summary,
                &mut glyphs,
                &context.draw_state,
                context.transform.trans(5.0, 20.0),
                g2d
            ).map_err(PistonError::DrawText)?;

            Ok(())
        });
        if let Some(result) = maybe_result {
            let () = result.map_err(Error::Piston)?;
        }

        match event {
            Event::Input(Input::Button(ButtonArgs { button: Button::Keyboard(Key::Q), state: ButtonState::Release, .. })) =>
                break,
            Event::Input(Input::Resize(width, height)) =>
                mapping = viewport.fit(width as f64, height.saturating_sub(CONSOLE_HEIGHT) as f64),
            _ =>
                (),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{run_viewer, Config};

    #[test]
    fn viewer_is_a_no_op_for_empty_input() {
        let config = Config {
            input: PathBuf::from("lines.txt"),
            assets_dir: PathBuf::from("./assets"),
        };
        assert!(run_viewer(&config, Vec::new()).is_ok());
    }
}
