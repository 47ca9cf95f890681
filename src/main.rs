//! # Easel CLI
//!
//! Usage:
//!   easel script.json -o rendering.json
//!   echo '{ ... }' | easel --scale 2
//!   easel --example > poster.json
//!
//! Diagnostics are logged to stderr; set `RUST_LOG` to adjust verbosity.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use easel::error::EaselError;
use easel::model::Script;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("easel=warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), EaselError> {
    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_script_json());
        return Ok(());
    }

    // Read input
    let input = match args.get(1).filter(|a| !a.starts_with('-')) {
        Some(path) => fs::read_to_string(path).map_err(|source| EaselError::Io {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| EaselError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            buf
        }
    };

    let mut script: Script = serde_json::from_str(&input)?;

    if let Some(scale) = flag_value(&args, "--scale") {
        script.config.scale = scale
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite() && *s > 0.0)
            .ok_or_else(|| EaselError::Argument(format!("--scale expects a positive number, got '{}'", scale)))?;
    }

    let rendering = easel::compose(script)?;
    let json = serde_json::to_string_pretty(&rendering).map_err(EaselError::Output)?;

    match flag_value(&args, "-o") {
        Some(output_path) => {
            fs::write(output_path, &json).map_err(|source| EaselError::Io {
                path: output_path.to_string(),
                source,
            })?;
            eprintln!(
                "✓ {} commands, canvas height {} written to {}",
                rendering.commands.len(),
                rendering.height,
                output_path
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn example_script_json() -> &'static str {
    r##"{
  "config": { "scale": 2, "canvasId": "poster" },
  "layers": [
    { "type": "artboard", "width": 375, "height": 600, "backgroundColor": "#ffffff" },
    {
      "type": "image",
      "id": "cover",
      "path": "./cover.jpg",
      "mode": "center",
      "left": 0,
      "top": 0,
      "width": 375,
      "height": 200,
      "sWidth": 1280,
      "sHeight": 960
    },
    {
      "type": "circleImage",
      "id": "avatar",
      "path": "./avatar.png",
      "left": 20,
      "d": 48,
      "referLayer": { "id": "cover", "top": 16 }
    },
    {
      "type": "text",
      "id": "name",
      "text": "Ada Lovelace",
      "fontSize": 16,
      "color": "#111111",
      "referLayer": { "id": "cover", "top": 28 },
      "left": 80
    },
    {
      "type": "rectangle",
      "id": "divider",
      "left": 20,
      "width": 335,
      "height": 1,
      "backgroundColor": "#eeeeee",
      "referLayer": { "id": "avatar", "top": 16 }
    },
    {
      "type": "wrapText",
      "id": "bio",
      "left": 20,
      "width": 335,
      "fontSize": 14,
      "lineHeight": 6,
      "text": "Wrote the first published algorithm intended for a machine, and saw that such machines could manipulate symbols beyond numbers. 她被认为是第一位程序员。",
      "referLayer": { "id": "divider", "top": 16 }
    }
  ]
}
"##
}
