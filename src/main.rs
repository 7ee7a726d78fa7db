use clap::Parser;
use env_logger::Env;
use lightbench::{
    console::{Args, PartialArgs},
    error::{LbError, LbResult},
    ray_path::{total_intensity, Termination},
    scenery::{write_csv, Scenery},
};
use log::info;
use std::fs::File;

fn main() -> LbResult<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    //parse CLI arguments
    let args = Args::try_from(PartialArgs::parse())?;

    //read bench from file
    info!("reading bench {}", args.file_path.display());
    let scenery = Scenery::load(&args.file_path)?;

    let paths = scenery.trace(args.parallel);
    info!(
        "{} ray paths, total intensity {:.4} (escaped {:.4}, absorbed {:.4})",
        paths.len(),
        total_intensity(&paths, None),
        total_intensity(&paths, Some(Termination::Escaped)),
        total_intensity(&paths, Some(Termination::Absorbed))
    );

    //write ray paths
    let output = File::create(&args.output_path).map_err(|e| {
        LbError::Console(format!(
            "cannot create file {} : {}",
            args.output_path.display(),
            e
        ))
    })?;
    write_csv(&paths, output)?;
    info!("ray paths written to {}", args.output_path.display());
    Ok(())
}
