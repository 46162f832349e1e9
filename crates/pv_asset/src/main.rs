use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, warn};
use pv_format::mesh::MeshData;
use structopt::StructOpt;
use walkdir::WalkDir;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "pv_asset")]
struct CliArgs {
    /// Model file or folder to search for `.obj` files
    #[structopt(parse(from_os_str))]
    input: PathBuf,
    /// Also print the welded vertices and the indices of every submesh
    #[structopt(short = "d", long = "dump")]
    dump: bool,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

/// Happens during setup
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Input does not exist: {0}")]
    InputNonExistant(PathBuf),
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    inspect(&args)
}

fn inspect(args: &CliArgs) -> Result<()> {
    let input_path = args.input.as_path();
    if !input_path.exists() {
        return Err(CliError::InputNonExistant(input_path.to_owned()).into());
    }

    let mut loaded = 0;
    let mut failed = 0;
    for entry in WalkDir::new(input_path).sort_by_file_name() {
        let path = match &entry {
            Err(err) => {
                warn!("Error parsing path: {}", err);
                continue;
            }
            Ok(entry) => entry.path(),
        };

        if path.is_dir() {
            continue;
        }

        // check extension
        if let Some(Some(extension)) = path.extension().map(|x| x.to_str()) {
            match extension.to_ascii_lowercase().as_ref() {
                "obj" => match process(path) {
                    Ok(mesh) => {
                        loaded += 1;
                        report(path, &mesh, args.dump);
                    }
                    Err(err) => {
                        failed += 1;
                        error!("Failed to load {}: {:#}", path.display(), err);
                    }
                },
                "toml" | "mtl" => debug!("Ignored file: {}", path.display()),
                _ => debug!("Could not handle path: {}", path.display()),
            }
        } else {
            debug!(
                "Ignored file \"{}\", because no file extension was found.",
                path.display()
            );
        }
    }

    println!("Loaded {} model(s), {} failed", loaded, failed);
    Ok(())
}

fn process(path: &Path) -> Result<MeshData> {
    let meta = pv_asset::parse_meta(path)
        .with_context(|| format!("Invalid meta file for {}", path.display()))?;
    Ok(pv_asset::load(path, &meta)?)
}

fn report(path: &Path, mesh: &MeshData, dump: bool) {
    println!("== {} ==", path.display());
    println!("{}", mesh);

    if dump {
        for (i, vertex) in mesh.vertices().iter().enumerate() {
            println!("{}: {:?}", i, vertex);
        }
        for (i, submesh) in mesh.submeshes().iter().enumerate() {
            println!("Submesh {} indices: {:?}", i, submesh.indices);
        }
    }
}
