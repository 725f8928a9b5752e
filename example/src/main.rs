use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gen6502::vcs::COLUBK;
use gen6502::{GenError, Program, Target};
use tracing::Level;

#[derive(Parser)]
#[command(version, about = "Builds a 4K Atari 2600 cartridge that fills the frame with colour")]
struct Args {
    /// Cartridge image to write
    #[arg(short, long, default_value = "hello_world.a26")]
    output: PathBuf,

    /// Also save the listing here
    #[arg(short, long)]
    listing: Option<PathBuf>,

    /// Print the listing to stdout
    #[arg(short, long)]
    print: bool,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

/// One frame per iteration: sync, blank, 192 coloured lines, overscan.
fn hello_world() -> Result<Program, GenError> {
    let mut program = Program::new();
    program.clean_start()?;

    program.label("startOfFrame");
    program.start_of_vertical_blank()?;
    program.wait_for_end_of_vertical_blank("HelloWorld")?;

    for line in 0..192 {
        program.wsync()?;
        program.lda_immediate(line)?;
        program.sta_zero_page(COLUBK)?;
    }

    program.overscan("HelloWorld")?;
    program.jmp_absolute("startOfFrame")?;
    Ok(program)
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(args: &Args) -> Result<(), GenError> {
    let assembly = hello_world()?.compile(&Target::default())?;

    if args.print {
        assembly.print_listing();
    }
    if let Some(dir) = args.output.parent() {
        fs::create_dir_all(dir)?;
    }
    assembly.write_image(File::create(&args.output)?)?;
    tracing::info!("cartridge saved to {}", args.output.display());

    if let Some(path) = &args.listing {
        assembly.save_listing(path)?;
        tracing::info!("listing saved to {}", path.display());
    }
    tracing::info!(
        "program bytes: {} of {}",
        assembly.bytes.len(),
        assembly.image.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_directories_are_created() {
        let dir = std::env::temp_dir().join(format!("gen6502-example-{}", std::process::id()));
        let args = Args {
            output: dir.join("roms").join("hello_world.a26"),
            listing: None,
            print: false,
            log_level: Level::INFO,
        };

        run(&args).unwrap();
        assert_eq!(fs::metadata(&args.output).unwrap().len(), 4096);
        fs::remove_dir_all(&dir).unwrap();
    }
}
