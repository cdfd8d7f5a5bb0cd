use anyhow::Result;
use clap::Parser;
use sparkle_icons::icon_gen::{self, GenerateOptions};

#[derive(Debug, Parser)]
#[clap(
    name = "sparkle-icons",
    version,
    about = "Generate the 16, 48 and 128 px sparkle badge icons into ./icons"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    icon_gen::generate_icons(&GenerateOptions::default())?;
    Ok(())
}
