use crate::{png_chunks::encode_png, sparkle::icon_color};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Square icon sizes written by default
pub const DEFAULT_SIZES: [u32; 3] = [16, 48, 128];

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "icons";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output: PathBuf,
    pub sizes: Vec<u32>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            sizes: DEFAULT_SIZES.to_vec(),
        }
    }
}

/// A file written by [`generate_icons`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
    pub bytes: usize,
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

/// Renders and writes every configured size, one line of output per file.
pub fn generate_icons(options: &GenerateOptions) -> Result<Vec<GeneratedIcon>> {
    // Ensure the output directory exists
    std::fs::create_dir_all(&options.output).with_context(|| {
        format!(
            "Can't create output directory {}",
            options.output.display()
        )
    })?;

    let mut generated = Vec::with_capacity(options.sizes.len());
    for &size in &options.sizes {
        let icon = generate_icon(size, &options.output)?;
        println!(
            "✓ Generated {} ({} bytes)",
            icon.path.display(),
            icon.bytes
        );
        generated.push(icon);
    }

    Ok(generated)
}

fn generate_icon(size: u32, out_dir: &Path) -> Result<GeneratedIcon> {
    let png = encode_png(size, size, icon_color)
        .with_context(|| format!("Failed to encode {size}x{size} icon"))?;

    let path = out_dir.join(icon_file_name(size));
    std::fs::write(&path, &png)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(GeneratedIcon {
        size,
        path,
        bytes: png.len(),
    })
}
