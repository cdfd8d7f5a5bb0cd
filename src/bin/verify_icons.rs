use sparkle_icons::{
    icon_gen::{icon_file_name, DEFAULT_OUTPUT, DEFAULT_SIZES},
    png_chunks::{inflate_image_data, read_chunks, Header},
};
use std::path::Path;

fn main() {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let dir = Path::new(&dir);

    let mut failures = 0;
    for size in DEFAULT_SIZES {
        let path = dir.join(icon_file_name(size));
        println!("Checking icon: {}", path.display());

        match check_icon(&path, size) {
            Ok(()) => println!("✓ {} looks right\n", path.display()),
            Err(err) => {
                failures += 1;
                println!("⚠ {}: {:#}\n", path.display(), err);
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

fn check_icon(path: &Path, size: u32) -> anyhow::Result<()> {
    let bytes = std::fs::read(path)?;
    let chunks = read_chunks(&bytes)?;

    let kinds: Vec<&str> = chunks.iter().map(|c| c.kind_str()).collect();
    println!("  Chunks: {} (CRCs ok)", kinds.join(", "));

    let header = Header::parse(&chunks[0])?;
    println!(
        "  IHDR: {}x{}, depth {}, color type {}",
        header.width, header.height, header.bit_depth, header.color_type
    );
    if header != Header::rgba8(size, size) {
        anyhow::bail!("unexpected header {:?}", header);
    }

    let raw = inflate_image_data(&chunks)?;
    if raw.len() != header.raw_len() {
        anyhow::bail!(
            "inflated {} bytes, expected {}",
            raw.len(),
            header.raw_len()
        );
    }

    let img = image::load_from_memory(&bytes)?.to_rgba8();
    let center = img.get_pixel(size / 2, size / 2);
    let corner = img.get_pixel(0, 0);
    println!(
        "  Center RGBA: [{}, {}, {}, {}]",
        center[0], center[1], center[2], center[3]
    );
    println!("  Corner alpha: {}", corner[3]);

    if center.0 != [255, 255, 255, 255] {
        anyhow::bail!("center of the sparkle is not opaque white");
    }
    if corner[3] != 0 {
        anyhow::bail!("corner outside the badge is not transparent");
    }

    Ok(())
}
