use sparkle_icons::{
    icon_gen::{generate_icons, GenerateOptions},
    png_chunks::{inflate_image_data, read_chunks, Header, IEND},
    sparkle::render,
};
use tempfile::TempDir;

fn options_in(temp_dir: &TempDir) -> GenerateOptions {
    GenerateOptions {
        output: temp_dir.path().join("icons"),
        ..GenerateOptions::default()
    }
}

#[test]
fn test_generate_default_sizes() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let options = options_in(&temp_dir);

    let generated = generate_icons(&options).expect("Generation should succeed");

    let sizes: Vec<u32> = generated.iter().map(|icon| icon.size).collect();
    assert_eq!(sizes, vec![16, 48, 128]);

    for icon in &generated {
        let expected_name = format!("icon{}.png", icon.size);
        assert_eq!(icon.path, options.output.join(&expected_name));

        let bytes = std::fs::read(&icon.path).expect("Failed to read icon");
        assert_eq!(bytes.len(), icon.bytes);

        let chunks = read_chunks(&bytes).expect("Every CRC should verify");
        assert_eq!(chunks.last().map(|c| c.kind), Some(IEND));
        assert!(chunks.last().unwrap().data.is_empty());

        let header = Header::parse(&chunks[0]).expect("IHDR should parse");
        assert_eq!(header, Header::rgba8(icon.size, icon.size));

        let raw = inflate_image_data(&chunks).expect("IDAT should inflate");
        assert_eq!(raw.len(), (icon.size * (1 + icon.size * 4)) as usize);
    }
}

/// The pixels a third-party decoder sees are exactly the rendered design.
#[test]
fn test_decoded_pixels_match_render() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let generated = generate_icons(&options_in(&temp_dir)).expect("Generation should succeed");

    for icon in &generated {
        let decoded = image::open(&icon.path)
            .expect("Failed to load generated icon")
            .to_rgba8();
        let expected = render(icon.size, icon.size);
        assert!(
            decoded == expected,
            "Decoded {}x{} icon differs from the rendered design",
            icon.size,
            icon.size
        );

        let center = decoded.get_pixel(icon.size / 2, icon.size / 2);
        assert_eq!(center.0, [255, 255, 255, 255]);
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
    }
}

#[test]
fn test_existing_directory_is_reused() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let options = options_in(&temp_dir);
    std::fs::create_dir_all(&options.output).expect("Failed to pre-create output");

    let first = generate_icons(&options).expect("First run should succeed");
    let first_bytes = std::fs::read(&first[2].path).expect("Failed to read icon");
    let second = generate_icons(&options).expect("Second run should succeed");
    let second_bytes = std::fs::read(&second[2].path).expect("Failed to read icon");

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_zero_size_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let options = GenerateOptions {
        sizes: vec![0],
        ..options_in(&temp_dir)
    };

    let err = generate_icons(&options).expect_err("Zero size should be rejected");
    assert!(format!("{:#}", err).contains("non-zero"), "{:#}", err);
}

#[test]
fn test_unwritable_output_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("icons");
    std::fs::write(&blocker, b"not a directory").expect("Failed to create blocker file");

    let options = GenerateOptions {
        output: blocker,
        ..GenerateOptions::default()
    };
    assert!(generate_icons(&options).is_err());
}
