#![no_main]
use libfuzzer_sys::fuzz_target;
use zenimagedata::{ImageData3D, PixelFormat, PixelStorage};

fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }
    // Small extents keep the buffer the fuzzer controls relevant.
    let storage = PixelStorage::new()
        .with_alignment(data[0])
        .with_row_skip(u32::from(data[1] % 16))
        .with_image_skip(u32::from(data[2] % 16))
        .with_skip([
            u32::from(data[3] % 4),
            u32::from(data[4] % 4),
            u32::from(data[5] % 4),
        ]);
    let pixel_size = u32::from(data[6] % 17);
    let size = [
        u32::from(data[7] % 9),
        u32::from(data[8] % 9),
        u32::from(data[9] % 5),
    ];
    let buffer = data[12..].to_vec();

    // Construction, layout and views must never panic
    let Ok(mut image) = ImageData3D::new(
        storage,
        PixelFormat::wrap(u32::from(data[10])),
        u32::from(data[11]),
        pixel_size,
        size,
        buffer,
        None,
    ) else {
        return;
    };
    let pixels = image.pixels().expect("validated image has a pixel view");
    let packed = pixels.to_packed_vec();
    assert_eq!(packed.len(), size.iter().product::<u32>() as usize * pixel_size as usize);

    let moved = image.take();
    assert_eq!(image.size(), [0, 0, 0]);
    assert!(image.pixels().is_ok());
    assert_eq!(moved.size(), size);
});
