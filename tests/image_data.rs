//! Construction, ownership transfer and view tests for ImageData.

use zenimagedata::*;

fn checkerboard(w: usize, h: usize, bpp: usize, stride: usize) -> Vec<u8> {
    let mut data = vec![0xee; stride * h];
    for y in 0..h {
        for x in 0..w {
            let off = y * stride + x * bpp;
            let value = if (x + y) % 2 == 0 { 200 } else { 10 };
            for c in 0..bpp {
                data[off + c] = value + c as u8;
            }
        }
    }
    data
}

fn rgb_image(importer: Option<ImporterHandle>) -> ImageData2D {
    ImageData2D::new(
        PixelStorage::new(),
        PixelFormat::RGB8Srgb,
        1337,
        3,
        [5, 2],
        checkerboard(5, 2, 3, 16),
        importer,
    )
    .unwrap()
}

fn bc1_image(importer: Option<ImporterHandle>) -> ImageData2D {
    ImageData2D::compressed(
        CompressedPixelStorage::new().with_block_size([4, 4, 1], 8),
        CompressedPixelFormat::Bc1RGBAUnorm,
        [4, 8],
        vec![0xab; 16],
        importer,
    )
}

// ── Construction ─────────────────────────────────────────────────────

#[test_log::test]
fn exact_minimum_size_constructs() {
    let image = ImageData2D::from_format(
        PixelStorage::new(),
        PixelFormat::RGB8Unorm,
        [5, 2],
        vec![0; 32],
        None,
    )
    .unwrap();
    assert!(!image.is_compressed());
    assert_eq!(image.size(), [5, 2]);
    assert_eq!(image.pixel_size(), Ok(3));
    assert_eq!(image.format_extra(), Ok(0));
    assert_eq!(image.storage(), Ok(PixelStorage::new()));
}

#[cfg(not(feature = "fast-fail"))]
#[test_log::test]
fn one_byte_short_fails() {
    let err = ImageData2D::from_format(
        PixelStorage::new(),
        PixelFormat::RGB8Unorm,
        [5, 2],
        vec![0; 31],
        None,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ImageDataError::DataTooSmall {
            expected: 32,
            actual: 31
        }
    );
}

#[cfg(not(feature = "fast-fail"))]
#[test]
fn minimum_size_boundary_over_layouts() {
    let storages = [
        PixelStorage::packed(),
        PixelStorage::new(),
        PixelStorage::new().with_alignment(8).with_row_skip(5),
        PixelStorage::new().with_alignment(2).with_image_skip(7),
        PixelStorage::packed().with_skip([1, 1, 1]),
    ];
    for storage in storages {
        for pixel_size in [1u32, 2, 3, 4, 6, 16] {
            for size in [[1u32, 1, 1], [5, 2, 1], [3, 7, 2], [13, 1, 4]] {
                let expected = layout::image_data_size(&storage, pixel_size, size).unwrap();
                let ok = ImageData3D::new(
                    storage,
                    PixelFormat::wrap(1),
                    0,
                    pixel_size,
                    size,
                    vec![0; expected],
                    None,
                );
                assert!(ok.is_ok(), "{storage:?} {pixel_size} {size:?}");

                let short = ImageData3D::new(
                    storage,
                    PixelFormat::wrap(1),
                    0,
                    pixel_size,
                    size,
                    vec![0; expected - 1],
                    None,
                );
                assert!(
                    matches!(short, Err(ImageDataError::DataTooSmall { .. })),
                    "{storage:?} {pixel_size} {size:?}"
                );
            }
        }
    }
}

#[test]
fn raw_format_with_explicit_pixel_size() {
    let image = ImageData1D::from_raw_format(
        PixelStorage::packed(),
        0x8058,
        0x1401,
        Some(4),
        [3],
        vec![0; 12],
        None,
    )
    .unwrap();
    assert_eq!(image.format(), Ok(PixelFormat::Implementation(0x8058)));
    assert_eq!(image.format_extra(), Ok(0x1401));
    assert_eq!(image.pixel_size(), Ok(4));
}

#[cfg(not(feature = "fast-fail"))]
#[test]
fn raw_format_without_pixel_size_fails() {
    let err = ImageData1D::from_raw_format(
        PixelStorage::packed(),
        0x8058,
        0,
        None,
        [3],
        vec![0; 12],
        None,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ImageDataError::UnknownPixelSize(PixelFormat::wrap(0x8058))
    );
}

#[cfg(not(feature = "fast-fail"))]
#[test]
fn invalid_storage_is_rejected() {
    let err = ImageData2D::new(
        PixelStorage::new().with_alignment(3),
        PixelFormat::R8Unorm,
        0,
        1,
        [2, 2],
        vec![0; 16],
        None,
    )
    .unwrap_err();
    assert_eq!(err, ImageDataError::InvalidAlignment(3));

    let err = ImageData2D::new(
        PixelStorage::new(),
        PixelFormat::wrap(5),
        0,
        0,
        [2, 2],
        vec![0; 16],
        None,
    )
    .unwrap_err();
    assert_eq!(err, ImageDataError::InvalidPixelSize(0));

    // A zero extent skips the buffer check, not the layout check.
    let err = ImageData2D::new(
        PixelStorage::new().with_alignment(3),
        PixelFormat::R8Unorm,
        0,
        1,
        [0, 4],
        Vec::new(),
        None,
    )
    .unwrap_err();
    assert_eq!(err, ImageDataError::InvalidAlignment(3));

    let err = ImageData2D::new(
        PixelStorage::new(),
        PixelFormat::wrap(5),
        0,
        0,
        [0, 4],
        Vec::new(),
        None,
    )
    .unwrap_err();
    assert_eq!(err, ImageDataError::InvalidPixelSize(0));

    let empty = ImageData2D::new(
        PixelStorage::new(),
        PixelFormat::R8Unorm,
        0,
        1,
        [0, 4],
        Vec::new(),
        None,
    )
    .unwrap();
    assert!(empty.pixels().unwrap().is_empty());
}

#[test]
fn compressed_accepts_any_length() {
    for len in [0usize, 1, 7, 8, 1000] {
        let image = ImageData2D::compressed(
            CompressedPixelStorage::new(),
            CompressedPixelFormat::Bc3RGBAUnorm,
            [64, 64],
            vec![0; len],
            None,
        );
        assert!(image.is_compressed());
        assert_eq!(image.size(), [64, 64]);
        assert_eq!(image.data().len(), len);
    }
}

#[test]
fn compressed_raw_format() {
    let image = ImageData3D::compressed_from_raw(
        CompressedPixelStorage::new(),
        0x83f1,
        [4, 4, 1],
        vec![0; 8],
        None,
    );
    assert_eq!(
        image.compressed_format(),
        Ok(CompressedPixelFormat::Implementation(0x83f1))
    );
    assert_eq!(
        image.compressed_storage(),
        Ok(CompressedPixelStorage::new())
    );
}

// ── Variant guards ───────────────────────────────────────────────────

#[cfg(not(feature = "fast-fail"))]
#[test]
fn uncompressed_accessors_on_compressed_data() {
    let mut image = bc1_image(None);
    let expect = |operation| ImageDataError::WrongVariant {
        operation,
        compressed: true,
    };
    assert_eq!(image.storage(), Err(expect("storage")));
    assert_eq!(image.format(), Err(expect("format")));
    assert_eq!(image.format_extra(), Err(expect("format_extra")));
    assert_eq!(image.pixel_size(), Err(expect("pixel_size")));
    assert_eq!(image.data_properties(), Err(expect("data_properties")));
    assert_eq!(image.pixels().unwrap_err(), expect("pixels"));
    assert_eq!(image.image_view().unwrap_err(), expect("image_view"));
    assert_eq!(
        ImageView::try_from(&image).unwrap_err(),
        expect("image_view")
    );
    assert_eq!(image.pixels_mut().unwrap_err(), expect("pixels_mut"));
    assert_eq!(
        image.image_view_mut().unwrap_err(),
        expect("image_view_mut")
    );
    assert_eq!(
        ImageViewMut::try_from(&mut image).unwrap_err(),
        expect("image_view_mut")
    );
}

#[cfg(not(feature = "fast-fail"))]
#[test]
fn compressed_accessors_on_uncompressed_data() {
    let mut image = rgb_image(None);
    let expect = |operation| ImageDataError::WrongVariant {
        operation,
        compressed: false,
    };
    assert_eq!(
        image.compressed_storage(),
        Err(expect("compressed_storage"))
    );
    assert_eq!(image.compressed_format(), Err(expect("compressed_format")));
    assert_eq!(
        image.compressed_image_view().unwrap_err(),
        expect("compressed_image_view")
    );
    assert_eq!(
        image.compressed_image_view_mut().unwrap_err(),
        expect("compressed_image_view_mut")
    );
    assert_eq!(
        CompressedImageView::try_from(&image).unwrap_err(),
        expect("compressed_image_view")
    );
    assert_eq!(
        CompressedImageViewMut::try_from(&mut image).unwrap_err(),
        expect("compressed_image_view_mut")
    );
}

#[cfg(feature = "fast-fail")]
#[test]
#[should_panic(expected = "pixels(): the image is compressed")]
fn pixels_on_compressed_panics() {
    let _ = bc1_image(None).pixels();
}

#[cfg(feature = "fast-fail")]
#[test]
#[should_panic(expected = "data too small, got 31 but expected at least 32 bytes")]
fn undersized_buffer_panics() {
    let _ = ImageData2D::from_format(
        PixelStorage::new(),
        PixelFormat::RGB8Unorm,
        [5, 2],
        vec![0; 31],
        None,
    );
}

#[cfg(feature = "fast-fail")]
#[test]
#[should_panic(expected = "compressed_format(): the image is not compressed")]
fn compressed_format_on_uncompressed_panics() {
    let _ = rgb_image(None).compressed_format();
}

// ── Ownership transfer ───────────────────────────────────────────────

#[test]
fn take_leaves_empty_source() {
    let mut registry = ImporterRegistry::new();
    let importer = registry.register("TgaImporter");

    let mut source = rgb_image(Some(importer));
    let original = source.data().to_vec();
    let dest = source.take();

    assert_eq!(source.size(), [0, 0]);
    assert!(source.data().is_empty());

    assert_eq!(dest.size(), [5, 2]);
    assert_eq!(dest.data(), &original[..]);
    assert_eq!(dest.format(), Ok(PixelFormat::RGB8Srgb));
    assert_eq!(dest.format_extra(), Ok(1337));
    assert_eq!(dest.pixel_size(), Ok(3));
    assert_eq!(dest.importer(), Some(importer));
    assert_eq!(registry.get(dest.importer().unwrap()), Some(&"TgaImporter"));
}

#[test]
fn take_compressed() {
    let mut source = bc1_image(None);
    let dest = source.take();
    assert_eq!(source.size(), [0, 0]);
    assert!(source.is_compressed());
    assert_eq!(dest.size(), [4, 8]);
    assert_eq!(
        dest.compressed_format(),
        Ok(CompressedPixelFormat::Bc1RGBAUnorm)
    );
    assert_eq!(dest.compressed_storage().unwrap().block_size, [4, 4, 1]);
    assert_eq!(dest.data(), &[0xab; 16][..]);
}

#[test]
fn take_with_importer_reparents() {
    let mut registry = ImporterRegistry::new();
    let first = registry.register("AnySceneImporter");
    let second = registry.register("GltfImporter");

    let mut source = rgb_image(Some(first));
    let dest = source.take_with_importer(Some(second));
    assert_eq!(dest.importer(), Some(second));
    assert_eq!(dest.size(), [5, 2]);
    assert_eq!(source.importer(), Some(first));

    let dest = dest.with_importer(None);
    assert_eq!(dest.importer(), None);
}

#[test]
fn release_returns_buffer_as_stored() {
    // Larger than needed; release must not shrink it.
    let mut data = checkerboard(5, 2, 3, 16);
    data.extend_from_slice(&[1, 2, 3, 4]);
    let mut image = ImageData2D::from_format(
        PixelStorage::new(),
        PixelFormat::RGB8Unorm,
        [5, 2],
        data.clone(),
        None,
    )
    .unwrap();

    let released = image.release();
    assert_eq!(released.len(), 36);
    assert_eq!(released, data);
    assert_eq!(image.size(), [0, 0]);
    assert!(image.data().is_empty());
    assert_eq!(image.format(), Ok(PixelFormat::RGB8Unorm));
    assert!(image.pixels().unwrap().is_empty());

    let mut compressed = bc1_image(None);
    assert_eq!(compressed.release().len(), 16);
    assert_eq!(compressed.size(), [0, 0]);
}

#[test]
fn same_kind_swap_exchanges_everything() {
    let mut registry = ImporterRegistry::new();
    let a_importer = registry.register("a");
    let b_importer = registry.register("b");

    let mut a = rgb_image(Some(a_importer));
    let mut b = ImageData2D::new(
        PixelStorage::packed(),
        PixelFormat::R16Unorm,
        7,
        2,
        [2, 3],
        vec![9; 12],
        Some(b_importer),
    )
    .unwrap();
    let a_data = a.data().to_vec();

    a.swap(&mut b);

    assert_eq!(a.storage(), Ok(PixelStorage::packed()));
    assert_eq!(a.format(), Ok(PixelFormat::R16Unorm));
    assert_eq!(a.format_extra(), Ok(7));
    assert_eq!(a.pixel_size(), Ok(2));
    assert_eq!(a.size(), [2, 3]);
    assert_eq!(a.data(), &[9; 12][..]);
    assert_eq!(a.importer(), Some(b_importer));

    assert_eq!(b.storage(), Ok(PixelStorage::new()));
    assert_eq!(b.format(), Ok(PixelFormat::RGB8Srgb));
    assert_eq!(b.format_extra(), Ok(1337));
    assert_eq!(b.pixel_size(), Ok(3));
    assert_eq!(b.size(), [5, 2]);
    assert_eq!(b.data(), &a_data[..]);
    assert_eq!(b.importer(), Some(a_importer));
}

#[test]
fn cross_kind_swap_stays_consistent() {
    let mut uncompressed = rgb_image(None);
    let mut compressed = bc1_image(None);

    uncompressed.swap(&mut compressed);

    // Each side carries the other's discriminant together with its own
    // matching parameters, never a mix.
    assert!(uncompressed.is_compressed());
    assert_eq!(
        *uncompressed.kind(),
        ImageDataKind::Compressed {
            storage: CompressedPixelStorage::new().with_block_size([4, 4, 1], 8),
            format: CompressedPixelFormat::Bc1RGBAUnorm,
        }
    );
    assert_eq!(uncompressed.size(), [4, 8]);
    assert_eq!(uncompressed.data().len(), 16);

    assert!(!compressed.is_compressed());
    assert_eq!(
        *compressed.kind(),
        ImageDataKind::Uncompressed {
            storage: PixelStorage::new(),
            format: PixelFormat::RGB8Srgb,
            format_extra: 1337,
            pixel_size: 3,
        }
    );
    assert_eq!(compressed.size(), [5, 2]);
    // The swapped-in uncompressed record still describes its buffer.
    let pixels = compressed.pixels().unwrap();
    assert_eq!(pixels.pixel([0, 0]), &[200, 201, 202]);
    assert_eq!(pixels.pixel([1, 1]), &[200, 201, 202]);
}

#[test]
fn assign_returns_previous() {
    let mut target = bc1_image(None);
    let previous = target.assign(rgb_image(None));
    assert!(previous.is_compressed());
    assert!(!target.is_compressed());
    assert_eq!(target.size(), [5, 2]);
}

#[test]
fn moves_across_threads() {
    let image = rgb_image(None);
    let handle = std::thread::spawn(move || image.size());
    assert_eq!(handle.join().unwrap(), [5, 2]);
}

// ── Views ────────────────────────────────────────────────────────────

#[test]
fn pixels_are_stride_aware() {
    let image = rgb_image(None);
    let props = image.data_properties().unwrap();
    assert_eq!(props.offset, 0);
    assert_eq!(props.strides, [3, 16]);
    assert_eq!(props.size, 32);

    let pixels = image.pixels().unwrap();
    assert_eq!(pixels.size(), [5, 2]);
    assert_eq!(pixels.pixel_size(), 3);
    assert_eq!(pixels.pixel([0, 0]), &[200, 201, 202]);
    assert_eq!(pixels.pixel([1, 0]), &[10, 11, 12]);
    assert_eq!(pixels.pixel([4, 1]), &[10, 11, 12]);
    assert_eq!(pixels.to_packed_vec(), checkerboard(5, 2, 3, 15));
}

#[test]
fn pixels_with_leading_skip() {
    // 2x2 grayscale window into a 3-wide buffer, starting at (1, 1).
    let storage = PixelStorage::packed().with_row_skip(1).with_skip([1, 1, 0]);
    let data: Vec<u8> = (0..10).collect();
    let image =
        ImageData2D::from_format(storage, PixelFormat::R8Unorm, [2, 2], data, None).unwrap();
    let props = image.data_properties().unwrap();
    assert_eq!(props.offset, 4);
    assert_eq!(props.size, 10);

    let pixels = image.pixels().unwrap();
    assert_eq!(pixels.strides(), [1, 3]);
    assert_eq!(pixels.pixel([0, 0]), &[4]);
    assert_eq!(pixels.pixel([1, 0]), &[5]);
    assert_eq!(pixels.pixel([0, 1]), &[7]);
    assert_eq!(pixels.pixel([1, 1]), &[8]);
}

#[test]
fn pixels_mut_writes_into_buffer() {
    let mut image = rgb_image(None);
    {
        let mut pixels = image.pixels_mut().unwrap();
        pixels.fill(&[1, 2, 3]);
    }
    let data = image.data();
    assert_eq!(&data[0..3], &[1, 2, 3]);
    // Padding bytes untouched.
    assert_eq!(&data[15..16], &[0xee]);
    assert_eq!(&data[16..19], &[1, 2, 3]);
}

#[test]
fn three_dimensional_view() {
    let storage = PixelStorage::packed().with_image_skip(2);
    let size = [2, 2, 2];
    let len = layout::image_data_size(&storage, 1, size).unwrap();
    assert_eq!(len, 12);
    let data: Vec<u8> = (0..12).collect();
    let image = ImageData3D::from_format(storage, PixelFormat::R8Unorm, size, data, None).unwrap();
    let pixels = image.pixels().unwrap();
    assert_eq!(pixels.strides(), [1, 2, 6]);
    assert_eq!(pixels.pixel([1, 1, 1]), &[9]);
    assert_eq!(pixels.to_packed_vec(), vec![0, 1, 2, 3, 6, 7, 8, 9]);
}

#[test]
fn image_view_conversions() {
    let mut image = rgb_image(None);
    let view = ImageView::try_from(&image).unwrap();
    assert_eq!(view.format(), PixelFormat::RGB8Srgb);
    assert_eq!(view.format_extra(), 1337);
    assert_eq!(view.pixel_size(), 3);
    assert_eq!(view.size(), [5, 2]);
    assert_eq!(view.storage(), PixelStorage::new());
    assert_eq!(view.data().map(<[u8]>::len), Some(32));
    assert_eq!(view.pixels().unwrap().pixel([0, 1]), &[10, 11, 12]);

    let mut view = ImageViewMut::try_from(&mut image).unwrap();
    view.data_mut().unwrap()[0] = 42;
    assert_eq!(image.data()[0], 42);

    let mut compressed = bc1_image(None);
    let view = CompressedImageView::try_from(&compressed).unwrap();
    assert_eq!(view.format(), CompressedPixelFormat::Bc1RGBAUnorm);
    assert_eq!(view.size(), [4, 8]);
    assert_eq!(view.data(), Some(&[0xab; 16][..]));

    let mut view = compressed.compressed_image_view_mut().unwrap();
    view.data_mut().unwrap()[0] = 0;
    assert_eq!(compressed.data()[0], 0);
}

#[test]
fn limits_on_imported_data() {
    let limits = Limits {
        max_width: Some(4),
        ..Default::default()
    };
    match limits.check_image(&rgb_image(None)) {
        Err(ImageDataError::LimitExceeded(msg)) => assert!(msg.contains("width 5")),
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
    assert!(limits.check_image(&bc1_image(None)).is_ok());
}
