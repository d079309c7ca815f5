use image::{Rgb, RgbImage};
use lsb_stego::{
    addressing::{Direction, Location},
    bits::{bits_to_bytes, bits_to_text, bytes_to_bits, text_to_bits},
    channel::{get_lsb, set_bit, set_lsb},
    error::StegoError,
    format::Format,
    steganography::{embed, extract, extract_exact},
};
use rand::RngCore;
use std::collections::HashSet;

/// 创建一个像素随机的 RGB 图像
fn random_image(width: u32, height: u32) -> RgbImage {
    let mut raw = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw);
    RgbImage::from_raw(width, height, raw).expect("Buffer size matches dimensions.")
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

#[test]
fn test_bytes_to_bits_is_msb_first() {
    assert_eq!(bytes_to_bits(b"A"), vec![0, 1, 0, 0, 0, 0, 0, 1]);
    assert_eq!(bytes_to_bits(&[0xFF, 0x00]).len(), 16);
    assert!(bytes_to_bits(&[]).is_empty());
}

#[test]
fn test_bits_to_bytes_pads_trailing_bits_with_zeros() {
    assert_eq!(bits_to_bytes(&[1, 0, 1]), vec![0b1010_0000]);
    assert_eq!(
        bits_to_bytes(&[0, 1, 0, 0, 0, 0, 0, 1, 1]),
        vec![0x41, 0b1000_0000]
    );
}

#[test]
fn test_bytes_survive_bit_conversion() {
    let payload = random_bytes(257);
    assert_eq!(bits_to_bytes(&bytes_to_bits(&payload)), payload);
}

#[test]
fn test_bits_to_text_drops_partial_byte() {
    let mut bits = text_to_bits("Hi");
    bits.extend([1, 1, 0]);
    assert_eq!(bits_to_text(&bits), "Hi");
}

#[test]
fn test_text_bits_handle_utf8() {
    let text = "héllo, 世界";
    let bits = text_to_bits(text);
    assert_eq!(bits.len(), text.len() * 8);
    assert_eq!(bits_to_text(&bits), text);
}

#[test]
fn test_set_lsb_only_touches_bit_zero() {
    assert_eq!(set_lsb(0b1010_1010, 1), Ok(0b1010_1011));
    assert_eq!(set_lsb(0b1010_1011, 0), Ok(0b1010_1010));
    assert_eq!(set_lsb(255, 1), Ok(255));
    assert_eq!(get_lsb(0b1000_0001), 1);
    assert_eq!(get_lsb(0b1000_0000), 0);
}

#[test]
fn test_set_bit_rejects_invalid_input() {
    assert_eq!(set_lsb(10, 2), Err(StegoError::InvalidBit(2)));
    assert_eq!(set_bit(10, 1, 8), Err(StegoError::InvalidPosition(8)));
    assert_eq!(set_bit(0, 1, 7), Ok(0b1000_0000));
}

#[test]
fn test_addressing_formulas() {
    assert_eq!(
        Direction::Horizontal.locate(5, 4, 3),
        Some(Location { x: 1, y: 1, channel: 2 })
    );
    assert_eq!(
        Direction::Vertical.locate(5, 4, 3),
        Some(Location { x: 1, y: 2, channel: 2 })
    );
    assert_eq!(
        Direction::Diagonal.locate(4, 5, 5),
        Some(Location { x: 4, y: 4, channel: 1 })
    );

    assert_eq!(Direction::Horizontal.locate(12, 4, 3), None);
    assert_eq!(Direction::Vertical.locate(12, 4, 3), None);
    assert_eq!(Direction::Diagonal.locate(5, 5, 5), None);
    assert_eq!(Direction::Horizontal.locate(0, 0, 0), None);
}

#[test]
fn test_traversals_visit_each_pixel_once() {
    for direction in [Direction::Horizontal, Direction::Vertical] {
        let visited: HashSet<(u32, u32)> = direction
            .walk(7, 5)
            .map(|location| (location.x, location.y))
            .collect();
        assert_eq!(visited.len(), 35, "{direction} must cover the whole image");
        assert!(visited.iter().all(|&(x, y)| x < 7 && y < 5));
    }

    let channels: Vec<usize> = Direction::Vertical
        .walk(7, 5)
        .take(6)
        .map(|location| location.channel)
        .collect();
    assert_eq!(channels, vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_capacity_per_direction() {
    assert_eq!(Direction::Horizontal.capacity(20, 10), 200);
    assert_eq!(Direction::Vertical.capacity(20, 10), 200);
    assert_eq!(Direction::Diagonal.capacity(20, 10), 10);
}

/// 4x4 全黑图像中水平嵌入 "Hi"，检查前 16 个位置并精确读回
#[test]
fn test_embed_hi_into_black_square() {
    let mut picture = RgbImage::new(4, 4);
    let bits = text_to_bits("Hi");
    embed(&mut picture, &bits, Direction::Horizontal).unwrap();

    for (i, &bit) in bits.iter().enumerate() {
        let pixel = picture.get_pixel(i as u32 % 4, i as u32 / 4);
        for channel in 0..3 {
            let expected = if channel == i % 3 { bit } else { 0 };
            assert_eq!(pixel.0[channel], expected, "offset {i}, channel {channel}");
        }
    }

    let recovered = extract_exact(&picture, Direction::Horizontal, 16).unwrap();
    assert_eq!(bits_to_text(&recovered), "Hi");
}

#[test]
fn test_capacity_boundary() {
    let mut picture = random_image(5, 4);
    assert!(embed(&mut picture, &[1; 20], Direction::Horizontal).is_ok());
    assert_eq!(
        embed(&mut picture, &[1; 21], Direction::Vertical),
        Err(StegoError::CapacityExceeded {
            required: 21,
            capacity: 20
        })
    );

    let mut square = random_image(6, 6);
    assert!(embed(&mut square, &[0; 6], Direction::Diagonal).is_ok());
    assert_eq!(
        embed(&mut square, &[0; 7], Direction::Diagonal),
        Err(StegoError::CapacityExceeded {
            required: 7,
            capacity: 6
        })
    );
}

#[test]
fn test_failed_embed_leaves_image_untouched() {
    let original = random_image(5, 4);

    let mut picture = original.clone();
    assert_eq!(
        embed(&mut picture, &[1, 0, 1], Direction::Diagonal),
        Err(StegoError::ShapeMismatch {
            width: 5,
            height: 4
        })
    );
    assert_eq!(picture, original);

    assert_eq!(
        embed(&mut picture, &[1, 0, 3], Direction::Horizontal),
        Err(StegoError::InvalidBit(3))
    );
    assert_eq!(picture, original);

    assert!(matches!(
        extract(&picture, Direction::Diagonal, 2),
        Err(StegoError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_embed_only_changes_targeted_lsbs() {
    let original = random_image(16, 9);
    let bits = bytes_to_bits(&random_bytes(12));

    for direction in [Direction::Horizontal, Direction::Vertical] {
        let mut picture = original.clone();
        embed(&mut picture, &bits, direction).unwrap();

        let touched: HashSet<(u32, u32)> = direction
            .walk(16, 9)
            .take(bits.len())
            .map(|location| (location.x, location.y))
            .collect();

        for (offset, location) in direction.walk(16, 9).enumerate() {
            let before = original.get_pixel(location.x, location.y).0;
            let after = picture.get_pixel(location.x, location.y).0;
            if !touched.contains(&(location.x, location.y)) {
                assert_eq!(before, after);
                continue;
            }
            for channel in 0..3 {
                if channel == location.channel {
                    assert_eq!(before[channel] >> 1, after[channel] >> 1);
                    assert_eq!(after[channel] & 1, bits[offset]);
                } else {
                    assert_eq!(before[channel], after[channel]);
                }
            }
        }
    }
}

#[test]
fn test_exact_round_trip_in_every_direction() {
    let payload = random_bytes(100);
    for direction in [Direction::Horizontal, Direction::Vertical] {
        let mut picture = random_image(40, 30);
        embed(&mut picture, &bytes_to_bits(&payload), direction).unwrap();
        let bits = extract_exact(&picture, direction, payload.len() * 8).unwrap();
        assert_eq!(bits_to_bytes(&bits), payload);
    }

    let payload = random_bytes(8);
    let mut picture = random_image(64, 64);
    embed(&mut picture, &bytes_to_bits(&payload), Direction::Diagonal).unwrap();
    let bits = extract_exact(&picture, Direction::Diagonal, 64).unwrap();
    assert_eq!(bits_to_bytes(&bits), payload);
}

/// 载荷后跟随全 0 区域时，启发式应恰好返回载荷比特
#[test]
fn test_heuristic_stops_at_zero_padding() {
    let bits = text_to_bits("Hi");
    for direction in [Direction::Horizontal, Direction::Vertical] {
        let mut picture = RgbImage::new(16, 16);
        embed(&mut picture, &bits, direction).unwrap();

        assert_eq!(extract(&picture, direction, 2).unwrap(), bits);
        assert_eq!(extract(&picture, direction, 12).unwrap(), bits);
    }
}

#[test]
fn test_heuristic_stops_at_one_padding() {
    let bits = text_to_bits("Hh");
    let mut picture = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
    embed(&mut picture, &bits, Direction::Horizontal).unwrap();

    assert_eq!(extract(&picture, Direction::Horizontal, 2).unwrap(), bits);
}

#[test]
fn test_heuristic_reads_to_end_without_padding() {
    let bits = text_to_bits("Hi");
    let mut picture = RgbImage::new(4, 4);
    embed(&mut picture, &bits, Direction::Horizontal).unwrap();

    assert_eq!(extract(&picture, Direction::Horizontal, 2).unwrap(), bits);
}

#[test]
fn test_blank_image_yields_no_data() {
    let picture = RgbImage::new(8, 8);
    assert!(extract(&picture, Direction::Horizontal, 2).unwrap().is_empty());
    assert!(extract(&picture, Direction::Vertical, 2).unwrap().is_empty());

    let empty = RgbImage::new(0, 0);
    assert!(extract(&empty, Direction::Horizontal, 12).unwrap().is_empty());
}

#[test]
fn test_zero_sanitize_count_is_rejected() {
    let picture = RgbImage::new(8, 8);
    assert_eq!(
        extract(&picture, Direction::Horizontal, 0),
        Err(StegoError::InvalidSanitizeCount)
    );
    assert_eq!(
        extract(&picture, Direction::Vertical, 0),
        Err(StegoError::InvalidSanitizeCount)
    );
}

/// 对角线方向不使用结束判定，因此不校验阈值
#[test]
fn test_diagonal_ignores_sanitize_count() {
    let mut picture = RgbImage::new(8, 8);
    let bits = bytes_to_bits(b"A");
    embed(&mut picture, &bits, Direction::Diagonal).unwrap();

    assert_eq!(extract(&picture, Direction::Diagonal, 0), Ok(bits));
}

#[test]
fn test_diagonal_extraction_reads_whole_diagonal() {
    let mut picture = RgbImage::new(10, 10);
    let bits = bytes_to_bits(b"A");
    embed(&mut picture, &bits, Direction::Diagonal).unwrap();

    let recovered = extract(&picture, Direction::Diagonal, 2).unwrap();
    assert_eq!(recovered.len(), 10);
    assert_eq!(&recovered[..8], bits.as_slice());
    assert_eq!(&recovered[8..], &[0, 0]);
}

#[test]
fn test_length_prefixed_round_trip_keeps_trailing_zeros() {
    let payload = b"ends with zeros\0\0\0\0".to_vec();
    for direction in [Direction::Horizontal, Direction::Vertical] {
        let mut picture = random_image(32, 32);
        let bits = Format::LengthPrefixed.encode(&payload).unwrap();
        assert_eq!(bits.len(), 32 + payload.len() * 8);

        embed(&mut picture, &bits, direction).unwrap();
        let recovered = Format::LengthPrefixed.recover(&picture, direction, 2).unwrap();
        assert_eq!(bits_to_bytes(&recovered), payload);
    }
}

#[test]
fn test_length_prefix_larger_than_image_is_rejected() {
    let mut picture = random_image(8, 8);
    embed(
        &mut picture,
        &bytes_to_bits(&u32::MAX.to_be_bytes()),
        Direction::Horizontal,
    )
    .unwrap();

    assert_eq!(
        Format::LengthPrefixed.recover(&picture, Direction::Horizontal, 2),
        Err(StegoError::InvalidLengthPrefix {
            declared: u32::MAX as usize,
            capacity: 4
        })
    );
}

#[test]
fn test_heuristic_format_embeds_bare_payload() {
    assert_eq!(
        Format::Heuristic.encode(b"Hi").unwrap(),
        text_to_bits("Hi")
    );
}
