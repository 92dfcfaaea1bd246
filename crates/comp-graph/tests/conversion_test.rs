//! Conversion tests for comp-graph.
//!
//! Covers the factory decision, the six conversion rules, and the
//! single-value / CPU / GPU path consistency.

use comp_core::{DataKind, InputDescriptor, OpResult, Rect};
use comp_graph::{Context, ConversionOperation, ConversionPair, Operation};

/// Deterministic pseudo-random floats for the consistency sweeps.
fn lcg_floats(seed: u64, count: usize) -> Vec<f32> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            // Map to roughly [-2, 2]; conversions are not range-limited.
            ((state >> 33) as f32 / (u32::MAX >> 1) as f32) * 4.0 - 2.0
        })
        .collect()
}

#[test]
fn test_factory_returns_none_when_kinds_match() {
    for kind in DataKind::ALL {
        let result = OpResult::single(kind, [0.1, 0.2, 0.3, 0.4]);
        let descriptor = InputDescriptor::new(kind);
        assert!(
            ConversionOperation::construct_if_needed(&result, &descriptor).is_none(),
            "{kind} -> {kind} must not construct a conversion"
        );
    }
}

#[test]
fn test_factory_constructs_all_six_pairs() {
    for source in DataKind::ALL {
        for destination in DataKind::ALL {
            if source == destination {
                continue;
            }
            let result = OpResult::allocate(source, Rect::of_size(2, 2)).unwrap();
            let descriptor = InputDescriptor::new(destination);
            let op = ConversionOperation::construct_if_needed(&result, &descriptor)
                .expect("mismatched kinds always construct a conversion");
            assert_eq!(op.pair().source_kind(), source);
            assert_eq!(op.pair().destination_kind(), destination);
        }
    }
}

#[test]
fn test_scalar_to_color4_scenario() {
    // input = Scalar(0.5), required = Color4 -> Color4(0.5, 0.5, 0.5, 1.0)
    let context = Context::cpu();
    let input = OpResult::single(DataKind::Scalar, [0.5, 0.0, 0.0, 0.0]);
    let descriptor = InputDescriptor::new(DataKind::Color4);

    let op = ConversionOperation::construct_if_needed(&input, &descriptor).unwrap();
    let output = op.execute(&context, &input).unwrap();

    assert_eq!(output.kind(), DataKind::Color4);
    assert_eq!(output.single_value(), Some([0.5, 0.5, 0.5, 1.0]));
}

#[test]
fn test_color4_to_scalar_scenario() {
    // input = Color4(0.2, 0.4, 0.6, 0.9), required = Scalar -> Scalar(0.4)
    let context = Context::cpu();
    let input =
        OpResult::from_f32(vec![0.2, 0.4, 0.6, 0.9], DataKind::Color4, Rect::of_size(1, 1))
            .unwrap();
    let descriptor = InputDescriptor::new(DataKind::Scalar);

    let op = ConversionOperation::construct_if_needed(&input, &descriptor).unwrap();
    let output = op.execute(&context, &input).unwrap();

    assert_eq!(output.kind(), DataKind::Scalar);
    let value = output.load_pixel(0, 0).unwrap()[0];
    assert!((value - 0.4).abs() < 1e-6, "mean was {value}");
}

#[test]
fn test_vector4_to_color4_scenario() {
    // input = Vector4(1, 2, 3, 4), required = Color4 -> Color4(1, 2, 3, 1)
    let context = Context::cpu();
    let input =
        OpResult::from_f32(vec![1.0, 2.0, 3.0, 4.0], DataKind::Vector4, Rect::of_size(1, 1))
            .unwrap();
    let descriptor = InputDescriptor::new(DataKind::Color4);

    let op = ConversionOperation::construct_if_needed(&input, &descriptor).unwrap();
    let output = op.execute(&context, &input).unwrap();

    assert_eq!(output.load_pixel(0, 0).unwrap(), [1.0, 2.0, 3.0, 1.0]);
}

#[test]
fn test_scalar_round_trip_through_vector4() {
    // mean(x, x, x) = x, so Scalar -> Vector4 -> Scalar preserves the value.
    let context = Context::cpu();
    let domain = Rect::of_size(8, 8);
    let original = lcg_floats(7, domain.area());
    let input = OpResult::from_f32(original.clone(), DataKind::Scalar, domain).unwrap();

    let widen = ConversionOperation::new(ConversionPair::ScalarToVector4);
    let narrow = ConversionOperation::new(ConversionPair::Vector4ToScalar);

    let wide = widen.execute(&context, &input).unwrap();
    let back = narrow.execute(&context, &wide).unwrap();

    for (got, want) in back.data().iter().zip(original.iter()) {
        assert!((got - want).abs() < 1e-6, "{got} vs {want}");
    }
}

#[test]
fn test_color4_to_vector4_is_identity() {
    let context = Context::cpu();
    let domain = Rect::of_size(4, 4);
    let data = lcg_floats(13, domain.area() * 4);
    let input = OpResult::from_f32(data.clone(), DataKind::Color4, domain).unwrap();

    let op = ConversionOperation::new(ConversionPair::Color4ToVector4);
    let output = op.execute(&context, &input).unwrap();

    assert_eq!(output.kind(), DataKind::Vector4);
    // Byte-for-byte on the four components.
    assert_eq!(output.data(), data.as_slice());
}

#[test]
fn test_conversion_does_not_mutate_input() {
    let context = Context::cpu();
    let domain = Rect::of_size(3, 3);
    let data = lcg_floats(19, domain.area() * 4);
    let input = OpResult::from_f32(data.clone(), DataKind::Vector4, domain).unwrap();

    let op = ConversionOperation::new(ConversionPair::Vector4ToScalar);
    let _ = op.execute(&context, &input).unwrap();

    assert_eq!(input.data(), data.as_slice());
    assert_eq!(input.kind(), DataKind::Vector4);
}

#[test]
fn test_single_and_cpu_paths_agree_for_every_pair() {
    let context = Context::cpu();
    let domain = Rect::of_size(16, 9);

    for (i, pair) in ConversionPair::ALL.into_iter().enumerate() {
        let src_c = pair.source_kind().channels();
        let data = lcg_floats(100 + i as u64, domain.area() * src_c);
        let buffered = OpResult::from_f32(data, pair.source_kind(), domain).unwrap();

        let op = ConversionOperation::new(pair);
        let output = op.execute(&context, &buffered).unwrap();

        let dst_c = pair.destination_kind().channels();
        for y in 0..domain.height {
            for x in 0..domain.width {
                // Feed the same element through the single-value path.
                let single_input =
                    OpResult::single(pair.source_kind(), buffered.load_pixel(x, y).unwrap());
                let folded = op.execute(&context, &single_input).unwrap();
                let want = folded.single_value().unwrap();
                let got = output.load_pixel(x, y).unwrap();
                for lane in 0..dst_c {
                    assert!(
                        (got[lane] - want[lane]).abs() < 1e-6,
                        "{pair}: pixel ({x}, {y}) lane {lane}: {} vs {}",
                        got[lane],
                        want[lane]
                    );
                }
            }
        }
    }
}

#[cfg(feature = "wgpu")]
#[test]
fn test_gpu_path_matches_cpu_for_every_pair() {
    use comp_graph::Backend;

    if !comp_graph::GpuContext::is_available() {
        println!("no GPU adapter, skipping");
        return;
    }

    let gpu_context = Context::new(Backend::Gpu).unwrap();
    let cpu_context = Context::cpu();
    let domain = Rect::of_size(64, 48);

    for (i, pair) in ConversionPair::ALL.into_iter().enumerate() {
        let src_c = pair.source_kind().channels();
        let data = lcg_floats(500 + i as u64, domain.area() * src_c);
        let input = OpResult::from_f32(data, pair.source_kind(), domain).unwrap();

        let op = ConversionOperation::new(pair);
        let gpu_out = op.execute(&gpu_context, &input).unwrap();
        let cpu_out = op.execute(&cpu_context, &input).unwrap();

        assert_eq!(gpu_out.kind(), cpu_out.kind());
        for (g, c) in gpu_out.data().iter().zip(cpu_out.data().iter()) {
            assert!((g - c).abs() < 1e-5, "{pair}: gpu {g} vs cpu {c}");
        }
    }
}
