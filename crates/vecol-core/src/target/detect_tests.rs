//! Tests for CPU tier detection.

use super::{best_target, is_supported, TargetArch};

#[test]
fn test_tiers_are_totally_ordered() {
    let mut sorted = TargetArch::ALL;
    sorted.sort();
    assert_eq!(sorted, TargetArch::ALL);
    assert!(TargetArch::Default < TargetArch::Sse42);
    assert!(TargetArch::Avx2 < TargetArch::Avx512);
}

#[test]
fn test_best_target_is_cached() {
    let first = best_target();
    for _ in 0..100 {
        assert_eq!(best_target(), first);
    }
}

#[test]
fn test_support_is_downward_closed() {
    let best = best_target();
    for arch in TargetArch::ALL {
        assert_eq!(is_supported(arch), arch <= best, "tier {arch}");
    }
    assert!(is_supported(TargetArch::Default));
}

#[cfg(not(target_arch = "x86_64"))]
#[test]
fn test_non_x86_runs_baseline() {
    assert_eq!(best_target(), TargetArch::Default);
}

#[cfg(target_arch = "x86_64")]
#[test]
fn test_detection_agrees_with_std() {
    let best = best_target();
    if best >= TargetArch::Avx2 {
        assert!(is_x86_feature_detected!("avx2"));
    }
    if best >= TargetArch::Sse42 {
        assert!(is_x86_feature_detected!("sse4.2"));
    }
}

#[test]
fn test_names_round_trip() {
    for arch in TargetArch::ALL {
        assert_eq!(arch.as_str().parse::<TargetArch>().unwrap(), arch);
        assert_eq!(arch.to_string(), arch.as_str());
    }
    assert_eq!(" AVX2 ".parse::<TargetArch>().unwrap(), TargetArch::Avx2);
}

#[test]
fn test_unknown_name_is_rejected() {
    let err = "avx3".parse::<TargetArch>().unwrap_err();
    assert!(err.to_string().contains("unknown target 'avx3'"));
}

#[test]
fn test_features_grow_with_tier() {
    assert!(TargetArch::Default.features().is_empty());
    for pair in TargetArch::ALL.windows(2) {
        let lower = pair[0].features();
        let higher = pair[1].features();
        assert!(higher.starts_with(lower), "{} vs {}", pair[0], pair[1]);
    }
}

#[test]
fn test_serde_names() {
    let json = serde_json::to_string(&TargetArch::Sse42).unwrap();
    assert_eq!(json, "\"sse42\"");
    let arch: TargetArch = serde_json::from_str("\"avx512\"").unwrap();
    assert_eq!(arch, TargetArch::Avx512);
}
