use simdport::config::{log_selection, BuildInfo, InstructionSet};
use simdport::simd::{Backend, Selected};

#[test]
fn test_report_matches_selected_backend() {
    let info = log_selection();
    assert_eq!(info, BuildInfo::current());
    assert_eq!(info.backend, Selected::NAME);
    assert_eq!(info.register_bytes, Selected::REGISTER_BYTES);
    assert_eq!(info.lanes.i32 * 4, info.register_bytes);
    assert_eq!(info.lanes.i64 * 8, info.register_bytes);
}

#[test]
fn test_backend_name_is_known() {
    let name = BuildInfo::current().backend;
    assert!(["scalar", "sse2", "avx2", "neon"].contains(&name), "unexpected backend {name}");
}

#[cfg(target_arch = "x86_64")]
#[test]
fn test_x86_64_has_at_least_sse2() {
    assert!(InstructionSet::selected() >= InstructionSet::Sse2);
    assert_ne!(BuildInfo::current().backend, "neon");
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[test]
fn test_aarch64_selects_neon() {
    assert_eq!(InstructionSet::selected(), InstructionSet::Neon);
}

#[test]
fn test_selected_backend_module_is_compiled() {
    let name = Selected::NAME;
    if !cfg!(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2")) {
        assert_ne!(name, "avx2");
    }
    if !cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
        assert_ne!(name, "neon");
    }
    if !cfg!(any(target_arch = "x86", target_arch = "x86_64")) {
        assert_ne!(name, "sse2");
    }
}
