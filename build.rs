use std::cmp::Ordering;
use std::env;

// Instruction-set backends the crate can be compiled against
#[derive(PartialEq, Eq, Debug)]
struct Backend {
    name: &'static str,
    target_arches: &'static [&'static str],
    required_features: &'static [&'static str],
    available: bool,
}

impl Backend {
    // Define priority order between backends (Lowest number == Highest Priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            "neon" => 1,
            "sse2" => 2,
            "scalar" => 3,
            _ => usize::MAX, // lowest priority by default
        }
    }

    fn backends() -> Vec<Backend> {
        vec![
            Backend {
                name: "avx2",
                target_arches: &["x86", "x86_64"],
                required_features: &["avx2"],
                available: false,
            },
            Backend {
                name: "sse2",
                target_arches: &["x86", "x86_64"],
                required_features: &["sse2"],
                available: false,
            },
            Backend {
                name: "neon",
                target_arches: &["aarch64"],
                required_features: &["neon"],
                available: false,
            },
            Backend {
                name: "scalar",
                target_arches: &[],
                required_features: &[],
                available: true,
            },
        ]
    }
}

impl Ord for Backend {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for Backend {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Source of the target description used to decide which backends compile
trait TargetDescription {
    fn arch(&self) -> String;
    fn features(&self) -> Vec<String>;
}

// Reads the target cargo hands to the build script. This describes the
// machine the crate is compiled *for*, which is what matters when
// cross-compiling, not the host running the build.
struct CargoTarget;
impl TargetDescription for CargoTarget {
    fn arch(&self) -> String {
        env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default()
    }

    fn features(&self) -> Vec<String> {
        env::var("CARGO_CFG_TARGET_FEATURE")
            .unwrap_or_default()
            .split(',')
            .filter(|feature| !feature.is_empty())
            .map(str::to_string)
            .collect()
    }
}

struct Selector;
impl Selector {
    fn detect(target: &dyn TargetDescription, backends: &mut [Backend]) {
        let arch = target.arch();
        let features = target.features();

        for backend in backends.iter_mut() {
            if backend.target_arches.is_empty() {
                continue;
            }

            let arch_matches = backend.target_arches.contains(&arch.as_str());
            let features_enabled = backend
                .required_features
                .iter()
                .all(|required| features.iter().any(|feature| feature == required));

            backend.available = arch_matches && features_enabled;
        }
    }

    fn apply(backends: &mut [Backend]) {
        // Sort backends by priority (highest first)
        backends.sort();

        let requested = env::var("SIMDPORT_ARCH")
            .ok()
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());

        let cfg_value = match requested {
            Some(requested) => match backends.iter().find(|b| b.name == requested) {
                Some(backend) if backend.available => backend.name,
                Some(backend) => panic!(
                    "SIMDPORT_ARCH={} requested, but the target does not enable {:?}",
                    backend.name, backend.required_features
                ),
                None => panic!(
                    "SIMDPORT_ARCH={requested} is not a known backend (expected one of: {})",
                    backends
                        .iter()
                        .map(|b| b.name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            },
            None => backends
                .iter()
                .find(|backend| backend.available)
                .map(|backend| backend.name)
                .unwrap_or("scalar"),
        };

        println!("cargo:rustc-cfg=simd_arch=\"{cfg_value}\"");
        println!(
            "cargo::rustc-check-cfg=cfg(simd_arch, values(\"scalar\", \"sse2\", \"avx2\", \"neon\"))"
        );
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SIMDPORT_ARCH");

    let mut backends = Backend::backends();

    Selector::detect(&CargoTarget, &mut backends);

    Selector::apply(&mut backends);
}
