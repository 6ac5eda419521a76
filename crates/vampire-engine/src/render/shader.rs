//! Shader compilation checks.
//!
//! wgpu reports invalid shader modules through its uncaptured-error handler,
//! which panics. Renderers run their WGSL through naga (wgpu's own shader
//! frontend) first so a bad shader surfaces as an `anyhow` error carrying the
//! full diagnostic instead.

use anyhow::{bail, Result};

/// Pipeline stage an entry point must have.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// Parses and validates `source`, then checks that every `(name, stage)` pair
/// in `entry_points` is present with the right stage.
///
/// Parse and validation failures ("compile") and missing entry points
/// ("link") both produce an error whose message contains the diagnostic text.
pub fn validate_wgsl(
    label: &str,
    source: &str,
    entry_points: &[(&str, ShaderStage)],
) -> Result<()> {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(module) => module,
        Err(err) => bail!("{label} compile error:\n{}", err.emit_to_string(source)),
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    if let Err(err) = validator.validate(&module) {
        bail!("{label} validation error:\n{}", err.emit_to_string(source));
    }

    for &(name, stage) in entry_points {
        let found = module.entry_points.iter().find(|ep| ep.name == name);
        match found {
            Some(ep) if ep.stage == stage.to_naga() => {}
            Some(ep) => bail!(
                "{label} link error:\nentry point `{name}` is a {:?} shader, expected {stage:?}",
                ep.stage
            ),
            None => bail!("{label} link error:\nmissing {stage:?} entry point `{name}`"),
        }
    }

    log::debug!("{label}: shader validated ({} entry points)", module.entry_points.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT_SHADER: &str = include_str!("shaders/rect.wgsl");
    const RECT_ENTRIES: [(&str, ShaderStage); 2] = [
        ("vs_main", ShaderStage::Vertex),
        ("fs_main", ShaderStage::Fragment),
    ];

    #[test]
    fn rect_shader_is_valid() {
        validate_wgsl("rect", RECT_SHADER, &RECT_ENTRIES).unwrap();
    }

    #[test]
    fn syntax_error_is_a_compile_error() {
        let err = validate_wgsl("broken", "fn main( {", &[]).unwrap_err();
        assert!(err.to_string().starts_with("broken compile error"), "{err}");
    }

    #[test]
    fn type_error_is_reported() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = validate_wgsl("typed", src, &[]).unwrap_err();
        assert!(err.to_string().contains("typed"), "{err}");
    }

    #[test]
    fn missing_entry_point_is_a_link_error() {
        let err = validate_wgsl("rect", RECT_SHADER, &[("main", ShaderStage::Vertex)])
            .unwrap_err()
            .to_string();
        assert!(err.contains("link error"), "{err}");
        assert!(err.contains("`main`"), "{err}");
    }

    #[test]
    fn wrong_stage_is_a_link_error() {
        let err = validate_wgsl("rect", RECT_SHADER, &[("vs_main", ShaderStage::Fragment)])
            .unwrap_err()
            .to_string();
        assert!(err.contains("expected Fragment"), "{err}");
    }
}
