use thiserror::Error;

/// Shader-stage compilation failure. `log` carries the rendered naga
/// diagnostic and is non-empty for every failing source.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("error compiling `{name}`:\n{log}")]
    Parse { name: String, log: String },

    #[error("error validating `{name}`:\n{log}")]
    Validate { name: String, log: String },

    #[error("none of {stages:?} declares `{global}`")]
    MissingGlobal { stages: Vec<String>, global: String },
}

/// A parsed and validated shader stage.
#[derive(Debug)]
pub struct CompiledShader {
    name: String,
    module: naga::Module,
}

impl CompiledShader {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the module declares a global (uniform, texture or sampler)
    /// with the given name. This is the wgpu-side analog of resolving a GL
    /// uniform location.
    pub fn has_global(&self, global: &str) -> bool {
        self.module
            .global_variables
            .iter()
            .any(|(_, var)| var.name.as_deref() == Some(global))
    }
}

/// Parses and validates one WGSL stage.
///
/// Success implies an empty diagnostic; any failure carries the shader name
/// plus the compiler's rendered log.
pub fn compile(name: &str, source: &str) -> Result<CompiledShader, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        name: name.to_owned(),
        log: e.emit_to_string(source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::Validate {
            name: name.to_owned(),
            log: e.emit_to_string(source),
        })?;

    Ok(CompiledShader {
        name: name.to_owned(),
        module,
    })
}

/// Checks that at least one stage of a program declares `global`.
pub fn require_global(stages: &[&CompiledShader], global: &str) -> Result<(), ShaderError> {
    if stages.iter().any(|s| s.has_global(global)) {
        return Ok(());
    }
    Err(ShaderError::MissingGlobal {
        stages: stages.iter().map(|s| s.name.clone()).collect(),
        global: global.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shipped(name: &str) -> String {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(name);
        std::fs::read_to_string(path).unwrap()
    }

    // ── compile ───────────────────────────────────────────────────────────

    #[test]
    fn valid_source_compiles() {
        let src = "@vertex fn vs_main() -> @builtin(position) vec4<f32> {\
                   return vec4<f32>(0.0, 0.0, 0.0, 1.0); }";
        assert!(compile("inline.wgsl", src).is_ok());
    }

    #[test]
    fn parse_failure_names_the_shader_and_carries_a_log() {
        let err = compile("broken.wgsl", "@vertex fn vs_main( {").unwrap_err();
        let ShaderError::Parse { name, log } = err else {
            panic!("expected a parse error");
        };
        assert_eq!(name, "broken.wgsl");
        assert!(!log.is_empty());
    }

    #[test]
    fn validation_failure_is_reported() {
        // Parses, but the vertex stage is missing a position output.
        let src = "@vertex fn vs_main() -> @location(0) vec4<f32> {\
                   return vec4<f32>(0.0); }";
        let err = compile("invalid.wgsl", src).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    // ── shipped shader stages ─────────────────────────────────────────────

    #[test]
    fn all_four_shipped_stages_compile() {
        for name in [
            crate::assets::DISPLAY_VERT,
            crate::assets::FILL_FRAG,
            crate::assets::FRAMEBUFFER_VERT,
            crate::assets::FRAMEBUFFER_FRAG,
        ] {
            compile(name, &shipped(name)).unwrap();
        }
    }

    #[test]
    fn fill_program_resolves_uscreen_and_utexture() {
        let vert = compile("display.vert.wgsl", &shipped(crate::assets::DISPLAY_VERT)).unwrap();
        let frag = compile("fill.frag.wgsl", &shipped(crate::assets::FILL_FRAG)).unwrap();

        require_global(&[&vert, &frag], "uScreen").unwrap();
        require_global(&[&vert, &frag], "uTexture").unwrap();
    }

    #[test]
    fn present_program_resolves_texture_bindings() {
        let frag = compile("framebuffer_render.frag.wgsl", &shipped(crate::assets::FRAMEBUFFER_FRAG))
            .unwrap();
        assert!(frag.has_global("uTexture"));
        assert!(frag.has_global("uSampler"));
    }

    #[test]
    fn missing_global_is_an_error() {
        let src = "@vertex fn vs_main() -> @builtin(position) vec4<f32> {\
                   return vec4<f32>(0.0, 0.0, 0.0, 1.0); }";
        let stage = compile("inline.wgsl", src).unwrap();
        let err = require_global(&[&stage], "uScreen").unwrap_err();
        assert!(err.to_string().contains("uScreen"));
    }
}
