/// Mock GraphicsDriver for unit tests (no GPU required)
///
/// Simulates just enough of a GLSL driver to exercise the shader build
/// lifecycle: compile rules, varying matching at link time, uniform
/// locations, the active program and resource counters.
///
/// Compile rules:
/// - a source containing `#error`, or without `void main`, fails to compile
///
/// Link rules:
/// - both stages must be attached and compiled
/// - every fragment `in` must match a vertex `out` by name

use std::cell::RefCell;
use rustc_hash::FxHashMap;

use crate::driver::{
    GraphicsDriver, ProgramHandle, ShaderHandle, ShaderStage, UniformKind, UniformLocation,
    UniformValue,
};
use crate::error::{Error, Result};

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug)]
struct MockShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    info_log: String,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<ShaderHandle>,
    linked: bool,
    info_log: String,
    /// name -> (location, declared kind)
    uniforms: FxHashMap<String, (UniformLocation, UniformKind)>,
    /// location -> last uploaded value
    values: FxHashMap<u32, UniformValue>,
}

/// Resource counters, checked by leak / double-release tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockCounters {
    pub shaders_created: u32,
    pub shaders_deleted: u32,
    pub programs_created: u32,
    pub programs_deleted: u32,
    /// Deletes of unknown or already-deleted handles
    pub double_deletes: u32,
    /// Uploads that reached program storage
    pub uniform_uploads: u32,
    /// Uploads dropped because the location was `None`
    pub ignored_uploads: u32,
    /// Calls a real driver would flag with GL_INVALID_OPERATION
    pub invalid_operations: u32,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: u32,
    shaders: FxHashMap<u32, MockShader>,
    programs: FxHashMap<u32, MockProgram>,
    current_program: Option<ProgramHandle>,
    counters: MockCounters,
    calls: Vec<String>,
    fail_shader_allocation: bool,
    /// Fail `create_shader` once this many shaders were created
    fail_shader_allocation_after: Option<u32>,
    fail_program_allocation: bool,
}

impl MockState {
    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

// ============================================================================
// Source scanning
// ============================================================================

/// Declarations of one storage qualifier (`uniform`, `in`, `out`) in order
fn declarations(source: &str, qualifier: &str) -> Vec<(String, String)> {
    let mut found = Vec::new();
    for statement in source.split(';') {
        let tokens: Vec<&str> = statement.split_whitespace().collect();
        // layout(...) and precision qualifiers may precede the storage qualifier
        if let Some(pos) = tokens.iter().position(|t| *t == qualifier) {
            if let (Some(ty), Some(name)) = (tokens.get(pos + 1), tokens.get(pos + 2)) {
                let name: &str = name;
                let name = name.split('[').next().unwrap_or(name);
                found.push((ty.to_string(), name.to_string()));
            }
        }
    }
    found
}

fn compile(source: &str, stage: ShaderStage) -> (bool, String) {
    if let Some(line) = source.lines().position(|l| l.trim_start().starts_with("#error")) {
        return (false, format!("0:{}: error: #error directive in {} shader", line + 1, stage.name()));
    }
    if !source.contains("void main") {
        return (false, "0:1: error: missing entry point 'main'".to_string());
    }
    (true, String::new())
}

// ============================================================================
// Mock GraphicsDriver
// ============================================================================

/// Mock driver that tracks every object it hands out
#[derive(Debug, Default)]
pub struct MockGraphicsDriver {
    state: RefCell<MockState>,
}

impl MockGraphicsDriver {
    /// Create a new mock driver
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_shader` calls fail
    pub fn set_fail_shader_allocation(&self, fail: bool) {
        self.state.borrow_mut().fail_shader_allocation = fail;
    }

    /// Let `count` shader allocations succeed, then fail the rest
    pub fn set_fail_shader_allocation_after(&self, count: u32) {
        self.state.borrow_mut().fail_shader_allocation_after = Some(count);
    }

    /// Make the next `create_program` calls fail
    pub fn set_fail_program_allocation(&self, fail: bool) {
        self.state.borrow_mut().fail_program_allocation = fail;
    }

    /// Snapshot of the resource counters
    pub fn counters(&self) -> MockCounters {
        self.state.borrow().counters
    }

    /// Number of shader objects not yet deleted
    pub fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Number of program objects not yet deleted
    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Program bound by the last successful `use_program`
    pub fn current_program(&self) -> Option<ProgramHandle> {
        self.state.borrow().current_program
    }

    /// Names of driver calls in order (e.g. "compile_shader")
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// Number of stages currently attached to a program
    pub fn attached_count(&self, program: ProgramHandle) -> usize {
        self.state
            .borrow()
            .programs
            .get(&program.get())
            .map_or(0, |p| p.attached.len())
    }

    /// Number of uniform values stored for a program
    pub fn stored_uniform_count(&self, program: ProgramHandle) -> usize {
        self.state
            .borrow()
            .programs
            .get(&program.get())
            .map_or(0, |p| p.values.len())
    }

    fn record(&self, call: &str) {
        self.state.borrow_mut().calls.push(call.to_string());
    }
}

impl GraphicsDriver for MockGraphicsDriver {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        self.record("create_shader");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let exhausted = state
            .fail_shader_allocation_after
            .is_some_and(|count| state.counters.shaders_created >= count);
        if state.fail_shader_allocation || exhausted {
            return Err(Error::BackendError(format!("mock: cannot allocate {} shader", stage.name())));
        }
        let id = state.allocate_id();
        state.shaders.insert(id, MockShader {
            stage,
            source: String::new(),
            compiled: false,
            info_log: String::new(),
        });
        state.counters.shaders_created += 1;
        ShaderHandle::new(id).ok_or_else(|| Error::InvalidResource("mock: zero shader id".to_string()))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        self.record("shader_source");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        match state.shaders.get_mut(&shader.get()) {
            Some(s) => s.source = source.to_string(),
            None => state.counters.invalid_operations += 1,
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        self.record("compile_shader");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        match state.shaders.get_mut(&shader.get()) {
            Some(s) => {
                let (ok, log) = compile(&s.source, s.stage);
                s.compiled = ok;
                s.info_log = log;
            }
            None => state.counters.invalid_operations += 1,
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader.get())
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader.get())
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.record("delete_shader");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if state.shaders.remove(&shader.get()).is_some() {
            state.counters.shaders_deleted += 1;
        } else {
            state.counters.double_deletes += 1;
        }
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        self.record("create_program");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if state.fail_program_allocation {
            return Err(Error::BackendError("mock: cannot allocate program".to_string()));
        }
        let id = state.allocate_id();
        state.programs.insert(id, MockProgram::default());
        state.counters.programs_created += 1;
        ProgramHandle::new(id).ok_or_else(|| Error::InvalidResource("mock: zero program id".to_string()))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record("attach_shader");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let shader_exists = state.shaders.contains_key(&shader.get());
        match state.programs.get_mut(&program.get()) {
            Some(p) if shader_exists && !p.attached.contains(&shader) => p.attached.push(shader),
            _ => state.counters.invalid_operations += 1,
        }
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record("detach_shader");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let detached = state
            .programs
            .get_mut(&program.get())
            .and_then(|p| {
                let pos = p.attached.iter().position(|s| *s == shader)?;
                Some(p.attached.remove(pos))
            })
            .is_some();
        if !detached {
            state.counters.invalid_operations += 1;
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record("link_program");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let attached = match state.programs.get(&program.get()) {
            Some(p) => p.attached.clone(),
            None => {
                state.counters.invalid_operations += 1;
                return;
            }
        };

        let stages: Vec<&MockShader> = attached
            .iter()
            .filter_map(|h| state.shaders.get(&h.get()))
            .collect();
        let vertex = stages.iter().find(|s| s.stage == ShaderStage::Vertex);
        let fragment = stages.iter().find(|s| s.stage == ShaderStage::Fragment);

        let outcome = match (vertex, fragment) {
            (Some(v), Some(f)) if v.compiled && f.compiled => {
                let vertex_outputs: Vec<String> =
                    declarations(&v.source, "out").into_iter().map(|(_, n)| n).collect();
                let unmatched = declarations(&f.source, "in")
                    .into_iter()
                    .find(|(_, name)| !vertex_outputs.contains(name));
                match unmatched {
                    Some((_, name)) => Err(format!(
                        "error: fragment shader input '{}' has no matching vertex shader output",
                        name
                    )),
                    None => {
                        let mut uniforms = FxHashMap::default();
                        let mut next_location = 0;
                        for source in [&v.source, &f.source] {
                            for (ty, name) in declarations(source, "uniform") {
                                if uniforms.contains_key(&name) {
                                    continue;
                                }
                                if let Some(kind) = UniformKind::from_glsl_name(&ty) {
                                    uniforms.insert(name, (UniformLocation::new(next_location), kind));
                                    next_location += 1;
                                }
                            }
                        }
                        Ok(uniforms)
                    }
                }
            }
            (Some(_), Some(_)) => Err("error: attached shaders are not all compiled".to_string()),
            _ => Err("error: program needs both a vertex and a fragment shader".to_string()),
        };

        if let Some(p) = state.programs.get_mut(&program.get()) {
            p.values.clear();
            match outcome {
                Ok(uniforms) => {
                    p.linked = true;
                    p.info_log.clear();
                    p.uniforms = uniforms;
                }
                Err(log) => {
                    p.linked = false;
                    p.info_log = log;
                    p.uniforms.clear();
                }
            }
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program.get())
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.state
            .borrow()
            .programs
            .get(&program.get())
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record("delete_program");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if state.programs.remove(&program.get()).is_some() {
            state.counters.programs_deleted += 1;
            if state.current_program == Some(program) {
                state.current_program = None;
            }
        } else {
            state.counters.double_deletes += 1;
        }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.record("use_program");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        match program {
            None => state.current_program = None,
            Some(handle) => {
                let linked = state.programs.get(&handle.get()).is_some_and(|p| p.linked);
                if linked {
                    state.current_program = Some(handle);
                } else {
                    state.counters.invalid_operations += 1;
                }
            }
        }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        self.state
            .borrow()
            .programs
            .get(&program.get())
            .filter(|p| p.linked)
            .and_then(|p| p.uniforms.get(name))
            .map(|(location, _)| *location)
    }

    fn set_uniform(&self, location: Option<&UniformLocation>, value: &UniformValue) {
        self.record("set_uniform");
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let Some(location) = location else {
            state.counters.ignored_uploads += 1;
            return;
        };
        let Some(current) = state.current_program else {
            state.counters.invalid_operations += 1;
            return;
        };

        let stored = state.programs.get_mut(&current.get()).is_some_and(|p| {
            let declared = p.uniforms.values().find(|(l, _)| l == location).map(|(_, k)| *k);
            // bool uniforms accept int uploads, as in GL
            let compatible = match (declared, value.kind()) {
                (Some(UniformKind::Bool), UniformKind::Int) => true,
                (Some(k), v) => k == v,
                (None, _) => false,
            };
            if compatible {
                p.values.insert(location.get(), *value);
            }
            compatible
        });

        if stored {
            state.counters.uniform_uploads += 1;
        } else {
            state.counters.invalid_operations += 1;
        }
    }

    fn uniform_value(
        &self,
        program: ProgramHandle,
        location: &UniformLocation,
        kind: UniformKind,
    ) -> Option<UniformValue> {
        let state = self.state.borrow();
        let p = state.programs.get(&program.get()).filter(|p| p.linked)?;
        let declared = p.uniforms.values().find(|(l, _)| l == location).map(|(_, k)| *k)?;
        if declared != kind {
            return None;
        }
        match p.values.get(&location.get()) {
            Some(UniformValue::Int(v)) if kind == UniformKind::Bool => Some(UniformValue::Bool(*v != 0)),
            Some(value) => Some(*value),
            // Never-written uniforms read back as zero
            None if kind.is_integer() => UniformValue::from_i32_components(kind, &[0]),
            None => UniformValue::from_f32_components(kind, &[0.0; 16]),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_driver_tests.rs"]
mod tests;
