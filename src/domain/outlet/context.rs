//! Execution context handed to outlets

use super::{Outlet, OutletRef, OutletRegistry, OutletResult};
use crate::domain::entities::{ControllerState, ModelNode, ModelPath, OutletFrame};
use crate::domain::services::Options;
use crate::domain::value_objects::{Namespace, QualifiedName, VariableScope};
use crate::error::GenerationError;

/// Deepest outlet nesting before execution is aborted
pub const MAX_OUTLET_DEPTH: usize = 64;

/// Everything an executing outlet may see: the unit's outlets and options,
/// and the mutable run state (model position, call stack, variables).
pub struct ExecutionContext<'a> {
    registry: &'a OutletRegistry,
    options: &'a Options,
    state: &'a mut ControllerState,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        registry: &'a OutletRegistry,
        options: &'a Options,
        state: &'a mut ControllerState,
    ) -> Self {
        Self {
            registry,
            options,
            state,
        }
    }

    /// Resolve and run an outlet with its own call-stack frame.
    pub fn execute(&mut self, reference: &OutletRef) -> Result<OutletResult, GenerationError> {
        let registry = self.registry;
        let outlet = registry.resolve(reference)?;
        if self.state.outlet_stack().len() >= MAX_OUTLET_DEPTH {
            return Err(GenerationError::RecursionLimit {
                outlet: outlet.name().clone(),
                limit: MAX_OUTLET_DEPTH,
            });
        }

        self.state.push_outlet(OutletFrame {
            name: outlet.name().clone(),
            namespace: reference.execution_namespace().clone(),
        });
        let result = self.run(outlet.as_ref());
        self.state.pop_outlet();
        result
    }

    fn run(&mut self, outlet: &dyn Outlet) -> Result<OutletResult, GenerationError> {
        outlet.before_execute(self)?;
        let result = outlet.execute(self)?;
        outlet.after_execute(self)?;
        Ok(result)
    }

    /// Runs the chain mapped to `mergepoint` of the executing outlet against
    /// the current node and concatenates the text results.
    pub fn execute_mergepoint(&mut self, mergepoint: &str) -> Result<String, GenerationError> {
        let registry = self.registry;
        let caller = self
            .state
            .current_outlet()
            .map(|frame| frame.name.clone())
            .ok_or_else(|| GenerationError::NoActiveOutlet {
                mergepoint: mergepoint.to_string(),
            })?;

        let mut out = String::new();
        for reference in registry.mergepoint_chain(&caller, mergepoint) {
            match self.execute(reference)? {
                OutletResult::Text(text) => out.push_str(&text),
                OutletResult::Bytes(_) => {
                    return Err(GenerationError::MergepointBytes {
                        outlet: caller,
                        mergepoint: mergepoint.to_string(),
                        producer: reference.name.clone(),
                    })
                }
            }
        }
        Ok(out)
    }

    /// Default namespace for unqualified option and variable keys.
    pub fn namespace(&self) -> Namespace {
        self.state.current_namespace()
    }

    pub fn current_outlet(&self) -> Option<&QualifiedName> {
        self.state.current_outlet().map(|frame| &frame.name)
    }

    /// Option visible from the current namespace.
    pub fn option(&self, key: &str) -> Result<Option<&'a str>, GenerationError> {
        let options = self.options;
        Ok(options.lookup(key, &self.namespace())?)
    }

    pub fn require_option(&self, key: &str) -> Result<&'a str, GenerationError> {
        self.option(key)?
            .ok_or_else(|| GenerationError::MissingOption {
                key: key.to_string(),
                namespace: self.namespace().to_string(),
            })
    }

    pub fn variable(&self, key: &str) -> Result<Option<&str>, GenerationError> {
        let name = QualifiedName::resolve(key, &self.namespace())?;
        Ok(self.state.variables.value_in_hierarchy(&name))
    }

    pub fn require_variable(&self, key: &str) -> Result<&str, GenerationError> {
        self.variable(key)?
            .ok_or_else(|| GenerationError::MissingVariable {
                key: key.to_string(),
                namespace: self.namespace().to_string(),
            })
    }

    /// Binds a variable at `key` resolved against the current namespace.
    pub fn set_variable(
        &mut self,
        key: &str,
        value: impl Into<String>,
        scope: VariableScope,
    ) -> Result<(), GenerationError> {
        let name = QualifiedName::resolve(key, &self.namespace())?;
        self.state.variables.set(name, value, scope);
        Ok(())
    }

    pub fn current_node(&self) -> Result<&ModelNode, GenerationError> {
        self.state.current_node().ok_or(GenerationError::NoCurrentNode)
    }

    pub fn current_path(&self) -> &ModelPath {
        self.state.current_path()
    }

    pub fn describe_current_path(&self) -> String {
        self.state.describe_current_path()
    }

    pub fn root(&self) -> Result<&ModelNode, GenerationError> {
        self.state.root().ok_or(GenerationError::NoCurrentNode)
    }

    /// Runs `f` with `path` as the current node, restoring the previous
    /// position afterwards.
    pub fn descend<T>(
        &mut self,
        path: ModelPath,
        f: impl FnOnce(&mut Self) -> Result<T, GenerationError>,
    ) -> Result<T, GenerationError> {
        let previous = self.state.current_path().clone();
        self.state.set_current_path(path);
        let result = f(self);
        self.state.set_current_path(previous);
        result
    }

    pub fn state(&self) -> &ControllerState {
        self.state
    }
}
