//! Circuit model: gates, line metadata, sub-circuit templates and the active ordering.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::mobility;
use crate::variable::{VariableId, VariableRegistry};

/// Direction of an I/O bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    /// Declared with `.inputbus`.
    Input,
    /// Declared with `.outputbus`.
    Output,
}

/// A named, ordered group of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    /// Bus name.
    pub name: String,
    /// Input or output.
    pub kind: BusKind,
    /// Member lines in declaration order.
    pub variables: Vec<String>,
}

/// A named, reusable circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Name the template is instantiated by.
    pub name: String,
    /// The template body. Its variable registry is the formal parameter list.
    pub circuit: Circuit,
}

/// A reference to a template plus the actual lines bound to its formals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Name of the instantiated template.
    pub template: String,
    /// Actual lines, positionally matching the template's formal lines.
    pub actuals: Vec<String>,
    /// Number of gates that precede the instance in the gate sequence.
    pub anchor: usize,
}

/// A reversible circuit.
///
/// Built incrementally (usually by the text parser), then read by the
/// ordering optimizer. The only state that changes after construction is
/// the active line ordering, which is replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    variables: VariableRegistry,
    gates: Vec<Gate>,
    constants: BTreeMap<String, u8>,
    garbage: BTreeSet<String>,
    buses: Vec<Bus>,
    templates: Vec<Template>,
    instances: Vec<Instance>,
    /// Active ordering; `None` means the registry order.
    ordering: Option<Vec<String>>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: VariableRegistry::new(),
            gates: vec![],
            constants: BTreeMap::new(),
            garbage: BTreeSet::new(),
            buses: vec![],
            templates: vec![],
            instances: vec![],
            ordering: None,
        }
    }

    // =========================================================================
    // Variables
    // =========================================================================

    /// Register a line, returning its id. Known names keep their id.
    ///
    /// A new line is appended to the active ordering as well, so the active
    /// ordering stays a permutation of the registry.
    pub fn register_variable(&mut self, name: &str) -> VariableId {
        let known = self.variables.len();
        let id = self.variables.register(name);
        if self.variables.len() > known {
            if let Some(ordering) = self.ordering.as_mut() {
                ordering.push(name.to_owned());
            }
        }
        id
    }

    /// The variable registry.
    pub fn variables(&self) -> &VariableRegistry {
        &self.variables
    }

    /// Number of registered lines.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Name of the line at registry position `index`.
    pub fn variable_at(&self, index: usize) -> Option<&str> {
        self.variables.names().get(index).map(String::as_str)
    }

    fn require_variable(&self, name: &str) -> IrResult<()> {
        if self.variables.contains(name) {
            Ok(())
        } else {
            Err(IrError::UnknownVariable(name.to_owned()))
        }
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Append a gate, registering its lines (controls first, then target).
    ///
    /// Returns the index of the new gate.
    pub fn push_gate(&mut self, gate: Gate) -> usize {
        for line in gate.lines() {
            self.register_variable(line);
        }
        self.gates.push(gate);
        self.invalidate_mobility();
        self.gates.len() - 1
    }

    /// Append a gate built from `controls` and `target`.
    pub fn add_gate<I, S>(&mut self, controls: I, target: &str) -> IrResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let gate = Gate::with_controls(controls, target)?;
        self.push_gate(gate);
        Ok(self)
    }

    /// Append a NOT gate on `target`.
    pub fn not(&mut self, target: &str) -> &mut Self {
        self.push_gate(Gate::new(target));
        self
    }

    /// Append a CNOT gate.
    pub fn cnot(&mut self, control: &str, target: &str) -> IrResult<&mut Self> {
        self.add_gate([control], target)
    }

    /// Append a Toffoli gate.
    pub fn toffoli(&mut self, c1: &str, c2: &str, target: &str) -> IrResult<&mut Self> {
        self.add_gate([c1, c2], target)
    }

    /// Gates in sequence order, excluding instance bodies.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get a gate by index.
    pub fn gate(&self, index: usize) -> IrResult<&Gate> {
        self.gates.get(index).ok_or(IrError::InvalidGateIndex {
            index,
            len: self.gates.len(),
        })
    }

    /// Number of gates, excluding instance bodies.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    // =========================================================================
    // Line metadata
    // =========================================================================

    /// Mark a registered line as a constant input.
    pub fn set_constant(&mut self, name: &str, value: u8) -> IrResult<()> {
        self.require_variable(name)?;
        self.constants.insert(name.to_owned(), value);
        Ok(())
    }

    /// Constant value of a line, if it is a constant input.
    pub fn constant(&self, name: &str) -> Option<u8> {
        self.constants.get(name).copied()
    }

    /// All constant inputs, keyed by line.
    pub fn constants(&self) -> &BTreeMap<String, u8> {
        &self.constants
    }

    /// Mark a registered line as a garbage output.
    pub fn set_garbage(&mut self, name: &str) -> IrResult<()> {
        self.require_variable(name)?;
        self.garbage.insert(name.to_owned());
        Ok(())
    }

    /// Check whether a line is a garbage output.
    pub fn is_garbage(&self, name: &str) -> bool {
        self.garbage.contains(name)
    }

    /// All garbage outputs.
    pub fn garbage(&self) -> impl Iterator<Item = &str> {
        self.garbage.iter().map(String::as_str)
    }

    /// Append `variable` to the bus `bus`, creating the bus on first use.
    ///
    /// The line is registered if it is new.
    pub fn add_to_bus(&mut self, kind: BusKind, bus: &str, variable: &str) {
        self.register_variable(variable);
        let idx = match self
            .buses
            .iter()
            .position(|b| b.kind == kind && b.name == bus)
        {
            Some(idx) => idx,
            None => {
                self.buses.push(Bus {
                    name: bus.to_owned(),
                    kind,
                    variables: vec![],
                });
                self.buses.len() - 1
            }
        };
        self.buses[idx].variables.push(variable.to_owned());
    }

    /// All buses in declaration order.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Look up a bus by kind and name.
    pub fn bus(&self, kind: BusKind, name: &str) -> Option<&Bus> {
        self.buses.iter().find(|b| b.kind == kind && b.name == name)
    }

    /// Buses that contain `variable`.
    pub fn buses_of<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a Bus> + 'a {
        self.buses
            .iter()
            .filter(move |b| b.variables.iter().any(|v| v == variable))
    }

    // =========================================================================
    // Sub-circuits
    // =========================================================================

    /// Register a template.
    ///
    /// Names are bound once: instances already recorded against a template
    /// were checked against its line list.
    pub fn add_template(&mut self, name: impl Into<String>, circuit: Circuit) -> IrResult<()> {
        let name = name.into();
        if self.template(&name).is_some() {
            return Err(IrError::DuplicateTemplate(name));
        }
        self.templates.push(Template { name, circuit });
        Ok(())
    }

    /// Look up a template by name.
    pub fn template(&self, name: &str) -> Option<&Circuit> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .map(|t| &t.circuit)
    }

    /// All templates in registration order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Record an instance of a registered template.
    ///
    /// `actuals` bind positionally to the template's registry and are
    /// registered in this circuit. The template body is not copied into the
    /// gate sequence; see [`Circuit::flattened_gates`].
    pub fn instantiate(&mut self, template: &str, actuals: Vec<String>) -> IrResult<&Instance> {
        let formals = self
            .template(template)
            .ok_or_else(|| IrError::UnknownTemplate(template.to_owned()))?
            .num_variables();
        if formals != actuals.len() {
            return Err(IrError::ArityMismatch {
                template: template.to_owned(),
                expected: formals,
                got: actuals.len(),
            });
        }
        {
            let mut seen = FxHashSet::default();
            if let Some(dup) = actuals.iter().find(|a| !seen.insert(a.as_str())) {
                return Err(IrError::DuplicateVariable(dup.clone()));
            }
        }

        for actual in &actuals {
            self.register_variable(actual);
        }
        self.instances.push(Instance {
            template: template.to_owned(),
            actuals,
            anchor: self.gates.len(),
        });
        self.invalidate_mobility();
        Ok(&self.instances[self.instances.len() - 1])
    }

    /// All instances in the order they were recorded.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// The gate sequence with every instance expanded in place.
    ///
    /// Template lines are renamed to the instance's actual lines. Nested
    /// instances inside templates are expanded recursively.
    pub fn flattened_gates(&self) -> IrResult<Vec<Gate>> {
        let mut out = Vec::with_capacity(self.gates.len());
        self.flatten_into(&FxHashMap::default(), &mut out)?;
        Ok(out)
    }

    fn flatten_into(&self, mapping: &FxHashMap<&str, &str>, out: &mut Vec<Gate>) -> IrResult<()> {
        let mut instances = self.instances.iter().peekable();
        for (i, gate) in self.gates.iter().enumerate() {
            while let Some(instance) = instances.next_if(|inst| inst.anchor <= i) {
                self.expand_instance(instance, mapping, out)?;
            }
            out.push(gate.substitute(mapping)?);
        }
        for instance in instances {
            self.expand_instance(instance, mapping, out)?;
        }
        Ok(())
    }

    fn expand_instance(
        &self,
        instance: &Instance,
        mapping: &FxHashMap<&str, &str>,
        out: &mut Vec<Gate>,
    ) -> IrResult<()> {
        let template = self
            .template(&instance.template)
            .ok_or_else(|| IrError::UnknownTemplate(instance.template.clone()))?;
        let inner: FxHashMap<&str, &str> = template
            .variables
            .names()
            .iter()
            .zip(&instance.actuals)
            .map(|(formal, actual)| {
                let actual = actual.as_str();
                (
                    formal.as_str(),
                    mapping.get(actual).copied().unwrap_or(actual),
                )
            })
            .collect();
        template.flatten_into(&inner, out)
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Lines in first-seen order, independent of any installed ordering.
    pub fn initial_order(&self) -> &[String] {
        self.variables.names()
    }

    /// The active ordering.
    pub fn ordering(&self) -> &[String] {
        self.ordering
            .as_deref()
            .unwrap_or_else(|| self.variables.names())
    }

    /// Check whether an ordering other than the initial one is installed.
    pub fn has_custom_ordering(&self) -> bool {
        self.ordering.is_some()
    }

    /// Install a new active ordering.
    ///
    /// `ordering` must be a permutation of the registered lines.
    pub fn set_ordering(&mut self, ordering: Vec<String>) -> IrResult<()> {
        if ordering.len() != self.variables.len() {
            return Err(IrError::InvalidOrdering(format!(
                "expected {} lines, got {}",
                self.variables.len(),
                ordering.len()
            )));
        }
        {
            let mut seen = FxHashSet::default();
            for name in &ordering {
                self.require_variable(name)?;
                if !seen.insert(name.as_str()) {
                    return Err(IrError::InvalidOrdering(format!("'{name}' appears twice")));
                }
            }
        }
        self.ordering = Some(ordering);
        self.invalidate_mobility();
        Ok(())
    }

    /// Drop any installed ordering and return to the initial order.
    pub fn reset_ordering(&mut self) {
        if self.ordering.take().is_some() {
            self.invalidate_mobility();
        }
    }

    // =========================================================================
    // Mobility cache
    // =========================================================================

    /// Compute and cache the slack of every gate.
    pub fn compute_mobility(&mut self) {
        let slack = mobility::compute(&self.gates);
        for (gate, m) in self.gates.iter_mut().zip(slack) {
            gate.set_mobility(m);
        }
    }

    /// Drop all cached slack values.
    pub fn invalidate_mobility(&mut self) {
        for gate in &mut self.gates {
            gate.clear_mobility();
        }
    }

    /// Accessor for the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new("circuit")
    }
}
