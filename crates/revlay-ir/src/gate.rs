//! Multi-control, single-target reversible gates.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Leftward and rightward slack of a gate in its gate sequence.
///
/// `left` is how many directly preceding gates the gate could commute past,
/// `right` the same for following gates. Two gates commute here when they
/// share no line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mobility {
    /// Slack towards the start of the sequence.
    pub left: usize,
    /// Slack towards the end of the sequence.
    pub right: usize,
}

/// A gate with an ordered set of control lines and exactly one target line.
///
/// Lines are referenced by name. The target is never one of the controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    controls: Vec<String>,
    target: String,
    /// Cached slack, owned by the enclosing circuit.
    #[serde(skip)]
    mobility: Option<Mobility>,
}

impl Gate {
    /// Create a gate with no controls (a NOT on `target`).
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            controls: vec![],
            target: target.into(),
            mobility: None,
        }
    }

    /// Create a gate from a control list and a target.
    ///
    /// Repeated controls collapse to their first occurrence.
    pub fn with_controls<I, S>(controls: I, target: impl Into<String>) -> IrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut gate = Self::new(target);
        for control in controls {
            gate.add_control(control)?;
        }
        Ok(gate)
    }

    /// Add a control line.
    ///
    /// Returns `Ok(false)` if the line was already a control. Fails if the
    /// line is this gate's target.
    pub fn add_control(&mut self, control: impl Into<String>) -> IrResult<bool> {
        let control = control.into();
        if control == self.target {
            return Err(IrError::TargetIsControl { target: control });
        }
        if self.controls.contains(&control) {
            return Ok(false);
        }
        self.controls.push(control);
        Ok(true)
    }

    /// Control lines in the order they were added.
    pub fn controls(&self) -> &[String] {
        &self.controls
    }

    /// The target line.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Check whether `line` is a control of this gate.
    pub fn is_control(&self, line: &str) -> bool {
        self.controls.iter().any(|c| c == line)
    }

    /// Check whether the gate touches `line` as control or target.
    pub fn touches(&self, line: &str) -> bool {
        self.target == line || self.is_control(line)
    }

    /// All touched lines: controls in order, then the target.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.controls
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.target.as_str()))
    }

    /// Number of touched lines.
    pub fn num_lines(&self) -> usize {
        self.controls.len() + 1
    }

    /// Check whether two gates share any line.
    pub fn shares_line_with(&self, other: &Gate) -> bool {
        self.lines().any(|line| other.touches(line))
    }

    /// Cached slack, if it has been computed since the last invalidation.
    pub fn mobility(&self) -> Option<Mobility> {
        self.mobility
    }

    pub(crate) fn set_mobility(&mut self, mobility: Mobility) {
        self.mobility = Some(mobility);
    }

    pub(crate) fn clear_mobility(&mut self) {
        self.mobility = None;
    }

    /// Rename lines through `mapping`; unmapped lines keep their name.
    pub fn substitute(&self, mapping: &FxHashMap<&str, &str>) -> IrResult<Gate> {
        let rename = |line: &str| -> String {
            mapping.get(line).copied().unwrap_or(line).to_owned()
        };
        Gate::with_controls(
            self.controls.iter().map(|c| rename(c.as_str())),
            rename(self.target.as_str()),
        )
    }
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool {
        self.controls == other.controls && self.target == other.target
    }
}

impl Eq for Gate {}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.num_lines())?;
        for line in self.lines() {
            write!(f, " {line}")?;
        }
        Ok(())
    }
}
