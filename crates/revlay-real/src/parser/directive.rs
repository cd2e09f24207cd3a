//! Gate and directive line handlers.

use tracing::{debug, warn};

use revlay_ir::{BusKind, Circuit, Gate, IrError};

use super::Parser;
use crate::error::{Diagnostic, DiagnosticKind, ParseError, ParseResult};

impl Parser<'_> {
    /// `t<n> c1 c2 ... target`
    pub(super) fn gate_line(
        &mut self,
        circuit: &mut Circuit,
        words: &[&str],
        line: usize,
    ) -> ParseResult<()> {
        let Some((&target, rest)) = words.split_last() else {
            return Err(missing(line, "gate target"));
        };
        if rest.is_empty() {
            return Err(missing(line, "gate target"));
        }

        let gate = Gate::with_controls(rest[1..].iter().copied(), target)
            .map_err(|source| ParseError::Circuit { line, source })?;
        circuit.push_gate(gate);
        Ok(())
    }

    /// `.variables v1 v2 ...`
    pub(super) fn variables_line(circuit: &mut Circuit, words: &[&str]) {
        for name in words.iter().skip(1) {
            circuit.register_variable(name);
        }
    }

    /// `.garbage <mask>`: any character but `-` marks the line at that column.
    pub(super) fn garbage_line(
        &mut self,
        circuit: &mut Circuit,
        words: &[&str],
        line: usize,
    ) -> ParseResult<()> {
        let mask = words.get(1).ok_or_else(|| missing(line, "garbage mask"))?;

        for (column, flag) in mask.chars().enumerate() {
            if flag == '-' {
                continue;
            }
            let Some(name) = circuit.variable_at(column).map(str::to_owned) else {
                self.field_error(line, format!("garbage column {column} has no line"));
                continue;
            };
            circuit
                .set_garbage(&name)
                .map_err(|source| ParseError::Circuit { line, source })?;
        }
        Ok(())
    }

    /// `.constants <mask>`: a digit sets the constant of the line at that column.
    pub(super) fn constants_line(
        &mut self,
        circuit: &mut Circuit,
        words: &[&str],
        line: usize,
    ) -> ParseResult<()> {
        let mask = words.get(1).ok_or_else(|| missing(line, "constants mask"))?;

        for (column, value) in mask.chars().enumerate() {
            if value == '-' {
                continue;
            }
            let Some(name) = circuit.variable_at(column).map(str::to_owned) else {
                self.field_error(line, format!("constants column {column} has no line"));
                continue;
            };
            let Some(digit) = value.to_digit(10) else {
                self.field_error(
                    line,
                    format!("constant '{value}' for line '{name}' is not a decimal digit"),
                );
                continue;
            };
            #[allow(clippy::cast_possible_truncation)]
            circuit
                .set_constant(&name, digit as u8)
                .map_err(|source| ParseError::Circuit { line, source })?;
        }
        Ok(())
    }

    /// `.inputbus <name> v1 v2 ...` / `.outputbus <name> v1 v2 ...`
    pub(super) fn bus_line(
        circuit: &mut Circuit,
        kind: BusKind,
        words: &[&str],
        line: usize,
    ) -> ParseResult<()> {
        let bus = words.get(1).ok_or_else(|| missing(line, "bus name"))?;
        for variable in words.iter().skip(2) {
            circuit.add_to_bus(kind, bus, variable);
        }
        Ok(())
    }

    /// Anything else: an instance of a known template, or ignored.
    ///
    /// Templates are looked up in the current level first, then in the
    /// enclosing levels from the innermost outwards. A template found in an
    /// enclosing level is copied into the current one.
    pub(super) fn other_line(
        &mut self,
        circuit: &mut Circuit,
        scope: &[&Circuit],
        text: &str,
        words: &[&str],
        line: usize,
    ) -> ParseResult<()> {
        let Some((&name, actuals)) = words.split_first() else {
            return Ok(());
        };

        if circuit.template(name).is_none() {
            let inherited = scope.iter().rev().find_map(|outer| outer.template(name));
            match inherited {
                Some(template) => circuit
                    .add_template(name, template.clone())
                    .map_err(|source| ParseError::Circuit { line, source })?,
                None => {
                    self.ignore_line(line, text);
                    return Ok(());
                }
            }
        }

        let actuals = actuals.iter().map(|&a| a.to_owned()).collect();
        match circuit.instantiate(name, actuals) {
            Ok(_) => Ok(()),
            Err(e @ (IrError::ArityMismatch { .. } | IrError::DuplicateVariable(_))) => {
                warn!("line {line}: skipping instance of '{name}': {e}");
                self.diagnostics.push(Diagnostic::invalid_instance(line, e.to_string()));
                Ok(())
            }
            Err(source) => Err(ParseError::Circuit { line, source }),
        }
    }

    fn field_error(&mut self, line: usize, message: String) {
        warn!("line {line}: {message}");
        self.diagnostics.push(Diagnostic::field(line, message));
    }

    fn ignore_line(&mut self, line: usize, text: &str) {
        let kind = if text.starts_with('.') {
            DiagnosticKind::UnknownDirective
        } else {
            DiagnosticKind::UnknownLine
        };
        debug!("Ignoring line {line}: {text}");
        self.diagnostics
            .push(Diagnostic::ignored(line, kind, format!("ignored '{}'", text.trim_end())));
    }
}

fn missing(line: usize, expected: &str) -> ParseError {
    ParseError::MissingToken {
        line,
        expected: expected.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use revlay_ir::IrError;

    use crate::error::{DiagnosticKind, ParseError, Severity};
    use crate::parser::{parse, parse_with_diagnostics};

    #[test]
    fn test_gate_controls_and_target() {
        let c = parse("t3 a b c").unwrap();
        let g = &c.gates()[0];
        assert_eq!(g.controls(), &["a", "b"]);
        assert_eq!(g.target(), "c");
    }

    #[test]
    fn test_not_gate() {
        let c = parse("t1 a").unwrap();
        assert!(c.gates()[0].controls().is_empty());
    }

    #[test]
    fn test_gate_without_target_is_fatal() {
        let result = parse(".variables a\nt a\nt   # nothing here\n");
        assert!(matches!(result, Err(ParseError::MissingToken { line: 3, .. })));
    }

    #[test]
    fn test_gate_target_in_controls_is_fatal() {
        let result = parse("t a b a");
        assert!(matches!(result, Err(ParseError::Circuit { line: 1, .. })));
    }

    #[test]
    fn test_gate_repeated_control_collapses() {
        let c = parse("t a a b").unwrap();
        assert_eq!(c.gates()[0].controls(), &["a"]);
    }

    #[test]
    fn test_garbage() {
        let c = parse(".variables a b c\n.garbage -1-").unwrap();
        assert!(!c.is_garbage("a"));
        assert!(c.is_garbage("b"));
        assert!(!c.is_garbage("c"));
    }

    #[test]
    fn test_constants() {
        let c = parse(".variables a b c\n.constants 0-1").unwrap();
        assert_eq!(c.constant("a"), Some(0));
        assert_eq!(c.constant("b"), None);
        assert_eq!(c.constant("c"), Some(1));
    }

    #[test]
    fn test_bad_constant_is_recoverable() {
        let parsed = parse_with_diagnostics(".variables a b c\n.constants 0x1").unwrap();
        let c = &parsed.circuit;
        assert_eq!(c.constant("a"), Some(0));
        assert_eq!(c.constant("b"), None);
        assert_eq!(c.constant("c"), Some(1));

        assert_eq!(parsed.diagnostics.len(), 1);
        let d = &parsed.diagnostics[0];
        assert_eq!(d.kind, DiagnosticKind::FieldParse);
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.line, 2);
    }

    #[test]
    fn test_mask_longer_than_registry() {
        let parsed = parse_with_diagnostics(".variables a\n.garbage 11").unwrap();
        assert!(parsed.circuit.is_garbage("a"));
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn test_directive_without_argument_is_fatal() {
        assert!(matches!(
            parse(".constants"),
            Err(ParseError::MissingToken { line: 1, .. })
        ));
        assert!(matches!(
            parse(".inputbus"),
            Err(ParseError::MissingToken { line: 1, .. })
        ));
        assert!(matches!(
            parse(".module"),
            Err(ParseError::MissingToken { line: 1, .. })
        ));
    }

    #[test]
    fn test_buses() {
        let c = parse(".inputbus x x0 x1\n.outputbus y y0").unwrap();
        assert_eq!(c.buses().len(), 2);
        assert_eq!(c.initial_order(), &["x0", "x1", "y0"]);
    }

    #[test]
    fn test_unknown_lines_are_ignored() {
        let parsed = parse_with_diagnostics(".version 2.0\nfoo a b\n\n# comment\nt a b").unwrap();
        assert_eq!(parsed.circuit.num_gates(), 1);
        let kinds: Vec<_> = parsed.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::UnknownDirective, DiagnosticKind::UnknownLine]
        );
    }

    #[test]
    fn test_instance_records_reference() {
        let c = parse(".module sub\nt a c\n.end\nsub x y\n").unwrap();
        assert_eq!(c.num_gates(), 0);
        assert_eq!(c.instances().len(), 1);
        assert_eq!(c.instances()[0].template, "sub");
        assert_eq!(c.instances()[0].actuals, vec!["x", "y"]);
    }

    #[test]
    fn test_instance_before_definition_is_ignored() {
        let parsed = parse_with_diagnostics("sub x y\n.module sub\nt a c\n.end\n").unwrap();
        assert!(parsed.circuit.instances().is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn test_instance_arity_mismatch_is_skipped() {
        let parsed = parse_with_diagnostics(".module sub\nt a c\n.end\nsub x\nsub y z\n").unwrap();
        let c = &parsed.circuit;
        assert_eq!(c.instances().len(), 1);
        assert_eq!(c.instances()[0].actuals, vec!["y", "z"]);
        assert_eq!(c.initial_order(), &["y", "z"]);

        assert_eq!(parsed.diagnostics.len(), 1);
        let d = &parsed.diagnostics[0];
        assert_eq!(d.kind, DiagnosticKind::InvalidInstance);
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.line, 4);
    }

    #[test]
    fn test_instance_repeating_a_line_is_skipped() {
        let parsed = parse_with_diagnostics(".module sub\nt a c\n.end\nsub x x\n").unwrap();
        assert!(parsed.circuit.instances().is_empty());
        assert_eq!(parsed.diagnostics[0].kind, DiagnosticKind::InvalidInstance);
    }

    #[test]
    fn test_module_redefinition_is_fatal() {
        let source = ".module s\nt a b\n.end\ns x y\n.module s\nt p q r\n.end\n";
        match parse(source) {
            Err(ParseError::Circuit { line, source }) => {
                assert_eq!(line, 5);
                assert_eq!(source, IrError::DuplicateTemplate("s".into()));
            }
            other => panic!("expected Circuit error, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_module_sees_enclosing_templates() {
        let source = "\
.module inner
t p q
.end
.module outer
inner a b
t b c
.end
outer x y z
";
        let c = parse(source).unwrap();
        let outer = c.template("outer").unwrap();
        assert!(outer.template("inner").is_some());
        assert_eq!(outer.instances().len(), 1);
        assert_eq!(outer.num_gates(), 1);

        let flat = c.flattened_gates().unwrap();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].to_string(), "t2 x y");
        assert_eq!(flat[1].to_string(), "t2 y z");
    }
}
