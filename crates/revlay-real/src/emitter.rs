//! Writer for the circuit text format.

use revlay_ir::{BusKind, Circuit, Instance};

use crate::error::{ParseError, ParseResult};

/// Emit a circuit as text in the format read by [`crate::parse`].
///
/// The output lists the variables, metadata masks, buses, module definitions,
/// then gates and instance lines in program order, and ends with `.end`.
/// An installed custom ordering is not written; parsing the output yields the
/// initial order.
pub fn emit(circuit: &Circuit) -> ParseResult<String> {
    let mut emitter = Emitter::default();
    emitter.emit_level(circuit)?;
    Ok(emitter.output)
}

#[derive(Default)]
struct Emitter {
    output: String,
}

impl Emitter {
    fn emit_level(&mut self, circuit: &Circuit) -> ParseResult<()> {
        let order = circuit.initial_order();
        for name in order {
            check_name("line", name)?;
        }

        if !order.is_empty() {
            self.writeln(&format!(".variables {}", order.join(" ")));
        }

        if !circuit.constants().is_empty() {
            let mut mask = String::with_capacity(order.len());
            for name in order {
                match circuit.constant(name) {
                    Some(value) => {
                        let digit = char::from_digit(u32::from(value), 10).ok_or_else(|| {
                            ParseError::Unrepresentable(format!(
                                "constant {value} on line '{name}' is not a single digit"
                            ))
                        })?;
                        mask.push(digit);
                    }
                    None => mask.push('-'),
                }
            }
            self.writeln(&format!(".constants {mask}"));
        }

        if circuit.garbage().next().is_some() {
            let mask: String = order
                .iter()
                .map(|name| if circuit.is_garbage(name) { '1' } else { '-' })
                .collect();
            self.writeln(&format!(".garbage {mask}"));
        }

        for bus in circuit.buses() {
            check_name("bus", &bus.name)?;
            let directive = match bus.kind {
                BusKind::Input => ".inputbus",
                BusKind::Output => ".outputbus",
            };
            self.writeln(&format!(
                "{directive} {} {}",
                bus.name,
                bus.variables.join(" ")
            ));
        }

        for template in circuit.templates() {
            check_template_name(&template.name)?;
            self.writeln(&format!(".module {}", template.name));
            self.emit_level(&template.circuit)?;
        }

        let mut instances = circuit.instances().iter().peekable();
        for (i, gate) in circuit.gates().iter().enumerate() {
            while let Some(instance) = instances.next_if(|inst| inst.anchor <= i) {
                self.emit_instance(instance);
            }
            self.writeln(&gate.to_string());
        }
        for instance in instances {
            self.emit_instance(instance);
        }

        self.writeln(".end");
        Ok(())
    }

    fn emit_instance(&mut self, instance: &Instance) {
        let mut line = instance.template.clone();
        for actual in &instance.actuals {
            line.push(' ');
            line.push_str(actual);
        }
        self.writeln(&line);
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// A name must survive whitespace splitting and comment stripping.
fn check_name(what: &str, name: &str) -> ParseResult<()> {
    if name.is_empty() || name.starts_with('#') || name.contains(char::is_whitespace) {
        return Err(ParseError::Unrepresentable(format!(
            "{what} name '{name}' cannot be written as a single word"
        )));
    }
    Ok(())
}

/// Template names must also not be read back as a gate or a directive.
fn check_template_name(name: &str) -> ParseResult<()> {
    check_name("module", name)?;
    if name.starts_with('t') || name.starts_with('.') {
        return Err(ParseError::Unrepresentable(format!(
            "module name '{name}' would be read as a gate or directive"
        )));
    }
    Ok(())
}
