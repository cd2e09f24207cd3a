//! Recursive-descent reader for the circuit text format.
//!
//! The reader works line by line. A `.module` line recurses into a fresh
//! level that shares the source lines; the nested level hands back the index
//! of the first line it did not consume, so the caller resumes right after
//! the matching `.end`.

mod directive;

use std::fs;
use std::path::Path;

use tracing::debug;

use revlay_ir::Circuit;

use crate::error::{Diagnostic, ParseError, ParseResult};
use crate::lexer;

/// Name given to the outermost circuit.
pub const TOP_LEVEL_NAME: &str = "top";

/// A parsed circuit together with the non-fatal diagnostics found on the way.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// The circuit.
    pub circuit: Circuit,
    /// Skipped fields and ignored lines, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse circuit text, discarding diagnostics.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    parse_with_diagnostics(source).map(|parsed| parsed.circuit)
}

/// Parse circuit text and keep the diagnostics.
pub fn parse_with_diagnostics(source: &str) -> ParseResult<Parsed> {
    let mut parser = Parser::new(source);
    let (circuit, _) = parser.parse_level(TOP_LEVEL_NAME, 0, &[], None)?;
    Ok(Parsed {
        circuit,
        diagnostics: parser.diagnostics,
    })
}

/// Parse a fragment of `source` starting at 0-based line `start_line`.
///
/// Reading stops after the first `.end` at this level, or at end of input.
/// Returns the circuit and the index of the first line not consumed.
pub fn parse_fragment(source: &str, start_line: usize) -> ParseResult<(Circuit, usize)> {
    let mut parser = Parser::new(source);
    parser.parse_level(TOP_LEVEL_NAME, start_line, &[], None)
}

/// Read and parse a circuit file.
pub fn parse_file(path: impl AsRef<Path>) -> ParseResult<Parsed> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_with_diagnostics(&source)
}

/// What kind of line the dispatcher saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Gate,
    Variables,
    Garbage,
    Constants,
    InputBus,
    OutputBus,
    Module,
    End,
    Other,
}

impl LineKind {
    /// Classify by prefix; the first match wins.
    fn classify(line: &str) -> Self {
        const PREFIXES: [(&str, LineKind); 8] = [
            ("t", LineKind::Gate),
            (".variables", LineKind::Variables),
            (".garbage", LineKind::Garbage),
            (".constants", LineKind::Constants),
            (".inputbus", LineKind::InputBus),
            (".outputbus", LineKind::OutputBus),
            (".module", LineKind::Module),
            (".end", LineKind::End),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix))
            .map_or(LineKind::Other, |&(_, kind)| kind)
    }
}

/// Parser state shared by every nesting level.
pub(super) struct Parser<'a> {
    pub(super) lines: Vec<&'a str>,
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            diagnostics: Vec::new(),
        }
    }

    /// Parse one nesting level starting at line index `start`.
    ///
    /// `scope` holds the enclosing levels, innermost last, for template
    /// lookup. `opened_at` is the 1-based line of the `.module` directive for
    /// nested levels and `None` at the top level.
    fn parse_level(
        &mut self,
        name: &str,
        start: usize,
        scope: &[&Circuit],
        opened_at: Option<usize>,
    ) -> ParseResult<(Circuit, usize)> {
        let mut circuit = Circuit::new(name);
        let mut cursor = start;

        while cursor < self.lines.len() {
            let line_no = cursor + 1;
            let raw: &'a str = self.lines[cursor];
            let line = raw.trim_start();
            let words = lexer::words(line);

            match LineKind::classify(line) {
                LineKind::Gate => self.gate_line(&mut circuit, &words, line_no)?,
                LineKind::Variables => Self::variables_line(&mut circuit, &words),
                LineKind::Garbage => self.garbage_line(&mut circuit, &words, line_no)?,
                LineKind::Constants => self.constants_line(&mut circuit, &words, line_no)?,
                LineKind::InputBus => {
                    Self::bus_line(&mut circuit, revlay_ir::BusKind::Input, &words, line_no)?;
                }
                LineKind::OutputBus => {
                    Self::bus_line(&mut circuit, revlay_ir::BusKind::Output, &words, line_no)?;
                }
                LineKind::Module => {
                    let module = words
                        .get(1)
                        .copied()
                        .ok_or_else(|| ParseError::MissingToken {
                            line: line_no,
                            expected: "module name".into(),
                        })?;
                    debug!("Entering module '{module}' at line {line_no}");

                    let mut inner_scope = scope.to_vec();
                    inner_scope.push(&circuit);
                    let (template, next) =
                        self.parse_level(module, cursor + 1, &inner_scope, Some(line_no))?;

                    debug!(
                        "Module '{module}' spans lines {line_no}..{next}, {} lines, {} gates",
                        template.num_variables(),
                        template.num_gates()
                    );
                    circuit
                        .add_template(module, template)
                        .map_err(|source| ParseError::Circuit {
                            line: line_no,
                            source,
                        })?;
                    cursor = next;
                    continue;
                }
                LineKind::End => return Ok((circuit, cursor + 1)),
                LineKind::Other => self.other_line(&mut circuit, scope, line, &words, line_no)?,
            }

            cursor += 1;
        }

        match opened_at {
            Some(line) => Err(ParseError::UnterminatedModule {
                name: name.to_owned(),
                line,
            }),
            None => Ok((circuit, cursor)),
        }
    }
}
