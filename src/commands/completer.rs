//! Staged autocompletion for partially typed lines.
//!
//! The stage depends on how many tokens the line has:
//! - One token: container prefixes
//! - Two tokens: command names of the resolved container
//! - More: option values for the parameter being typed
//!
//! Candidates are full lines, so accepting one replaces the whole input.

use std::collections::BTreeSet;

use super::registry::Registry;
use super::tokenizer::completion_tokens;

/// Candidates computed for one line, with a cycling cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSession {
    candidates: Vec<String>,
    source_line: String,
    cursor: usize,
}

impl CompletionSession {
    /// Computes the candidates for `line`.
    pub fn compute(registry: &Registry, line: &str) -> Self {
        let tokens = completion_tokens(line);
        let mut found = BTreeSet::new();

        match tokens.as_slice() {
            [] => {}
            [start] => complete_prefix(registry, start, &mut found),
            [prefix, start] => complete_command(registry, prefix, start, &mut found),
            [prefix, command, .., start] => {
                let param_index = tokens.len() - 3;
                let leading = tokens[..tokens.len() - 1].join(" ");
                complete_parameter(
                    registry,
                    prefix,
                    command,
                    param_index,
                    start,
                    &leading,
                    &mut found,
                );
            }
        }

        tracing::debug!(line, candidates = found.len(), "Computed completions");

        Self {
            candidates: found.into_iter().collect(),
            source_line: line.to_string(),
            cursor: 0,
        }
    }

    /// All candidates, each exactly once.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The line the candidates were computed from.
    pub fn source_line(&self) -> &str {
        &self.source_line
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns true if the session was computed from `line`, ignoring case.
    pub fn was_computed_from(&self, line: &str) -> bool {
        self.source_line.eq_ignore_ascii_case(line)
    }

    /// Returns the next candidate.
    ///
    /// After the last candidate, returns the source line once and starts over.
    pub fn next_candidate(&mut self) -> String {
        match self.candidates.get(self.cursor) {
            Some(candidate) => {
                self.cursor += 1;
                candidate.clone()
            }
            None => {
                self.cursor = 0;
                self.source_line.clone()
            }
        }
    }
}

fn complete_prefix(registry: &Registry, start: &str, found: &mut BTreeSet<String>) {
    let start = start.to_lowercase();
    for container in registry.containers() {
        if container.prefix().to_lowercase().starts_with(&start) {
            found.insert(container.prefix().to_string());
        }
    }
}

fn complete_command(registry: &Registry, prefix: &str, start: &str, found: &mut BTreeSet<String>) {
    let Some(container) = registry.lookup(prefix) else {
        return;
    };
    for cmd in container.commands() {
        if cmd.name().starts_with(start) {
            found.insert(format!("{prefix} {}", cmd.name()));
        }
    }
}

fn complete_parameter(
    registry: &Registry,
    prefix: &str,
    command: &str,
    param_index: usize,
    start: &str,
    leading: &str,
    found: &mut BTreeSet<String>,
) {
    let Some(container) = registry.lookup(prefix) else {
        return;
    };

    for cmd in container.commands().iter().filter(|c| c.matches_name(command)) {
        for group in cmd.option_groups(param_index) {
            // None: the container offers no option values at all
            let Some(values) = container.autocomplete_options(group, registry) else {
                return;
            };
            for value in values.into_iter().filter(|v| v.starts_with(start)) {
                found.insert(format!("{leading} {value}"));
            }
        }
    }
}

/// Keeps one completion session alive across repeated requests.
///
/// A request reuses the current session when the line equals the session's
/// source line or the candidate last handed out, so pressing complete again
/// cycles instead of recomputing. Any other line starts a new session.
#[derive(Debug, Clone, Default)]
pub struct Completer {
    session: Option<CompletionSession>,
    last_emitted: Option<String>,
}

impl Completer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next completion for `line`.
    pub fn complete(&mut self, registry: &Registry, line: &str) -> String {
        let reuse = match &self.session {
            Some(session) => {
                session.was_computed_from(line) || self.last_emitted.as_deref() == Some(line)
            }
            None => false,
        };

        if !reuse {
            self.session = None;
        }
        let session = self
            .session
            .get_or_insert_with(|| CompletionSession::compute(registry, line));

        let next = session.next_candidate();
        self.last_emitted = Some(next.clone());
        next
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<&CompletionSession> {
        self.session.as_ref()
    }

    /// Drops the current session.
    pub fn reset(&mut self) {
        self.session = None;
        self.last_emitted = None;
    }

    /// Returns true when no candidates are held.
    pub fn is_new(&self) -> bool {
        self.session.as_ref().map_or(true, CompletionSession::is_empty)
    }
}
