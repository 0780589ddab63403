//! Command registration, dispatch and autocompletion.
//!
//! Parsing and resolution are kept separate from any UI so that every stage
//! can be unit tested against a plain [`Registry`].

pub mod completer;
pub mod container;
pub mod descriptor;
pub mod dispatcher;
pub mod help;
pub mod registry;
pub mod tokenizer;

pub use completer::{Completer, CompletionSession};
pub use container::{CommandContainer, CommandContext, CommandGroup};
pub use descriptor::{CommandDescriptor, CommandDoc, ParamType, Value};
pub use dispatcher::{dispatch, DispatchError, DispatchOutcome, Invocation};
pub use help::{HelpCommands, HELP_PREFIX};
pub use registry::Registry;
