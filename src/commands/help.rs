//! Built-in `help` container: command listings and per-container docs.

use std::sync::OnceLock;

use super::container::{CommandContainer, CommandContext};
use super::descriptor::{CommandDescriptor, ParamType, Value};
use super::registry::Registry;

/// Reserved prefix of the help container.
pub const HELP_PREFIX: &str = "help";

/// Option group listing every registered prefix.
pub const PREFIX_OPTIONS: u32 = 1;

const LIST_INDENT: &str = "        ";

const PRINT_ALL: usize = 0;
const PRINT_ONE: usize = 1;

fn descriptors() -> &'static [CommandDescriptor] {
    static DESCRIPTORS: OnceLock<Vec<CommandDescriptor>> = OnceLock::new();
    DESCRIPTORS.get_or_init(|| {
        vec![
            CommandDescriptor::new("print").doc("Shows all available commands.", Vec::<String>::new()),
            CommandDescriptor::new("print")
                .params([ParamType::String])
                .param_names(["container"])
                .doc(
                    "Prints the docs of every command in the given container.",
                    ["prefix of the container"],
                )
                .option(0, PREFIX_OPTIONS),
        ]
    })
}

/// The reserved help container.
///
/// `help` and `help print` list every command; `help print <prefix>` shows the
/// documentation of one container.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommands;

impl CommandContainer for HelpCommands {
    fn prefix(&self) -> &str {
        HELP_PREFIX
    }

    fn commands(&self) -> &[CommandDescriptor] {
        descriptors()
    }

    fn invoke(
        &self,
        index: usize,
        ctx: &mut CommandContext<'_>,
        args: &[Value],
    ) -> anyhow::Result<()> {
        match index {
            PRINT_ALL => {
                print_commands(ctx);
                Ok(())
            }
            PRINT_ONE => {
                let prefix = args
                    .first()
                    .and_then(Value::as_str)
                    .ok_or_else(|| anyhow::anyhow!("help print expects a container prefix"))?;
                print_help(ctx, prefix);
                Ok(())
            }
            _ => anyhow::bail!("no help operation at index {index}"),
        }
    }

    fn has_default(&self) -> bool {
        true
    }

    fn invoke_default(&self, ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
        print_commands(ctx);
        Ok(())
    }

    fn autocomplete_options(&self, group: u32, registry: &Registry) -> Option<Vec<String>> {
        match group {
            PREFIX_OPTIONS => Some(registry.prefixes()),
            _ => Some(Vec::new()),
        }
    }
}

fn print_commands(ctx: &mut CommandContext<'_>) {
    let show_hidden = ctx.settings().display_hidden_commands;
    for block in format_command_list(ctx.registry(), show_hidden) {
        ctx.print(block);
    }
}

fn print_help(ctx: &mut CommandContext<'_>, prefix: &str) {
    match ctx.registry().lookup(prefix) {
        Some(container) => {
            let text = format_container_help(container);
            ctx.print(text);
        }
        None => ctx.error(format!("No command container named '{}'", prefix.trim())),
    }
}

/// Lists every container's displayable commands, one block per container.
///
/// Containers with nothing to display are skipped.
pub fn format_command_list(registry: &Registry, show_hidden: bool) -> Vec<String> {
    registry
        .containers()
        .filter_map(|container| {
            let lines: Vec<String> = container
                .commands()
                .iter()
                .filter(|cmd| show_hidden || !cmd.is_hidden())
                .map(|cmd| format!("{LIST_INDENT}{}{}", cmd.name(), cmd.signature()))
                .collect();
            if lines.is_empty() {
                None
            } else {
                Some(format!("{}:\n{}", container.prefix(), lines.join("\n")))
            }
        })
        .collect()
}

/// Renders the documentation of every command in `container`.
///
/// Hidden commands are included: asking for one container by name is
/// explicit. Parameter descriptions are indented to line up under the
/// command name.
pub fn format_container_help(container: &dyn CommandContainer) -> String {
    let mut out = format!("Help for {}:\n", container.prefix());

    for cmd in container.commands() {
        out.push_str(&format!("\n-{}{}:\n", cmd.name(), cmd.signature()));

        let Some(doc) = cmd.documentation() else {
            continue;
        };
        out.push_str(&doc.description);
        out.push('\n');

        let indent = " ".repeat(cmd.name().len() + 2);
        for i in 0..cmd.parameter_types().len() {
            let label = cmd.param_label(i).unwrap_or_default();
            let description = doc.param_descriptions.get(i).map(String::as_str).unwrap_or("");
            out.push_str(format!("{indent}{label}: {description}").trim_end());
            out.push('\n');
        }
    }

    out.trim_end().to_string()
}
