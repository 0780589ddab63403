//! Demo command set registered by the `cmdeck` binary.
//!
//! `math` is built from closures with [`CommandGroup`]; `sys` implements
//! [`CommandContainer`] by hand and keeps mutable state behind a `RefCell`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use anyhow::{bail, Context};

use crate::commands::{
    CommandContainer, CommandContext, CommandDescriptor, CommandGroup, ParamType, Registry, Value,
};
use crate::console::Console;
use crate::log::LogSink;

/// Option group listing the names of the `sys` flags.
pub const FLAG_NAMES: u32 = 1;
/// Option group offering `true` and `false`.
pub const BOOLEANS: u32 = 2;

/// Registers every demo container on `console`.
pub fn register<S: LogSink>(console: &mut Console<S>) {
    console.add_container(math());
    console.add_container(SystemCommands::default());
}

fn int(args: &[Value], index: usize) -> anyhow::Result<i64> {
    args.get(index)
        .and_then(Value::as_int)
        .with_context(|| format!("argument {index} is not an integer"))
}

fn float(args: &[Value], index: usize) -> anyhow::Result<f64> {
    args.get(index)
        .and_then(Value::as_float)
        .with_context(|| format!("argument {index} is not a number"))
}

/// Arithmetic on typed arguments; `add` is overloaded on integers and floats.
pub fn math() -> CommandGroup {
    CommandGroup::new("math")
        .command(
            CommandDescriptor::new("add")
                .params([ParamType::I64, ParamType::I64])
                .param_names(["a", "b"])
                .doc("Adds two integers.", ["first operand", "second operand"]),
            |ctx, args| {
                let sum = int(args, 0)?
                    .checked_add(int(args, 1)?)
                    .context("integer overflow")?;
                ctx.print(sum.to_string());
                Ok(())
            },
        )
        .command(
            CommandDescriptor::new("add")
                .params([ParamType::F64, ParamType::F64])
                .param_names(["a", "b"])
                .doc("Adds two decimals.", ["first operand", "second operand"]),
            |ctx, args| {
                ctx.print((float(args, 0)? + float(args, 1)?).to_string());
                Ok(())
            },
        )
        .command(
            CommandDescriptor::new("neg")
                .params([ParamType::I32])
                .doc("Negates a number.", ["value to negate"]),
            |ctx, args| {
                ctx.print((-int(args, 0)?).to_string());
                Ok(())
            },
        )
        .command(
            CommandDescriptor::new("div")
                .params([ParamType::F64, ParamType::F64])
                .param_names(["dividend", "divisor"])
                .doc("Divides two decimals.", Vec::<String>::new()),
            |ctx, args| {
                let divisor = float(args, 1)?;
                if divisor == 0.0 {
                    return Err(anyhow::anyhow!("divisor is zero")).context("cannot divide");
                }
                ctx.print((float(args, 0)? / divisor).to_string());
                Ok(())
            },
        )
}

const ECHO: usize = 0;
const ECHO_TWO: usize = 1;
const TOGGLE: usize = 2;
const FLAGS: usize = 3;
const SECRET: usize = 4;
const FAIL: usize = 5;

fn system_descriptors() -> &'static [CommandDescriptor] {
    static DESCRIPTORS: OnceLock<Vec<CommandDescriptor>> = OnceLock::new();
    DESCRIPTORS.get_or_init(|| {
        vec![
            CommandDescriptor::new("echo")
                .params([ParamType::String])
                .param_names(["text"])
                .doc("Prints a word.", ["word to print"]),
            CommandDescriptor::new("echo")
                .params([ParamType::String, ParamType::String])
                .doc("Prints two words.", ["first word", "second word"]),
            CommandDescriptor::new("toggle")
                .params([ParamType::String, ParamType::Bool])
                .param_names(["name", "on"])
                .doc("Sets a flag.", ["flag name", "new value"])
                .option(0, FLAG_NAMES)
                .option(1, BOOLEANS),
            CommandDescriptor::new("flags").doc("Lists all flags.", Vec::<String>::new()),
            CommandDescriptor::new("secret").hidden(),
            CommandDescriptor::new("fail")
                .hidden()
                .doc("Always fails.", Vec::<String>::new()),
        ]
    })
}

/// Named boolean flags. Running `sys` alone prints every flag.
#[derive(Debug)]
pub struct SystemCommands {
    flags: RefCell<BTreeMap<String, bool>>,
}

impl Default for SystemCommands {
    fn default() -> Self {
        let flags = ["verbose", "vsync", "wireframe"]
            .into_iter()
            .map(|name| (name.to_string(), false))
            .collect();
        Self {
            flags: RefCell::new(flags),
        }
    }
}

impl SystemCommands {
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.borrow().get(name).copied()
    }

    fn print_flags(&self, ctx: &mut CommandContext<'_>) {
        for (name, on) in self.flags.borrow().iter() {
            ctx.print(format!("{name} = {on}"));
        }
    }
}

impl CommandContainer for SystemCommands {
    fn prefix(&self) -> &str {
        "sys"
    }

    fn commands(&self) -> &[CommandDescriptor] {
        system_descriptors()
    }

    fn invoke(
        &self,
        index: usize,
        ctx: &mut CommandContext<'_>,
        args: &[Value],
    ) -> anyhow::Result<()> {
        match index {
            ECHO | ECHO_TWO => {
                let words: Vec<&str> = args.iter().filter_map(Value::as_str).collect();
                ctx.print(words.join(" "));
            }
            TOGGLE => {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                let on = args.get(1).and_then(Value::as_bool).unwrap_or_default();
                let mut flags = self.flags.borrow_mut();
                let Some(flag) = flags.get_mut(name) else {
                    bail!("unknown flag '{name}'");
                };
                *flag = on;
                ctx.success(format!("{name} = {on}"));
            }
            FLAGS => self.print_flags(ctx),
            SECRET => ctx.success("You found the secret command."),
            FAIL => bail!("this command always fails"),
            _ => bail!("no sys operation at index {index}"),
        }
        Ok(())
    }

    fn has_default(&self) -> bool {
        true
    }

    fn invoke_default(&self, ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
        self.print_flags(ctx);
        Ok(())
    }

    fn autocomplete_options(&self, group: u32, _registry: &Registry) -> Option<Vec<String>> {
        let values = match group {
            FLAG_NAMES => self.flags.borrow().keys().cloned().collect(),
            BOOLEANS => vec!["true".to_string(), "false".to_string()],
            _ => Vec::new(),
        };
        Some(values)
    }
}
