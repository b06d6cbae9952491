// Static slash command descriptors.
//
// These are plain data so the core layer never depends on serenity. The
// Discord registrar turns them into `CreateCommand` builders at startup.

/// Name of the one command this bot understands.
pub const CREATE_MODULE: &str = "create-module";

/// Name of the required string option on `/create-module`.
pub const MODULE_NAME_OPTION: &str = "name";

/// The kinds of option the bot declares. Discord supports more; we only need strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
}

impl OptionKind {
    /// Discord's numeric application command option type.
    pub fn discord_type(self) -> u8 {
        match self {
            OptionKind::String => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOptionDefinition {
    pub name: &'static str,
    pub kind: OptionKind,
    pub description: &'static str,
    pub required: bool,
}

/// Descriptor for one slash command. Defined once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [CommandOptionDefinition],
}

const CREATE_MODULE_OPTIONS: &[CommandOptionDefinition] = &[CommandOptionDefinition {
    name: MODULE_NAME_OPTION,
    kind: OptionKind::String,
    description: "The name of the module",
    required: true,
}];

/// `/create-module name:<text>`
pub const CREATE_MODULE_COMMAND: CommandDefinition = CommandDefinition {
    name: CREATE_MODULE,
    description: "Creates a new module in Plane.",
    options: CREATE_MODULE_OPTIONS,
};

const ALL_COMMANDS: &[CommandDefinition] = &[CREATE_MODULE_COMMAND];

/// Every command the bot registers globally. Registration overwrites the whole set.
pub fn all_commands() -> &'static [CommandDefinition] {
    ALL_COMMANDS
}
