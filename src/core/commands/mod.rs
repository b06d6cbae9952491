pub mod command_definitions;

pub use command_definitions::{
    all_commands, CommandDefinition, OptionKind, CREATE_MODULE, MODULE_NAME_OPTION,
};
