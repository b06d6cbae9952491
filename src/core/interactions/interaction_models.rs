// Platform-agnostic view of an inbound Discord interaction.
// The Discord layer builds these from serenity types; the core only reads them.

/// What sort of interaction arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Command,
    Component,
    Autocomplete,
    Modal,
    Ping,
    Other,
}

/// One inbound interaction, reduced to the fields the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundInteraction {
    pub kind: InteractionKind,
    pub command_name: Option<String>,
    pub string_options: Vec<(String, String)>,
}

impl InboundInteraction {
    /// A slash command invocation with the given string options.
    pub fn command(name: impl Into<String>, string_options: Vec<(String, String)>) -> Self {
        Self {
            kind: InteractionKind::Command,
            command_name: Some(name.into()),
            string_options,
        }
    }

    /// Anything that is not a slash command (buttons, modals, autocomplete...).
    pub fn other(kind: InteractionKind) -> Self {
        Self {
            kind,
            command_name: None,
            string_options: Vec::new(),
        }
    }

    /// The slash command name, if this is a command interaction.
    pub fn slash_command(&self) -> Option<&str> {
        match self.kind {
            InteractionKind::Command => self.command_name.as_deref(),
            _ => None,
        }
    }

    /// Look up a string option by name.
    pub fn string_option(&self, name: &str) -> Option<&str> {
        self.string_options
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
