pub mod interaction_models;

pub use interaction_models::{InboundInteraction, InteractionKind};
