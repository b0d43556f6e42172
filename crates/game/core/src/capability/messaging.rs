use crate::capability::{Behavior, CapabilityKind};
use crate::format::{FormatError, MessageArg, format_message};
use crate::state::{EntityId, Map, Position};

/// Unbounded queue of player-visible messages, drained by its owner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageRecipient {
    messages: Vec<String>,
}

impl MessageRecipient {
    pub fn receive_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }
}

fn render(template: &str, args: &[MessageArg]) -> Result<String, FormatError> {
    if args.is_empty() {
        Ok(template.to_owned())
    } else {
        format_message(template, args)
    }
}

/// Delivers one message to `recipient`.
///
/// Silently does nothing when the recipient cannot receive messages or is no
/// longer on the map. The template is only formatted when `args` is non-empty.
pub fn send_message(
    map: &mut Map,
    recipient: EntityId,
    template: &str,
    args: &[MessageArg],
) -> Result<(), FormatError> {
    let Some(entity) = map.entity_mut(recipient) else {
        return Ok(());
    };
    if !entity.has_capability(CapabilityKind::MessageRecipient) {
        return Ok(());
    }

    let message = render(template, args)?;
    let queue: &mut MessageRecipient = entity.require_mut(Behavior::ReceiveMessage);
    queue.receive_message(message);
    Ok(())
}

/// Formats once and delivers the same text to every recipient within
/// `radius` (Chebyshev) of `center`.
pub fn send_message_nearby(
    map: &mut Map,
    center: Position,
    radius: u32,
    template: &str,
    args: &[MessageArg],
) -> Result<(), FormatError> {
    let message = render(template, args)?;

    for id in map.entities_within_radius(center.x, center.y, radius) {
        let Some(entity) = map.entity_mut(id) else {
            continue;
        };
        if let Some(queue) = entity.capability_mut::<MessageRecipient>() {
            queue.receive_message(message.as_str());
        }
    }

    Ok(())
}
