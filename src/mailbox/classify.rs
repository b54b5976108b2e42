//! Message classification over one cycle's inbound batch.
//!
//! Pure functions: nothing here looks at controller state.

use super::message::{Message, MessageKind};
use super::Mailbox;

/// How many messages of one kind a batch contains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome<'a> {
    Absent,
    Unique(&'a Message),
    /// More than one match; carries the number found.
    Ambiguous(usize),
}

impl<'a> MatchOutcome<'a> {
    /// The message, if exactly one matched.
    pub fn unique(self) -> Option<&'a Message> {
        match self {
            Self::Unique(m) => Some(m),
            Self::Absent | Self::Ambiguous(_) => None,
        }
    }

    /// True if at least one message matched.
    pub fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Count matches of `kind` and return the split outcome.
pub fn classify(kind: MessageKind, inbox: &Mailbox) -> MatchOutcome<'_> {
    let mut found = None;
    let mut count = 0usize;
    for msg in inbox.iter().filter(|m| m.kind() == kind) {
        count += 1;
        if found.is_none() {
            found = Some(msg);
        }
    }
    match (found, count) {
        (None, _) => MatchOutcome::Absent,
        (Some(msg), 1) => MatchOutcome::Unique(msg),
        (Some(_), n) => MatchOutcome::Ambiguous(n),
    }
}

/// The only message of `kind`, or `None` if there are zero or several.
pub fn extract_only_match(kind: MessageKind, inbox: &Mailbox) -> Option<&Message> {
    classify(kind, inbox).unique()
}

/// Every message of `kind`, in inbox order.
pub fn extract_all_matches(kind: MessageKind, inbox: &Mailbox) -> Vec<&Message> {
    inbox.iter().filter(|m| m.kind() == kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbox(msgs: &[Message]) -> Mailbox {
        msgs.iter().copied().collect()
    }

    #[test]
    fn only_match_single() {
        let ib = inbox(&[Message::Stop, Message::Level(10.0), Message::Steam(0.0)]);
        assert_eq!(
            extract_only_match(MessageKind::Level, &ib),
            Some(&Message::Level(10.0))
        );
    }

    #[test]
    fn only_match_absent_and_ambiguous_collapse() {
        let ib = inbox(&[Message::Level(10.0), Message::Level(11.0)]);
        assert_eq!(extract_only_match(MessageKind::Level, &ib), None);
        assert_eq!(extract_only_match(MessageKind::Steam, &ib), None);
        assert_eq!(classify(MessageKind::Level, &ib), MatchOutcome::Ambiguous(2));
        assert_eq!(classify(MessageKind::Steam, &ib), MatchOutcome::Absent);
    }

    #[test]
    fn ambiguous_counts_as_present() {
        let ib = inbox(&[Message::Stop, Message::Stop]);
        assert!(classify(MessageKind::Stop, &ib).is_present());
        assert!(!classify(MessageKind::Valve, &ib).is_present());
    }

    #[test]
    fn all_matches_preserve_order() {
        let ib = inbox(&[
            Message::PumpState { pump: 1, open: true },
            Message::Steam(2.0),
            Message::PumpState { pump: 0, open: false },
        ]);
        let all = extract_all_matches(MessageKind::PumpState, &ib);
        assert_eq!(
            all,
            vec![
                &Message::PumpState { pump: 1, open: true },
                &Message::PumpState { pump: 0, open: false },
            ]
        );
        assert!(extract_all_matches(MessageKind::Valve, &ib).is_empty());
    }
}
