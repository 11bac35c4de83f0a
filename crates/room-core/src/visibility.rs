//! Who may see which message

use crate::entities::{Message, MessageKind};

/// Whether `viewer` may see `message`
///
/// Private messages are visible to their two parties only. Broadcasts and
/// status notices are visible to everyone, whatever `to` says.
#[inline]
pub fn visible(message: &Message, viewer: &str) -> bool {
    match message.kind {
        MessageKind::Private => message.from == viewer || message.to == viewer,
        MessageKind::Broadcast | MessageKind::Status => true,
    }
}

/// Filter a log given in append order down to what `viewer` may see,
/// most recent first, keeping at most `limit` entries
pub fn visible_messages<I>(log: I, viewer: &str, limit: Option<usize>) -> Vec<Message>
where
    I: IntoIterator<Item = Message>,
    I::IntoIter: DoubleEndedIterator,
{
    let filtered = log.into_iter().rev().filter(|m| visible(m, viewer));
    match limit {
        Some(n) => filtered.take(n).collect(),
        None => filtered.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewMessage;
    use crate::value_objects::MessageId;
    use chrono::{TimeZone, Utc};

    fn msg(id: i64, from: &str, to: &str, kind: MessageKind) -> Message {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        NewMessage::new(from, to, "hi", kind, at).with_id(MessageId::new(id))
    }

    #[test]
    fn test_private_visible_to_parties_only() {
        let m = msg(1, "ana", "bob", MessageKind::Private);
        assert!(visible(&m, "ana"));
        assert!(visible(&m, "bob"));
        assert!(!visible(&m, "cid"));
    }

    #[test]
    fn test_addressed_broadcast_visible_to_all() {
        let m = msg(1, "ana", "bob", MessageKind::Broadcast);
        assert!(visible(&m, "cid"));
    }

    #[test]
    fn test_status_visible_to_all() {
        let m = msg(1, "ana", "everyone", MessageKind::Status);
        assert!(visible(&m, "zed"));
    }

    #[test]
    fn test_visible_messages_most_recent_first_with_limit() {
        let log = vec![
            msg(1, "ana", "everyone", MessageKind::Broadcast),
            msg(2, "ana", "bob", MessageKind::Private),
            msg(3, "bob", "everyone", MessageKind::Broadcast),
            msg(4, "cid", "everyone", MessageKind::Status),
        ];

        let seen = visible_messages(log.clone(), "cid", None);
        let ids: Vec<i64> = seen.iter().map(|m| m.id.into_inner()).collect();
        assert_eq!(ids, vec![4, 3, 1]);

        let seen = visible_messages(log, "cid", Some(2));
        let ids: Vec<i64> = seen.iter().map(|m| m.id.into_inner()).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[test]
    fn test_limit_applies_after_filtering() {
        let log = vec![
            msg(1, "ana", "everyone", MessageKind::Broadcast),
            msg(2, "ana", "bob", MessageKind::Private),
            msg(3, "bob", "ana", MessageKind::Private),
        ];
        let seen = visible_messages(log, "cid", Some(1));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, MessageId::new(1));
    }
}
