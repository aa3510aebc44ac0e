//! Integration tests for the formatting helpers and identifier types.

use herald_common::{
    format_duration, format_permission_list, ChannelKind, PermissionFlag, PermissionSet, UserId,
};
use proptest::prelude::*;
use std::time::Duration;

#[test]
fn test_ids_parse_from_mention_bodies() {
    let id: UserId = "123456789".parse().unwrap();
    assert_eq!(id, UserId(123_456_789));
    assert!("12ab".parse::<UserId>().is_err());
}

#[test]
fn test_ids_serialize_transparently() {
    let json = serde_json::to_string(&UserId(42)).unwrap();
    assert_eq!(json, "42");
}

#[test]
fn test_only_text_channels_accept_commands() {
    assert!(ChannelKind::Text.accepts_commands());
    for kind in [
        ChannelKind::Voice,
        ChannelKind::Category,
        ChannelKind::News,
        ChannelKind::Thread,
        ChannelKind::Private,
    ] {
        assert!(!kind.accepts_commands(), "{kind:?} should not accept commands");
    }
}

#[test]
fn test_missing_permissions_render_as_sentence() {
    let granted = PermissionSet::from([PermissionFlag::SendMessages]);
    let required = PermissionSet::from([
        PermissionFlag::SendMessages,
        PermissionFlag::KickMembers,
        PermissionFlag::ManageRoles,
    ]);

    let missing = granted.missing(&required);
    assert_eq!(
        format_permission_list(&missing),
        "`Kick Members` and `Manage Roles`"
    );
}

proptest! {
    #[test]
    fn test_format_duration_never_loses_whole_minutes(minutes in 1u64..10_000) {
        let rendered = format_duration(Duration::from_secs(minutes * 60));
        prop_assert!(!rendered.is_empty());
        prop_assert!(!rendered.ends_with('s'));
    }

    #[test]
    fn test_format_permission_list_mentions_every_flag(
        indices in proptest::collection::btree_set(0usize..PermissionFlag::ALL.len(), 1..6)
    ) {
        let flags: Vec<PermissionFlag> = indices.iter().map(|&i| PermissionFlag::ALL[i]).collect();
        let rendered = format_permission_list(&flags);
        for flag in &flags {
            let needle = format!("`{flag}`");
            prop_assert!(rendered.contains(&needle));
        }
        prop_assert_eq!(rendered.matches(" and ").count(), usize::from(flags.len() > 1));
    }
}
