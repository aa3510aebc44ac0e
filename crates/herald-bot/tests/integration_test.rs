//! Integration tests for herald-bot crate.
//!
//! These tests cover the wiring that does not need a live gateway
//! connection: handler construction and gateway model translation.

use herald_bot::snapshot::{channel_kind, permission_set, referenced_user_ids};
use herald_bot::HeraldBot;
use herald_common::test_utils::discord_fixtures::test_user_ids;
use herald_common::test_utils::init_test_logging;
use herald_common::{ChannelKind, PermissionFlag, UserId};
use herald_config::BotConfig;
use serenity::all::{ChannelType, GatewayIntents, Permissions};

#[test]
fn test_handler_wires_builtins_and_block_list() {
    init_test_logging();

    let mut config = BotConfig::default();
    config.discord.default_prefix = "?".into();
    config.discord.blocked_users = test_user_ids(3);

    let handler = HeraldBot::new(config).handler().unwrap();
    let registry = handler.dispatcher().registry();
    assert!(registry.get("ping").is_some());
    assert!(registry.get("up").is_some());
    assert!(registry.get("commands").is_some());
    for user in test_user_ids(3) {
        assert!(handler.dispatcher().is_blocked(user));
    }
    assert!(!handler.dispatcher().is_blocked(UserId(7)));
    assert!(handler.guilds().is_empty());
    assert_eq!(
        handler.welcome_message("Rustaceans"),
        "Thanks for adding me to Rustaceans! My default prefix is '**?**'."
    );
}

#[test]
fn test_intents_include_message_content() {
    let intents = HeraldBot::intents();
    assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
    assert!(intents.contains(GatewayIntents::GUILD_MESSAGES));
}

#[test]
fn test_permission_bits_translate() {
    let set = permission_set(Permissions::MANAGE_MESSAGES | Permissions::BAN_MEMBERS);
    assert_eq!(set.len(), 2);
    assert!(set.contains(PermissionFlag::ManageMessages));
    assert!(set.contains(PermissionFlag::BanMembers));

    assert_eq!(permission_set(Permissions::all()).len(), PermissionFlag::ALL.len());
    assert!(permission_set(Permissions::empty()).is_empty());
}

#[test]
fn test_channel_types_translate() {
    assert_eq!(channel_kind(ChannelType::Text), ChannelKind::Text);
    assert_eq!(channel_kind(ChannelType::PublicThread), ChannelKind::Thread);
    assert_eq!(channel_kind(ChannelType::Private), ChannelKind::Private);
    assert_eq!(channel_kind(ChannelType::Category), ChannelKind::Category);
    assert!(!channel_kind(ChannelType::Voice).accepts_commands());
}

#[test]
fn test_referenced_ids_are_extracted() {
    let content = "!ban <@!123456789012345678> 876543210987654321 for 3 days 00000000000000000";
    assert_eq!(
        referenced_user_ids(content),
        vec![123_456_789_012_345_678, 876_543_210_987_654_321]
    );
}
