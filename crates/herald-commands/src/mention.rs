//! Parsing of mention tokens and bare snowflake ids.

use herald_common::{ChannelId, RoleId, UserId};

fn snowflake(body: &str) -> Option<u64> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.parse().ok()
}

fn unwrap_mention<'a>(token: &'a str, opener: &str) -> Option<&'a str> {
    token.strip_prefix(opener)?.strip_suffix('>')
}

/// `<@id>`, `<@!id>` or a bare id.
#[must_use]
pub fn parse_user(token: &str) -> Option<UserId> {
    let body = unwrap_mention(token, "<@!")
        .or_else(|| unwrap_mention(token, "<@").filter(|body| !body.starts_with('&')))
        .unwrap_or(token);
    snowflake(body).map(UserId)
}

/// `<@&id>` or a bare id.
#[must_use]
pub fn parse_role(token: &str) -> Option<RoleId> {
    let body = unwrap_mention(token, "<@&").unwrap_or(token);
    snowflake(body).map(RoleId)
}

/// `<#id>` or a bare id.
#[must_use]
pub fn parse_channel(token: &str) -> Option<ChannelId> {
    let body = unwrap_mention(token, "<#").unwrap_or(token);
    snowflake(body).map(ChannelId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_common::test_utils::property_testing::user_id_strategy;
    use proptest::prelude::*;

    #[test]
    fn test_user_mention_forms() {
        assert_eq!(parse_user("<@42>"), Some(UserId(42)));
        assert_eq!(parse_user("<@!42>"), Some(UserId(42)));
        assert_eq!(parse_user("42"), Some(UserId(42)));
        assert_eq!(parse_user("<@&42>"), None);
        assert_eq!(parse_user("<@42"), None);
        assert_eq!(parse_user("someone"), None);
    }

    #[test]
    fn test_role_and_channel_mentions() {
        assert_eq!(parse_role("<@&7>"), Some(RoleId(7)));
        assert_eq!(parse_role("7"), Some(RoleId(7)));
        assert_eq!(parse_role("<#7>"), None);
        assert_eq!(parse_channel("<#9>"), Some(ChannelId(9)));
        assert_eq!(parse_channel("9"), Some(ChannelId(9)));
        assert_eq!(parse_channel("<@9>"), None);
    }

    #[test]
    fn test_signs_and_empty_bodies_rejected() {
        assert_eq!(parse_user("+5"), None);
        assert_eq!(parse_user("<@>"), None);
        assert_eq!(parse_channel(""), None);
    }

    proptest! {
        #[test]
        fn test_every_user_form_yields_the_same_id(id in user_id_strategy()) {
            prop_assert_eq!(parse_user(&format!("<@{id}>")), Some(id));
            prop_assert_eq!(parse_user(&format!("<@!{id}>")), Some(id));
            prop_assert_eq!(parse_user(&id.to_string()), Some(id));
            prop_assert_eq!(parse_user(&format!("<@&{id}>")), None);
        }
    }
}
