//! Typed argument schemas and their evaluation against message tokens.
//!
//! A command declares an ordered list of [`ArgumentSpec`]s. [`validate`]
//! walks that list left to right, consuming tokens and coercing each into a
//! [`FlagValue`], and either yields the collected [`Flags`] or a rejection
//! carrying the prompt of the argument that failed.

use crate::context::{Attachment, ChannelInfo, GuildSnapshot, InboundMessage, MemberInfo, RoleInfo};
use crate::duration::parse_duration;
use crate::mention::{parse_channel, parse_role, parse_user};
use herald_common::ChannelKind;
use regex::Regex;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// What an argument accepts, with the constraints relevant to that kind.
#[derive(Debug, Clone)]
pub enum ArgumentKind {
    /// Any single word, optionally restricted to a whitelist or a pattern.
    Freeform {
        /// Accepted words, compared case-insensitively.
        words: Option<Vec<String>>,
        /// Pattern the token must match.
        pattern: Option<Regex>,
    },
    /// A number, optionally truncated and bounded.
    Number {
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
        /// Truncate toward zero before the bounds are checked.
        integer: bool,
    },
    /// A channel of the guild, by mention or id.
    Channel {
        /// Accepted channel kinds; empty accepts any.
        kinds: Vec<ChannelKind>,
    },
    /// A role of the guild, by mention or id.
    Role {
        /// Reject roles managed by an integration.
        exclude_managed: bool,
    },
    /// A mentioned member, or the invoking member when nothing resolves.
    ActorOrMember,
    /// A member of the guild, by mention or id.
    Member {
        /// Reject automated accounts.
        exclude_bots: bool,
        /// Reject the invoking member.
        exclude_self: bool,
    },
    /// The first message attachment with an accepted extension. Consumes no tokens.
    Attachment {
        /// Accepted extensions, with or without the leading dot.
        extensions: Vec<String>,
    },
    /// A duration written over all remaining tokens, e.g. `1h 30m`.
    Duration {
        /// Inclusive lower bound.
        min: Option<Duration>,
        /// Inclusive upper bound.
        max: Option<Duration>,
    },
}

impl ArgumentKind {
    /// Unrestricted freeform text.
    #[must_use]
    pub const fn freeform() -> Self {
        Self::Freeform {
            words: None,
            pattern: None,
        }
    }

    /// An unbounded, untruncated number.
    #[must_use]
    pub const fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
            integer: false,
        }
    }

    /// Whether an argument of this kind may consume more than one token.
    #[must_use]
    pub const fn is_repeatable(&self) -> bool {
        !matches!(self, Self::Attachment { .. } | Self::Duration { .. })
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Freeform { .. } => "freeform",
            Self::Number { .. } => "number",
            Self::Channel { .. } => "channel",
            Self::Role { .. } => "role",
            Self::ActorOrMember => "actor-or-member",
            Self::Member { .. } => "member",
            Self::Attachment { .. } => "attachment",
            Self::Duration { .. } => "duration",
        }
    }
}

/// Reasons an argument declaration cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The result key is empty.
    #[error("argument has an empty id")]
    EmptyId,
    /// `repeat` is zero.
    #[error("argument '{0}' repeats zero times")]
    ZeroRepeat(String),
    /// `repeat` is above one on a kind that cannot repeat.
    #[error("{kind} argument '{id}' cannot repeat")]
    NotRepeatable {
        /// Argument id.
        id: String,
        /// Kind name.
        kind: &'static str,
    },
    /// `min` is above `max`.
    #[error("argument '{0}' has a minimum above its maximum")]
    InvertedBounds(String),
    /// An attachment argument accepts no extension.
    #[error("attachment argument '{0}' accepts no extensions")]
    NoExtensions(String),
    /// A word whitelist is present but empty.
    #[error("freeform argument '{0}' has an empty word list")]
    EmptyWords(String),
}

/// One declared argument of a command.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    /// Key of the coerced value in [`Flags`].
    pub id: String,
    /// Whether validation succeeds when this argument is absent.
    pub optional: bool,
    /// Number of tokens consumed; above one collects a list.
    pub repeat: usize,
    /// Message sent to the user when this argument is missing or invalid.
    pub prompt: Option<String>,
    /// Accepted kind and its constraints.
    pub kind: ArgumentKind,
}

impl ArgumentSpec {
    /// A required, single-token argument without a prompt.
    pub fn new(id: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            id: id.into(),
            optional: false,
            repeat: 1,
            prompt: None,
            kind,
        }
    }

    /// Marks the argument optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets how many tokens the argument consumes.
    #[must_use]
    pub const fn repeat(mut self, times: usize) -> Self {
        self.repeat = times;
        self
    }

    /// Sets the rejection prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Checks that the declaration is usable.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.id.trim().is_empty() {
            return Err(SchemaError::EmptyId);
        }
        if self.repeat == 0 {
            return Err(SchemaError::ZeroRepeat(self.id.clone()));
        }
        if self.repeat > 1 && !self.kind.is_repeatable() {
            return Err(SchemaError::NotRepeatable {
                id: self.id.clone(),
                kind: self.kind.name(),
            });
        }

        match &self.kind {
            ArgumentKind::Freeform {
                words: Some(words), ..
            } if words.is_empty() => Err(SchemaError::EmptyWords(self.id.clone())),
            ArgumentKind::Number {
                min: Some(min),
                max: Some(max),
                ..
            } if min > max => Err(SchemaError::InvertedBounds(self.id.clone())),
            ArgumentKind::Duration {
                min: Some(min),
                max: Some(max),
            } if min > max => Err(SchemaError::InvertedBounds(self.id.clone())),
            ArgumentKind::Attachment { extensions } if extensions.is_empty() => {
                Err(SchemaError::NoExtensions(self.id.clone()))
            }
            _ => Ok(()),
        }
    }

    fn reject(&self, token: Option<&str>) -> Validation {
        debug!(argument = %self.id, token = token.unwrap_or_default(), "Argument rejected");
        Validation::Invalid {
            prompt: self.prompt.clone(),
        }
    }
}

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    /// Freeform text.
    Text(String),
    /// A number, truncated if the argument asked for integers.
    Number(f64),
    /// A resolved channel.
    Channel(ChannelInfo),
    /// A resolved role.
    Role(RoleInfo),
    /// A resolved member.
    Member(MemberInfo),
    /// A matching attachment.
    Attachment(Attachment),
    /// A parsed duration.
    Duration(Duration),
    /// Values of a repeated argument, in token order.
    List(Vec<FlagValue>),
}

/// Coerced arguments keyed by argument id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flags(BTreeMap<String, FlagValue>);

impl Flags {
    /// Value stored under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FlagValue> {
        self.0.get(id)
    }

    /// Whether a value is stored under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Text stored under `id`.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        match self.get(id)? {
            FlagValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Number stored under `id`.
    #[must_use]
    pub fn number(&self, id: &str) -> Option<f64> {
        match self.get(id)? {
            FlagValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Member stored under `id`.
    #[must_use]
    pub fn member(&self, id: &str) -> Option<&MemberInfo> {
        match self.get(id)? {
            FlagValue::Member(member) => Some(member),
            _ => None,
        }
    }

    /// Duration stored under `id`.
    #[must_use]
    pub fn duration(&self, id: &str) -> Option<Duration> {
        match self.get(id)? {
            FlagValue::Duration(duration) => Some(*duration),
            _ => None,
        }
    }

    /// List stored under `id` by a repeated argument.
    #[must_use]
    pub fn list(&self, id: &str) -> Option<&[FlagValue]> {
        match self.get(id)? {
            FlagValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Number of stored arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no argument was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value))
    }

    fn insert(&mut self, id: &str, value: FlagValue) {
        self.0.insert(id.to_string(), value);
    }
}

/// Result of evaluating a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Every evaluated argument was accepted.
    Valid(Flags),
    /// An argument was missing or invalid.
    Invalid {
        /// Prompt of the failing argument, if it declared one.
        prompt: Option<String>,
    },
}

impl Validation {
    /// Whether validation succeeded.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// What the validator may look at besides the tokens.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Message being dispatched, for its attachments.
    pub message: &'a InboundMessage,
    /// Guild the message was sent in.
    pub guild: &'a GuildSnapshot,
    /// Member who sent the message.
    pub actor: &'a MemberInfo,
}

/// Evaluates `schema` against `tokens`.
///
/// Arguments are processed in declared order. A missing optional argument
/// ends evaluation successfully with whatever was collected so far; a missing
/// required argument or an invalid token rejects. Malformed declarations are
/// logged and skipped.
pub fn validate(tokens: &[String], schema: &[ArgumentSpec], ctx: &ValidationContext<'_>) -> Validation {
    let mut flags = Flags::default();
    let mut cursor = 0;

    for spec in schema {
        if let Err(error) = spec.check() {
            warn!(%error, "Skipping malformed argument declaration");
            continue;
        }

        match &spec.kind {
            ArgumentKind::Attachment { extensions } => {
                let found = ctx
                    .message
                    .attachments
                    .iter()
                    .find(|attachment| extensions.iter().any(|ext| attachment.has_extension(ext)));
                match found {
                    Some(attachment) => flags.insert(&spec.id, FlagValue::Attachment(attachment.clone())),
                    None if spec.optional => return Validation::Valid(flags),
                    None => return spec.reject(None),
                }
            }
            ArgumentKind::Duration { min, max } => {
                if cursor >= tokens.len() {
                    return if spec.optional {
                        Validation::Valid(flags)
                    } else {
                        spec.reject(None)
                    };
                }
                let text = tokens[cursor..].join(" ");
                cursor = tokens.len();

                match parse_duration(&text) {
                    Ok(duration)
                        if min.map_or(true, |min| duration >= min)
                            && max.map_or(true, |max| duration <= max) =>
                    {
                        flags.insert(&spec.id, FlagValue::Duration(duration));
                    }
                    _ => return spec.reject(Some(&text)),
                }
            }
            kind => {
                let mut values = Vec::with_capacity(spec.repeat);
                for _ in 0..spec.repeat {
                    let Some(token) = tokens.get(cursor) else {
                        if matches!(kind, ArgumentKind::ActorOrMember) {
                            values.push(FlagValue::Member(ctx.actor.clone()));
                            continue;
                        }
                        if !spec.optional {
                            return spec.reject(None);
                        }
                        if !values.is_empty() {
                            flags.insert(&spec.id, FlagValue::List(values));
                        }
                        return Validation::Valid(flags);
                    };
                    cursor += 1;

                    match resolve_token(kind, token, ctx) {
                        Some(value) => values.push(value),
                        None => return spec.reject(Some(token)),
                    }
                }

                let value = if spec.repeat == 1 {
                    values.pop()
                } else {
                    Some(FlagValue::List(values))
                };
                if let Some(value) = value {
                    flags.insert(&spec.id, value);
                }
            }
        }
    }

    Validation::Valid(flags)
}

fn resolve_token(kind: &ArgumentKind, token: &str, ctx: &ValidationContext<'_>) -> Option<FlagValue> {
    match kind {
        ArgumentKind::Freeform { words, pattern } => {
            if let Some(words) = words {
                if !words.iter().any(|word| word.eq_ignore_ascii_case(token)) {
                    return None;
                }
            }
            if let Some(pattern) = pattern {
                if !pattern.is_match(token) {
                    return None;
                }
            }
            let text = if words.is_some() {
                token.to_lowercase()
            } else {
                token.to_string()
            };
            Some(FlagValue::Text(text))
        }
        ArgumentKind::Number { min, max, integer } => {
            let mut number: f64 = token.parse().ok().filter(|n: &f64| n.is_finite())?;
            if *integer {
                number = number.trunc();
            }
            if min.is_some_and(|min| number < min) || max.is_some_and(|max| number > max) {
                return None;
            }
            Some(FlagValue::Number(number))
        }
        ArgumentKind::Channel { kinds } => {
            let channel = ctx.guild.channel(parse_channel(token)?)?;
            (kinds.is_empty() || kinds.contains(&channel.kind)).then(|| FlagValue::Channel(channel.clone()))
        }
        ArgumentKind::Role { exclude_managed } => {
            let role = ctx.guild.role(parse_role(token)?)?;
            (!(*exclude_managed && role.managed)).then(|| FlagValue::Role(role.clone()))
        }
        ArgumentKind::ActorOrMember => {
            let member = parse_user(token)
                .and_then(|id| ctx.guild.member(id))
                .unwrap_or(ctx.actor);
            Some(FlagValue::Member(member.clone()))
        }
        ArgumentKind::Member {
            exclude_bots,
            exclude_self,
        } => {
            let member = ctx.guild.member(parse_user(token)?)?;
            if (*exclude_bots && member.bot) || (*exclude_self && member.id == ctx.actor.id) {
                return None;
            }
            Some(FlagValue::Member(member.clone()))
        }
        ArgumentKind::Attachment { .. } | ArgumentKind::Duration { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Author, InboundMessage};
    use herald_common::test_utils::discord_fixtures::*;
    use herald_common::test_utils::property_testing::token_strategy;
    use herald_common::{ChannelId, RoleId, UserId};
    use proptest::prelude::*;

    struct Fixture {
        message: InboundMessage,
        guild: GuildSnapshot,
        actor: MemberInfo,
    }

    impl Fixture {
        fn new() -> Self {
            let actor = MemberInfo::new(test_user_id(), "alice");
            let agent = MemberInfo {
                bot: true,
                ..MemberInfo::new(test_agent_id(), "herald")
            };
            let guild = GuildSnapshot::new(test_guild_id(), agent)
                .with_member(actor.clone())
                .with_member(MemberInfo::new(UserId(42), "bob"))
                .with_channel(ChannelInfo {
                    id: test_channel_id(),
                    name: "general".into(),
                    kind: ChannelKind::Text,
                })
                .with_channel(ChannelInfo {
                    id: ChannelId(77),
                    name: "lounge".into(),
                    kind: ChannelKind::Voice,
                })
                .with_role(RoleInfo {
                    id: test_role_id(),
                    name: "mods".into(),
                    position: 3,
                    managed: false,
                })
                .with_role(RoleInfo {
                    id: RoleId(88),
                    name: "herald".into(),
                    position: 5,
                    managed: true,
                });
            let message = InboundMessage::text(
                Author {
                    id: actor.id,
                    name: "alice".into(),
                    bot: false,
                },
                test_guild_id(),
                test_channel_id(),
                "",
            );
            Self { message, guild, actor }
        }

        fn run(&self, input: &str, schema: &[ArgumentSpec]) -> Validation {
            let tokens: Vec<String> = input.split_whitespace().map(String::from).collect();
            let ctx = ValidationContext {
                message: &self.message,
                guild: &self.guild,
                actor: &self.actor,
            };
            validate(&tokens, schema, &ctx)
        }
    }

    fn flags(validation: Validation) -> Flags {
        match validation {
            Validation::Valid(flags) => flags,
            Validation::Invalid { prompt } => panic!("unexpected rejection: {prompt:?}"),
        }
    }

    #[test]
    fn test_number_bounds() {
        let fixture = Fixture::new();
        let schema = [ArgumentSpec::new(
            "n",
            ArgumentKind::Number {
                min: Some(5.0),
                max: Some(10.0),
                integer: false,
            },
        )
        .prompt("pick 5-10")];

        for (input, accepted) in [("3", false), ("5", true), ("10", true), ("11", false), ("abc", false)] {
            assert_eq!(fixture.run(input, &schema).is_valid(), accepted, "input {input}");
        }
        assert_eq!(
            fixture.run("11", &schema),
            Validation::Invalid {
                prompt: Some("pick 5-10".into())
            }
        );
    }

    #[test]
    fn test_number_truncates_before_bounds_and_rejects_non_finite() {
        let fixture = Fixture::new();
        let schema = [ArgumentSpec::new(
            "n",
            ArgumentKind::Number {
                min: None,
                max: Some(10.0),
                integer: true,
            },
        )];

        assert_eq!(flags(fixture.run("10.9", &schema)).number("n"), Some(10.0));
        assert!(!fixture.run("inf", &schema).is_valid());
        assert!(!fixture.run("NaN", &schema).is_valid());
    }

    #[test]
    fn test_duration_bounds_and_parsing() {
        let fixture = Fixture::new();
        let schema = [ArgumentSpec::new(
            "time",
            ArgumentKind::Duration {
                min: Some(Duration::from_millis(1_000)),
                max: None,
            },
        )];

        assert!(!fixture.run("500ms", &schema).is_valid());
        assert_eq!(
            flags(fixture.run("2s", &schema)).duration("time"),
            Some(Duration::from_millis(2_000))
        );
        assert_eq!(
            flags(fixture.run("1h30m", &schema)).duration("time"),
            Some(Duration::from_millis(5_400_000))
        );
        assert_eq!(
            flags(fixture.run("1h 30m", &schema)).duration("time"),
            Some(Duration::from_millis(5_400_000))
        );
        assert!(!fixture.run("1h forever", &schema).is_valid());
        assert!(!fixture.run("1 30m", &schema).is_valid());
    }

    #[test]
    fn test_missing_optional_argument_stops_evaluation() {
        let fixture = Fixture::new();
        let schema = [
            ArgumentSpec::new("a", ArgumentKind::freeform()).optional(),
            ArgumentSpec::new("b", ArgumentKind::freeform()).prompt("need b"),
        ];

        let result = flags(fixture.run("", &schema));
        assert!(!result.contains("b"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_required_argument_rejects_with_prompt() {
        let fixture = Fixture::new();
        let schema = [
            ArgumentSpec::new("a", ArgumentKind::freeform()),
            ArgumentSpec::new("b", ArgumentKind::number()).prompt("need b"),
        ];

        assert_eq!(
            fixture.run("x", &schema),
            Validation::Invalid {
                prompt: Some("need b".into())
            }
        );
    }

    #[test]
    fn test_word_whitelist_is_case_insensitive() {
        let fixture = Fixture::new();
        let schema = [ArgumentSpec::new(
            "mode",
            ArgumentKind::Freeform {
                words: Some(vec!["on".into(), "off".into()]),
                pattern: None,
            },
        )];

        assert_eq!(flags(fixture.run("ON", &schema)).text("mode"), Some("on"));
        assert!(!fixture.run("maybe", &schema).is_valid());
    }

    #[test]
    fn test_repeated_arguments_collect_lists() {
        let fixture = Fixture::new();
        let schema = [ArgumentSpec::new("nums", ArgumentKind::number()).repeat(3).optional()];

        let result = flags(fixture.run("1 2 3", &schema));
        assert_eq!(
            result.list("nums"),
            Some(&[FlagValue::Number(1.0), FlagValue::Number(2.0), FlagValue::Number(3.0)][..])
        );

        let partial = flags(fixture.run("1 2", &schema));
        assert_eq!(partial.list("nums").map(<[FlagValue]>::len), Some(2));

        let required = [ArgumentSpec::new("nums", ArgumentKind::number()).repeat(3)];
        assert!(!fixture.run("1 2", &required).is_valid());
    }

    #[test]
    fn test_member_constraints() {
        let fixture = Fixture::new();
        let schema = [ArgumentSpec::new(
            "target",
            ArgumentKind::Member {
                exclude_bots: true,
                exclude_self: true,
            },
        )];

        assert_eq!(
            flags(fixture.run("<@!42>", &schema)).member("target").map(|m| m.id),
            Some(UserId(42))
        );
        assert!(!fixture.run(&format!("<@{}>", test_user_id()), &schema).is_valid());
        assert!(!fixture.run(&test_agent_id().to_string(), &schema).is_valid());
        assert!(!fixture.run("<@999>", &schema).is_valid());
    }

    #[test]
    fn test_actor_or_member_falls_back_to_actor() {
        let fixture = Fixture::new();
        let schema = [
            ArgumentSpec::new("who", ArgumentKind::ActorOrMember),
            ArgumentSpec::new("rest", ArgumentKind::freeform()).optional(),
        ];

        let mentioned = flags(fixture.run("<@42>", &schema));
        assert_eq!(mentioned.member("who").map(|m| m.id), Some(UserId(42)));

        let unresolved = flags(fixture.run("nobody tail", &schema));
        assert_eq!(unresolved.member("who").map(|m| m.id), Some(test_user_id()));
        assert_eq!(unresolved.text("rest"), Some("tail"));

        let absent = flags(fixture.run("", &schema));
        assert_eq!(absent.member("who").map(|m| m.id), Some(test_user_id()));
    }

    #[test]
    fn test_role_and_channel_filters() {
        let fixture = Fixture::new();
        let role = [ArgumentSpec::new("role", ArgumentKind::Role { exclude_managed: true })];
        assert!(fixture.run(&format!("<@&{}>", test_role_id()), &role).is_valid());
        assert!(!fixture.run("<@&88>", &role).is_valid());

        let channel = [ArgumentSpec::new(
            "channel",
            ArgumentKind::Channel {
                kinds: vec![ChannelKind::Text],
            },
        )];
        assert!(fixture.run(&format!("<#{}>", test_channel_id()), &channel).is_valid());
        assert!(!fixture.run("<#77>", &channel).is_valid());
        assert!(!fixture.run("<#78>", &channel).is_valid());
    }

    #[test]
    fn test_attachment_optional_and_required_differ() {
        let mut fixture = Fixture::new();
        let optional = [
            ArgumentSpec::new("image", ArgumentKind::Attachment {
                extensions: vec!["png".into()],
            })
            .optional(),
            ArgumentSpec::new("after", ArgumentKind::freeform()),
        ];
        let required = [ArgumentSpec::new("image", ArgumentKind::Attachment {
            extensions: vec!["png".into()],
        })
        .prompt("attach a png")];

        let result = flags(fixture.run("", &optional));
        assert!(!result.contains("image"));
        assert_eq!(
            fixture.run("", &required),
            Validation::Invalid {
                prompt: Some("attach a png".into())
            }
        );

        fixture.message.attachments.push(Attachment {
            filename: "notes.txt".into(),
            url: "https://cdn.example/notes.txt".into(),
        });
        fixture.message.attachments.push(Attachment {
            filename: "cat.PNG".into(),
            url: "https://cdn.example/cat.PNG".into(),
        });
        let result = flags(fixture.run("", &required));
        assert!(matches!(result.get("image"), Some(FlagValue::Attachment(a)) if a.filename == "cat.PNG"));
    }

    #[test]
    fn test_malformed_declarations_are_skipped() {
        let fixture = Fixture::new();
        let schema = [
            ArgumentSpec::new("broken", ArgumentKind::Duration { min: None, max: None }).repeat(2),
            ArgumentSpec::new("word", ArgumentKind::freeform()),
        ];

        assert_eq!(
            schema[0].check(),
            Err(SchemaError::NotRepeatable {
                id: "broken".into(),
                kind: "duration"
            })
        );
        assert_eq!(flags(fixture.run("hello", &schema)).text("word"), Some("hello"));
    }

    proptest! {
        #[test]
        fn test_freeform_pattern_accepts_exactly_matching_tokens(
            tokens in prop::collection::vec(token_strategy(), 100)
        ) {
            let pattern = Regex::new(r"^[a-z][a-z0-9]*$").unwrap();
            let fixture = Fixture::new();
            let schema = [ArgumentSpec::new(
                "word",
                ArgumentKind::Freeform { words: None, pattern: Some(pattern.clone()) },
            )];

            for token in &tokens {
                let accepted = fixture.run(token, &schema).is_valid();
                prop_assert_eq!(accepted, pattern.is_match(token));
            }
        }
    }
}
