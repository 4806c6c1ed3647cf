//! Schema type definitions for declarative command wiring.
//!
//! These types model the command file a client ships alongside its binary:
//! global options, named subcommands, each subcommand's positional arguments
//! and options, and display examples. They are designed for serialization
//! with [`serde`] and round-trip through JSON and YAML.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static VALUE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^<>]+)>").expect("static regex must compile"));

/// Declarative description of a program's subcommands and options.
///
/// This is the primary type of the crate: the read-only input to the
/// dispatch engine. Command names are unique by construction (map keys) and
/// the schema is never mutated once parsing begins.
///
/// # Examples
///
/// ```
/// use commandeer_core::*;
///
/// let mut schema = CommandSchema::default();
/// schema.options.push(OptionSpec::new("-v, --verbose", "Log extra detail"));
/// schema.commands.insert(
///     "deploy".into(),
///     CommandSpec::new("Deploy a target")
///         .with_arg(ArgSpec::required("target").with_rule("required"))
///         .with_option(OptionSpec::new("-e, --env <envName>", "Target environment")),
/// );
///
/// assert!(schema.command("deploy").is_some());
/// assert_eq!(schema.command_names(), vec!["deploy"]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandSchema {
    /// Options available on every invocation.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
    /// Subcommands keyed by name.
    #[serde(default)]
    pub commands: BTreeMap<String, CommandSpec>,
}

impl CommandSchema {
    /// Looks up a command by name.
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// All command names in iteration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// `true` when at least one command declares a non-empty example list.
    pub fn has_examples(&self) -> bool {
        self.commands.values().any(|spec| !spec.examples.is_empty())
    }
}

/// A single subcommand: description, positional arguments, options, and
/// display examples.
///
/// Argument order is significant; it defines positional binding. Handlers
/// are not serialized: they are bound at runtime by the dispatch layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Display description shown in help output.
    #[serde(default)]
    pub desc: String,
    /// Positional arguments in binding order.
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    /// Options specific to this command.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
    /// Invocation examples appended to help output.
    #[serde(default)]
    pub examples: Vec<String>,
}

impl CommandSpec {
    /// Creates a command spec with the given description.
    pub fn new(desc: &str) -> Self {
        Self {
            desc: desc.to_string(),
            ..Default::default()
        }
    }

    /// Adds a positional argument.
    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Adds an option.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a display example.
    pub fn with_example(mut self, example: &str) -> Self {
        self.examples.push(example.to_string());
        self
    }

    /// Declared arguments with `optional == false`, in order.
    pub fn mandatory_args(&self) -> impl Iterator<Item = &ArgSpec> {
        self.args.iter().filter(|arg| !arg.optional)
    }

    /// Usage rendering of the declared arguments: `<name>` for mandatory,
    /// `[name]` for optional, space-joined in declared order.
    ///
    /// # Examples
    ///
    /// ```
    /// use commandeer_core::{ArgSpec, CommandSpec};
    ///
    /// let spec = CommandSpec::new("copy")
    ///     .with_arg(ArgSpec::required("source"))
    ///     .with_arg(ArgSpec::optional("dest"));
    /// assert_eq!(spec.usage(), "<source> [dest]");
    /// ```
    pub fn usage(&self) -> String {
        self.args
            .iter()
            .map(|arg| {
                if arg.optional {
                    format!("[{}]", arg.name)
                } else {
                    format!("<{}>", arg.name)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A positional argument: display name, optionality, and validation rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgSpec {
    /// Display name used in usage strings and error messages.
    pub name: String,
    /// Optional arguments are rendered as `[name]` and never rule-checked.
    #[serde(default)]
    pub optional: bool,
    /// Rule names applied in order; the first failure wins.
    #[serde(default)]
    pub rules: Vec<String>,
}

impl ArgSpec {
    /// Creates a mandatory argument.
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Creates an optional argument.
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: true,
            rules: Vec::new(),
        }
    }

    /// Appends a validation rule.
    pub fn with_rule(mut self, rule: &str) -> Self {
        self.rules.push(rule.to_string());
        self
    }
}

/// An option described by a flag descriptor string.
///
/// The descriptor encodes short and long forms plus an optional
/// `<valueName>` placeholder, e.g. `-s, --some-arg <someArg>`. The embedded
/// value name doubles as the key under which the parsed value is read back.
///
/// # Examples
///
/// ```
/// use commandeer_core::OptionSpec;
///
/// let opt = OptionSpec::new("-s, --some-arg <someArg>", "Some argument");
/// assert_eq!(opt.short(), Some('s'));
/// assert_eq!(opt.long(), Some("some-arg"));
/// assert_eq!(opt.value_name(), Some("someArg"));
/// assert!(opt.takes_value());
///
/// let flag = OptionSpec::new("-q, --quiet", "Suppress output");
/// assert!(!flag.takes_value());
/// assert_eq!(flag.canonical_id(), Some("quiet".to_string()));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Flag descriptor, e.g. `-s, --some-arg <someArg>`.
    pub arg: String,
    /// Display description shown in help output.
    #[serde(default)]
    pub desc: String,
    /// Rule names applied to the option's value; empty means the value is
    /// never checked.
    #[serde(default)]
    pub rules: Vec<String>,
}

impl OptionSpec {
    /// Creates an option from a flag descriptor and description.
    pub fn new(arg: &str, desc: &str) -> Self {
        Self {
            arg: arg.to_string(),
            desc: desc.to_string(),
            rules: Vec::new(),
        }
    }

    /// Appends a validation rule.
    pub fn with_rule(mut self, rule: &str) -> Self {
        self.rules.push(rule.to_string());
        self
    }

    /// Short flag letter, if the descriptor declares one.
    pub fn short(&self) -> Option<char> {
        self.tokens()
            .find(|token| token.starts_with('-') && !token.starts_with("--") && token.len() == 2)
            .and_then(|token| token.chars().nth(1))
    }

    /// Long flag name without the leading dashes, if declared.
    pub fn long(&self) -> Option<&str> {
        self.tokens()
            .find(|token| token.starts_with("--") && token.len() > 2)
            .map(|token| &token[2..])
    }

    /// The `<valueName>` token embedded in the descriptor, without brackets.
    pub fn value_name(&self) -> Option<&str> {
        VALUE_TOKEN_RE
            .captures(&self.arg)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }

    /// `true` when the descriptor declares a value placeholder.
    pub fn takes_value(&self) -> bool {
        self.value_name().is_some()
    }

    /// Canonical name (long form preferred, short as fallback), without
    /// dashes. Used to key boolean switches.
    pub fn canonical_id(&self) -> Option<String> {
        self.long()
            .map(str::to_string)
            .or_else(|| self.short().map(|c| c.to_string()))
    }

    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.arg
            .split([' ', ','])
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_spec_accessors() {
        let opt = OptionSpec::new("-s, --some-arg <someArg>", "Some argument");
        assert_eq!(opt.short(), Some('s'));
        assert_eq!(opt.long(), Some("some-arg"));
        assert_eq!(opt.value_name(), Some("someArg"));
        assert!(opt.takes_value());
        assert_eq!(opt.canonical_id(), Some("some-arg".to_string()));
    }

    #[test]
    fn test_option_spec_switch_has_no_value() {
        let opt = OptionSpec::new("-q, --quiet", "Suppress output");
        assert_eq!(opt.short(), Some('q'));
        assert_eq!(opt.long(), Some("quiet"));
        assert_eq!(opt.value_name(), None);
        assert!(!opt.takes_value());
    }

    #[test]
    fn test_option_spec_long_only() {
        let opt = OptionSpec::new("--dry-run", "Do not apply changes");
        assert_eq!(opt.short(), None);
        assert_eq!(opt.long(), Some("dry-run"));
        assert_eq!(opt.canonical_id(), Some("dry-run".to_string()));
    }

    #[test]
    fn test_option_spec_short_only() {
        let opt = OptionSpec::new("-n <count>", "How many");
        assert_eq!(opt.short(), Some('n'));
        assert_eq!(opt.long(), None);
        assert_eq!(opt.canonical_id(), Some("n".to_string()));
        assert_eq!(opt.value_name(), Some("count"));
    }

    #[test]
    fn test_command_spec_usage_rendering() {
        let spec = CommandSpec::new("somecommand")
            .with_arg(ArgSpec::required("arg1").with_rule("number"))
            .with_arg(ArgSpec::required("arg2").with_rule("number"))
            .with_arg(ArgSpec::optional("arg3"));
        assert_eq!(spec.usage(), "<arg1> <arg2> [arg3]");
        assert_eq!(spec.mandatory_args().count(), 2);
    }

    #[test]
    fn test_schema_deserializes_wire_shape() {
        let raw = r#"{
            "options": [
                { "arg": "-g, --global <val>", "desc": "A global", "rules": ["required"] }
            ],
            "commands": {
                "somecommand": {
                    "desc": "Does something",
                    "args": [
                        { "name": "arg1", "rules": ["number"] },
                        { "name": "arg3", "optional": true }
                    ],
                    "options": [
                        { "arg": "-s, --some <someArg>", "desc": "Some option" }
                    ],
                    "examples": ["app somecommand 1"]
                }
            }
        }"#;

        let schema: CommandSchema = serde_json::from_str(raw).unwrap();
        assert_eq!(schema.options.len(), 1);
        assert_eq!(schema.options[0].rules, vec!["required"]);

        let spec = schema.command("somecommand").unwrap();
        assert_eq!(spec.desc, "Does something");
        assert_eq!(spec.args.len(), 2);
        assert!(!spec.args[0].optional);
        assert!(spec.args[1].optional);
        assert!(spec.args[1].rules.is_empty());
        assert_eq!(spec.options[0].value_name(), Some("someArg"));
        assert_eq!(spec.examples, vec!["app somecommand 1"]);
    }

    #[test]
    fn test_schema_defaults_are_empty() {
        let schema: CommandSchema = serde_json::from_str(r#"{"commands": {"x": {}}}"#).unwrap();
        assert!(schema.options.is_empty());
        let spec = schema.command("x").unwrap();
        assert!(spec.args.is_empty());
        assert!(spec.options.is_empty());
        assert!(spec.examples.is_empty());
        assert!(spec.desc.is_empty());
    }

    #[test]
    fn test_has_examples() {
        let mut schema = CommandSchema::default();
        schema
            .commands
            .insert("bare".into(), CommandSpec::new("No examples"));
        assert!(!schema.has_examples());

        schema.commands.insert(
            "shown".into(),
            CommandSpec::new("With examples").with_example("app shown"),
        );
        assert!(schema.has_examples());
    }
}
