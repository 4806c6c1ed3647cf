//! Help augmentation: the examples section.

use commandeer_core::CommandSchema;

/// Renders the `Examples:` block appended after standard help output.
///
/// Returns `None` when no command declares examples. Commands with an empty
/// example list are skipped entirely, so no sub-header is printed for them.
///
/// # Examples
///
/// ```
/// use commandeer_core::{CommandSchema, CommandSpec};
/// use commandeer_dispatch::help::examples_section;
///
/// let mut schema = CommandSchema::default();
/// schema.commands.insert(
///     "add".into(),
///     CommandSpec::new("Add numbers").with_example("app add 1 2"),
/// );
///
/// let section = examples_section(&schema).unwrap();
/// assert!(section.starts_with("Examples:"));
/// assert!(section.contains("  add:"));
/// assert!(section.contains("    app add 1 2"));
/// ```
pub fn examples_section(schema: &CommandSchema) -> Option<String> {
    if !schema.has_examples() {
        return None;
    }

    let mut out = String::from("Examples:\n");
    for (name, spec) in &schema.commands {
        if spec.examples.is_empty() {
            continue;
        }
        out.push_str(&format!("  {name}:\n"));
        for example in &spec.examples {
            out.push_str(&format!("    {example}\n"));
        }
    }
    Some(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use commandeer_core::CommandSpec;

    use super::*;

    #[test]
    fn test_no_examples_renders_nothing() {
        let mut schema = CommandSchema::default();
        schema.commands.insert("bare".into(), CommandSpec::new("No examples"));
        assert_eq!(examples_section(&schema), None);
    }

    #[test]
    fn test_commands_without_examples_are_skipped() {
        let mut schema = CommandSchema::default();
        schema.commands.insert("bare".into(), CommandSpec::new("No examples"));
        schema.commands.insert(
            "shown".into(),
            CommandSpec::new("With examples")
                .with_example("app shown foo")
                .with_example("app shown bar"),
        );

        let section = examples_section(&schema).unwrap();
        assert!(!section.contains("bare"));
        assert_eq!(
            section,
            "Examples:\n  shown:\n    app shown foo\n    app shown bar"
        );
    }

    #[test]
    fn test_multiple_commands_render_in_schema_order() {
        let mut schema = CommandSchema::default();
        schema.commands.insert(
            "zeta".into(),
            CommandSpec::new("Z").with_example("app zeta"),
        );
        schema.commands.insert(
            "alpha".into(),
            CommandSpec::new("A").with_example("app alpha"),
        );

        let section = examples_section(&schema).unwrap();
        let alpha = section.find("alpha:").unwrap();
        let zeta = section.find("zeta:").unwrap();
        assert!(alpha < zeta);
    }
}
