// Shared prompt-building utilities.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Fills `{name}` placeholders in a single pass.
///
/// Substituted values are never re-scanned, so user-supplied text that happens
/// to contain `{cv_text}` or `{language}` is embedded verbatim. Unknown
/// placeholders and unmatched braces are kept as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_known_placeholders() {
        let out = fill_template("Hello {name}, write in {language}.", &[
            ("name", "Ada"),
            ("language", "Norwegian"),
        ]);
        assert_eq!(out, "Hello Ada, write in Norwegian.");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = fill_template("{job}|{cv}", &[("job", "{cv}"), ("cv", "resume")]);
        assert_eq!(out, "{cv}|resume");
    }

    #[test]
    fn test_unknown_and_unbalanced_braces_survive() {
        let out = fill_template("{unknown} { {x", &[("x", "y")]);
        assert_eq!(out, "{unknown} { {x");
    }

    #[test]
    fn test_repeated_placeholder() {
        let out = fill_template("{a}{a}", &[("a", "1")]);
        assert_eq!(out, "11");
    }
}
