//! JSON Pointer parsing and pool-key composition (§4.4).

use crate::uri;

/// A parsed `$ref` (or `$id`): whether it is a same-document fragment, the
/// namespace it resolves into, and the pointer path within that namespace's
/// document.
///
/// `path` holds unescaped token strings (`~1`/`~0` already decoded); use
/// [`jsonptr::Pointer::new`] to turn it into a real pointer where needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReference {
    pub is_pointer: bool,
    pub namespace: String,
    pub path: Vec<String>,
}

/// Parses a reference string `r` against base namespace `ns`, per §4.4.
pub fn parse_reference(ns: &str, r: &str) -> ParsedReference {
    if let Some(fragment) = r.strip_prefix('#') {
        return ParsedReference {
            is_pointer: true,
            namespace: ns.to_string(),
            path: fragment_to_tokens(fragment),
        };
    }
    let (base, fragment) = uri::split_fragment(r);
    let namespace = if base.is_empty() {
        ns.to_string()
    } else {
        uri::combine(ns, base)
    };
    match fragment {
        Some(fragment) => ParsedReference {
            is_pointer: true,
            namespace,
            path: fragment_to_tokens(fragment),
        },
        None => ParsedReference {
            is_pointer: false,
            namespace,
            path: Vec::new(),
        },
    }
}

fn fragment_to_tokens(fragment: &str) -> Vec<String> {
    if fragment.is_empty() {
        return Vec::new();
    }
    fragment
        .split('/')
        .skip(1)
        .map(unescape_token)
        .collect()
}

fn unescape_token(raw: &str) -> String {
    raw.replace("~1", "/").replace("~0", "~")
}

fn escape_token(raw: &str) -> String {
    raw.replace('~', "~0").replace('/', "~1")
}

/// Builds the canonical pool key for a parsed reference, per §4.4's
/// `makeKey`.
pub fn make_key(parsed: &ParsedReference) -> String {
    let ns = uri::normalize_ns(&parsed.namespace);
    if parsed.path.is_empty() {
        if parsed.is_pointer && !ns.is_empty() {
            return format!("{ns}#");
        }
        return ns.to_string();
    }
    let path = parsed
        .path
        .iter()
        .map(|t| escape_token(t))
        .collect::<Vec<_>>()
        .join("/");
    format!("{ns}#/{path}")
}

/// Builds a [`jsonptr::Pointer`] from a list of unescaped token strings.
pub fn to_jsonptr(path: &[String]) -> jsonptr::Pointer {
    jsonptr::Pointer::new(path)
}

/// Builds the canonical pool key for a freshly collected `$id` namespace
/// with no pointer path (the root of whatever document that `$id` names).
pub fn make_namespace_key(ns: &str) -> String {
    uri::normalize_ns(ns).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_same_document_fragment() {
        let parsed = parse_reference("root", "#/definitions/node");
        assert!(parsed.is_pointer);
        assert_eq!(parsed.namespace, "root");
        assert_eq!(make_key(&parsed), "root#/definitions/node");
    }

    #[test]
    fn parses_bare_namespace_reference() {
        let parsed = parse_reference("root", "other.json");
        assert!(!parsed.is_pointer);
        assert_eq!(parsed.namespace, "other.json");
        assert_eq!(make_key(&parsed), "other.json");
    }

    #[test]
    fn parses_namespace_with_fragment() {
        let parsed = parse_reference("http://example.com/root.json", "other.json#/a");
        assert_eq!(parsed.namespace, "http://example.com/other.json");
        assert_eq!(make_key(&parsed), "http://example.com/other.json#/a");
    }
}
