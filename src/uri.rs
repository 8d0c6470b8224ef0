//! Base-URI composition for `$id`, simplified from the full URI-reference
//! resolution algorithm (RFC 3986 §5) down to what `$id` composition
//! actually needs: a namespace is either a proper URI, or an opaque name the
//! caller assigned the root document (no scheme at all), and children only
//! ever combine with `$id` values that are themselves URIs or plain
//! relative paths.

use url::Url;

/// A fallback base used to make opaque namespaces parseable as [`Url`]
/// without claiming any real scheme exists.
const OPAQUE_BASE: &str = "opaque:///";

/// Combines the current namespace `ns` with a nested `$id` value `id`,
/// returning the new namespace children should resolve against.
///
/// Mirrors `Url::join`'s relative-reference resolution when `ns` parses as a
/// URL; falls back to simple path-joining for opaque namespaces assigned by
/// the caller (e.g. `"root"`), so a document with no real URIs at all can
/// still nest `$id`s consistently.
pub fn combine(ns: &str, id: &str) -> String {
    if let Ok(parsed_ns) = Url::parse(ns) {
        if let Ok(joined) = parsed_ns.join(id) {
            return joined.to_string();
        }
    }
    if let Ok(parsed_id) = Url::parse(id) {
        return parsed_id.to_string();
    }
    // opaque namespace: join paths textually, the way a fragment-free
    // `$id` composes against a caller-assigned document name.
    if id.is_empty() {
        return ns.to_string();
    }
    if id.starts_with('/') {
        return id.to_string();
    }
    match ns.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{id}"),
        None => id.to_string(),
    }
}

/// Splits a `$ref`/`$id` string into its non-fragment base and fragment
/// parts, the way draft-6 `$ref` resolution needs: `"a#/b/c"` becomes
/// `("a", Some("/b/c"))`, `"#/b"` becomes `("", Some("/b"))`, and `"a"`
/// becomes `("a", None)`.
pub fn split_fragment(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once('#') {
        Some((base, frag)) => (base, Some(frag)),
        None => (reference, None),
    }
}

/// Normalizes an opaque or URI namespace for use as a pool key, so that
/// `"http://x/schema#"` and `"http://x/schema"` index the same entry.
pub fn normalize_ns(ns: &str) -> &str {
    ns.strip_suffix('#').unwrap_or(ns)
}

pub fn is_probably_uri(value: &str) -> bool {
    Url::parse(value).is_ok() || value.starts_with("urn:")
}

#[allow(dead_code)]
fn opaque(name: &str) -> String {
    format!("{OPAQUE_BASE}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_absolute_and_relative_ids() {
        assert_eq!(
            combine("http://example.com/root.json", "other.json"),
            "http://example.com/other.json"
        );
        assert_eq!(
            combine("http://example.com/root.json", "http://other.com/x.json"),
            "http://other.com/x.json"
        );
    }

    #[test]
    fn combines_opaque_namespaces() {
        assert_eq!(combine("root", "child"), "child");
        assert_eq!(combine("root/sub", "child"), "root/child");
    }

    #[test]
    fn splits_fragment() {
        assert_eq!(split_fragment("a#/b/c"), ("a", Some("/b/c")));
        assert_eq!(split_fragment("#/b"), ("", Some("/b")));
        assert_eq!(split_fragment("a"), ("a", None));
    }
}
