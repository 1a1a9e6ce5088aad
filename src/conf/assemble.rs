//! Deterministic configuration assembly
//!
//! Fragments live in a `BTreeMap` keyed by master name, so the assembled file
//! is byte-identical for a given spec set no matter the order fragments were
//! produced or inserted.

use std::collections::BTreeMap;

use super::render::Fragment;

/// Banner written at the top of every managed file. Static on purpose: a
/// timestamp here would defeat the content diff.
pub const DEFAULT_HEADER: &str = "\
# sentinel.conf managed by sentinel-config-manager
# Local edits will be overwritten on the next reconciliation.
";

pub fn fragment_set(fragments: impl IntoIterator<Item = Fragment>) -> BTreeMap<String, Fragment> {
    fragments
        .into_iter()
        .map(|fragment| (fragment.name.clone(), fragment))
        .collect()
}

/// Concatenates header and fragments in ascending name order, one blank line
/// between blocks.
pub fn assemble(header: &str, fragments: &BTreeMap<String, Fragment>) -> String {
    let mut content = String::from(header);
    if !content.ends_with('\n') {
        content.push('\n');
    }

    for fragment in fragments.values() {
        content.push('\n');
        content.push_str(&fragment.content);
    }

    content
}

/// True when the assembled content differs from what is currently persisted.
/// An absent previous file always counts as changed.
pub fn content_changed(previous: Option<&str>, next: &str) -> bool {
    previous != Some(next)
}

#[cfg(test)]
mod tests {
    use super::{assemble, content_changed, fragment_set, DEFAULT_HEADER};
    use crate::conf::render::Fragment;

    fn fragment(name: &str) -> Fragment {
        Fragment {
            name: name.to_string(),
            content: format!("sentinel monitor {name} 127.0.0.1 6379 2\n"),
        }
    }

    #[test]
    fn orders_fragments_by_name_not_insertion() {
        let forward = fragment_set([fragment("alpha"), fragment("beta"), fragment("gamma")]);
        let shuffled = fragment_set([fragment("gamma"), fragment("alpha"), fragment("beta")]);

        let assembled = assemble(DEFAULT_HEADER, &forward);
        assert_eq!(assembled, assemble(DEFAULT_HEADER, &shuffled));

        let alpha = assembled.find("monitor alpha").expect("alpha present");
        let beta = assembled.find("monitor beta").expect("beta present");
        let gamma = assembled.find("monitor gamma").expect("gamma present");
        assert!(alpha < beta && beta < gamma);
    }

    #[test]
    fn separates_blocks_with_one_blank_line() {
        let assembled = assemble("# header\n", &fragment_set([fragment("a"), fragment("b")]));
        assert_eq!(
            assembled,
            "# header\n\nsentinel monitor a 127.0.0.1 6379 2\n\nsentinel monitor b 127.0.0.1 6379 2\n"
        );
    }

    #[test]
    fn header_without_trailing_newline_gets_one() {
        let assembled = assemble("# header", &fragment_set([fragment("a")]));
        assert!(assembled.starts_with("# header\n\nsentinel monitor a"));
    }

    #[test]
    fn empty_set_assembles_to_header_only() {
        let assembled = assemble(DEFAULT_HEADER, &fragment_set([]));
        assert_eq!(assembled, DEFAULT_HEADER);
    }

    #[test]
    fn diff_detects_change_and_absence() {
        assert!(content_changed(None, "x"));
        assert!(content_changed(Some("x"), "y"));
        assert!(!content_changed(Some("x"), "x"));
    }
}
