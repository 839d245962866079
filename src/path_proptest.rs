//! Property-based tests for URL-to-path mapping.
//!
//! These tests use proptest to generate URLs in every accepted form and
//! verify that the mapping invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{map_url, parse_remote};
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    fn host() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9][a-zA-Z0-9-]{0,10}(\\.[a-zA-Z0-9][a-zA-Z0-9-]{0,10}){0,2}"
    }

    fn segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-zA-Z_][a-zA-Z0-9_.-]{0,12}", 1..5).prop_filter(
            "segments must not be dot-only or end in .git",
            |segs| {
                segs.iter().all(|s| s != "." && s != "..")
                    && !segs.last().is_some_and(|s| s.ends_with(".git"))
            },
        )
    }

    fn expected(root: &Path, host: &str, segments: &[String]) -> PathBuf {
        let mut path = root.join(host);
        for segment in segments {
            path.push(segment);
        }
        path
    }

    proptest! {
        /// Property: mapping the same URL twice gives the same path
        #[test]
        fn map_url_is_deterministic(host in host(), segs in segments()) {
            let url = format!("https://{}/{}.git", host, segs.join("/"));
            let root = Path::new("/r");
            prop_assert_eq!(map_url(&url, root).unwrap(), map_url(&url, root).unwrap());
        }

        /// Property: the trailing .git suffix never changes the result
        #[test]
        fn git_suffix_is_irrelevant(host in host(), segs in segments()) {
            let root = Path::new("/r");
            let plain = format!("https://{}/{}", host, segs.join("/"));
            let suffixed = format!("{}.git", plain);
            prop_assert_eq!(map_url(&plain, root).unwrap(), map_url(&suffixed, root).unwrap());
        }

        /// Property: scp-like URLs map with or without an ssh:// prefix
        #[test]
        fn ssh_prefix_is_irrelevant(host in host(), segs in segments(), user in "[a-z]{1,8}") {
            let root = Path::new("/r");
            let bare = format!("{}@{}:{}.git", user, host, segs.join("/"));
            let prefixed = format!("ssh://{}", bare);
            prop_assert_eq!(map_url(&bare, root).unwrap(), map_url(&prefixed, root).unwrap());
        }

        /// Property: scheme form and scp form agree on the location
        #[test]
        fn forms_agree(host in host(), segs in segments()) {
            let root = Path::new("/r");
            let https = format!("https://{}/{}.git", host, segs.join("/"));
            let scp = format!("git@{}:{}.git", host, segs.join("/"));
            let want = expected(root, &host, &segs);
            prop_assert_eq!(map_url(&https, root).unwrap(), want.clone());
            prop_assert_eq!(map_url(&scp, root).unwrap(), want);
        }

        /// Property: mapped paths always stay below the root
        #[test]
        fn mapped_path_is_under_root(host in host(), segs in segments()) {
            let root = Path::new("/some/root");
            let url = format!("ssh://git@{}:22/{}", host, segs.join("/"));
            let mapped = map_url(&url, root).unwrap();
            prop_assert!(mapped.starts_with(root));
            prop_assert_eq!(mapped.components().count(), root.components().count() + 1 + segs.len());
        }

        /// Property: whatever is accepted folds to a path strictly below the root
        #[test]
        fn accepted_url_never_escapes_root(
            host in "(\\.{1,2}|[a-z]{1,6})",
            segs in prop::collection::vec("(\\.{1,2}|[a-z]{1,6})", 1..4),
            scp in any::<bool>(),
        ) {
            let root = Path::new("/some/root");
            let url = if scp {
                format!("git@{}:{}.git", host, segs.join("/"))
            } else {
                format!("https://{}/{}.git", host, segs.join("/"))
            };
            if let Ok(mapped) = map_url(&url, root) {
                let folded = crate::filesystem::lexical_absolute(&mapped).unwrap();
                prop_assert!(folded.starts_with(root));
                prop_assert_ne!(folded.as_path(), root);
            }
        }

        /// Property: the parser never panics on arbitrary input
        #[test]
        fn parse_remote_never_panics(input in ".*") {
            let _ = parse_remote(&input);
        }
    }
}
