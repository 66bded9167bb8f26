//! Properties of the change relevance filter

use std::path::PathBuf;

use appix::domain::policies::{is_builtin_ignored, EventFilter};
use proptest::prelude::*;

fn plain_segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}(\\.(js|json|css|html))?"
}

proptest! {
    #[test]
    fn plain_source_paths_are_relevant(segments in prop::collection::vec(plain_segment(), 1..5)) {
        prop_assume!(segments.iter().all(|s| !matches!(
            s.as_str(),
            "dist" | "build" | "target" | "node_modules" | "_darcs"
        )));
        let path: PathBuf = segments.iter().collect();
        prop_assert!(!EventFilter::builtin().should_ignore(&path));
    }

    #[test]
    fn anything_under_git_is_ignored(segments in prop::collection::vec(plain_segment(), 0..4)) {
        let mut path = PathBuf::from(".git");
        path.extend(segments.iter());
        prop_assert!(is_builtin_ignored(&path));
    }

    #[test]
    fn swap_files_are_ignored_at_any_depth(
        dirs in prop::collection::vec(plain_segment(), 0..4),
        name in "[a-z]{1,8}",
    ) {
        let mut path: PathBuf = dirs.iter().collect();
        path.push(format!(".{name}.swp"));
        prop_assert!(is_builtin_ignored(&path));
    }

    #[test]
    fn filter_never_panics(path in "\\PC{0,64}") {
        let _ = EventFilter::builtin().should_ignore(std::path::Path::new(&path));
    }
}
