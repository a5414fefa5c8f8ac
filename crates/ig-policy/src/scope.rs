// scope.rs — Glob-based scope matching for intent owned_scope patterns.
//
// Standard shell-glob semantics: `*` and `?` stay within one path
// component, `**` crosses directories, `[...]` is a character class.
// Leading dots are matched like any other character, so `src/**` covers
// `src/.env`. Invalid patterns never match (fail-closed).
//
// `glob::Pattern` compares raw strings, so with leading dots allowed a `**`
// would happily consume `..` components: `src/**` would match
// `src/../Cargo.toml`, which resolves outside `src/` once joined to the
// workspace root. Paths are therefore checked before matching. Anything
// absolute, or carrying a `.` or `..` component after the optional leading
// `./`, is out of every scope.

use std::path::Path;

use glob::{MatchOptions, Pattern};

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// Check a single glob pattern against a workspace-relative path.
pub fn matches_scope(pattern: &str, path: &str) -> bool {
    let Some(path) = normalize(path) else {
        return false;
    };
    match Pattern::new(pattern) {
        Ok(p) => p.matches_with(path, match_options()),
        Err(_) => false,
    }
}

/// True iff `path` matches at least one of `patterns`.
pub fn path_in_scope<S: AsRef<str>>(patterns: &[S], path: &str) -> bool {
    patterns.iter().any(|p| matches_scope(p.as_ref(), path))
}

/// The workspace-relative form of an agent-supplied path, or `None` when
/// the path could resolve outside the workspace.
///
/// A single leading `./` is dropped so `./src/a.ts` compares like
/// `src/a.ts`. Any remaining `.` or `..` component is refused rather than
/// resolved, since resolving `..` lexically would disagree with the
/// filesystem whenever a symlink sits in between.
fn normalize(path: &str) -> Option<&str> {
    let relative = path.strip_prefix("./").unwrap_or(path);
    if relative.starts_with(['/', '\\']) || Path::new(relative).is_absolute() {
        return None;
    }
    let dotted = relative
        .split(['/', '\\'])
        .any(|component| component == "." || component == "..");
    (!dotted).then_some(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_star_matches_nested_paths() {
        assert!(matches_scope("src/**", "src/a.ts"));
        assert!(matches_scope("src/**", "src/deeply/nested/file.ts"));
        assert!(!matches_scope("src/**", "docs/readme.md"));
    }

    #[test]
    fn single_star_stays_in_one_component() {
        assert!(matches_scope("src/*.ts", "src/a.ts"));
        assert!(!matches_scope("src/*.ts", "src/sub/a.ts"));
    }

    #[test]
    fn question_mark_and_character_classes() {
        assert!(matches_scope("src/?.ts", "src/a.ts"));
        assert!(!matches_scope("src/?.ts", "src/ab.ts"));
        assert!(matches_scope("src/[ab].ts", "src/b.ts"));
        assert!(!matches_scope("src/[ab].ts", "src/c.ts"));
    }

    #[test]
    fn dotfiles_are_matched() {
        assert!(matches_scope("src/**", "src/.env"));
        assert!(matches_scope("*", ".gitignore"));
        assert!(matches_scope("config/*", "config/.hidden"));
    }

    #[test]
    fn leading_dot_slash_is_ignored() {
        assert!(matches_scope("src/**", "./src/a.ts"));
    }

    #[test]
    fn parent_components_never_match() {
        assert!(!matches_scope("src/**", "src/../Cargo.toml"));
        assert!(!matches_scope("src/**", "src/../../etc/passwd"));
        assert!(!matches_scope("src/**", "./src/../Cargo.toml"));
        assert!(!matches_scope("**", "../outside.txt"));
        assert!(!matches_scope("src/*", "src/.."));
    }

    #[test]
    fn inner_dot_components_never_match() {
        assert!(!matches_scope("src/**", "src/./a.ts"));
        assert!(!matches_scope("src/**", "././src/a.ts"));
    }

    #[test]
    fn absolute_paths_never_match() {
        assert!(!matches_scope("**", "/etc/passwd"));
        assert!(!matches_scope("src/**", "/src/a.ts"));
    }

    #[test]
    fn dotted_names_are_not_dot_components() {
        assert!(matches_scope("src/**", "src/..hidden"));
        assert!(matches_scope("src/**", "src/a..b.ts"));
    }

    #[test]
    fn invalid_pattern_never_matches() {
        assert!(!matches_scope("[invalid", "src/a.ts"));
    }

    #[test]
    fn any_pattern_suffices() {
        let patterns = vec!["docs/**".to_string(), "src/**".to_string()];
        assert!(path_in_scope(&patterns, "src/a.ts"));
        assert!(path_in_scope(&patterns, "docs/readme.md"));
        assert!(!path_in_scope(&patterns, "Cargo.toml"));
        let empty: Vec<String> = Vec::new();
        assert!(!path_in_scope(&empty, "src/a.ts"));
    }
}
