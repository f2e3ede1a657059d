//! Option normalization.
//!
//! The last step before handoff. Path options and filters are rewritten to
//! canonical form, empty path options are dropped, and coverage pattern
//! lists are made uniform. Nothing else is touched, and running it twice
//! gives the same result as running it once.

use log::debug;

use crate::dispatch::Invocation;
use crate::options::{CliOptions, CoverageOptions, OneOrMany};

/// Normalizes an invocation's filters and options.
pub fn normalize_invocation(mut invocation: Invocation) -> Invocation {
    invocation.filters = normalize_filters(invocation.filters);
    normalize_options(&mut invocation.options);
    invocation
}

/// Rewrites every filter to canonical path form, keeping order.
pub fn normalize_filters(filters: Vec<String>) -> Vec<String> {
    filters.iter().map(|f| normalize_path(f)).collect()
}

/// Normalizes `root`, `config`, `dir` and the coverage pattern lists.
pub fn normalize_options(options: &mut CliOptions) {
    for (name, slot) in [
        ("root", &mut options.root),
        ("config", &mut options.config),
        ("dir", &mut options.dir),
    ] {
        *slot = slot
            .take()
            .filter(|path| !path.is_empty())
            .map(|path| normalize_path(&path));
        if let Some(path) = slot {
            debug!("normalized {name} = {path}");
        }
    }

    if let Some(coverage) = options.coverage.as_mut() {
        normalize_coverage(coverage);
    }
}

fn normalize_coverage(coverage: &mut CoverageOptions) {
    for list in [
        &mut coverage.include,
        &mut coverage.exclude,
        &mut coverage.ignore_class_methods,
    ] {
        *list = list.take().map(OneOrMany::into_many);
    }
}

/// Lexically normalizes a path, using `/` as the separator.
///
/// - backslashes become `/` and repeated separators collapse
/// - `.` segments are dropped
/// - `..` removes the previous segment; leading `..` are kept for relative
///   paths and dropped at the root of absolute ones
/// - a trailing separator is kept
/// - a Windows drive letter is upper-cased
/// - the empty path becomes `.`
///
/// The file system is never consulted.
///
/// ```
/// use trial_dispatch::normalize_path;
///
/// assert_eq!(normalize_path("./src//utils/../index.ts"), "src/index.ts");
/// assert_eq!(normalize_path("c:\\work\\app\\"), "C:/work/app/");
/// assert_eq!(normalize_path("../../a"), "../../a");
/// assert_eq!(normalize_path(""), ".");
/// ```
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let path = path.replace('\\', "/");
    let (drive, rest) = split_drive(&path);
    let absolute = rest.starts_with('/');
    let trailing = rest.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut out = drive;
    if absolute {
        out.push('/');
    }
    if segments.is_empty() {
        if absolute {
            return out;
        }
        if !out.is_empty() {
            out.push('/');
            return out;
        }
        return if trailing { "./" } else { "." }.to_string();
    }

    out.push_str(&segments.join("/"));
    if trailing {
        out.push('/');
    }
    out
}

/// Splits a leading `X:` drive prefix off, upper-casing the letter.
fn split_drive(path: &str) -> (String, &str) {
    let bytes = path.as_bytes();
    let is_drive = bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes.get(2), None | Some(b'/'));
    if is_drive {
        let drive = format!("{}:", (bytes[0] as char).to_ascii_uppercase());
        (drive, &path[2..])
    } else {
        (String::new(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RunMode;

    #[test]
    fn paths_relative() {
        assert_eq!(normalize_path("src"), "src");
        assert_eq!(normalize_path("./src"), "src");
        assert_eq!(normalize_path("src/./a/../b"), "src/b");
        assert_eq!(normalize_path("a//b///c"), "a/b/c");
        assert_eq!(normalize_path("a/../.."), "..");
        assert_eq!(normalize_path("../a/../../b"), "../../b");
    }

    #[test]
    fn paths_absolute() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/a/b/../c"), "/a/c");
        assert_eq!(normalize_path("/../a"), "/a");
        assert_eq!(normalize_path("//a"), "/a");
    }

    #[test]
    fn paths_trailing_separator() {
        assert_eq!(normalize_path("src/"), "src/");
        assert_eq!(normalize_path("./"), "./");
        assert_eq!(normalize_path("."), ".");
        assert_eq!(normalize_path("a/.."), ".");
    }

    #[test]
    fn paths_windows() {
        assert_eq!(normalize_path("C:\\Users\\me\\proj"), "C:/Users/me/proj");
        assert_eq!(normalize_path("d:/a/../b"), "D:/b");
        assert_eq!(normalize_path("c:"), "C:/");
        assert_eq!(normalize_path("c:\\"), "C:/");
        assert_eq!(normalize_path("a:b"), "a:b");
    }

    #[test]
    fn filters_are_canonicalized_in_order() {
        let filters = vec!["./b.test.ts".to_string(), "a\\c".to_string(), "basic".to_string()];
        assert_eq!(normalize_filters(filters), vec!["b.test.ts", "a/c", "basic"]);
    }

    #[test]
    fn absent_paths_stay_absent() {
        let mut options = CliOptions::default();
        normalize_options(&mut options);
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn empty_paths_are_removed() {
        let mut options = CliOptions {
            root: Some(String::new()),
            config: Some(String::new()),
            ..CliOptions::default()
        };
        normalize_options(&mut options);
        assert_eq!(options.root, None);
        assert_eq!(options.config, None);
    }

    #[test]
    fn present_paths_are_rewritten() {
        let mut options = CliOptions {
            root: Some("./packages/core/".into()),
            config: Some("configs\\trial.config.ts".into()),
            dir: Some("src/../tests".into()),
            ..CliOptions::default()
        };
        normalize_options(&mut options);
        assert_eq!(options.root.as_deref(), Some("packages/core/"));
        assert_eq!(options.config.as_deref(), Some("configs/trial.config.ts"));
        assert_eq!(options.dir.as_deref(), Some("tests"));
    }

    #[test]
    fn coverage_scalars_become_lists() {
        let mut options = CliOptions {
            coverage: Some(CoverageOptions {
                exclude: Some("dist".into()),
                include: Some(vec!["src".to_string(), "lib".to_string()].into()),
                ignore_class_methods: Some("render".into()),
                ..CoverageOptions::default()
            }),
            ..CliOptions::default()
        };
        normalize_options(&mut options);
        let coverage = options.coverage.unwrap();
        assert_eq!(coverage.exclude, Some(OneOrMany::Many(vec!["dist".into()])));
        assert_eq!(
            coverage.include,
            Some(OneOrMany::Many(vec!["src".into(), "lib".into()]))
        );
        assert_eq!(
            coverage.ignore_class_methods,
            Some(OneOrMany::Many(vec!["render".into()]))
        );
    }

    #[test]
    fn other_options_untouched() {
        let mut options = CliOptions {
            watch: Some(true),
            related: Some(vec!["./src/a.ts".into()]),
            ..CliOptions::default()
        };
        let before = options.clone();
        normalize_options(&mut options);
        assert_eq!(options, before);
    }

    #[test]
    fn invocation_normalization() {
        let invocation = Invocation {
            mode: RunMode::Test,
            filters: vec!["./foo".into()],
            options: CliOptions {
                dir: Some("./tests".into()),
                ..CliOptions::default()
            },
        };
        let normalized = normalize_invocation(invocation);
        assert_eq!(normalized.filters, vec!["foo"]);
        assert_eq!(normalized.options.dir.as_deref(), Some("tests"));
    }
}
