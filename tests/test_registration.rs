//! Directory registration: normalization, deduplication and recursive expansion.

use std::fs;

use autoload::{AutoloadConfig, AutoloadError, Resolver, SourceStore};
use rstest::rstest;

fn resolver() -> Resolver {
    Resolver::new(SourceStore::new()).unwrap()
}

fn registered(resolver: &Resolver) -> Vec<String> {
    resolver.registered_directories().map(|d| d.to_string()).collect()
}

#[rstest]
#[case("a//b/", "a/b")]
#[case("a/b", "a//b/")]
#[case("a///b", "a/b/")]
fn test_equivalent_spellings_register_once(#[case] first: &str, #[case] second: &str) {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("a/b")).unwrap();
    let root = tmp.path().to_str().unwrap();

    let mut resolver = resolver();
    resolver.register(&format!("{root}/{first}"), false).unwrap();
    resolver.register(&format!("{root}/{second}"), false).unwrap();

    assert_eq!(registered(&resolver), vec![format!("{root}/a/b")]);
}

#[test]
fn test_non_canonical_spelling_is_a_separate_entry() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("a/b")).unwrap();
    let root = tmp.path().to_str().unwrap();

    let mut resolver = resolver();
    resolver.register(&format!("{root}/a/b"), false).unwrap();
    resolver.register(&format!("{root}/a/./b"), false).unwrap();

    assert_eq!(resolver.registered_directories().len(), 2);
}

#[test]
fn test_missing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = format!("{}//nope/", tmp.path().to_str().unwrap());

    let mut resolver = resolver();
    let err = resolver.register(&missing, true).unwrap_err();
    match err {
        AutoloadError::DirectoryNotFound(path) => {
            assert_eq!(path, format!("{}/nope", tmp.path().to_str().unwrap()));
        }
        other => panic!("expected DirectoryNotFound, got {other:?}"),
    }
    assert_eq!(resolver.registered_directories().len(), 0);
}

#[test]
fn test_registration_order_is_preserved() {
    let tmp = tempfile::tempdir().unwrap();
    for name in ["c", "a", "b"] {
        fs::create_dir(tmp.path().join(name)).unwrap();
    }
    let root = tmp.path().to_str().unwrap();

    let mut resolver = resolver();
    for name in ["c", "a", "b", "a"] {
        resolver.register(&format!("{root}/{name}"), false).unwrap();
    }

    assert_eq!(
        registered(&resolver),
        vec![format!("{root}/c"), format!("{root}/a"), format!("{root}/b")]
    );
}

#[test]
fn test_recursive_registration_excludes_trunk() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("lib/app/ui")).unwrap();
    fs::create_dir_all(tmp.path().join("lib/trunk/app")).unwrap();
    fs::create_dir_all(tmp.path().join("lib/app/trunk")).unwrap();
    fs::write(tmp.path().join("lib/trunk/Widget.php"), "<?php\nnamespace app;\n").unwrap();
    let lib = format!("{}/lib", tmp.path().to_str().unwrap());

    let mut resolver = resolver();
    resolver.register(&lib, true).unwrap();

    let mut dirs = registered(&resolver);
    assert_eq!(dirs[0], lib);
    dirs.sort();
    assert_eq!(dirs, vec![lib.clone(), format!("{lib}/app"), format!("{lib}/app/ui")]);
}

#[test]
fn test_explicit_trunk_registration_is_allowed() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("trunk/inner")).unwrap();
    let trunk = format!("{}/trunk", tmp.path().to_str().unwrap());

    let mut resolver = resolver();
    resolver.register(&trunk, true).unwrap();

    assert_eq!(registered(&resolver), vec![trunk.clone(), format!("{trunk}/inner")]);
}

#[test]
fn test_recursive_after_plain_registration_does_not_expand() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("lib/app")).unwrap();
    let lib = format!("{}/lib", tmp.path().to_str().unwrap());

    let mut resolver = resolver();
    resolver.register(&lib, false).unwrap();
    resolver.register(&lib, true).unwrap();

    assert_eq!(registered(&resolver), vec![lib]);
}

#[test]
fn test_custom_excluded_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("lib/vendor/pkg")).unwrap();
    fs::create_dir_all(tmp.path().join("lib/trunk")).unwrap();
    let lib = format!("{}/lib", tmp.path().to_str().unwrap());

    let config = AutoloadConfig::default().with_excluded_dirs(["vendor"]);
    let mut resolver = Resolver::with_config(config, SourceStore::new()).unwrap();
    resolver.register(&lib, true).unwrap();

    let mut dirs = registered(&resolver);
    dirs.sort();
    assert_eq!(dirs, vec![lib.clone(), format!("{lib}/trunk")]);
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("lib/app")).unwrap();
    std::os::unix::fs::symlink(tmp.path().join("lib"), tmp.path().join("lib/app/back")).unwrap();
    let lib = format!("{}/lib", tmp.path().to_str().unwrap());

    let mut resolver = resolver();
    resolver.register(&lib, true).unwrap();

    assert_eq!(registered(&resolver), vec![lib.clone(), format!("{lib}/app")]);
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_does_not_abort_registration() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("lib/app")).unwrap();
    fs::write(tmp.path().join("lib/app/Widget.php"), "<?php\nnamespace app;\nclass Widget {}\n").unwrap();
    std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("lib/stale")).unwrap();
    let lib = format!("{}/lib", tmp.path().to_str().unwrap());

    let mut resolver = resolver();
    resolver.register(&lib, true).unwrap();

    assert_eq!(registered(&resolver), vec![lib.clone(), format!("{lib}/app")]);
    assert!(resolver.resolve(r"app\Widget").is_ok(), "subtree next to a dangling link must resolve");
}
