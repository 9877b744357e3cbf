//! Class identity: canonical names derived from smali file paths, and the
//! naming conventions used to classify anonymous and nested classes.

use crate::error::ClassNameError;
use std::path::{Path, is_separator};

/// Dot-separated fully qualified class name, e.g. `a.b.Outer$Inner`.
pub type ClassName = String;

/// Extension of the files produced by the disassembler.
pub const SMALI_EXTENSION: &str = ".smali";

/// Separator between an enclosing class and its nested class.
pub const NESTING_SEPARATOR: char = '$';

/// Canonical class name of a smali file: `root/a/b/C$D.smali` -> `a.b.C$D`.
pub fn canonical_name(path: &Path, root: &Path) -> Result<ClassName, ClassNameError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ClassNameError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
    let relative = relative
        .to_str()
        .ok_or_else(|| ClassNameError::NonUtf8(path.to_path_buf()))?;
    let stem = relative
        .strip_suffix(SMALI_EXTENSION)
        .ok_or_else(|| ClassNameError::NotSmali(path.to_path_buf()))?;

    let name = stem
        .split(is_separator)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".");
    if name.is_empty() {
        return Err(ClassNameError::Empty(path.to_path_buf()));
    }
    Ok(name)
}

/// Whether a file name carries the smali extension.
pub fn is_smali_file_name(file_name: &str) -> bool {
    file_name.len() > SMALI_EXTENSION.len() && file_name.ends_with(SMALI_EXTENSION)
}

/// Class name for a raw descriptor body: `com/a/Box<Lcom/a/T;>` -> `com.a.Box`.
pub fn descriptor_to_class_name(raw: &str) -> ClassName {
    let raw = raw.split_once('<').map_or(raw, |(head, _)| head);
    raw.replace('/', ".")
}

/// Last identifier segment of a dotted or slashed name.
pub fn simple_name(name: &str) -> &str {
    name.rsplit(['.', '/']).next().unwrap_or(name)
}

/// `Outer$1`, `Outer$Inner$12`: the simple name ends in a purely numeric
/// nested segment.
pub fn is_anonymous(name: &str) -> bool {
    match simple_name(name).rsplit_once(NESTING_SEPARATOR) {
        Some((head, tail)) => {
            !head.is_empty() && !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Strips numeric suffixes until a named class remains: `a.Outer$1$2` -> `a.Outer`.
pub fn nearest_named_outer(name: &str) -> &str {
    let mut current = name;
    while is_anonymous(current) {
        match current.rsplit_once(NESTING_SEPARATOR) {
            Some((head, _)) => current = head,
            None => break,
        }
    }
    current
}

pub fn is_inner(name: &str) -> bool {
    simple_name(name).contains(NESTING_SEPARATOR)
}

/// Top-level enclosing class, keeping the package: `a.b.Outer$In$Deep` -> `a.b.Outer`.
pub fn outer_of(name: &str) -> &str {
    let start = name.len() - simple_name(name).len();
    match name[start..].find(NESTING_SEPARATOR) {
        Some(offset) => &name[..start + offset],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_canonical_name_strips_root_and_extension() {
        let root = PathBuf::from("/out/smali");
        let path = root.join("com").join("example").join("Main$Inner.smali");
        assert_eq!(
            canonical_name(&path, &root).unwrap(),
            "com.example.Main$Inner"
        );
    }

    #[test]
    fn test_canonical_name_rejects_foreign_paths() {
        let root = PathBuf::from("/out/smali");
        assert!(matches!(
            canonical_name(Path::new("/elsewhere/A.smali"), &root),
            Err(ClassNameError::OutsideRoot { .. })
        ));
        assert!(matches!(
            canonical_name(&root.join("A.java"), &root),
            Err(ClassNameError::NotSmali(_))
        ));
        assert!(matches!(
            canonical_name(&root.join(".smali"), &root),
            Err(ClassNameError::Empty(_))
        ));
    }

    #[test]
    fn test_smali_file_name() {
        assert!(is_smali_file_name("A.smali"));
        assert!(!is_smali_file_name(".smali"));
        assert!(!is_smali_file_name("A.smali.bak"));
    }

    #[test]
    fn test_descriptor_to_class_name() {
        assert_eq!(descriptor_to_class_name("com/a/Foo"), "com.a.Foo");
        assert_eq!(descriptor_to_class_name("com/a/Box<TT"), "com.a.Box");
        assert_eq!(descriptor_to_class_name("Foo"), "Foo");
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("com.a.Outer$Inner"), "Outer$Inner");
        assert_eq!(simple_name("com/a/Foo"), "Foo");
        assert_eq!(simple_name("Foo"), "Foo");
    }

    #[test]
    fn test_anonymous_detection() {
        assert!(is_anonymous("a.Outer$1"));
        assert!(is_anonymous("a.Outer$Inner$12"));
        assert!(!is_anonymous("a.Outer$Inner"));
        assert!(!is_anonymous("a.Outer$1Named"));
        assert!(!is_anonymous("a.Outer$"));
        assert!(!is_anonymous("a.Outer"));
        assert!(!is_anonymous("a.$1"));
    }

    #[test]
    fn test_nearest_named_outer() {
        assert_eq!(nearest_named_outer("a.Outer$1$2"), "a.Outer");
        assert_eq!(nearest_named_outer("a.Outer$Inner$3"), "a.Outer$Inner");
        assert_eq!(nearest_named_outer("a.Outer"), "a.Outer");
    }

    #[test]
    fn test_inner_and_outer() {
        assert!(is_inner("a.b.Outer$Inner"));
        assert!(!is_inner("a.b.Outer"));
        assert_eq!(outer_of("a.b.Outer$In$Deep"), "a.b.Outer");
        assert_eq!(outer_of("a.b.Outer"), "a.b.Outer");
    }
}
