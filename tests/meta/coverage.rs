//! Keeps `tests/unit` mirroring `src` file for file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Module roots and entry points carry no logic of their own
    fn is_layout_file(relative: &str) -> bool {
        let name = Path::new(relative)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        matches!(name, "main.rs" | "lib.rs" | "mod.rs")
    }

    fn rust_files(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|e| io::Error::other(e.to_string()))?;
                found.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(())
    }

    fn logic_files(root: &str) -> BTreeSet<String> {
        let base = Path::new(root);
        let mut found = BTreeSet::new();
        rust_files(base, base, &mut found).expect("readable source tree");
        found.retain(|relative| !is_layout_file(relative));
        found
    }

    #[test]
    fn test_every_src_file_has_unit_tests() {
        let tests = logic_files("tests/unit");
        let missing: Vec<String> = logic_files("src")
            .into_iter()
            .filter(|relative| !tests.contains(relative))
            .map(|relative| format!("  - src/{relative} -> tests/unit/{relative}"))
            .collect();

        assert!(
            missing.is_empty(),
            "source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_every_unit_test_has_a_src_file() {
        let sources = logic_files("src");
        let orphaned: Vec<String> = logic_files("tests/unit")
            .into_iter()
            .filter(|relative| !sources.contains(relative))
            .map(|relative| format!("  - tests/unit/{relative}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "unit test files with no source counterpart:\n{}",
            orphaned.join("\n")
        );
    }

    #[test]
    fn test_every_test_file_contains_tests() {
        let without_tests: Vec<String> = logic_files("tests")
            .into_iter()
            .filter(|relative| {
                fs::read_to_string(Path::new("tests").join(relative))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|relative| format!("  - tests/{relative}"))
            .collect();

        assert!(
            without_tests.is_empty(),
            "test files without any #[test] function:\n{}",
            without_tests.join("\n")
        );
    }
}
