//! Keeps `tests/unit` a mirror of `src`: one test file per source file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module index files carry no logic of their own
    fn is_organizational(relative_path: &str) -> bool {
        relative_path == "main.rs" || relative_path == "lib.rs" || relative_path.ends_with("mod.rs")
    }

    fn mirrored_paths(root: &str) -> BTreeSet<String> {
        let dir = Path::new(root);
        let mut paths = BTreeSet::new();
        let result = collect_relative_paths(dir, dir, &mut paths);
        assert!(result.is_ok(), "Failed to read {root}: {result:?}");
        paths
    }

    // Tests every source file has a unit test file at the same relative path
    // Verified by adding a source file without a counterpart
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src_paths = mirrored_paths("src");
        let test_paths = mirrored_paths("tests/unit");

        let missing: Vec<_> = src_paths
            .iter()
            .filter(|path| !is_organizational(path) && !test_paths.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source file
    // Verified by renaming a source module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src_paths = mirrored_paths("src");
        let test_paths = mirrored_paths("tests/unit");

        let orphaned: Vec<_> = test_paths
            .iter()
            .filter(|path| !is_organizational(path) && !src_paths.contains(*path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source file:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests each unit test directory declares every file it contains
    // Verified by dropping a `mod` line from a test mod.rs
    #[test]
    fn test_unit_test_modules_are_declared() {
        let test_paths = mirrored_paths("tests/unit");
        let mut undeclared = Vec::new();

        for path in test_paths.iter().filter(|path| !is_organizational(path)) {
            let relative = Path::new(path);
            let (Some(parent), Some(stem)) = (relative.parent(), relative.file_stem()) else {
                continue;
            };
            if relative.extension().is_none() {
                continue;
            }

            let index = if parent.as_os_str().is_empty() {
                Path::new("tests/unit/main.rs").to_path_buf()
            } else {
                Path::new("tests/unit").join(parent).join("mod.rs")
            };
            let declaration = format!("mod {};", stem.to_string_lossy());
            let declared = fs::read_to_string(&index)
                .map(|content| content.contains(&declaration))
                .unwrap_or(false);
            if !declared {
                undeclared.push(format!("  - tests/unit/{path} in {}", index.display()));
            }
        }

        assert!(
            undeclared.is_empty(),
            "Unit test files never compiled:\n{}",
            undeclared.join("\n")
        );
    }

    // Tests every test file holds at least one test
    // Verified by emptying a unit test file
    #[test]
    fn test_all_test_files_contain_tests() {
        let mut files_without_tests = Vec::new();
        let result = check_test_files(Path::new("tests"), &mut files_without_tests);
        assert!(result.is_ok(), "Failed to scan tests directory: {result:?}");

        assert!(
            files_without_tests.is_empty(),
            "Test files without any #[test] functions:\n{}",
            files_without_tests.join("\n")
        );
    }

    fn collect_relative_paths(
        dir: &Path,
        base: &Path,
        paths: &mut BTreeSet<String>,
    ) -> Result<(), io::Error> {
        for entry_result in fs::read_dir(dir)? {
            let path = entry_result?.path();
            let relative_path = path
                .strip_prefix(base)
                .map_err(|_prefix_error| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.insert(relative_path);
                collect_relative_paths(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative_path);
            }
        }
        Ok(())
    }

    fn check_test_files(dir: &Path, files_without_tests: &mut Vec<String>) -> Result<(), io::Error> {
        for entry_result in fs::read_dir(dir)? {
            let path = entry_result?.path();

            if path.is_dir() {
                check_test_files(&path, files_without_tests)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }

            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            if file_name == "main.rs" || file_name == "mod.rs" {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                files_without_tests.push(format!("  - {}", path.display()));
            }
        }
        Ok(())
    }
}
