//! Helpers shared by the external-program speech backends.

use std::path::{Path, PathBuf};

/// Locate `program` the way a shell would: paths containing a separator are
/// checked directly, bare names are searched on `PATH`.
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.trim().is_empty() {
        return None;
    }
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| candidates(&dir, program))
        .find(|candidate| candidate.is_file())
}

#[cfg(target_os = "windows")]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program), dir.join(format!("{}.exe", program))]
}

#[cfg(not(target_os = "windows"))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

/// Expand `{name}` placeholders in each argument.
///
/// Arguments are never split, so values containing spaces stay a single
/// argument.
pub fn expand_args(template: &[String], values: &[(&str, &str)]) -> Vec<String> {
    template
        .iter()
        .map(|arg| {
            values.iter().fold(arg.clone(), |acc, (name, value)| {
                acc.replace(&format!("{{{}}}", name), value)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_args_replaces_placeholders() {
        let template = vec![
            "-v".to_string(),
            "{lang}".to_string(),
            "--locale={locale}".to_string(),
            "{text}".to_string(),
        ];
        let args = expand_args(
            &template,
            &[("lang", "hi"), ("locale", "hi-IN"), ("text", "नमस्ते दुनिया")],
        );
        assert_eq!(args, vec!["-v", "hi", "--locale=hi-IN", "नमस्ते दुनिया"]);
    }

    #[test]
    fn test_expand_args_leaves_unknown_placeholders() {
        let args = expand_args(&["{other}".to_string()], &[("text", "x")]);
        assert_eq!(args, vec!["{other}"]);
    }

    #[test]
    fn test_find_program_empty_name() {
        assert!(find_program("").is_none());
        assert!(find_program("   ").is_none());
    }

    #[test]
    fn test_find_program_missing() {
        assert!(find_program("definitely-not-a-real-program-name-42").is_none());
        assert!(find_program("/nonexistent/dir/tts").is_none());
    }

    #[test]
    fn test_find_program_direct_path() {
        let exe = std::env::current_exe().unwrap();
        let found = find_program(exe.to_str().unwrap());
        assert_eq!(found, Some(exe));
    }
}
