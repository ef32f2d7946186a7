//! Shell command-line construction

/// Quote `input` as one single-quoted shell token.
///
/// Embedded single quotes become `'\''` (close, escaped quote, reopen).
pub fn shell_escape(input: &str) -> String {
    format!("'{}'", input.replace('\'', r"'\''"))
}

/// Build the line handed to `<shell> -lc`.
///
/// The path is always quoted. Arguments are appended verbatim after trimming;
/// they are trusted input and may use any shell syntax.
///
/// The shell sees `path` exactly as given, so a leading `~/` is not expanded
/// inside the quotes. [`ScriptRunner`](super::ScriptRunner) passes the path
/// through [`expand_home`](super::expand_home) first; the shell then reads
/// back the expanded path, not the configured string.
pub fn build_command(path: &str, args: &str) -> String {
    let escaped = shell_escape(path);
    let args = args.trim();
    if args.is_empty() {
        escaped
    } else {
        format!("{} {}", escaped, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    /// Let a real shell tokenize `escaped` and print each resulting word on its own line
    fn shell_words(escaped: &str) -> Vec<String> {
        let output = Command::new("/bin/sh")
            .arg("-c")
            .arg(format!("for w in {escaped}; do printf '%s\\n' \"$w\"; done"))
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_path_with_space() {
        assert_eq!(
            build_command("/Users/x/scripts/set dark.sh", ""),
            "'/Users/x/scripts/set dark.sh'"
        );
    }

    #[test]
    fn test_embedded_quote() {
        assert_eq!(shell_escape("it's.sh"), r"'it'\''s.sh'");
    }

    #[test]
    fn test_args_appended_raw() {
        assert_eq!(
            build_command("/opt/dark.sh", "  --mode \"night owl\" $HOME \n"),
            "'/opt/dark.sh' --mode \"night owl\" $HOME"
        );
    }

    #[test]
    fn test_whitespace_only_args_dropped() {
        assert_eq!(build_command("/opt/light.sh", " \t\n"), "'/opt/light.sh'");
    }

    #[test]
    fn test_escaped_path_is_one_literal_token() {
        let paths = [
            "/Users/x/scripts/set dark.sh",
            "/tmp/it's here.sh",
            "/tmp/''double''",
            "/tmp/$HOME/`whoami`/$(id)",
            "/tmp/a;b|c&d>e<f",
            "/tmp/glob*?[x]",
            "/tmp/back\\slash \"quoted\"",
            "/tmp/tab\there",
        ];
        for path in paths {
            assert_eq!(shell_words(&shell_escape(path)), vec![path.to_string()]);
        }
    }
}
