//! Command-line argument handling

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
pub struct CliArgs {
    pub command: Option<String>,
    pub script: Option<String>,
    pub help: bool,
    pub version: bool,
}

/// Parse command-line arguments
pub fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs {
        command: None,
        script: None,
        help: false,
        version: false,
    };

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "-c" => {
                // Everything after -c is the command
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                }
                break;
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') && cli.script.is_none() {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

pub fn print_help() {
    println!(
        r#"husk {} - a small interactive command interpreter

USAGE:
    husk                    Start the interactive loop
    husk -c <command>       Execute a single command line
    husk <script>           Read commands from a file
    husk --help             Show this help message
    husk --version          Show version

COMMAND LINES:
    cmd args ; cmd args     Run both, regardless of status
    cmd && cmd              Run the second only if the first succeeded
    cmd || cmd              Run the second only if the first failed
    $?  $$  $NAME           Last status, process id, environment value
    # comment               Everything after # is ignored

BUILTINS:
    exit [n]                Leave the interpreter with status n
    cd [dir | - | ~]        Change directory; - returns to OLDPWD
    env                     Print the environment
    setenv NAME VALUE       Set an environment entry
    unsetenv NAME...        Remove environment entries
    alias [name[=value]]    Show or define aliases
    history                 Print the command history

FILES:
    ~/.husk_history         Command history, kept across sessions
"#,
        VERSION
    );
}

pub fn print_version() {
    println!("husk {}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_means_interactive() {
        let cli = parse_args(&args(&["husk"]));
        assert!(cli.command.is_none());
        assert!(cli.script.is_none());
        assert!(!cli.help);
    }

    #[test]
    fn dash_c_collects_the_rest() {
        let cli = parse_args(&args(&["husk", "-c", "echo", "hi"]));
        assert_eq!(cli.command.as_deref(), Some("echo hi"));
    }

    #[test]
    fn first_free_argument_is_the_script() {
        let cli = parse_args(&args(&["husk", "setup.hsk"]));
        assert_eq!(cli.script.as_deref(), Some("setup.hsk"));
    }

    #[test]
    fn help_and_version_flags() {
        assert!(parse_args(&args(&["husk", "--help"])).help);
        assert!(parse_args(&args(&["husk", "-V"])).version);
    }
}
