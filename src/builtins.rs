//! In-process builtin commands
//!
//! A fixed table maps literal command names to handlers. Handlers run
//! against the session and report a status that becomes `last_status`;
//! `exit` instead asks the loop to unwind so teardown and history
//! persistence happen on the way out.

use std::path::PathBuf;

use crate::session::Session;

/// What a dispatched builtin asked the loop to do.
#[derive(Debug)]
pub enum BuiltinOutcome {
    /// `argv[0]` is not a builtin; defer to the launcher.
    NotBuiltin,
    /// The builtin ran; its status becomes the segment status.
    Status(i32),
    /// `exit` was requested with the given process status.
    Exit(i32),
}

type Handler = fn(&mut Session, &[String]) -> BuiltinOutcome;

const BUILTINS: &[(&str, Handler)] = &[
    ("exit", builtin_exit),
    ("env", builtin_env),
    ("setenv", builtin_setenv),
    ("unsetenv", builtin_unsetenv),
    ("cd", builtin_cd),
    ("history", builtin_history),
    ("alias", builtin_alias),
];

/// Look up `argv[0]` in the builtin table and run the matching handler.
pub fn dispatch(session: &mut Session, argv: &[String]) -> BuiltinOutcome {
    let Some(name) = argv.first() else {
        return BuiltinOutcome::NotBuiltin;
    };
    for (builtin, handler) in BUILTINS {
        if builtin == name {
            return handler(session, argv);
        }
    }
    BuiltinOutcome::NotBuiltin
}

fn builtin_exit(session: &mut Session, argv: &[String]) -> BuiltinOutcome {
    match argv.get(1) {
        None => BuiltinOutcome::Exit(session.last_status),
        Some(arg) => match parse_status(arg) {
            Some(code) => BuiltinOutcome::Exit(code),
            None => {
                session.report("exit", &format!("Illegal number: {}", arg));
                BuiltinOutcome::Status(2)
            }
        },
    }
}

/// Parse a non-negative decimal exit status.
fn parse_status(arg: &str) -> Option<i32> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    arg.parse::<i32>().ok()
}

fn builtin_env(session: &mut Session, _argv: &[String]) -> BuiltinOutcome {
    let Session { env, console, .. } = session;
    for text in env.texts() {
        console.write_line(text);
    }
    console.flush();
    BuiltinOutcome::Status(0)
}

fn builtin_setenv(session: &mut Session, argv: &[String]) -> BuiltinOutcome {
    if argv.len() != 3 {
        session.report("setenv", "expected a name and a value");
        return BuiltinOutcome::Status(1);
    }
    session.set_env(&argv[1], &argv[2]);
    BuiltinOutcome::Status(0)
}

fn builtin_unsetenv(session: &mut Session, argv: &[String]) -> BuiltinOutcome {
    if argv.len() < 2 {
        session.report("unsetenv", "too few arguments");
        return BuiltinOutcome::Status(1);
    }
    let mut status = 0;
    for name in &argv[1..] {
        if !session.unset_env(name) {
            session.report("unsetenv", &format!("{} not set", name));
            status = 1;
        }
    }
    BuiltinOutcome::Status(status)
}

fn builtin_cd(session: &mut Session, argv: &[String]) -> BuiltinOutcome {
    let previous = std::env::current_dir().ok();
    let arg = argv.get(1).map(String::as_str);
    let target = match arg {
        None | Some("~") => match session.getenv("HOME") {
            Some(home) => PathBuf::from(home),
            None => PathBuf::from(session.getenv("PWD").unwrap_or("/")),
        },
        Some("-") => match session.getenv("OLDPWD") {
            Some(old) => PathBuf::from(old),
            None => {
                session.report("cd", "OLDPWD not set");
                return BuiltinOutcome::Status(1);
            }
        },
        Some(dir) => PathBuf::from(dir),
    };

    if std::env::set_current_dir(&target).is_err() {
        session.report("cd", &format!("can't cd to {}", target.display()));
        return BuiltinOutcome::Status(1);
    }

    if arg == Some("-") {
        session.console.write_line(&target.display().to_string());
        session.console.flush();
    }

    let old_pwd = session
        .getenv("PWD")
        .map(String::from)
        .or_else(|| previous.map(|p| p.display().to_string()));
    if let Some(old) = old_pwd {
        session.set_env("OLDPWD", &old);
    }
    if let Ok(now) = std::env::current_dir() {
        session.set_env("PWD", &now.display().to_string());
    }
    BuiltinOutcome::Status(0)
}

fn builtin_history(session: &mut Session, _argv: &[String]) -> BuiltinOutcome {
    let Session {
        history, console, ..
    } = session;
    for record in history.iter() {
        console.write_line(&format!("{}: {}", record.index, record.text));
    }
    console.flush();
    BuiltinOutcome::Status(0)
}

fn builtin_alias(session: &mut Session, argv: &[String]) -> BuiltinOutcome {
    if argv.len() == 1 {
        let Session {
            aliases, console, ..
        } = session;
        for text in aliases.texts() {
            console.write_line(&format_alias(text));
        }
        console.flush();
        return BuiltinOutcome::Status(0);
    }

    let mut status = 0;
    for arg in &argv[1..] {
        match arg.split_once('=') {
            // `name=` removes the alias.
            Some((name, "")) => {
                session.unset_alias(name);
            }
            Some((name, value)) => session.set_alias(name, value),
            None => match session.alias_value(arg).map(String::from) {
                Some(value) => {
                    let line = format_alias(&format!("{}={}", arg, value));
                    session.console.write_line(&line);
                    session.console.flush();
                }
                None => status = 1,
            },
        }
    }
    BuiltinOutcome::Status(status)
}

fn format_alias(entry: &str) -> String {
    match entry.split_once('=') {
        Some((name, value)) => format!("{}='{}'", name, value),
        None => entry.to_string(),
    }
}
