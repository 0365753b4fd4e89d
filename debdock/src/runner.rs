use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::thread;

use tracing::{info, warn};

use crate::error::{Error, Result};

/// Run one external command, streaming its output into the log, and fail on
/// a non-zero exit status. Commands never overlap; the caller sequences them.
pub fn run(program: &str, args: &[String]) -> Result<()> {
    let command = render(program, args);
    info!("$ {}", command);

    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null())
        .spawn()?;

    stream_output(&mut child);

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::Subprocess { command, status });
    }

    Ok(())
}

fn render(program: &str, args: &[String]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        if arg.contains(char::is_whitespace) {
            rendered.push_str(&format!("{:?}", arg));
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}

fn stream_output(child: &mut Child) {
    let stdout = child.stdout.take().unwrap();
    let stderr = child.stderr.take().unwrap();

    let stdout_handle = thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(|line| line.ok()) {
            info!("{}", line);
        }
    });

    let stderr_handle = thread::spawn(move || {
        for line in BufReader::new(stderr).lines().map_while(|line| line.ok()) {
            warn!("{}", line);
        }
    });

    stdout_handle.join().unwrap();
    stderr_handle.join().unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_command() {
        assert!(run("true", &[]).is_ok());
    }

    #[test]
    fn test_failing_command_reports_itself() {
        let err = run("false", &[]).unwrap_err();
        match err {
            Error::Subprocess { command, .. } => assert_eq!(command, "false"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_render_quotes_whitespace() {
        assert_eq!(
            render("find", &["-name".to_string(), "a b".to_string()]),
            r#"find -name "a b""#
        );
    }
}
