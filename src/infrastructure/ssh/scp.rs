//! SCP sink-mode stream
//!
//! The remote side runs `scp -t <dir>` and reads, in order:
//! a control line `C<mode> <size> <name>\n`, exactly `size` raw bytes, and a
//! single `\0`. It answers on stdout with one status byte per step:
//! `\0` for ok, `\x01<msg>\n` for a warning, `\x02<msg>\n` for a fatal error.

use std::io::{self, Read, Write};

use crate::shell;

/// Permission bits sent in the control line
pub const FILE_MODE: &str = "0644";

/// Remote command that receives one file into `dir`
pub fn sink_command(dir: &str) -> String {
    format!("scp -t {}", shell::quote_path(dir))
}

/// Reject names the control line cannot carry
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(format!("invalid remote file name {:?}", name));
    }
    if name.contains('/') || name.contains('\n') || name.contains('\r') {
        return Err(format!(
            "remote file name {:?} may not contain '/' or line breaks",
            name
        ));
    }
    Ok(())
}

/// Control line announcing one regular file
pub fn control_line(size: u64, name: &str) -> String {
    format!("C{} {} {}\n", FILE_MODE, size, name)
}

/// Feed the sink: header, payload, terminator.
///
/// Fails if `file` yields a different number of bytes than announced.
pub fn write_sink_stream<W: Write, R: Read>(
    mut out: W,
    file: R,
    size: u64,
    name: &str,
) -> io::Result<u64> {
    out.write_all(control_line(size, name).as_bytes())?;
    let copied = io::copy(&mut file.take(size), &mut out)?;
    if copied != size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("file shrank during transfer: sent {} of {} bytes", copied, size),
        ));
    }
    out.write_all(b"\0")?;
    out.flush()?;
    Ok(copied)
}

/// Scan the sink's status bytes; the first warning or error wins.
pub fn check_acks(stdout: &[u8]) -> Result<(), String> {
    let mut i = 0;
    while i < stdout.len() {
        match stdout[i] {
            0 => i += 1,
            code @ (1 | 2) => {
                let rest = &stdout[i + 1..];
                let end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
                let message = String::from_utf8_lossy(&rest[..end]).trim().to_string();
                let kind = if code == 1 { "warning" } else { "error" };
                return Err(format!("scp {}: {}", kind, message));
            }
            other => return Err(format!("unexpected scp response byte 0x{:02x}", other)),
        }
    }
    Ok(())
}

/// Split `remote_path` into the sink directory and the file name.
pub fn split_remote_path(remote_path: &str) -> (String, String) {
    match remote_path.rsplit_once('/') {
        Some(("", name)) => ("/".to_string(), name.to_string()),
        Some((dir, name)) => (dir.to_string(), name.to_string()),
        None => (".".to_string(), remote_path.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_line_format() {
        assert_eq!(control_line(17, ".env"), "C0644 17 .env\n");
    }

    #[test]
    fn sink_stream_is_header_payload_terminator() {
        let mut out = Vec::new();
        let payload = b"DOCKER_TAG=v1\n";
        let sent = write_sink_stream(&mut out, &payload[..], payload.len() as u64, ".env").unwrap();
        assert_eq!(sent, 14);
        assert_eq!(out, b"C0644 14 .env\nDOCKER_TAG=v1\n\0".to_vec());
    }

    #[test]
    fn sink_stream_empty_file() {
        let mut out = Vec::new();
        write_sink_stream(&mut out, &b""[..], 0, "empty").unwrap();
        assert_eq!(out, b"C0644 0 empty\n\0".to_vec());
    }

    #[test]
    fn sink_stream_detects_short_file() {
        let mut out = Vec::new();
        let err = write_sink_stream(&mut out, &b"abc"[..], 10, "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn sink_stream_never_sends_more_than_announced() {
        let mut out = Vec::new();
        write_sink_stream(&mut out, &b"abcdef"[..], 3, "x").unwrap();
        assert_eq!(out, b"C0644 3 x\nabc\0".to_vec());
    }

    #[test]
    fn acks_all_ok() {
        assert!(check_acks(&[0, 0, 0]).is_ok());
        assert!(check_acks(&[]).is_ok());
    }

    #[test]
    fn acks_report_fatal_message() {
        let err = check_acks(b"\0\x02scp: ./x: Permission denied\n").unwrap_err();
        assert_eq!(err, "scp error: scp: ./x: Permission denied");
    }

    #[test]
    fn acks_report_warning_message() {
        let err = check_acks(b"\x01No space left on device\n").unwrap_err();
        assert!(err.starts_with("scp warning:"));
    }

    #[test]
    fn acks_reject_garbage() {
        assert!(check_acks(b"hello").is_err());
    }

    #[test]
    fn names_with_separators_are_rejected() {
        assert!(validate_name("docker-compose.yml").is_ok());
        assert!(validate_name(".env").is_ok());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\nC0644 1 evil").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("..").is_err());
    }

    #[test]
    fn split_remote_paths() {
        assert_eq!(split_remote_path(".env"), (".".to_string(), ".env".to_string()));
        assert_eq!(
            split_remote_path("app/docker-compose.yml"),
            ("app".to_string(), "docker-compose.yml".to_string())
        );
        assert_eq!(split_remote_path("/x"), ("/".to_string(), "x".to_string()));
    }

    #[test]
    fn sink_command_quotes_directory() {
        assert_eq!(sink_command("."), "scp -t .");
        assert_eq!(sink_command("my dir"), "scp -t 'my dir'");
        assert_eq!(sink_command("~/app"), "scp -t ~/app");
    }
}
