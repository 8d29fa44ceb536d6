//! Daemonization: detach from the controlling terminal.
//!
//! Must run before any async runtime threads exist; forking a
//! multi-threaded process leaves the child with only the forking thread.

use std::io;

/// Detaches the process: double fork, new session, chdir to `/`, standard
/// streams redirected to `/dev/null`. The foreground parent exits with
/// status 0.
pub fn daemonize() -> io::Result<()> {
    // First fork: the parent returns control to the shell.
    match unsafe { libc::fork() } {
        -1 => return Err(io::Error::last_os_error()),
        0 => {}
        _ => std::process::exit(0),
    }

    if unsafe { libc::setsid() } == -1 {
        return Err(io::Error::last_os_error());
    }

    // Second fork: the session leader exits so the daemon can never
    // reacquire a controlling terminal.
    match unsafe { libc::fork() } {
        -1 => return Err(io::Error::last_os_error()),
        0 => {}
        _ => std::process::exit(0),
    }

    if unsafe { libc::chdir(c"/".as_ptr()) } == -1 {
        return Err(io::Error::last_os_error());
    }

    let null = unsafe { libc::open(c"/dev/null".as_ptr(), libc::O_RDWR) };
    if null == -1 {
        return Err(io::Error::last_os_error());
    }
    for fd in [libc::STDIN_FILENO, libc::STDOUT_FILENO, libc::STDERR_FILENO] {
        if unsafe { libc::dup2(null, fd) } == -1 {
            return Err(io::Error::last_os_error());
        }
    }
    if null > libc::STDERR_FILENO {
        unsafe { libc::close(null) };
    }

    Ok(())
}
