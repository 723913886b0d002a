//! Single-key terminal input.
//!
//! On unix the terminal is put into non-canonical, no-echo mode for the
//! lifetime of a [`RawMode`] guard. Elsewhere the guard does nothing and each
//! key has to be followed by Enter.

use std::io;

#[cfg(unix)]
pub struct RawMode {
    original: libc::termios,
}

#[cfg(unix)]
impl RawMode {
    pub fn enable() -> io::Result<Self> {
        use std::os::unix::io::AsRawFd;

        let fd = io::stdin().as_raw_fd();
        // SAFETY: termios is plain data and tcgetattr fully initializes it on success.
        let original = unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }
            termios
        };

        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        // SAFETY: fd is stdin and raw is a valid termios value.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(RawMode { original })
    }
}

#[cfg(unix)]
impl Drop for RawMode {
    fn drop(&mut self) {
        use std::os::unix::io::AsRawFd;

        let fd = io::stdin().as_raw_fd();
        // SAFETY: restores the settings captured in `enable`.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &self.original) } != 0 {
            tracing::warn!(error = %io::Error::last_os_error(), "failed to restore terminal mode");
        }
    }
}

#[cfg(not(unix))]
pub struct RawMode;

#[cfg(not(unix))]
impl RawMode {
    pub fn enable() -> io::Result<Self> {
        Ok(RawMode)
    }
}
