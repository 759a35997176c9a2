//! Process-exit shutdown for the shared embedded PostgreSQL cluster.
//!
//! The library's `shared_cluster_handle()` leaks its guard so the cluster
//! lives for the whole process. Under a per-binary runner such as `nextest`
//! that leaves a postmaster running when the binary exits, and the next test
//! binary then fails to bootstrap on the same data directory.
//!
//! [`shared_cluster_handle`] here wraps the library call with three repairs:
//! a cross-process flock so binaries bootstrap one at a time, a pinned
//! `PG_PASSWORD` so a reused data directory stays reachable, and a
//! `libc::atexit` hook that SIGTERMs the postmaster recorded in
//! `postmaster.pid` when the binary exits.

#[cfg(unix)]
use std::ffi::CString;
#[cfg(unix)]
use std::os::unix::ffi::OsStrExt;
#[cfg(unix)]
use std::path::PathBuf;
#[cfg(unix)]
use std::sync::OnceLock;
#[cfg(unix)]
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

#[cfg(unix)]
use color_eyre::eyre::eyre;
#[cfg(unix)]
use pg_embedded_setup_unpriv::BootstrapError;
use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle};

const BOOTSTRAP_ATTEMPTS: usize = 5;
const BOOTSTRAP_RETRY_DELAY: Duration = Duration::from_millis(500);
#[cfg(unix)]
const PROCESS_LOCK_FILE: &str = "askbox-pg-embedded-shared-cluster.lock";
/// Budget for the postmaster to exit after SIGTERM before SIGKILL.
#[cfg(unix)]
const SHUTDOWN_POLLS: usize = 50;
#[cfg(unix)]
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Postmaster PID captured when the cleanup hook was registered.
#[cfg(unix)]
static POSTMASTER_PID: AtomicI32 = AtomicI32::new(0);

/// Data directory for re-reading `postmaster.pid` at exit time.
#[cfg(unix)]
static CLUSTER_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
#[cfg(unix)]
static PROCESS_LOCK_FD: OnceLock<i32> = OnceLock::new();

/// Returns the shared cluster handle, with the exit hook registered so the
/// postmaster is stopped when this test binary terminates.
///
/// # Examples
///
/// ```rust,ignore
/// let cluster = shared_cluster_handle()
///     .expect("embedded postgres cluster should be available");
/// let temp_db = cluster
///     .create_temporary_database()
///     .expect("temporary database should be created");
/// println!("connection URL: {}", temp_db.url());
/// ```
pub fn shared_cluster_handle() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    #[cfg(unix)]
    acquire_process_lock()?;
    let handle = bootstrap_with_retries()?;
    #[cfg(unix)]
    register_exit_hook(handle);
    Ok(handle)
}

/// Calls the library bootstrap up to [`BOOTSTRAP_ATTEMPTS`] times.
///
/// A just-released process lock can leave the previous postmaster mid-exit;
/// a short retry window absorbs that instead of failing the suite.
fn bootstrap_with_retries() -> BootstrapResult<&'static ClusterHandle> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= BOOTSTRAP_ATTEMPTS => return Err(error),
            Err(_) => {
                std::thread::sleep(BOOTSTRAP_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Serializes cluster bootstrap across test binaries with an exclusive
/// flock on a file in the system temp directory. The descriptor is held for
/// the process lifetime; the OS releases the lock at exit.
#[cfg(unix)]
fn acquire_process_lock() -> BootstrapResult<()> {
    if PROCESS_LOCK_FD.get().is_some() {
        return Ok(());
    }

    let lock_path = std::env::temp_dir().join(PROCESS_LOCK_FILE);
    let lock_path_cstring = CString::new(lock_path.as_os_str().as_bytes()).map_err(|error| {
        BootstrapError::from(eyre!(
            "encode cluster lock path '{}': {error}",
            lock_path.display()
        ))
    })?;

    // SAFETY: `lock_path_cstring` is NUL-terminated and lives for the call.
    let fd = unsafe {
        libc::open(
            lock_path_cstring.as_ptr(),
            libc::O_CREAT | libc::O_RDWR,
            0o600,
        )
    };
    if fd < 0 {
        let error = std::io::Error::last_os_error();
        return Err(BootstrapError::from(eyre!(
            "open cluster lock file '{}': {error}",
            lock_path.display()
        )));
    }

    // SAFETY: `fd` is a valid descriptor from `open` above.
    let lock_result = unsafe { libc::flock(fd, libc::LOCK_EX) };
    if lock_result != 0 {
        let error = std::io::Error::last_os_error();
        // SAFETY: `fd` is valid and should be closed on lock failure.
        unsafe {
            libc::close(fd);
        }
        return Err(BootstrapError::from(eyre!(
            "acquire cluster lock '{}': {error}",
            lock_path.display()
        )));
    }

    if PROCESS_LOCK_FD.set(fd).is_err() {
        // SAFETY: `fd` is valid and must be closed when another caller won `set`.
        unsafe {
            libc::close(fd);
        }
    }
    Ok(())
}

/// Pins `PG_PASSWORD` to a stable value across process invocations.
///
/// `postgresql_embedded::Settings::default()` mints a random password per
/// call. A pre-existing data directory skips `initdb` and keeps its original
/// password, so without a stable override later processes fail with `28P01
/// password authentication failed`.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: called before the library spawns any threads. The shared
        // cluster singleton serializes access with a `Mutex`, so this runs at
        // most once per process.
        unsafe {
            std::env::set_var("PG_PASSWORD", "askbox_embedded_test");
        }
    }
}

/// Reads the postmaster PID from the `postmaster.pid` file in `data_dir`.
#[cfg(unix)]
fn read_postmaster_pid(data_dir: &std::path::Path) -> Option<i32> {
    let content =
        askbox_backend::test_support::cap_fs::read_file_to_string(&data_dir.join("postmaster.pid"))
            .ok()?;
    content.lines().next()?.trim().parse().ok()
}

/// atexit handler: SIGTERM the postmaster, wait, escalate to SIGKILL.
///
/// Re-reads `postmaster.pid` and only signals while the on-disk PID still
/// matches the recorded one, guarding against PID reuse.
#[cfg(unix)]
extern "C" fn stop_postgres_on_exit() {
    let recorded_pid = POSTMASTER_PID.load(Ordering::Relaxed);
    if recorded_pid <= 0 {
        return;
    }

    let pid = match CLUSTER_DATA_DIR.get().and_then(|dir| read_postmaster_pid(dir)) {
        Some(current_pid) if current_pid == recorded_pid => current_pid,
        _ => return,
    };

    // SAFETY: `pid` was validated against the on-disk `postmaster.pid`.
    // SIGTERM triggers a graceful "smart shutdown"; signal 0 probes liveness.
    unsafe {
        if libc::kill(pid, libc::SIGTERM) != 0 {
            return;
        }
    }

    for _ in 0..SHUTDOWN_POLLS {
        std::thread::sleep(SHUTDOWN_POLL_INTERVAL);
        // SAFETY: signal 0 checks whether the process still exists.
        if unsafe { libc::kill(pid, 0) } != 0 {
            return;
        }
    }

    // SAFETY: force-kill after the graceful shutdown budget expires.
    unsafe {
        libc::kill(pid, libc::SIGKILL);
    }
}

/// Records the postmaster PID and registers [`stop_postgres_on_exit`] via
/// `libc::atexit`, at most once per process.
#[cfg(unix)]
fn register_exit_hook(handle: &ClusterHandle) {
    let data_dir = &handle.settings().data_dir;
    let Some(pid) = read_postmaster_pid(data_dir) else {
        return;
    };

    // First caller swaps the real PID over 0; later callers bail out here.
    if POSTMASTER_PID
        .compare_exchange(0, pid, Ordering::Relaxed, Ordering::Relaxed)
        .is_err()
    {
        return;
    }

    let _ = CLUSTER_DATA_DIR.set(data_dir.clone());

    // SAFETY: `stop_postgres_on_exit` is a valid `extern "C"` function with
    // no preconditions beyond the atomic PID being set (done above).
    let rc = unsafe { libc::atexit(stop_postgres_on_exit) };
    if rc != 0 {
        eprintln!(
            concat!(
                "pg-embed: failed to register atexit handler (rc={rc}); ",
                "PostgreSQL process (PID {pid}) may outlive the test binary"
            ),
            rc = rc,
            pid = pid
        );
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the exit-hook helpers.

    use cap_std::ambient_authority;
    use cap_std::fs::Dir;

    #[cfg(unix)]
    fn write_postmaster_pid(dir_path: &std::path::Path, content: &str) {
        let dir = Dir::open_ambient_dir(dir_path, ambient_authority()).expect("open dir");
        dir.write("postmaster.pid", content).expect("write");
    }

    #[cfg(unix)]
    #[test]
    fn read_postmaster_pid_parses_first_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_postmaster_pid(dir.path(), "12345\n/some/path\n5432\n");
        assert_eq!(super::read_postmaster_pid(dir.path()), Some(12345));
    }

    #[cfg(unix)]
    #[test]
    fn read_postmaster_pid_returns_none_for_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(super::read_postmaster_pid(dir.path()), None);
    }

    #[cfg(unix)]
    #[test]
    fn read_postmaster_pid_returns_none_for_non_numeric_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_postmaster_pid(dir.path(), "not-a-number\n");
        assert_eq!(super::read_postmaster_pid(dir.path()), None);
    }

    #[test]
    fn ensure_stable_password_does_not_overwrite_existing_value() {
        let _guard = env_lock::lock_env([("PG_PASSWORD", Some("custom_value"))]);
        super::ensure_stable_password();
        assert_eq!(
            std::env::var("PG_PASSWORD").expect("PG_PASSWORD should be set"),
            "custom_value",
            "ensure_stable_password should not overwrite an existing PG_PASSWORD"
        );
    }
}
