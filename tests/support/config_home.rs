use std::{
    ffi::OsString,
    path::Path,
    sync::{Mutex, MutexGuard, OnceLock},
};

use churnscope::app_dirs::CONFIG_HOME_ENV;

static ENV_SERIAL: OnceLock<Mutex<()>> = OnceLock::new();

fn env_serial() -> MutexGuard<'static, ()> {
    ENV_SERIAL
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Points `CHURNSCOPE_CONFIG_HOME` at a scratch directory for one test and
/// restores the previous value on drop.
pub struct ConfigHomeGuard {
    saved: Option<OsString>,
    _serial: MutexGuard<'static, ()>,
}

impl ConfigHomeGuard {
    pub fn redirect(base: &Path) -> Self {
        let serial = env_serial();
        let saved = std::env::var_os(CONFIG_HOME_ENV);
        // SAFETY: the serial lock keeps env mutations single-threaded within
        // this test binary.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, base);
        }
        Self {
            saved,
            _serial: serial,
        }
    }
}

impl Drop for ConfigHomeGuard {
    fn drop(&mut self) {
        // SAFETY: still holding the serial lock taken in `redirect`.
        unsafe {
            match self.saved.take() {
                Some(value) => std::env::set_var(CONFIG_HOME_ENV, value),
                None => std::env::remove_var(CONFIG_HOME_ENV),
            }
        }
    }
}
