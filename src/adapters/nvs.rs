//! NVS (Non-Volatile Storage) configuration adapter.
//!
//! Implements [`ConfigPort`] by storing [`MonitorConfig`] as a `postcard`
//! blob under one NVS key.
//!
//! - **ESP-IDF** (`espidf` feature on an `espidf` target): the blob lives
//!   in the default NVS partition, namespace `showerwatch`.  Commits are
//!   atomic per `nvs_commit()`.
//! - **Host**: an in-memory blob with the same encoding, for simulation
//!   and tests.
//!
//! Every load and save is range-checked with [`MonitorConfig::validate`].

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
use core::cell::RefCell;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::MonitorConfig;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use core::ffi::CStr;
#[cfg(all(target_os = "espidf", feature = "espidf"))]
use esp_idf_sys::*;
#[cfg(all(target_os = "espidf", feature = "espidf"))]
use log::warn;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
const CONFIG_NAMESPACE: &CStr = c"showerwatch";
#[cfg(all(target_os = "espidf", feature = "espidf"))]
const CONFIG_KEY: &CStr = c"monitorcfg";

/// Upper bound for the stored blob; a `MonitorConfig` encodes to a few
/// dozen bytes.
#[allow(dead_code)]
const MAX_BLOB_SIZE: usize = 256;

pub struct NvsConfigStore {
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    blob: RefCell<Option<Vec<u8>>>,
}

impl Default for NvsConfigStore {
    /// A store that skips flash initialisation.  On ESP-IDF every access
    /// then fails and `load` falls back to defaults.
    fn default() -> Self {
        Self {
            #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
            blob: RefCell::new(None),
        }
    }
}

impl NvsConfigStore {
    /// Initialise NVS flash and create the store.
    ///
    /// On first boot or after a layout change the partition is erased and
    /// re-initialised.  Returns `Err(ConfigError::IoError)` if that fails.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(all(target_os = "espidf", feature = "espidf"))]
        {
            // SAFETY: called once from the main task before any other NVS
            // access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsConfigStore: ESP-IDF NVS initialised");
        }

        #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
        info!("NvsConfigStore: simulation backend");

        Ok(Self::default())
    }

    /// Seed the simulated partition with raw bytes.
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    pub fn from_blob(bytes: Vec<u8>) -> Self {
        Self {
            blob: RefCell::new(Some(bytes)),
        }
    }

    /// Open the config namespace, run `f` with the handle, then close it.
    #[cfg(all(target_os = "espidf", feature = "espidf"))]
    fn with_nvs_handle<T>(
        write: bool,
        f: impl FnOnce(nvs_handle_t) -> Result<T, esp_err_t>,
    ) -> Result<T, esp_err_t> {
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };
        let mut handle: nvs_handle_t = 0;
        // SAFETY: the namespace is a NUL-terminated literal and `handle`
        // outlives the call.
        let ret = unsafe { nvs_open(CONFIG_NAMESPACE.as_ptr(), mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }
        let result = f(handle);
        // SAFETY: `handle` was opened above and is not used afterwards.
        unsafe { nvs_close(handle) };
        result
    }

    #[cfg(all(target_os = "espidf", feature = "espidf"))]
    fn read_blob() -> Result<Option<Vec<u8>>, esp_err_t> {
        Self::with_nvs_handle(false, |handle| {
            let mut size: usize = 0;
            // SAFETY: a null buffer asks NVS for the stored length only.
            let ret = unsafe {
                nvs_get_blob(handle, CONFIG_KEY.as_ptr(), core::ptr::null_mut(), &mut size)
            };
            if ret == ESP_ERR_NVS_NOT_FOUND {
                return Ok(None);
            }
            if ret != ESP_OK || size == 0 || size > MAX_BLOB_SIZE {
                return Err(ret);
            }

            let mut buf = vec![0u8; size];
            // SAFETY: `buf` holds exactly `size` bytes.
            let ret = unsafe {
                nvs_get_blob(handle, CONFIG_KEY.as_ptr(), buf.as_mut_ptr().cast(), &mut size)
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            buf.truncate(size);
            Ok(Some(buf))
        })
        .or_else(|e| if e == ESP_ERR_NVS_NOT_FOUND { Ok(None) } else { Err(e) })
    }

    #[cfg(all(target_os = "espidf", feature = "espidf"))]
    fn write_blob(bytes: &[u8]) -> Result<(), esp_err_t> {
        Self::with_nvs_handle(true, |handle| {
            // SAFETY: `bytes` is valid for `bytes.len()` reads.
            let ret = unsafe {
                nvs_set_blob(handle, CONFIG_KEY.as_ptr(), bytes.as_ptr().cast(), bytes.len())
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            // SAFETY: `handle` is open read-write.
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        })
    }

    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    fn read_blob(&self) -> Option<Vec<u8>> {
        self.blob.borrow().clone()
    }
}

fn decode(bytes: &[u8]) -> Result<MonitorConfig, ConfigError> {
    let cfg: MonitorConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
    cfg.validate()?;
    Ok(cfg)
}

impl ConfigPort for NvsConfigStore {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
        let stored = self.read_blob();

        #[cfg(all(target_os = "espidf", feature = "espidf"))]
        let stored = match Self::read_blob() {
            Ok(stored) => stored,
            Err(e) => {
                warn!("NvsConfigStore: NVS read error {}, using defaults", e);
                None
            }
        };

        match stored {
            Some(bytes) => {
                let cfg = decode(&bytes)?;
                info!("NvsConfigStore: loaded config ({} bytes)", bytes.len());
                Ok(cfg)
            }
            None => {
                info!("NvsConfigStore: no stored config, using defaults");
                Ok(MonitorConfig::default())
            }
        }
    }

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;

        #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
        {
            info!("NvsConfigStore: config saved (simulation, {} bytes)", bytes.len());
            *self.blob.borrow_mut() = Some(bytes);
            Ok(())
        }

        #[cfg(all(target_os = "espidf", feature = "espidf"))]
        {
            match Self::write_blob(&bytes) {
                Ok(()) => {
                    info!("NvsConfigStore: config saved to NVS ({} bytes)", bytes.len());
                    Ok(())
                }
                Err(e) => {
                    warn!("NvsConfigStore: NVS write error {}", e);
                    Err(ConfigError::IoError)
                }
            }
        }
    }
}
