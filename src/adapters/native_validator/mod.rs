//! Native validator bridge
//!
//! Binds the optional `video_validator` shared library. The library is
//! located and loaded once, on first use; when no candidate exists or the
//! load fails, the bridge stays disabled for its whole lifetime and every
//! call answers with the unavailable sentinel.

use libloading::Library;
use std::env::consts::DLL_SUFFIX;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_double, c_int};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Size of the message buffer handed to the validation entry point
pub const MESSAGE_BUFFER_LEN: usize = 256;

const DURATION_SYMBOL: &[u8] = b"py_get_video_duration\0";
const VALIDATE_SYMBOL: &[u8] = b"py_validate_story_video\0";

type DurationFn = unsafe extern "C" fn(*const c_char) -> c_double;
type ValidateFn = unsafe extern "C" fn(*const c_char, *mut c_char, c_int) -> c_int;

/// Loaded library with its bound entry points.
///
/// The function pointers are only valid while `_library` is alive; both live
/// and die together in this struct.
struct NativeLibrary {
    path: PathBuf,
    duration: DurationFn,
    validate: ValidateFn,
    _library: Library,
}

impl NativeLibrary {
    fn open(path: &Path) -> Result<Self, DomainError> {
        // SAFETY: loading runs the library's initializers; the artifact is
        // trusted by virtue of being installed at a configured location.
        let library = unsafe { Library::new(path) }
            .map_err(|e| DomainError::NativeUnavailable(format!("{}: {}", path.display(), e)))?;

        // SAFETY: the symbol types match the library's C declarations.
        let (duration, validate) = unsafe {
            let duration = *library
                .get::<DurationFn>(DURATION_SYMBOL)
                .map_err(|e| DomainError::NativeUnavailable(format!("{}: {}", path.display(), e)))?;
            let validate = *library
                .get::<ValidateFn>(VALIDATE_SYMBOL)
                .map_err(|e| DomainError::NativeUnavailable(format!("{}: {}", path.display(), e)))?;
            (duration, validate)
        };

        Ok(Self {
            path: path.to_path_buf(),
            duration,
            validate,
            _library: library,
        })
    }

    fn duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        let c_path = c_path(file_path)?;
        // SAFETY: `c_path` is NUL-terminated and outlives the call.
        let duration = unsafe { (self.duration)(c_path.as_ptr()) };
        Ok(duration)
    }

    fn validate(&self, file_path: &Path) -> Result<(bool, String), DomainError> {
        let c_path = c_path(file_path)?;
        let mut buffer = [0 as c_char; MESSAGE_BUFFER_LEN];

        // SAFETY: the buffer length passed matches the allocation, and the
        // library writes at most that many bytes.
        let flag = unsafe {
            (self.validate)(c_path.as_ptr(), buffer.as_mut_ptr(), MESSAGE_BUFFER_LEN as c_int)
        };

        buffer[MESSAGE_BUFFER_LEN - 1] = 0;
        // SAFETY: the last byte was forced to NUL above.
        let message = unsafe { CStr::from_ptr(buffer.as_ptr()) }
            .to_string_lossy()
            .into_owned();

        Ok((flag != 0, message))
    }
}

fn c_path(file_path: &Path) -> Result<CString, DomainError> {
    CString::new(file_path.to_string_lossy().as_bytes()).map_err(|_| {
        DomainError::NativeCallFailure(format!(
            "path contains an interior NUL byte: {}",
            file_path.display()
        ))
    })
}

/// File name of the library for this platform, e.g. `video_validator.so`
pub fn library_file_name(base_name: &str) -> String {
    format!("{}{}", base_name, DLL_SUFFIX)
}

/// Default candidates relative to the directory holding the executable
pub fn default_candidates(base_name: &str) -> Vec<PathBuf> {
    let file_name = library_file_name(base_name);
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    match exe_dir {
        Some(dir) => vec![
            dir.join(&file_name),
            dir.join("native").join(&file_name),
            dir.join("..").join("native-modules").join("cpp").join("build").join(&file_name),
        ],
        None => Vec::new(),
    }
}

/// Lazily loaded, load-once bridge to the native validator
pub struct NativeValidatorBridge {
    candidates: Vec<PathBuf>,
    enabled: bool,
    library: OnceLock<Option<NativeLibrary>>,
}

impl NativeValidatorBridge {
    /// Bridge probing `candidates` in order
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            enabled: true,
            library: OnceLock::new(),
        }
    }

    /// Bridge that never loads anything
    pub fn disabled() -> Self {
        Self {
            candidates: Vec::new(),
            enabled: false,
            library: OnceLock::new(),
        }
    }

    /// Configured paths first, then the locations next to the executable
    pub fn from_settings(enabled: bool, library_name: &str, extra_paths: &[PathBuf]) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let file_name = library_file_name(library_name);
        let mut candidates: Vec<PathBuf> = extra_paths
            .iter()
            .map(|p| if p.is_dir() { p.join(&file_name) } else { p.clone() })
            .collect();
        candidates.extend(default_candidates(library_name));

        Self::new(candidates)
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Path the library was loaded from, once loaded
    pub fn loaded_from(&self) -> Option<&Path> {
        self.handle().map(|lib| lib.path.as_path())
    }

    fn handle(&self) -> Option<&NativeLibrary> {
        self.library.get_or_init(|| self.load()).as_ref()
    }

    /// Only the first existing candidate is opened. If it fails to load or
    /// bind, later candidates are not tried and the bridge stays disabled.
    fn load(&self) -> Option<NativeLibrary> {
        if !self.enabled {
            info!("Native validator disabled by configuration");
            return None;
        }

        let Some(path) = self.candidates.iter().find(|p| p.is_file()) else {
            info!(
                "Native validator not found in {} candidate locations, using ffprobe only",
                self.candidates.len()
            );
            return None;
        };

        match NativeLibrary::open(path) {
            Ok(library) => {
                info!("Loaded native validator from {}", path.display());
                Some(library)
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}

impl NativeValidatorPort for NativeValidatorBridge {
    fn is_enabled(&self) -> bool {
        self.handle().is_some()
    }

    fn duration(&self, file_path: &Path) -> f64 {
        let Some(library) = self.handle() else {
            return UNKNOWN_DURATION;
        };

        match library.duration(file_path) {
            Ok(duration) => duration,
            Err(e) => {
                debug!("Native duration lookup failed: {}", e);
                UNKNOWN_DURATION
            }
        }
    }

    fn validate_story(&self, file_path: &Path) -> Result<NativeVerdict, DomainError> {
        let library = self.handle().ok_or_else(|| {
            DomainError::NativeUnavailable("native library not loaded".to_string())
        })?;

        let (is_valid, message) = library.validate(file_path)?;
        Ok(NativeVerdict {
            is_valid,
            duration: self.duration(file_path),
            message,
        })
    }
}
