//! Native accelerator extensions loaded at runtime.
//!
//! An extension is a shared library exporting one C-ABI entry point:
//!
//! ```c
//! int my_cuda_function(const float *input, float *output, size_t len);
//! ```
//!
//! Buffers are host memory of `len` elements; the extension is responsible
//! for any device transfer. A non-zero return value is a kernel failure.

use std::ffi::c_int;
use std::path::{Path, PathBuf};

use libloading::Library;
use mlprobe_common::{ProbeError, Result};
use tracing::{debug, info};

use crate::AcceleratorKernel;

type KernelFn = unsafe extern "C" fn(input: *const f32, output: *mut f32, len: usize) -> c_int;

/// A kernel resolved from a shared library.
pub struct NativeExtension {
    path: PathBuf,
    symbol: String,
    func: KernelFn,
    // Keeps `func` valid; must outlive every call.
    _library: Library,
}

impl NativeExtension {
    /// Open the shared library at `path` and resolve `symbol`.
    ///
    /// An existing relative path is canonicalized first so the dynamic loader
    /// opens that file instead of searching its library path.
    pub fn load(path: &Path, symbol: &str) -> Result<Self> {
        let resolved = if path.exists() { path.canonicalize()? } else { path.to_path_buf() };
        debug!(path = %resolved.display(), symbol, "loading native extension");

        // SAFETY: loading runs the library's initialisers; the extension is
        // trusted by whoever configured its path.
        let library = unsafe { Library::new(&resolved) }.map_err(|e| {
            ProbeError::ExtensionLoad { path: resolved.clone(), reason: e.to_string() }
        })?;

        // SAFETY: the symbol is required to have the `KernelFn` signature
        // documented at the top of this module.
        let func: KernelFn = unsafe {
            let sym = library.get::<KernelFn>(symbol.as_bytes()).map_err(|_| {
                ProbeError::SymbolNotFound { path: resolved.clone(), symbol: symbol.to_string() }
            })?;
            *sym
        };

        info!(path = %resolved.display(), symbol, "native extension loaded");
        Ok(Self { path: resolved, symbol: symbol.to_string(), func, _library: library })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for NativeExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeExtension")
            .field("path", &self.path)
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}

impl AcceleratorKernel for NativeExtension {
    fn name(&self) -> &str {
        &self.symbol
    }

    fn launch(&self, input: &[f32]) -> Result<Vec<f32>> {
        let mut output = vec![0.0f32; input.len()];
        // SAFETY: both buffers hold `input.len()` elements and stay borrowed
        // for the duration of the call.
        let rc = unsafe { (self.func)(input.as_ptr(), output.as_mut_ptr(), input.len()) };
        if rc != 0 {
            return Err(ProbeError::KernelFailed { name: self.symbol.clone(), code: rc });
        }
        debug!(symbol = %self.symbol, len = input.len(), "kernel returned");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_library_is_load_error() {
        let err =
            NativeExtension::load(Path::new("/nonexistent/cuda_extension.so"), "my_cuda_function")
                .unwrap_err();
        match err {
            ProbeError::ExtensionLoad { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/cuda_extension.so"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_library_file_is_load_error() {
        let mut file = tempfile::Builder::new().suffix(".so").tempfile().unwrap();
        file.write_all(b"not an ELF object").unwrap();

        let err = NativeExtension::load(file.path(), "my_cuda_function").unwrap_err();
        assert!(matches!(err, ProbeError::ExtensionLoad { .. }), "{err}");
    }
}
