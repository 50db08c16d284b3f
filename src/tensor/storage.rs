//! Reference-counted device buffers

use crate::dtype::{DType, Element};
use crate::error::Result;
use crate::runtime::Runtime;
use std::sync::Arc;

/// A typed buffer of device memory owned by runtime `R`
///
/// Clones share the buffer. It is handed back to [`Runtime::deallocate`]
/// when the last clone is dropped. Kernels address it through [`Self::ptr`].
pub struct Storage<R: Runtime> {
    buffer: Arc<Buffer<R>>,
}

struct Buffer<R: Runtime> {
    ptr: u64,
    len: usize,
    dtype: DType,
    device: R::Device,
}

impl<R: Runtime> Buffer<R> {
    fn size_in_bytes(&self) -> usize {
        self.len * self.dtype.size_in_bytes()
    }
}

impl<R: Runtime> Storage<R> {
    fn wrap(ptr: u64, len: usize, dtype: DType, device: &R::Device) -> Self {
        Self {
            buffer: Arc::new(Buffer {
                ptr,
                len,
                dtype,
                device: device.clone(),
            }),
        }
    }

    /// Zero-initialised buffer of `len` elements of `dtype`
    pub fn zeroed(len: usize, dtype: DType, device: &R::Device) -> Result<Self> {
        let ptr = R::allocate(len * dtype.size_in_bytes(), device)?;
        Ok(Self::wrap(ptr, len, dtype, device))
    }

    /// Buffer holding a copy of `data`
    pub fn from_slice<T: Element>(data: &[T], device: &R::Device) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let ptr = R::allocate(bytes.len(), device)?;
        let storage = Self::wrap(ptr, data.len(), T::DTYPE, device);
        R::copy_to_device(bytes, ptr, device)?;
        Ok(storage)
    }

    /// Raw device address
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.buffer.ptr
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.buffer.dtype
    }

    /// Owning device
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.buffer.device
    }

    /// Copy the buffer back to the host as `T`s
    ///
    /// `T` must have the size of one element of [`Self::dtype`].
    pub fn to_vec<T: bytemuck::Pod>(&self) -> Result<Vec<T>> {
        let mut host = vec![T::zeroed(); self.buffer.len];
        R::copy_from_device(
            self.buffer.ptr,
            bytemuck::cast_slice_mut(&mut host),
            &self.buffer.device,
        )?;
        Ok(host)
    }
}

impl<R: Runtime> Clone for Storage<R> {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl<R: Runtime> Drop for Buffer<R> {
    fn drop(&mut self) {
        if self.ptr != 0 {
            R::deallocate(self.ptr, self.size_in_bytes(), &self.device);
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Storage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &format_args!("{:#x}", self.buffer.ptr))
            .field("len", &self.buffer.len)
            .field("dtype", &self.buffer.dtype)
            .field("shared", &Arc::strong_count(&self.buffer))
            .finish()
    }
}
