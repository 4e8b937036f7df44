//! Scratch buffer pooling for the vectorized layer.
//!
//! In-place operations must remember which slots of their first operand were
//! missing before the raw kernel overwrites them, and order statistics need a
//! sortable copy of their input. Both borrow a `Vec` from a thread-local
//! `BufferPool` through a `PooledBuffer` guard. The guard clears the vector and
//! hands it back on drop, so release happens on every exit path (early `?`
//! returns and unwinding included) and stale contents are never observed.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

//==================================================================================
// 1. Pool & Guard
//==================================================================================

/// A single-threaded free list of reusable vectors.
pub struct BufferPool<T> {
    free: RefCell<Vec<Vec<T>>>,
    max_retained: usize,
}

impl<T> BufferPool<T> {
    /// At most `max_retained` idle buffers are kept; extra ones are dropped.
    pub const fn new(max_retained: usize) -> Self {
        BufferPool {
            free: RefCell::new(Vec::new()),
            max_retained,
        }
    }

    /// Borrows an empty buffer with room for at least `capacity` elements.
    pub fn acquire(&self, capacity: usize) -> PooledBuffer<'_, T> {
        let recycled = self.free.borrow_mut().pop();
        let mut buf = match recycled {
            Some(buf) => buf,
            None => {
                log::trace!("buffer pool miss, allocating capacity {}", capacity);
                Vec::with_capacity(capacity)
            }
        };
        buf.reserve(capacity);
        PooledBuffer { buf, pool: self }
    }

    /// Number of idle buffers waiting for reuse.
    pub fn retained(&self) -> usize {
        self.free.borrow().len()
    }

    fn release(&self, mut buf: Vec<T>) {
        buf.clear();
        let mut free = self.free.borrow_mut();
        if free.len() < self.max_retained {
            free.push(buf);
        }
    }
}

/// A buffer on loan from a `BufferPool`. Always empty when acquired.
pub struct PooledBuffer<'a, T> {
    buf: Vec<T>,
    pool: &'a BufferPool<T>,
}

impl<T> Deref for PooledBuffer<'_, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.buf
    }
}

impl<T> DerefMut for PooledBuffer<'_, T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.buf
    }
}

impl<T> Drop for PooledBuffer<'_, T> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

//==================================================================================
// 2. Thread-Local Pools
//==================================================================================

const MAX_RETAINED: usize = 4;

thread_local! {
    static MASK_POOL: BufferPool<bool> = const { BufferPool::new(MAX_RETAINED) };
    static F64_POOL: BufferPool<f64> = const { BufferPool::new(MAX_RETAINED) };
}

/// Runs `f` with an empty, pooled `Vec<bool>` of at least `capacity`.
pub fn with_mask_buffer<R>(capacity: usize, f: impl FnOnce(&mut Vec<bool>) -> R) -> R {
    MASK_POOL.with(|pool| {
        let mut buf = pool.acquire(capacity);
        f(&mut buf)
    })
}

/// Runs `f` with an empty, pooled `Vec<f64>` of at least `capacity`.
pub fn with_scratch_f64<R>(capacity: usize, f: impl FnOnce(&mut Vec<f64>) -> R) -> R {
    F64_POOL.with(|pool| {
        let mut buf = pool.acquire(capacity);
        f(&mut buf)
    })
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
