//! Global Allocator
//!
//! linked_list_allocator heap over a block of firmware pages claimed once
//! at entry. The boot chain never exits boot services, so the pages stay
//! ours until the second stage takes over.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            AllocatePages(EfiLoaderData, 4 MiB)               │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │         linked_list_allocator::Heap                 │   │
//! │  │   Free List: [block] -> [block] -> [block] -> ...  │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use core::alloc::{GlobalAlloc, Layout};
use core::ptr::NonNull;
use core::sync::atomic::{AtomicBool, Ordering};

use linked_list_allocator::Heap;
use liveboot_core::{log_info, status};

use crate::BootServices;

const HEAP_SIZE: usize = 4 * 1024 * 1024;
const PAGE_SIZE: usize = 4096;

const EFI_ALLOCATE_ANY_PAGES: usize = 0;
const EFI_LOADER_DATA: usize = 2;

/// Locked heap wrapper implementing GlobalAlloc
pub struct LockedHeap {
    inner: spin::Mutex<Heap>,
}

impl LockedHeap {
    pub const fn empty() -> Self {
        Self {
            inner: spin::Mutex::new(Heap::empty()),
        }
    }

    /// # Safety
    /// - Must be called exactly once
    /// - Memory region must be valid and not used elsewhere
    pub unsafe fn init(&self, start: *mut u8, size: usize) {
        self.inner.lock().init(start, size);
    }
}

unsafe impl GlobalAlloc for LockedHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        self.inner
            .lock()
            .allocate_first_fit(layout)
            .map(|nn| nn.as_ptr())
            .unwrap_or(core::ptr::null_mut())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if let Some(nn) = NonNull::new(ptr) {
            self.inner.lock().deallocate(nn, layout);
        }
    }
}

#[global_allocator]
static GLOBAL: LockedHeap = LockedHeap::empty();

static HEAP_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Claim the heap pages from the firmware. Safe to call again; only the
/// first call allocates.
///
/// # Safety
/// `bs` must be the live boot services table.
pub unsafe fn init_heap(bs: &BootServices) -> Result<(), usize> {
    if HEAP_INITIALIZED.load(Ordering::Acquire) {
        return Ok(());
    }

    let pages = HEAP_SIZE / PAGE_SIZE;
    let mut base = 0u64;
    let status = (bs.allocate_pages)(EFI_ALLOCATE_ANY_PAGES, EFI_LOADER_DATA, pages, &mut base);
    if status::is_error(status) || base == 0 {
        return Err(status::EFI_OUT_OF_RESOURCES);
    }

    GLOBAL.init(base as *mut u8, HEAP_SIZE);
    HEAP_INITIALIZED.store(true, Ordering::Release);
    log_info!("heap: {} KiB at {:#x}", HEAP_SIZE / 1024, base);
    Ok(())
}

pub fn heap_stats() -> HeapStats {
    let heap = GLOBAL.inner.lock();
    HeapStats {
        total_size: HEAP_SIZE,
        used: heap.used(),
        free: heap.free(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HeapStats {
    pub total_size: usize,
    pub used: usize,
    pub free: usize,
}
